//! Field identity resolution.
//!
//! A field is identified by the reference a caller took to it: the selector
//! matches a field when the addresses are equal *and* the types are the same.
//! The type check matters because an embedded record shares its address with
//! its own first field.

use std::any::{Any, TypeId};

use crate::record::{FieldDescriptor, Record};

/// Address and type of a field reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSelector {
    address: *const (),
    type_id: TypeId,
}

impl FieldSelector {
    pub fn of<T: Any>(field: &T) -> Self {
        Self {
            address: field as *const T as *const (),
            type_id: TypeId::of::<T>(),
        }
    }

    pub fn matches(&self, field: &FieldDescriptor<'_>) -> bool {
        self.address == field.address() && self.type_id == field.type_id()
    }
}

/// Finds the field of `record` that `selector` refers to.
///
/// Fields are searched in declaration order. Embedded sub-records are searched
/// in place, before the next sibling, as if their fields were declared on
/// `record`; a match inside one keeps its own declared name and records the
/// embedding in [`FieldDescriptor::embedded_path`].
///
/// Zero-sized fields of the same type (`()`, `PhantomData<T>`, unit structs)
/// may share one address and are then indistinguishable; a reference to any
/// of them resolves to the first one declared.
pub fn find_field<'a>(
    record: &'a dyn Record,
    selector: &FieldSelector,
) -> Option<FieldDescriptor<'a>> {
    for field in record.fields() {
        if selector.matches(&field) {
            return Some(field);
        }
        if let Some(inner) = field.embedded_record() {
            if let Some(mut found) = find_field(inner, selector) {
                found.nest_under(field.name());
                return Some(found);
            }
        }
    }
    None
}
