//! Structural metadata of validated records.
//!
//! A [`Record`] exposes its fields, in declaration order, as
//! [`FieldDescriptor`]s. The layout is normally generated by
//! `#[derive(Record)]`; implementing the trait by hand is supported but every
//! descriptor must borrow the actual field (`&self.field`), otherwise field
//! references bound by callers will not be found.

use std::any::{Any, TypeId};
use std::fmt;

use crate::validatable::Validatable;

/// A struct whose fields can be located by reference.
pub trait Record: Any {
    /// All fields in declaration order.
    fn fields(&self) -> Vec<FieldDescriptor<'_>>;

    /// Type name used in diagnostics.
    fn record_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Resolved metadata about one field of a record.
#[derive(Clone)]
pub struct FieldDescriptor<'a> {
    name: &'static str,
    public: bool,
    tags: &'static [(&'static str, &'static str)],
    value: &'a dyn Any,
    embedded: bool,
    inner: Option<&'a dyn Record>,
    validatable: Option<&'a dyn Validatable>,
    embedded_path: Vec<&'static str>,
}

impl<'a> FieldDescriptor<'a> {
    /// Describes the field `name` whose storage is `value`.
    pub fn new<T: Any>(name: &'static str, value: &'a T) -> Self {
        Self {
            name,
            public: false,
            tags: &[],
            value,
            embedded: false,
            inner: None,
            validatable: None,
            embedded_path: Vec::new(),
        }
    }

    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// Declaration tags as `(key, value)` pairs, e.g. `("serde", "user_name")`.
    pub fn with_tags(mut self, tags: &'static [(&'static str, &'static str)]) -> Self {
        self.tags = tags;
        self
    }

    /// Marks the field as an embedded sub-record. `inner` is `None` when the
    /// field is a pointer-like wrapper currently holding nothing.
    pub fn embedded(mut self, inner: Option<&'a dyn Record>) -> Self {
        self.embedded = true;
        self.inner = inner;
        self
    }

    /// Marks the field value as self-validating.
    pub fn validatable(mut self, value: &'a dyn Validatable) -> Self {
        self.validatable = Some(value);
        self
    }

    /// Declared field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn tags(&self) -> &'static [(&'static str, &'static str)] {
        self.tags
    }

    /// Value of the first tag with the given key.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    pub fn value(&self) -> &'a dyn Any {
        self.value
    }

    pub fn type_id(&self) -> TypeId {
        (*self.value).type_id()
    }

    pub(crate) fn address(&self) -> *const () {
        self.value as *const dyn Any as *const ()
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// The embedded sub-record, if this field is one and it is present.
    pub fn embedded_record(&self) -> Option<&'a dyn Record> {
        self.inner
    }

    /// Self-validation capability of the value, if declared.
    pub fn as_validatable(&self) -> Option<&'a dyn Validatable> {
        self.validatable
    }

    /// Names of the embedded fields traversed to reach this field, outermost
    /// first. Empty for fields declared directly on the searched record.
    pub fn embedded_path(&self) -> &[&'static str] {
        &self.embedded_path
    }

    pub(crate) fn nest_under(&mut self, embedded_field: &'static str) {
        self.embedded_path.insert(0, embedded_field);
    }
}

impl fmt::Debug for FieldDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("public", &self.public)
            .field("tags", &self.tags)
            .field("embedded", &self.embedded)
            .field("validatable", &self.validatable.is_some())
            .field("embedded_path", &self.embedded_path)
            .finish()
    }
}

/// Access to a record through at most one level of `Box`/`Option`.
///
/// `#[derive(Record)]` implements this for the record type itself; the
/// wrappers below forward to it.
pub trait AsRecord {
    fn as_record(&self) -> Option<&dyn Record>;
}

impl<T: AsRecord + ?Sized> AsRecord for Box<T> {
    fn as_record(&self) -> Option<&dyn Record> {
        (**self).as_record()
    }
}

impl<T: AsRecord> AsRecord for Option<T> {
    fn as_record(&self) -> Option<&dyn Record> {
        self.as_ref().and_then(AsRecord::as_record)
    }
}

/// Classification of a validation target.
pub enum Instance<'a> {
    /// A reference to a record.
    Record(&'a dyn Record),
    /// A null reference; there is nothing to validate.
    Null,
    /// Anything else. Carries a short description for diagnostics.
    Invalid(&'static str),
}

impl fmt::Debug for Instance<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instance::Record(record) => f.debug_tuple("Record").field(&record.record_name()).finish(),
            Instance::Null => f.write_str("Null"),
            Instance::Invalid(kind) => f.debug_tuple("Invalid").field(kind).finish(),
        }
    }
}

/// Values accepted as the top-level argument of a struct validation.
///
/// `#[derive(Record)]` implements this for `&T` and `&mut T` (valid targets)
/// and for `T` and `&&T` (rejected with `NotAStructPointer`).
pub trait Target {
    fn instance(&self) -> Instance<'_>;
}

impl<'r, T: Record> Target for Option<&'r T> {
    fn instance(&self) -> Instance<'_> {
        match self {
            Some(record) => Instance::Record(*record),
            None => Instance::Null,
        }
    }
}

/// Arguments accepted where a field is bound.
///
/// A reference selects the field it points to; a value never does and is
/// reported as `FieldPointer` by the orchestrator.
///
/// Values are accepted for primitives, `String`, `Vec<T>`, `Option<T>` and
/// `#[derive(Record)]` types. Binding any other type by value (a `HashMap`,
/// an array, a `Box`, ...) does not compile instead of failing at run time.
pub trait Selector<'a> {
    type Target: Any;

    /// The referenced field, or `None` if a value was bound.
    fn select(self) -> Option<&'a Self::Target>;
}

impl<'a, T: Any> Selector<'a> for &'a T {
    type Target = T;

    fn select(self) -> Option<&'a T> {
        Some(self)
    }
}

impl<'a, T: Any> Selector<'a> for Vec<T> {
    type Target = Vec<T>;

    fn select(self) -> Option<&'a Vec<T>> {
        None
    }
}

impl<'a, T: Any> Selector<'a> for Option<T> {
    type Target = Option<T>;

    fn select(self) -> Option<&'a Option<T>> {
        None
    }
}

macro_rules! impl_value_kinds {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<'a> Selector<'a> for $ty {
                type Target = $ty;

                fn select(self) -> Option<&'a $ty> {
                    None
                }
            }

            impl Target for $ty {
                fn instance(&self) -> Instance<'_> {
                    Instance::Invalid(stringify!($ty))
                }
            }
        )*
    };
}

impl_value_kinds!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
);

impl Target for &str {
    fn instance(&self) -> Instance<'_> {
        Instance::Invalid("&str")
    }
}
