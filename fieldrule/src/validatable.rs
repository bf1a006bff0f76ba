//! Values that know how to validate themselves.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::BuildHasher;

use crate::context::Context;
use crate::error::Error;
use crate::errors::Errors;

/// A value that validates itself, typically a record whose implementation
/// calls [`validate_struct`](crate::validate_struct) on its own fields.
///
/// Fields marked `#[field(validate)]` are validated through this trait when
/// their binding carries no explicit rule.
pub trait Validatable {
    fn validate(&self) -> Result<(), Error>;

    /// Context-aware form. Defaults to [`Validatable::validate`].
    fn validate_with_context(&self, ctx: &Context) -> Result<(), Error> {
        let _ = ctx;
        self.validate()
    }
}

impl<T: Validatable + ?Sized> Validatable for Box<T> {
    fn validate(&self) -> Result<(), Error> {
        (**self).validate()
    }

    fn validate_with_context(&self, ctx: &Context) -> Result<(), Error> {
        (**self).validate_with_context(ctx)
    }
}

/// `None` has nothing to validate.
impl<T: Validatable> Validatable for Option<T> {
    fn validate(&self) -> Result<(), Error> {
        match self {
            Some(value) => value.validate(),
            None => Ok(()),
        }
    }

    fn validate_with_context(&self, ctx: &Context) -> Result<(), Error> {
        match self {
            Some(value) => value.validate_with_context(ctx),
            None => Ok(()),
        }
    }
}

impl<T: Validatable> Validatable for [T] {
    fn validate(&self) -> Result<(), Error> {
        validate_entries(indexed(self), |v| v.validate())
    }

    fn validate_with_context(&self, ctx: &Context) -> Result<(), Error> {
        validate_entries(indexed(self), |v| v.validate_with_context(ctx))
    }
}

impl<T: Validatable> Validatable for Vec<T> {
    fn validate(&self) -> Result<(), Error> {
        self.as_slice().validate()
    }

    fn validate_with_context(&self, ctx: &Context) -> Result<(), Error> {
        self.as_slice().validate_with_context(ctx)
    }
}

impl<K: Display, V: Validatable> Validatable for BTreeMap<K, V> {
    fn validate(&self) -> Result<(), Error> {
        validate_entries(keyed(self.iter()), |v| v.validate())
    }

    fn validate_with_context(&self, ctx: &Context) -> Result<(), Error> {
        validate_entries(keyed(self.iter()), |v| v.validate_with_context(ctx))
    }
}

/// Entries are visited in key order so the aggregate is deterministic.
impl<K: Display + Ord, V: Validatable, S: BuildHasher> Validatable for HashMap<K, V, S> {
    fn validate(&self) -> Result<(), Error> {
        validate_entries(keyed(sorted(self)), |v| v.validate())
    }

    fn validate_with_context(&self, ctx: &Context) -> Result<(), Error> {
        validate_entries(keyed(sorted(self)), |v| v.validate_with_context(ctx))
    }
}

fn indexed<T>(items: &[T]) -> impl Iterator<Item = (String, &T)> {
    items.iter().enumerate().map(|(i, v)| (i.to_string(), v))
}

fn keyed<'v, K: Display + 'v, V: 'v>(
    entries: impl Iterator<Item = (&'v K, &'v V)>,
) -> impl Iterator<Item = (String, &'v V)> {
    entries.map(|(k, v)| (k.to_string(), v))
}

fn sorted<K: Ord, V, S>(map: &HashMap<K, V, S>) -> std::vec::IntoIter<(&K, &V)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries.into_iter()
}

/// Validates each entry, keying failures by the entry name. Internal and
/// integration failures abort immediately.
pub(crate) fn validate_entries<'v, V: ?Sized + 'v>(
    entries: impl Iterator<Item = (String, &'v V)>,
    check: impl Fn(&V) -> Result<(), Error>,
) -> Result<(), Error> {
    let mut errors = Errors::new();
    for (key, value) in entries {
        if let Err(err) = check(value) {
            if err.is_fatal() {
                return Err(err);
            }
            errors.insert(key, err);
        }
    }
    errors.into_result()
}
