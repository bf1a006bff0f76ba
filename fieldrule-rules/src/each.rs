//! Element-wise validation of collections.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::BuildHasher;

use fieldrule::{validate_value, validate_value_with_context, Context, Error, Errors, Rule};

/// Applies one rule to every element of a collection. See [`each`].
#[derive(Debug, Clone)]
pub struct EachRule<R> {
    rule: R,
}

/// Validates every element with `rule`.
///
/// Failures are collected into a nested [`Errors`] keyed by index (sequences)
/// or by key (maps, in key order). An internal failure from any element
/// aborts immediately.
pub fn each<R>(rule: R) -> EachRule<R> {
    EachRule { rule }
}

impl<R> EachRule<R> {
    fn check<'v, T: 'v + ?Sized>(
        &self,
        ctx: Option<&Context>,
        entries: impl Iterator<Item = (String, &'v T)>,
    ) -> Result<(), Error>
    where
        R: Rule<T>,
    {
        let mut errors = Errors::new();
        for (key, value) in entries {
            let result = match ctx {
                Some(ctx) => validate_value_with_context(ctx, value, &[&self.rule]),
                None => validate_value(value, &[&self.rule]),
            };
            match result {
                Err(err) if err.is_internal() || err.is_integration() => return Err(err),
                Err(err) => errors.insert(key, err),
                Ok(()) => {}
            }
        }
        errors.into_result()
    }
}

fn indexed<T>(items: &[T]) -> impl Iterator<Item = (String, &T)> {
    items.iter().enumerate().map(|(i, v)| (i.to_string(), v))
}

fn sorted<K: Display + Ord, V, S>(map: &HashMap<K, V, S>) -> impl Iterator<Item = (String, &V)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries.into_iter().map(|(k, v)| (k.to_string(), v))
}

impl<T, R: Rule<T>> Rule<[T]> for EachRule<R> {
    fn validate(&self, value: &[T]) -> Result<(), Error> {
        self.check(None, indexed(value))
    }

    fn validate_with_context(&self, ctx: &Context, value: &[T]) -> Result<(), Error> {
        self.check(Some(ctx), indexed(value))
    }
}

impl<T, R: Rule<T>> Rule<Vec<T>> for EachRule<R> {
    fn validate(&self, value: &Vec<T>) -> Result<(), Error> {
        self.check(None, indexed(value))
    }

    fn validate_with_context(&self, ctx: &Context, value: &Vec<T>) -> Result<(), Error> {
        self.check(Some(ctx), indexed(value))
    }
}

impl<K: Display + Ord, V, S: BuildHasher, R: Rule<V>> Rule<HashMap<K, V, S>> for EachRule<R> {
    fn validate(&self, value: &HashMap<K, V, S>) -> Result<(), Error> {
        self.check(None, sorted(value))
    }

    fn validate_with_context(&self, ctx: &Context, value: &HashMap<K, V, S>) -> Result<(), Error> {
        self.check(Some(ctx), sorted(value))
    }
}

impl<K: Display, V, R: Rule<V>> Rule<BTreeMap<K, V>> for EachRule<R> {
    fn validate(&self, value: &BTreeMap<K, V>) -> Result<(), Error> {
        self.check(None, value.iter().map(|(k, v)| (k.to_string(), v)))
    }

    fn validate_with_context(&self, ctx: &Context, value: &BTreeMap<K, V>) -> Result<(), Error> {
        self.check(Some(ctx), value.iter().map(|(k, v)| (k.to_string(), v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{by, REQUIRED};
    use fieldrule::InternalError;

    fn abc(v: &String) -> Result<(), Error> {
        match v.as_str() {
            "abc" => Ok(()),
            "internal" => Err(InternalError::new("error internal").into()),
            _ => Err("error abc".into()),
        }
    }

    #[test]
    fn sequences_are_keyed_by_index() {
        let items = vec!["abc".to_string(), "xyz".to_string(), "".to_string()];
        let err = each(by(abc)).validate(&items).unwrap_err();
        assert_eq!(err.to_string(), "1: error abc; 2: error abc.");

        let err = each(REQUIRED).validate(items.as_slice()).unwrap_err();
        assert_eq!(err.to_string(), "2: cannot be blank.");
    }

    #[test]
    fn maps_are_keyed_in_order() {
        let mut map = HashMap::new();
        map.insert("zed", "xyz".to_string());
        map.insert("alpha", "nope".to_string());
        map.insert("mid", "abc".to_string());
        let err = each(by(abc)).validate(&map).unwrap_err();
        assert_eq!(err.to_string(), "alpha: error abc; zed: error abc.");

        let tree: BTreeMap<u32, String> = [(2, "abc".to_string()), (1, "no".to_string())].into();
        let err = each(by(abc)).validate(&tree).unwrap_err();
        assert_eq!(err.as_fields().map(Errors::len), Some(1));
    }

    #[test]
    fn all_valid_passes() {
        let items = vec!["abc".to_string(), "abc".to_string()];
        assert!(each(by(abc)).validate(&items).is_ok());
        assert!(each(by(abc)).validate(&Vec::<String>::new()).is_ok());
    }

    #[test]
    fn internal_failures_propagate() {
        let items = vec!["bad".to_string(), "internal".to_string()];
        let err = each(by(abc))
            .validate_with_context(&Context::background(), &items)
            .unwrap_err();
        assert!(err.is_internal());
    }
}
