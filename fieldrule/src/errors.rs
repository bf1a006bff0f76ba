//! The per-field error aggregate.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::Error;

/// Field-name-keyed collection of validation failures.
///
/// Entries keep the position of their first insertion; inserting under a name
/// that is already present replaces the error in place. The [`Display`]
/// rendering joins entries with `"; "` and ends with a period, wrapping nested
/// aggregates in parentheses:
///
/// ```
/// use fieldrule::Errors;
///
/// let mut inner = Errors::new();
/// inner.insert("0", "error xyz");
/// let mut errors = Errors::new();
/// errors.insert("a", "error abc");
/// errors.insert("h", inner);
/// assert_eq!(errors.to_string(), "a: error abc; h: (0: error xyz.).");
/// ```
///
/// An empty aggregate renders as an empty string; use [`Errors::is_empty`] or
/// [`Errors::into_result`] instead of inspecting the text.
///
/// [`Display`]: fmt::Display
#[derive(Debug, Clone, Default)]
pub struct Errors {
    entries: Vec<(String, Error)>,
}

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds a failure for `name`, replacing any failure already recorded
    /// under the same name.
    pub fn insert(&mut self, name: impl Into<String>, err: impl Into<Error>) {
        let name = name.into();
        let err = err.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = err,
            None => self.entries.push((name, err)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Error> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, err)| err)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e))
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Moves every entry of `other` into `self` under its own name.
    pub fn merge(&mut self, other: Errors) {
        for (name, err) in other.entries {
            self.insert(name, err);
        }
    }

    /// `Ok(())` when empty, otherwise `Err(Error::Fields(self))`.
    pub fn into_result(self) -> Result<(), Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Fields(self))
        }
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, err)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            match err {
                Error::Fields(nested) => write!(f, "{name}: ({nested})")?,
                other => write!(f, "{name}: {other}")?,
            }
        }
        if !self.entries.is_empty() {
            f.write_str(".")?;
        }
        Ok(())
    }
}

impl std::error::Error for Errors {}

/// Serializes as a map from field name to message, nesting aggregates as maps.
impl Serialize for Errors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, err) in &self.entries {
            match err {
                Error::Fields(nested) => map.serialize_entry(name, nested)?,
                other => map.serialize_entry(name, &other.to_string())?,
            }
        }
        map.end()
    }
}

impl<K: Into<String>, E: Into<Error>> FromIterator<(K, E)> for Errors {
    fn from_iter<I: IntoIterator<Item = (K, E)>>(iter: I) -> Self {
        let mut errors = Errors::new();
        for (name, err) in iter {
            errors.insert(name, err);
        }
        errors
    }
}

impl IntoIterator for Errors {
    type Item = (String, Error);
    type IntoIter = std::vec::IntoIter<(String, Error)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InternalError, RuleError};
    use proptest::prelude::*;

    #[test]
    fn renders_in_insertion_order() {
        let mut errors = Errors::new();
        errors.insert("A", "error xyz");
        errors.insert("B", "error abc");
        assert_eq!(errors.to_string(), "A: error xyz; B: error abc.");
    }

    #[test]
    fn empty_renders_nothing() {
        let errors = Errors::new();
        assert_eq!(errors.to_string(), "");
        assert!(errors.into_result().is_ok());
    }

    #[test]
    fn overwrite_keeps_first_position() {
        let mut errors = Errors::new();
        errors.insert("a", "first");
        errors.insert("b", "second");
        errors.insert("a", "replaced");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.to_string(), "a: replaced; b: second.");
    }

    #[test]
    fn nested_aggregates_are_parenthesised() {
        let inner: Errors = [("0", "error xyz"), ("1", "error xyz")].into_iter().collect();
        let mut map_errors = Errors::new();
        map_errors.insert("foo", "error xyz");
        let mut errors = Errors::new();
        errors.insert("H", inner);
        errors.insert("I", map_errors);
        assert_eq!(
            errors.to_string(),
            "H: (0: error xyz; 1: error xyz.); I: (foo: error xyz.)."
        );
    }

    #[test]
    fn merge_uses_inner_names() {
        let mut outer = Errors::new();
        outer.insert("b", "cannot be blank");
        let inner: Errors = [("a", "error abc")].into_iter().collect();
        outer.merge(inner);
        assert_eq!(outer.names().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn serializes_as_nested_map() {
        let inner: Errors = [("a", "error abc")].into_iter().collect();
        let mut errors = Errors::new();
        errors.insert("name", RuleError::new("validation_required", "cannot be blank"));
        errors.insert("m3", inner);
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "cannot be blank", "m3": {"a": "error abc"}})
        );
    }

    #[test]
    fn into_result_wraps_failures() {
        let mut errors = Errors::new();
        errors.insert("x", InternalError::new("boom"));
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.as_fields().map(Errors::len), Some(1));
    }

    proptest! {
        #[test]
        fn rendering_follows_insertion_order(
            names in prop::collection::btree_set("[a-z]{1,6}", 1..8),
        ) {
            let names: Vec<String> = names.into_iter().rev().collect();
            let mut errors = Errors::new();
            for name in &names {
                errors.insert(name.clone(), format!("bad {name}"));
            }
            let expected = names
                .iter()
                .map(|n| format!("{n}: bad {n}"))
                .collect::<Vec<_>>()
                .join("; ");
            prop_assert_eq!(errors.to_string(), format!("{expected}."));
            prop_assert_eq!(errors.names().collect::<Vec<_>>(), names.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
