use std::borrow::Cow;

use fieldrule::{Error, Rule, RuleError};

use crate::blank::Blank;

/// Accepts only values equal to one of a fixed set. Blank values pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InRule<E> {
    values: Vec<E>,
    err: RuleError,
}

/// The value must equal one of `values`.
///
/// ```
/// use fieldrule::Rule;
/// use fieldrule_rules::is_in;
///
/// let status = is_in(["open", "closed"]);
/// assert!(status.validate(&"open".to_string()).is_ok());
/// assert!(status.validate(&"pending".to_string()).is_err());
/// ```
pub fn is_in<E>(values: impl IntoIterator<Item = E>) -> InRule<E> {
    InRule {
        values: values.into_iter().collect(),
        err: RuleError::new("validation_in_invalid", "must be a valid value"),
    }
}

impl<E> InRule<E> {
    pub fn error(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.err = self.err.with_message(message);
        self
    }
}

impl<T: Blank + PartialEq<E> + ?Sized, E> Rule<T> for InRule<E> {
    fn validate(&self, value: &T) -> Result<(), Error> {
        if value.is_blank() || self.values.iter().any(|candidate| value == candidate) {
            return Ok(());
        }
        Err(self.err.clone().into())
    }
}
