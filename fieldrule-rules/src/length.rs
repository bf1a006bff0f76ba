//! Length bounds.

use std::borrow::Cow;

use fieldrule::{Error, Rule, RuleError};

use crate::blank::HasLength;

/// Checks that a length lies within `[min, max]`. A bound of `0` is open,
/// except that `length(0, 0)` requires the value to be empty.
///
/// Empty values and `None` pass; combine with
/// [`REQUIRED`](crate::REQUIRED) to reject them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthRule {
    min: usize,
    max: usize,
    rune: bool,
    err: RuleError,
}

/// Byte length of strings, element count of collections.
pub fn length(min: usize, max: usize) -> LengthRule {
    LengthRule {
        min,
        max,
        rune: false,
        err: bounds_error(min, max),
    }
}

/// Like [`length`], but strings are measured in characters.
pub fn rune_length(min: usize, max: usize) -> LengthRule {
    LengthRule {
        rune: true,
        ..length(min, max)
    }
}

fn bounds_error(min: usize, max: usize) -> RuleError {
    match (min, max) {
        (0, 0) => RuleError::new("validation_length_empty_required", "the value must be empty"),
        (0, max) => RuleError::new("validation_length_too_long", "")
            .with_message(format!("the length must be no more than {max}")),
        (min, 0) => RuleError::new("validation_length_too_short", "")
            .with_message(format!("the length must be no less than {min}")),
        (min, max) if min == max => RuleError::new("validation_length_invalid", "")
            .with_message(format!("the length must be exactly {min}")),
        (min, max) => RuleError::new("validation_length_out_of_range", "")
            .with_message(format!("the length must be between {min} and {max}")),
    }
}

impl LengthRule {
    pub fn error(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.err = self.err.with_message(message);
        self
    }

    fn accepts(&self, len: usize) -> bool {
        let too_short = self.min > 0 && len < self.min;
        let too_long = self.max > 0 && len > self.max;
        let must_be_empty = self.min == 0 && self.max == 0;
        !(too_short || too_long || must_be_empty)
    }
}

impl<T: HasLength + ?Sized> Rule<T> for LengthRule {
    fn validate(&self, value: &T) -> Result<(), Error> {
        let len = if self.rune {
            value.rune_length()
        } else {
            value.length()
        };
        match len {
            None | Some(0) => Ok(()),
            Some(len) if self.accepts(len) => Ok(()),
            Some(_) => Err(self.err.clone().into()),
        }
    }
}
