//! Presence rules.

use std::borrow::Cow;

use fieldrule::{Error, Rule, RuleError};

use crate::blank::Blank;

/// Fails when the value is [blank](Blank).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredRule {
    err: RuleError,
}

/// The value must not be blank.
pub const REQUIRED: RequiredRule = RequiredRule {
    err: RuleError::new("validation_required", "cannot be blank"),
};

impl RequiredRule {
    /// Same rule with a different message.
    pub fn error(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.err = self.err.with_message(message);
        self
    }
}

impl<T: Blank + ?Sized> Rule<T> for RequiredRule {
    fn validate(&self, value: &T) -> Result<(), Error> {
        if value.is_blank() {
            return Err(self.err.clone().into());
        }
        Ok(())
    }
}

/// Fails when an `Option` is `None`. A present but blank value passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotNilRule {
    err: RuleError,
}

/// The `Option` must hold a value.
pub const NOT_NIL: NotNilRule = NotNilRule {
    err: RuleError::new("validation_not_nil_required", "is required"),
};

impl NotNilRule {
    pub fn error(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.err = self.err.with_message(message);
        self
    }
}

impl<T> Rule<Option<T>> for NotNilRule {
    fn validate(&self, value: &Option<T>) -> Result<(), Error> {
        match value {
            Some(_) => Ok(()),
            None => Err(self.err.clone().into()),
        }
    }
}

/// Passes on `None`; fails on `Some(v)` when `v` is blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NilOrNotEmptyRule {
    err: RuleError,
}

/// An `Option` may be absent, but if present it must not be blank.
pub const NIL_OR_NOT_EMPTY: NilOrNotEmptyRule = NilOrNotEmptyRule {
    err: RuleError::new("validation_nil_or_not_empty_required", "cannot be blank"),
};

impl NilOrNotEmptyRule {
    pub fn error(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.err = self.err.with_message(message);
        self
    }
}

impl<T: Blank> Rule<Option<T>> for NilOrNotEmptyRule {
    fn validate(&self, value: &Option<T>) -> Result<(), Error> {
        match value {
            Some(inner) if inner.is_blank() => Err(self.err.clone().into()),
            _ => Ok(()),
        }
    }
}
