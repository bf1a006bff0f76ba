//! Error types produced by the validation engine.
//!
//! Three disjoint kinds are distinguished:
//! 1. [`IntegrationError`] – the caller wired the engine up incorrectly
//!    (wrong target, a value bound instead of a field reference, a reference
//!    that does not belong to the record).
//! 2. Validation failures – [`Error::Rule`] for a single rule and
//!    [`Error::Fields`] for an aggregate keyed by field name.
//! 3. [`InternalError`] – a rule reporting that its own logic is broken.
//!
//! Kinds 1 and 3 abort a validation call; kind 2 is collected.

use std::borrow::Cow;
use std::sync::Arc;

use crate::errors::Errors;

/// Error returned by rules, self-validating values and the orchestrator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The engine was called with arguments it cannot work with.
    #[error(transparent)]
    Integration(#[from] IntegrationError),
    /// A rule implementation failed for reasons unrelated to the data.
    #[error(transparent)]
    Internal(#[from] InternalError),
    /// A single rule rejected the value.
    #[error(transparent)]
    Rule(#[from] RuleError),
    /// Per-field failures collected from a record or a collection.
    #[error(transparent)]
    Fields(#[from] Errors),
}

impl Error {
    /// Returns `true` for implementation failures.
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Internal(_))
    }

    /// Returns `true` for caller misuse of the engine.
    pub fn is_integration(&self) -> bool {
        matches!(self, Error::Integration(_))
    }

    /// Returns `true` when the error describes invalid data (as opposed to a
    /// broken rule or a broken call).
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Rule(_) | Error::Fields(_))
    }

    /// Per-field failures, if this is an aggregate.
    pub fn as_fields(&self) -> Option<&Errors> {
        match self {
            Error::Fields(errors) => Some(errors),
            _ => None,
        }
    }

    /// The single rule failure, if this is one.
    pub fn as_rule(&self) -> Option<&RuleError> {
        match self {
            Error::Rule(err) => Some(err),
            _ => None,
        }
    }

    /// Returns `true` if the error must abort the whole validation call.
    pub(crate) fn is_fatal(&self) -> bool {
        self.is_internal() || self.is_integration()
    }
}

impl From<&'static str> for Error {
    fn from(message: &'static str) -> Self {
        Error::Rule(RuleError::from(message))
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::Rule(RuleError::from(message))
    }
}

/// Caller misuse detected before any rule runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IntegrationError {
    /// The validation target is not a reference to a record.
    #[error("only a reference to a struct can be validated")]
    NotAStructPointer,
    /// The binding at this index was given a value instead of a field reference.
    #[error("field #{0} must be specified as a reference")]
    FieldPointer(usize),
    /// The binding at this index refers to something that is not a field of
    /// the record.
    #[error("field #{0} cannot be found in the struct")]
    FieldNotFound(usize),
}

/// A rule signalling that its own logic, not the data, is broken.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{inner}")]
pub struct InternalError {
    inner: Arc<dyn std::error::Error + Send + Sync>,
}

impl InternalError {
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            inner: Arc::from(err.into()),
        }
    }

    /// The underlying failure.
    pub fn get_ref(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.inner.as_ref()
    }
}

/// A single rule failure: a stable code plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RuleError {
    code: Cow<'static, str>,
    message: Cow<'static, str>,
}

impl RuleError {
    pub const fn new(code: &'static str, message: &'static str) -> Self {
        Self {
            code: Cow::Borrowed(code),
            message: Cow::Borrowed(message),
        }
    }

    /// Replace the message, keeping the code.
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Replace the code, keeping the message.
    pub fn with_code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.code = code.into();
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&'static str> for RuleError {
    fn from(message: &'static str) -> Self {
        Self::new("", message)
    }
}

impl From<String> for RuleError {
    fn from(message: String) -> Self {
        Self {
            code: Cow::Borrowed(""),
            message: Cow::Owned(message),
        }
    }
}

/// Returns the supplied error (converted with `Into`) from the enclosing
/// function if the condition is `false`.
///
/// ```
/// use fieldrule::{require, Error, RuleError};
///
/// fn positive(v: &i64) -> Result<(), Error> {
///     require!(*v > 0, RuleError::new("validation_positive", "must be positive"));
///     Ok(())
/// }
///
/// assert!(positive(&3).is_ok());
/// assert_eq!(positive(&0).unwrap_err().to_string(), "must be positive");
/// ```
#[macro_export]
macro_rules! require {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($err.into());
        }
    };
}
