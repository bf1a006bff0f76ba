use std::borrow::Cow;

use fieldrule::{Error, Rule, RuleError};
use regex::Regex;

/// Values that can be checked against a pattern.
pub trait AsText {
    /// The text to check, or `None` when there is no value.
    fn as_text(&self) -> Option<&str>;
}

impl AsText for str {
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl AsText for String {
    fn as_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: AsText> AsText for Option<T> {
    fn as_text(&self) -> Option<&str> {
        self.as_ref().and_then(AsText::as_text)
    }
}

impl<T: AsText + ?Sized> AsText for Box<T> {
    fn as_text(&self) -> Option<&str> {
        (**self).as_text()
    }
}

/// Requires text to match a regular expression. Empty text and `None` pass.
#[derive(Debug, Clone)]
pub struct MatchRule {
    re: Regex,
    err: RuleError,
}

/// The text must match `re`.
pub fn matches(re: Regex) -> MatchRule {
    MatchRule {
        re,
        err: RuleError::new("validation_match_invalid", "must be in a valid format"),
    }
}

/// Compiles `pattern` and builds a [`MatchRule`] from it.
pub fn matches_pattern(pattern: &str) -> Result<MatchRule, regex::Error> {
    Ok(matches(Regex::new(pattern)?))
}

impl MatchRule {
    pub fn error(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.err = self.err.with_message(message);
        self
    }
}

impl<T: AsText + ?Sized> Rule<T> for MatchRule {
    fn validate(&self, value: &T) -> Result<(), Error> {
        match value.as_text() {
            Some(text) if !text.is_empty() && !self.re.is_match(text) => Err(self.err.clone().into()),
            _ => Ok(()),
        }
    }
}
