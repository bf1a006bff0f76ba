//! The rule abstraction and the skip directive.

use crate::context::Context;
use crate::error::Error;

/// How the orchestrator treats a chain element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// An ordinary check.
    Validator,
    /// A skip directive. When `active`, the rest of the chain and the field's
    /// self-validation are not run.
    Skip { active: bool },
}

/// A check applied to one value of type `T`.
///
/// Rules must not panic on well-typed input; a rule whose own logic fails
/// returns [`Error::Internal`].
pub trait Rule<T: ?Sized> {
    fn validate(&self, value: &T) -> Result<(), Error>;

    /// Context-aware form, used by the `*_with_context` entry points.
    /// Defaults to [`Rule::validate`].
    fn validate_with_context(&self, ctx: &Context, value: &T) -> Result<(), Error> {
        let _ = ctx;
        self.validate(value)
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Validator
    }
}

impl<T: ?Sized, R: Rule<T> + ?Sized> Rule<T> for &R {
    fn validate(&self, value: &T) -> Result<(), Error> {
        (**self).validate(value)
    }

    fn validate_with_context(&self, ctx: &Context, value: &T) -> Result<(), Error> {
        (**self).validate_with_context(ctx, value)
    }

    fn kind(&self) -> RuleKind {
        (**self).kind()
    }
}

impl<T: ?Sized, R: Rule<T> + ?Sized> Rule<T> for Box<R> {
    fn validate(&self, value: &T) -> Result<(), Error> {
        (**self).validate(value)
    }

    fn validate_with_context(&self, ctx: &Context, value: &T) -> Result<(), Error> {
        (**self).validate_with_context(ctx, value)
    }

    fn kind(&self) -> RuleKind {
        (**self).kind()
    }
}

/// Skip directive. Applies to values of any type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipRule {
    active: bool,
}

/// Unconditional skip: nothing after it in the chain runs.
pub const SKIP: SkipRule = SkipRule { active: true };

/// Skip directive that only takes effect when `condition` holds.
pub const fn skip_when(condition: bool) -> SkipRule {
    SkipRule { active: condition }
}

impl SkipRule {
    /// Conditional copy of this directive.
    pub const fn when(self, condition: bool) -> Self {
        Self {
            active: self.active && condition,
        }
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }
}

impl<T: ?Sized> Rule<T> for SkipRule {
    fn validate(&self, _value: &T) -> Result<(), Error> {
        Ok(())
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Skip {
            active: self.active,
        }
    }
}

/// A rule backed by a plain function. See [`by`].
#[derive(Clone, Copy)]
pub struct FnRule<F>(F);

/// Wraps `f` as a context-free rule.
///
/// ```
/// use fieldrule::{by, Error, Rule};
///
/// let even = by(|v: &u32| if v % 2 == 0 { Ok(()) } else { Err(Error::from("must be even")) });
/// assert!(even.validate(&4).is_ok());
/// ```
pub fn by<F>(f: F) -> FnRule<F> {
    FnRule(f)
}

impl<T: ?Sized, F: Fn(&T) -> Result<(), Error>> Rule<T> for FnRule<F> {
    fn validate(&self, value: &T) -> Result<(), Error> {
        (self.0)(value)
    }
}

/// A rule backed by a function that needs the context. See [`by_with_context`].
#[derive(Clone, Copy)]
pub struct ContextFnRule<F>(F);

/// Wraps `f` as a context-aware rule. Called through the context-free form it
/// receives [`Context::background`].
pub fn by_with_context<F>(f: F) -> ContextFnRule<F> {
    ContextFnRule(f)
}

impl<T: ?Sized, F: Fn(&Context, &T) -> Result<(), Error>> Rule<T> for ContextFnRule<F> {
    fn validate(&self, value: &T) -> Result<(), Error> {
        (self.0)(&Context::background(), value)
    }

    fn validate_with_context(&self, ctx: &Context, value: &T) -> Result<(), Error> {
        (self.0)(ctx, value)
    }
}
