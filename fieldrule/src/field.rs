//! Rule bindings: a field reference plus its ordered rule chain.

use std::any::Any;

use crate::context::Context;
use crate::error::Error;
use crate::locate::FieldSelector;
use crate::record::Selector;
use crate::rule::{Rule, RuleKind};

/// Result of running one field's chain.
#[derive(Debug, Clone)]
pub enum ChainOutcome {
    /// Every reachable rule accepted the value.
    Passed,
    /// An active skip directive was reached before any failure.
    Skipped,
    /// The first failing rule's error.
    Failed(Error),
}

/// Type-erased binding consumed by the orchestrator.
pub trait Binding {
    /// Identity of the bound field, or `None` when a value was bound instead
    /// of a reference.
    fn selector(&self) -> Option<FieldSelector>;

    /// Whether the chain holds at least one rule that is not a skip directive.
    fn has_validators(&self) -> bool;

    /// Runs the chain against the bound value. `ctx` selects the
    /// context-aware form of each rule.
    fn run(&self, ctx: Option<&Context>) -> ChainOutcome;
}

/// Builder for the binding of one field of type `T`.
///
/// Usually built through the [`field!`](crate::field) macro.
pub struct FieldRules<'a, T: Any> {
    value: Option<&'a T>,
    rules: Vec<Box<dyn Rule<T> + 'a>>,
}

impl<'a, T: Any> FieldRules<'a, T> {
    pub fn new<S: Selector<'a, Target = T>>(selector: S) -> Self {
        Self {
            value: selector.select(),
            rules: Vec::new(),
        }
    }

    /// Appends a rule to the chain.
    pub fn rule<R: Rule<T> + 'a>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn boxed(self) -> Box<dyn Binding + 'a> {
        Box::new(self)
    }
}

impl<T: Any> Binding for FieldRules<'_, T> {
    fn selector(&self) -> Option<FieldSelector> {
        self.value.map(FieldSelector::of)
    }

    fn has_validators(&self) -> bool {
        self.rules.iter().any(|r| r.kind() == RuleKind::Validator)
    }

    fn run(&self, ctx: Option<&Context>) -> ChainOutcome {
        match self.value {
            Some(value) => run_chain(&self.rules, ctx, value),
            None => ChainOutcome::Passed,
        }
    }
}

/// Evaluates `rules` left to right against `value`.
///
/// An active skip directive ends the chain; an inactive one is ignored. The
/// first failure ends the chain and is returned.
pub(crate) fn run_chain<T: ?Sized, R: Rule<T>>(
    rules: &[R],
    ctx: Option<&Context>,
    value: &T,
) -> ChainOutcome {
    for rule in rules {
        match rule.kind() {
            RuleKind::Skip { active: true } => return ChainOutcome::Skipped,
            RuleKind::Skip { active: false } => continue,
            RuleKind::Validator => {}
        }
        let result = match ctx {
            Some(ctx) => rule.validate_with_context(ctx, value),
            None => rule.validate(value),
        };
        if let Err(err) = result {
            return ChainOutcome::Failed(err);
        }
    }
    ChainOutcome::Passed
}

/// Builds a boxed [`Binding`] from a field reference and zero or more rules.
///
/// ```
/// use fieldrule::{field, validate_struct, by, Error, Record, SKIP};
///
/// #[derive(Record)]
/// struct Login {
///     user: String,
///     password: String,
/// }
///
/// let non_empty = |v: &String| -> Result<(), Error> {
///     fieldrule::require!(!v.is_empty(), "cannot be blank");
///     Ok(())
/// };
///
/// let login = Login { user: String::new(), password: String::new() };
/// let err = validate_struct(&login, [
///     field!(&login.user, by(non_empty)),
///     field!(&login.password, SKIP, by(non_empty)),
/// ])
/// .unwrap_err();
/// assert_eq!(err.to_string(), "user: cannot be blank.");
/// ```
#[macro_export]
macro_rules! field {
    ($selector:expr $(, $rule:expr)* $(,)?) => {
        $crate::FieldRules::new($selector)$(.rule($rule))*.boxed()
    };
}
