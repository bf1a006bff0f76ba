//! The validation orchestrator and its entry points.

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, debug_span, trace, warn};

use crate::config::ValidatorConfig;
use crate::context::Context;
use crate::error::{Error, IntegrationError};
use crate::errors::Errors;
use crate::field::{run_chain, Binding, ChainOutcome};
use crate::locate::find_field;
use crate::naming::{NamingPolicy, TagNaming};
use crate::record::{FieldDescriptor, Instance, Target};
use crate::rule::Rule;
use crate::validatable::Validatable;

thread_local! {
    static ACTIVE: RefCell<Vec<Validator>> = const { RefCell::new(Vec::new()) };
}

/// Marks a validator as the one nested free-function calls resolve to, until
/// dropped.
struct ActiveScope;

impl ActiveScope {
    fn enter(validator: &Validator) -> Self {
        ACTIVE.with(|active| active.borrow_mut().push(validator.clone()));
        ActiveScope
    }
}

impl Drop for ActiveScope {
    fn drop(&mut self) {
        ACTIVE.with(|active| {
            active.borrow_mut().pop();
        });
    }
}

/// Runs rule bindings against records.
///
/// A `Validator` only holds its naming policy; it is cheap to clone and can be
/// shared between threads.
///
/// While a validator runs, it is the *current* validator of the thread: the
/// free functions ([`validate_struct`] and friends) called from nested
/// [`Validatable`] impls use it instead of [`Validator::default`], so the
/// naming policy applies at every depth. Nested validation moved to another
/// thread does not inherit it.
#[derive(Clone)]
pub struct Validator {
    naming: Arc<dyn NamingPolicy>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::with_naming(TagNaming::default())
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator").finish_non_exhaustive()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self {
            naming: config.naming(),
        }
    }

    pub fn with_naming(naming: impl NamingPolicy + 'static) -> Self {
        Self {
            naming: Arc::new(naming),
        }
    }

    pub fn naming(&self) -> &dyn NamingPolicy {
        self.naming.as_ref()
    }

    /// The validator currently running on this thread, or the default one.
    pub fn current() -> Self {
        ACTIVE
            .with(|active| active.borrow().last().cloned())
            .unwrap_or_default()
    }

    /// Runs `value`'s own validation with this validator current.
    pub fn validate<V: Validatable + ?Sized>(&self, value: &V) -> Result<(), Error> {
        let _scope = ActiveScope::enter(self);
        value.validate()
    }

    pub fn validate_with_context<V: Validatable + ?Sized>(
        &self,
        ctx: &Context,
        value: &V,
    ) -> Result<(), Error> {
        let _scope = ActiveScope::enter(self);
        value.validate_with_context(ctx)
    }

    /// Validates the fields of `target` with the given bindings.
    ///
    /// Returns `Ok(())` when every chain passed (or when `target` is null),
    /// `Err(Error::Fields(..))` with one entry per failing field, or an
    /// integration/internal error that aborted the call.
    pub fn validate_struct<'a, S: Target>(
        &self,
        target: S,
        fields: impl IntoIterator<Item = Box<dyn Binding + 'a>>,
    ) -> Result<(), Error> {
        self.run(None, target.instance(), fields)
    }

    /// Context-aware form of [`Validator::validate_struct`]: every rule and
    /// self-validation receives `ctx`.
    pub fn validate_struct_with_context<'a, S: Target>(
        &self,
        ctx: &Context,
        target: S,
        fields: impl IntoIterator<Item = Box<dyn Binding + 'a>>,
    ) -> Result<(), Error> {
        self.run(Some(ctx), target.instance(), fields)
    }

    fn run<'a>(
        &self,
        ctx: Option<&Context>,
        instance: Instance<'_>,
        fields: impl IntoIterator<Item = Box<dyn Binding + 'a>>,
    ) -> Result<(), Error> {
        let record = match instance {
            Instance::Record(record) => record,
            Instance::Null => return Ok(()),
            Instance::Invalid(kind) => {
                warn!(target_kind = kind, "validation target is not a record reference");
                return Err(IntegrationError::NotAStructPointer.into());
            }
        };

        let span = debug_span!("validate_struct", record = record.record_name());
        let _enter = span.enter();
        let _scope = ActiveScope::enter(self);

        let mut errors = Errors::new();
        for (index, binding) in fields.into_iter().enumerate() {
            let Some(selector) = binding.selector() else {
                warn!(index, "field bound by value");
                return Err(IntegrationError::FieldPointer(index).into());
            };
            let Some(field) = find_field(record, &selector) else {
                warn!(index, "bound reference is not a field of the record");
                return Err(IntegrationError::FieldNotFound(index).into());
            };
            trace!(index, field = field.name(), "resolved field");

            let failure = match binding.run(ctx) {
                ChainOutcome::Failed(err) => err,
                ChainOutcome::Skipped => {
                    trace!(field = field.name(), "chain skipped");
                    continue;
                }
                ChainOutcome::Passed if binding.has_validators() => continue,
                ChainOutcome::Passed => match validate_self(&field, ctx) {
                    Ok(()) => continue,
                    Err(err) => err,
                },
            };

            if failure.is_fatal() {
                warn!(field = field.name(), error = %failure, "validation aborted");
                return Err(failure);
            }
            match failure {
                Error::Fields(nested) if field.is_embedded() => {
                    debug!(field = field.name(), failures = nested.len(), "merging embedded failures");
                    errors.merge(nested);
                }
                failure => {
                    let name = self.naming.error_name(&field);
                    debug!(field = %name, error = %failure, "field failed");
                    errors.insert(name, failure);
                }
            }
        }
        errors.into_result()
    }
}

fn validate_self(field: &FieldDescriptor<'_>, ctx: Option<&Context>) -> Result<(), Error> {
    match (field.as_validatable(), ctx) {
        (Some(value), Some(ctx)) => value.validate_with_context(ctx),
        (Some(value), None) => value.validate(),
        (None, _) => Ok(()),
    }
}

/// [`Validator::validate_struct`] with the [current](Validator::current)
/// validator.
pub fn validate_struct<'a, S: Target>(
    target: S,
    fields: impl IntoIterator<Item = Box<dyn Binding + 'a>>,
) -> Result<(), Error> {
    Validator::current().validate_struct(target, fields)
}

/// [`Validator::validate_struct_with_context`] with the
/// [current](Validator::current) validator.
pub fn validate_struct_with_context<'a, S: Target>(
    ctx: &Context,
    target: S,
    fields: impl IntoIterator<Item = Box<dyn Binding + 'a>>,
) -> Result<(), Error> {
    Validator::current().validate_struct_with_context(ctx, target, fields)
}

/// Runs a value's own validation.
pub fn validate<V: Validatable + ?Sized>(value: &V) -> Result<(), Error> {
    Validator::current().validate(value)
}

pub fn validate_with_context<V: Validatable + ?Sized>(ctx: &Context, value: &V) -> Result<(), Error> {
    Validator::current().validate_with_context(ctx, value)
}

/// Runs an explicit rule chain against a single value, with the same skip and
/// first-failure semantics as a field binding.
pub fn validate_value<T: ?Sized>(value: &T, rules: &[&dyn Rule<T>]) -> Result<(), Error> {
    chain_result(run_chain(rules, None, value))
}

pub fn validate_value_with_context<T: ?Sized>(
    ctx: &Context,
    value: &T,
    rules: &[&dyn Rule<T>],
) -> Result<(), Error> {
    chain_result(run_chain(rules, Some(ctx), value))
}

fn chain_result(outcome: ChainOutcome) -> Result<(), Error> {
    match outcome {
        ChainOutcome::Failed(err) => Err(err),
        ChainOutcome::Passed | ChainOutcome::Skipped => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InternalError;
    use crate::naming::DeclaredNaming;
    use crate::rule::{by, SKIP};
    use crate::{field, Record};

    #[derive(Record, Default)]
    struct Account {
        #[serde(rename = "user_name")]
        name: String,
        email: String,
        #[field(embed, validate)]
        address: Address,
    }

    #[derive(Record, Default)]
    struct Address {
        city: String,
    }

    impl Validatable for Address {
        fn validate(&self) -> Result<(), Error> {
            validate_struct(self, [field!(&self.city, by(not_blank))])
        }
    }

    fn not_blank(v: &String) -> Result<(), Error> {
        crate::require!(!v.is_empty(), "cannot be blank");
        Ok(())
    }

    fn broken(_: &String) -> Result<(), Error> {
        Err(InternalError::new("lookup failed").into())
    }

    #[test]
    fn null_and_empty_inputs_pass() {
        let account = Account::default();
        assert!(validate_struct(None::<&Account>, Vec::new()).is_ok());
        assert!(validate_struct(&account, Vec::new()).is_ok());
    }

    #[test]
    fn non_record_targets_are_rejected() {
        let err = validate_struct(7u32, Vec::new()).unwrap_err();
        assert!(err.is_integration());
    }

    #[test]
    fn failures_use_visible_names() {
        let account = Account::default();
        let err = validate_struct(
            &account,
            [field!(&account.name, by(not_blank)), field!(&account.email, by(not_blank))],
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "user_name: cannot be blank; email: cannot be blank.");

        let declared = Validator::with_naming(DeclaredNaming);
        let err = declared
            .validate_struct(&account, [field!(&account.name, by(not_blank))])
            .unwrap_err();
        assert_eq!(err.to_string(), "name: cannot be blank.");
    }

    #[test]
    fn embedded_self_validation_is_merged() {
        let account = Account::default();
        let err = validate_struct(&account, [field!(&account.address)]).unwrap_err();
        assert_eq!(err.to_string(), "city: cannot be blank.");
        assert!(validate_struct(&account, [field!(&account.address, SKIP)]).is_ok());
    }

    #[derive(Record, Default)]
    struct Office {
        name: String,
        #[field(embed, validate)]
        site: Site,
        #[field(validate)]
        annex: Site,
    }

    #[derive(Record, Default)]
    struct Site {
        #[serde(rename = "site_city")]
        city: String,
    }

    impl Validatable for Site {
        fn validate(&self) -> Result<(), Error> {
            validate_struct(self, [field!(&self.city, by(not_blank))])
        }
    }

    #[test]
    fn naming_policy_reaches_nested_records() {
        let office = Office::default();
        let bindings = || {
            vec![
                field!(&office.name, by(not_blank)),
                field!(&office.site),
                field!(&office.annex),
            ]
        };

        let err = validate_struct(&office, bindings()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "name: cannot be blank; site_city: cannot be blank; annex: (site_city: cannot be blank.)."
        );

        let declared = Validator::with_naming(DeclaredNaming);
        let err = declared.validate_struct(&office, bindings()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "name: cannot be blank; city: cannot be blank; annex: (city: cannot be blank.)."
        );
        let err = declared
            .validate_struct_with_context(&Context::background(), &office, bindings())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "name: cannot be blank; city: cannot be blank; annex: (city: cannot be blank.)."
        );
        assert_eq!(
            declared.validate(&office.site).unwrap_err().to_string(),
            "city: cannot be blank."
        );
    }

    #[test]
    fn current_validator_is_scoped_to_the_call() {
        let office = Office::default();
        let declared = Validator::with_naming(DeclaredNaming);
        assert!(declared.validate_struct(&office, [field!(&office.site)]).is_err());

        assert_eq!(Validator::current().naming().error_name(&office.fields()[1]), "site");
        let err = validate_struct(&office, [field!(&office.site)]).unwrap_err();
        assert_eq!(err.to_string(), "site_city: cannot be blank.");
    }

    #[test]
    fn internal_failure_aborts_the_call() {
        let account = Account::default();
        let err = validate_struct(
            &account,
            [field!(&account.email, by(not_blank)), field!(&account.name, by(broken))],
        )
        .unwrap_err();
        assert!(err.is_internal());
        assert_eq!(err.to_string(), "lookup failed");
    }

    #[test]
    fn single_values() {
        let blank = String::new();
        let rule = by(not_blank);
        assert!(validate_value(&blank, &[&rule]).is_err());
        assert!(validate_value(&blank, &[&SKIP, &rule]).is_ok());
        assert!(validate_value_with_context(&Context::background(), &blank, &[]).is_ok());
        assert_eq!(
            validate(&Address::default()).unwrap_err().to_string(),
            "city: cannot be blank."
        );
    }
}
