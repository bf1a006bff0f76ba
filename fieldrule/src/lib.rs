//! Field-rule validation engine.
//!
//! A caller identifies fields of a record by taking references to them and
//! attaches an ordered chain of rules to each. The engine maps every reference
//! back to the field it designates (through embedded sub-records, as if their
//! fields were declared on the parent), runs the chains and returns one
//! field-name-keyed aggregate.
//!
//! ```
//! use fieldrule::{by, field, validate_struct, Error, Record};
//!
//! #[derive(Record)]
//! struct Order {
//!     #[serde(rename = "sku")]
//!     product: String,
//!     quantity: u32,
//! }
//!
//! fn positive(v: &u32) -> Result<(), Error> {
//!     fieldrule::require!(*v > 0, "must be positive");
//!     Ok(())
//! }
//!
//! let order = Order { product: "A-1".into(), quantity: 0 };
//! let err = validate_struct(&order, [field!(&order.quantity, by(positive))]).unwrap_err();
//! assert_eq!(err.to_string(), "quantity: must be positive.");
//! ```
//!
//! Errors come in three kinds (see [`Error`]): integration errors and internal
//! errors abort the call, validation failures are collected into [`Errors`].
//!
//! The companion crate `fieldrule-rules` ships the common rules (`REQUIRED`,
//! `length`, `each`, ...).

extern crate self as fieldrule;

mod config;
mod context;
mod error;
mod errors;
mod field;
mod locate;
mod naming;
mod record;
mod rule;
mod validatable;
mod validate;

pub use config::ValidatorConfig;
pub use context::{Context, ContextError};
pub use error::{Error, IntegrationError, InternalError, RuleError};
pub use errors::Errors;
pub use field::{Binding, ChainOutcome, FieldRules};
pub use locate::{find_field, FieldSelector};
pub use naming::{DeclaredNaming, NamingPolicy, TagNaming, OMIT_TAG};
pub use record::{AsRecord, FieldDescriptor, Instance, Record, Selector, Target};
pub use rule::{by, by_with_context, skip_when, ContextFnRule, FnRule, Rule, RuleKind, SkipRule, SKIP};
pub use validatable::Validatable;
pub use validate::{
    validate, validate_struct, validate_struct_with_context, validate_value,
    validate_value_with_context, validate_with_context, Validator,
};

/// Derives [`Record`] and the target/selector plumbing for a struct with
/// named fields.
pub use fieldrule_derive::Record;
