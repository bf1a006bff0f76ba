//! Built-in rules for `fieldrule`.
//!
//! Every rule here carries a stable error code and a default message; the
//! message can be replaced with `.error(..)`:
//!
//! ```
//! use fieldrule::Rule;
//! use fieldrule_rules::{length, REQUIRED};
//!
//! assert_eq!(REQUIRED.validate("").unwrap_err().to_string(), "cannot be blank");
//! let err = length(5, 10).error("bad size").validate("demo").unwrap_err();
//! assert_eq!(err.to_string(), "bad size");
//! ```

mod blank;
mod each;
mod is_in;
mod length;
mod matches;
mod required;

pub use blank::{Blank, HasLength};
pub use each::{each, EachRule};
pub use fieldrule::{by, by_with_context, skip_when, SKIP};
pub use is_in::{is_in, InRule};
pub use length::{length, rune_length, LengthRule};
pub use matches::{matches, matches_pattern, AsText, MatchRule};
pub use required::{NilOrNotEmptyRule, NotNilRule, RequiredRule, NIL_OR_NOT_EMPTY, NOT_NIL, REQUIRED};
