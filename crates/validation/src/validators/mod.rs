//! Built-in evaluators
//!
//! Ready-to-use property evaluators. Each one implements
//! [`Evaluator<serde_json::Value>`](crate::foundation::Evaluator) and is keyed
//! by a fixed name inside its slot.
//!
//! | Evaluator | Record key | Mode |
//! |---|---|---|
//! | [`Required`] | `required` | sync |
//! | [`MinLength`] | `minlength` | sync |
//! | [`MaxLength`] | `maxlength` | sync |
//! | [`Pattern`] | `pattern` | sync |
//! | [`Contains`] | `contains` | async |
//!
//! Only [`Required`] fails on missing values; the others treat `null` as
//! "nothing to check" so they compose with optional fields.
//!
//! # Examples
//!
//! ```rust,ignore
//! use nebula_validation::prelude::*;
//!
//! let template = RuleTemplate::<serde_json::Value>::builder()
//!     .rule_for("FirstName", required())
//!     .rule_for("FirstName", max_length(15))
//!     .rule_for("Job", contains(["programmer", "shop assistant"]))
//!     .build();
//! ```

pub mod contains;
pub mod length;
pub mod pattern;
pub mod required;

pub use contains::{Contains, contains, contains_pending};
pub use length::{MaxLength, MinLength, max_length, min_length};
pub use pattern::{Pattern, pattern};
pub use required::{Required, required};

use serde_json::Value;

/// Measured length of a value: chars for strings, items for arrays and
/// objects, the rendered width otherwise. `None` for `null`.
pub(crate) fn value_length(value: &Value) -> Option<usize> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        Value::Bool(_) | Value::Number(_) => Some(value.to_string().chars().count()),
    }
}
