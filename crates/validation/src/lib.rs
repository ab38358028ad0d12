//! # nebula-validation
//!
//! A declarative rule-validation engine for flat data objects.
//!
//! Rules are registered once on a [`RuleTemplate`](template::RuleTemplate).
//! Each unit of work creates its own [`ValidationSession`](session::ValidationSession),
//! runs synchronous or asynchronous passes over a data object, and gets a
//! [`ValidationResult`](result::ValidationResult) whose slots notify observers
//! only when their failing set actually changes.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nebula_validation::prelude::*;
//! use serde_json::json;
//!
//! let template = RuleTemplate::<serde_json::Value>::builder()
//!     .rule_for("FirstName", required())
//!     .rule_for("FirstName", max_length(15))
//!     .build();
//!
//! let mut person = template.create_rule("Person");
//! person.result()["FirstName"]
//!     .errors_changed()
//!     .add(|slot| println!("{}: {}", slot.name(), slot.error_message()));
//!
//! let result = person.validate(&json!({ "FirstName": "" }))?;
//! assert!(result["FirstName"].validation_failures()["required"].has_error);
//! ```
//!
//! ## Concepts
//!
//! - **Template**: immutable rule definitions, shared by reference.
//! - **Session**: one live result, mutated in place by each pass.
//! - **Slot**: failure records of one property or shared rule.
//! - **Evaluator**: pluggable rule, see [`Evaluator`](foundation::Evaluator).
//! - **Shared rule**: one evaluator over the whole object, referenced by
//!   several properties and run once per pass.
//!
//! ## Built-in Evaluators
//!
//! [`Required`](validators::Required), [`MinLength`](validators::MinLength),
//! [`MaxLength`](validators::MaxLength), [`Pattern`](validators::Pattern),
//! [`Contains`](validators::Contains).

pub mod config;
pub mod foundation;
pub mod prelude;
pub mod result;
pub mod session;
pub mod slot;
pub mod template;
pub mod validators;
