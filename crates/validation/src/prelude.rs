//! Prelude module for convenient imports.
//!
//! `use nebula_validation::prelude::*;` brings in the template and session
//! types, the evaluator contract, and every built-in evaluator.

pub use crate::config::{SkipPolicy, ValidatorConfig};
pub use crate::foundation::{
    Evaluation, Evaluator, EvaluatorFault, EvaluatorMode, Properties, RuleError,
    ValidationFailure, async_evaluator_fn, evaluator_fn,
};
pub use crate::result::ValidationResult;
pub use crate::session::ValidationSession;
pub use crate::slot::{ErrorSlot, ErrorsChanged, SubscriptionId};
pub use crate::template::{RuleTemplate, RuleTemplateBuilder, SharedRule};

pub use crate::validators::{
    Contains, MaxLength, MinLength, Pattern, Required, contains, contains_pending, max_length,
    min_length, pattern, required,
};
