//! Core validation types and traits
//!
//! The fundamental building blocks everything else is made of:
//!
//! - **Records**: [`ValidationFailure`], the outcome of one evaluator run
//! - **Contract**: [`Evaluator`], [`EvaluatorMode`], closure adapters
//! - **Data access**: [`Properties`]
//! - **Errors**: [`RuleError`], [`EvaluatorFault`]
//!
//! A violated rule is data (`has_error = true`). A broken evaluator is an
//! error. The two never mix.

pub mod error;
pub mod evaluator;
pub mod failure;
pub mod properties;

pub use error::{EvaluatorFault, RuleError};
pub use evaluator::{
    AsyncFnEvaluator, Evaluation, Evaluator, EvaluatorMode, FnEvaluator, async_evaluator_fn,
    evaluator_fn,
};
pub use failure::ValidationFailure;
pub use properties::Properties;
