//! Length evaluators
//!
//! Length is measured in Unicode scalar values for strings and in items for
//! arrays and objects. `null` is never checked; pair with
//! [`required`](super::required) when the value must be present.

use serde_json::Value;

use super::value_length;
use crate::foundation::{Evaluation, Evaluator, ValidationFailure};

// ============================================================================
// MIN LENGTH
// ============================================================================

/// Fails when the value is shorter than `min`.
///
/// Record key: `minlength`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinLength {
    min: usize,
}

impl MinLength {
    /// Creates the evaluator.
    #[must_use]
    pub fn new(min: usize) -> Self {
        Self { min }
    }

    /// The minimum accepted length.
    #[must_use]
    pub fn min(&self) -> usize {
        self.min
    }
}

impl Evaluator<Value> for MinLength {
    fn name(&self) -> &str {
        "minlength"
    }

    fn evaluate(&self, input: &Value) -> Evaluation {
        let valid = value_length(input).is_none_or(|len| len >= self.min);
        Ok(ValidationFailure::check(
            valid,
            format!("Please enter at least {} characters.", self.min),
        ))
    }
}

/// Creates a [`MinLength`] evaluator.
#[must_use]
pub fn min_length(min: usize) -> MinLength {
    MinLength::new(min)
}

// ============================================================================
// MAX LENGTH
// ============================================================================

/// Fails when the value is longer than `max`.
///
/// Record key: `maxlength`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaxLength {
    max: usize,
}

impl MaxLength {
    /// Creates the evaluator.
    #[must_use]
    pub fn new(max: usize) -> Self {
        Self { max }
    }

    /// The maximum accepted length.
    #[must_use]
    pub fn max(&self) -> usize {
        self.max
    }
}

impl Evaluator<Value> for MaxLength {
    fn name(&self) -> &str {
        "maxlength"
    }

    fn evaluate(&self, input: &Value) -> Evaluation {
        let valid = value_length(input).is_none_or(|len| len <= self.max);
        Ok(ValidationFailure::check(
            valid,
            format!("Please enter no more than {} characters.", self.max),
        ))
    }
}

/// Creates a [`MaxLength`] evaluator.
#[must_use]
pub fn max_length(max: usize) -> MaxLength {
    MaxLength::new(max)
}
