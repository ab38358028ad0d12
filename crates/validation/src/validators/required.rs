//! Required-value evaluator

use serde_json::Value;

use crate::foundation::{Evaluation, Evaluator, ValidationFailure};

/// Fails when the value is missing: `null`, a blank string, or an empty array.
///
/// Record key: `required`.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_validation::validators::required;
///
/// assert!(required().evaluate(&json!("")).unwrap().has_error);
/// assert!(!required().evaluate(&json!("John")).unwrap().has_error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Required {
    message: String,
}

impl Required {
    /// Default failure message.
    pub const DEFAULT_MESSAGE: &'static str = "This field is required.";

    /// Creates the evaluator with the default message.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: Self::DEFAULT_MESSAGE.to_owned(),
        }
    }

    /// Replaces the failure message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    fn is_present(input: &Value) -> bool {
        match input {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            Value::Array(items) => !items.is_empty(),
            _ => true,
        }
    }
}

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator<Value> for Required {
    fn name(&self) -> &str {
        "required"
    }

    fn evaluate(&self, input: &Value) -> Evaluation {
        Ok(ValidationFailure::check(
            Self::is_present(input),
            self.message.as_str(),
        ))
    }
}

/// Creates a [`Required`] evaluator.
#[must_use]
pub fn required() -> Required {
    Required::new()
}
