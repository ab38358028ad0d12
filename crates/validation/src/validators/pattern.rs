//! Regular-expression evaluator

use regex::Regex;
use serde_json::Value;

use crate::foundation::{Evaluation, Evaluator, ValidationFailure};

/// Fails when a string value does not match the pattern.
///
/// Empty strings and `null` pass. Non-string values are matched against
/// their JSON rendering.
///
/// Record key: `pattern`.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    message: String,
}

impl Pattern {
    /// Compiles `pattern`.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            message: "Please enter a value in the expected format.".to_owned(),
        })
    }

    /// Replaces the failure message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// The compiled expression.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl Evaluator<Value> for Pattern {
    fn name(&self) -> &str {
        "pattern"
    }

    fn evaluate(&self, input: &Value) -> Evaluation {
        let valid = match input {
            Value::Null => true,
            Value::String(s) => s.is_empty() || self.regex.is_match(s),
            other => self.regex.is_match(&other.to_string()),
        };
        Ok(ValidationFailure::check(valid, self.message.as_str()))
    }
}

/// Creates a [`Pattern`] evaluator.
pub fn pattern(pattern: &str) -> Result<Pattern, regex::Error> {
    Pattern::new(pattern)
}
