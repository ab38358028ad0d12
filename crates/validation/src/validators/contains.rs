//! Membership evaluator with asynchronously supplied options
//!
//! [`Contains`] accepts a value only if it appears in a list of allowed
//! options. The list may be known up front or arrive later, e.g. fetched
//! from a remote service; either way it is resolved once and shared by every
//! evaluation, across all sessions of a template.

use std::future::Future;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt, Shared};
use serde_json::Value;

use crate::foundation::{Evaluation, Evaluator, EvaluatorMode, ValidationFailure};

type Options = Arc<Vec<String>>;

/// Fails when the value is not one of the allowed options.
///
/// Asynchronous only: synchronous passes skip it. Non-string values are
/// compared through their JSON rendering; `null` always fails.
///
/// Record key: `contains`.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_validation::validators::contains_pending;
///
/// let job = contains_pending(async {
///     fetch_jobs().await
/// });
/// ```
#[derive(Clone)]
pub struct Contains {
    options: Shared<BoxFuture<'static, Options>>,
    message: String,
}

impl std::fmt::Debug for Contains {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Contains")
            .field("options", &self.options.peek())
            .field("message", &self.message)
            .finish()
    }
}

impl Contains {
    const DEFAULT_MESSAGE: &'static str = "Please select a value from the list.";

    /// Creates the evaluator from a known list of options.
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Options = Arc::new(options.into_iter().map(Into::into).collect());
        Self::from_shared(future::ready(options).boxed().shared())
    }

    /// Creates the evaluator from options that resolve later.
    ///
    /// The future is polled by the first evaluation and its output reused by
    /// every later one.
    pub fn pending<F>(options: F) -> Self
    where
        F: Future<Output = Vec<String>> + Send + 'static,
    {
        Self::from_shared(options.map(Arc::new).boxed().shared())
    }

    fn from_shared(options: Shared<BoxFuture<'static, Options>>) -> Self {
        Self {
            options,
            message: Self::DEFAULT_MESSAGE.to_owned(),
        }
    }

    /// Replaces the failure message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// The options, once they have resolved.
    #[must_use]
    pub fn options(&self) -> Option<Options> {
        self.options.peek().cloned()
    }
}

impl Evaluator<Value> for Contains {
    fn name(&self) -> &str {
        "contains"
    }

    fn mode(&self) -> EvaluatorMode {
        EvaluatorMode::Async
    }

    fn evaluate_async<'a>(&'a self, input: &'a Value) -> BoxFuture<'a, Evaluation> {
        let options = self.options.clone();
        async move {
            let options = options.await;
            let found = match input {
                Value::Null => false,
                Value::String(s) => options.iter().any(|option| option == s),
                other => {
                    let rendered = other.to_string();
                    options.iter().any(|option| *option == rendered)
                }
            };
            Ok(ValidationFailure::check(found, self.message.as_str()))
        }
        .boxed()
    }
}

/// Creates a [`Contains`] evaluator from a known list of options.
pub fn contains<I, S>(options: I) -> Contains
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Contains::new(options)
}

/// Creates a [`Contains`] evaluator from options that resolve later.
pub fn contains_pending<F>(options: F) -> Contains
where
    F: Future<Output = Vec<String>> + Send + 'static,
{
    Contains::pending(options)
}
