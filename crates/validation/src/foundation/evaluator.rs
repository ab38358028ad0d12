//! The evaluator contract
//!
//! An [`Evaluator`] is a pluggable unit of validation logic. The engine only
//! needs three things from it: a stable name (the key of its record inside a
//! slot), the capabilities it offers, and a way to run it.
//!
//! Property rules implement `Evaluator<serde_json::Value>` and receive the
//! current value of one property. Shared rules implement `Evaluator<T>` and
//! receive the whole data object.
//!
//! # Examples
//!
//! ```rust,ignore
//! use nebula_validation::foundation::{Evaluation, Evaluator, ValidationFailure};
//! use serde_json::Value;
//!
//! struct NotBlank;
//!
//! impl Evaluator<Value> for NotBlank {
//!     fn name(&self) -> &str {
//!         "not_blank"
//!     }
//!
//!     fn evaluate(&self, input: &Value) -> Evaluation {
//!         let blank = input.as_str().is_some_and(|s| s.trim().is_empty());
//!         Ok(ValidationFailure::check(!blank, "Must not be blank."))
//!     }
//! }
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};

use super::{EvaluatorFault, ValidationFailure};

/// What a single evaluator run produces.
pub type Evaluation = Result<ValidationFailure, EvaluatorFault>;

// ============================================================================
// MODE
// ============================================================================

/// Which evaluation forms an evaluator provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorMode {
    /// Only [`Evaluator::evaluate`]. Runs in both passes.
    #[default]
    Sync,
    /// Only [`Evaluator::evaluate_async`]. Skipped by synchronous passes.
    Async,
    /// Both forms. Synchronous passes use `evaluate`, asynchronous passes
    /// use `evaluate_async`.
    Both,
}

impl EvaluatorMode {
    /// Whether the synchronous form is available.
    #[must_use]
    pub fn is_sync(self) -> bool {
        matches!(self, Self::Sync | Self::Both)
    }

    /// Whether the asynchronous form is available.
    #[must_use]
    pub fn is_async(self) -> bool {
        matches!(self, Self::Async | Self::Both)
    }
}

impl fmt::Display for EvaluatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sync => "sync",
            Self::Async => "async",
            Self::Both => "sync+async",
        })
    }
}

// ============================================================================
// EVALUATOR TRAIT
// ============================================================================

/// A named, pluggable validation rule over inputs of type `I`.
///
/// Implementors provide [`name`](Self::name) and at least one of
/// [`evaluate`](Self::evaluate) / [`evaluate_async`](Self::evaluate_async),
/// and declare which through [`mode`](Self::mode).
///
/// A violated rule is reported as `Ok(ValidationFailure { has_error: true, .. })`.
/// `Err` means the evaluator itself broke and aborts the pass.
pub trait Evaluator<I: ?Sized>: Send + Sync {
    /// Key of this evaluator's record inside a slot, e.g. `"required"`.
    fn name(&self) -> &str;

    /// Capabilities this evaluator provides.
    fn mode(&self) -> EvaluatorMode {
        EvaluatorMode::Sync
    }

    /// Synchronous form.
    ///
    /// The default reports a fault; evaluators whose mode is
    /// [`EvaluatorMode::Async`] are never called through it by the engine.
    fn evaluate(&self, input: &I) -> Evaluation {
        let _ = input;
        Err(EvaluatorFault::new(format!(
            "evaluator '{}' has no synchronous form",
            self.name()
        )))
    }

    /// Asynchronous form. Defaults to an already-resolved [`evaluate`](Self::evaluate).
    fn evaluate_async<'a>(&'a self, input: &'a I) -> BoxFuture<'a, Evaluation> {
        future::ready(self.evaluate(input)).boxed()
    }
}

impl<I: ?Sized, E: Evaluator<I> + ?Sized> Evaluator<I> for Arc<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn mode(&self) -> EvaluatorMode {
        (**self).mode()
    }

    fn evaluate(&self, input: &I) -> Evaluation {
        (**self).evaluate(input)
    }

    fn evaluate_async<'a>(&'a self, input: &'a I) -> BoxFuture<'a, Evaluation> {
        (**self).evaluate_async(input)
    }
}

// ============================================================================
// CLOSURE ADAPTERS
// ============================================================================

/// Synchronous evaluator backed by a closure.
///
/// Built with [`evaluator_fn`].
#[derive(Clone)]
pub struct FnEvaluator<F> {
    name: String,
    func: F,
}

impl<F> fmt::Debug for FnEvaluator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnEvaluator")
            .field("name", &self.name)
            .finish()
    }
}

impl<I, F> Evaluator<I> for FnEvaluator<F>
where
    I: ?Sized,
    F: Fn(&I) -> Evaluation + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, input: &I) -> Evaluation {
        (self.func)(input)
    }
}

/// Creates a synchronous evaluator from a closure.
///
/// # Examples
///
/// ```rust,ignore
/// let even = evaluator_fn("even", |v: &Value| {
///     Ok(ValidationFailure::check(v.as_i64().is_some_and(|n| n % 2 == 0), "Must be even."))
/// });
/// ```
pub fn evaluator_fn<I, F>(name: impl Into<String>, func: F) -> FnEvaluator<F>
where
    I: ?Sized,
    F: Fn(&I) -> Evaluation + Send + Sync,
{
    FnEvaluator {
        name: name.into(),
        func,
    }
}

/// Asynchronous evaluator backed by a closure returning a future.
///
/// The closure runs synchronously and must copy whatever it needs out of the
/// input; the returned future is `'static`. Built with [`async_evaluator_fn`].
#[derive(Clone)]
pub struct AsyncFnEvaluator<F> {
    name: String,
    func: F,
}

impl<F> fmt::Debug for AsyncFnEvaluator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncFnEvaluator")
            .field("name", &self.name)
            .finish()
    }
}

impl<I, F, Fut> Evaluator<I> for AsyncFnEvaluator<F>
where
    I: ?Sized,
    F: Fn(&I) -> Fut + Send + Sync,
    Fut: Future<Output = Evaluation> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn mode(&self) -> EvaluatorMode {
        EvaluatorMode::Async
    }

    fn evaluate_async<'a>(&'a self, input: &'a I) -> BoxFuture<'a, Evaluation> {
        (self.func)(input).boxed()
    }
}

/// Creates an asynchronous evaluator from a closure returning a future.
///
/// # Examples
///
/// ```rust,ignore
/// let unique = async_evaluator_fn("unique", |v: &Value| {
///     let login = v.as_str().unwrap_or_default().to_owned();
///     async move { Ok(ValidationFailure::check(!taken(&login).await, "Login is taken.")) }
/// });
/// ```
pub fn async_evaluator_fn<I, F, Fut>(name: impl Into<String>, func: F) -> AsyncFnEvaluator<F>
where
    I: ?Sized,
    F: Fn(&I) -> Fut + Send + Sync,
    Fut: Future<Output = Evaluation> + Send + 'static,
{
    AsyncFnEvaluator {
        name: name.into(),
        func,
    }
}
