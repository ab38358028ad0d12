//! Validation sessions
//!
//! A [`ValidationSession`] is a live instance of a [`RuleTemplate`]: it owns
//! one [`ValidationResult`] and updates it in place on every pass.
//!
//! Both entry points take `&mut self`, so two passes can never be in flight
//! on the same session; the future returned by
//! [`validate_async`](ValidationSession::validate_async) holds the borrow
//! until it settles. Sessions created from the same template are fully
//! independent and may validate different objects concurrently.
//!
//! # Pass structure
//!
//! 1. If the optional predicate holds, nothing is evaluated (see
//!    [`SkipPolicy`]).
//! 2. Property rules run in registration order.
//! 3. Shared rules run once each, with the whole data object.
//! 4. Slots whose failing set changed are notified, in registration order.
//!
//! An evaluator fault aborts the pass with [`RuleError::EvaluatorFault`].
//! Records already written stay written and no notification is fired.
//! Change detection compares against the state observers were last told
//! about, so the next completed pass reports whatever the faulted one left.

use std::fmt;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use serde_json::Value;

use crate::config::SkipPolicy;
use crate::foundation::{Evaluation, Evaluator, EvaluatorFault, Properties, RuleError};
use crate::result::ValidationResult;
use crate::slot::FailureState;
use crate::template::{OptionalPredicate, RuleTemplate};

/// One data object's validation state, driven by a shared [`RuleTemplate`].
///
/// # Examples
///
/// ```rust,ignore
/// let mut person = template.create_rule("Person");
/// person
///     .result()
///     .slot("FirstName")?
///     .errors_changed()
///     .add(|slot| println!("{} changed", slot.name()));
///
/// let result = person.validate(&data)?;
/// assert!(!result.has_errors());
///
/// let result = person.validate_async(&data).await?;
/// assert!(!result.has_errors());
/// ```
pub struct ValidationSession<T> {
    name: String,
    template: RuleTemplate<T>,
    result: ValidationResult,
    optional: Option<OptionalPredicate<T>>,
    // Failing sets as of the last notification.
    notified: Vec<FailureState>,
}

impl<T> fmt::Debug for ValidationSession<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationSession")
            .field("name", &self.name)
            .field("result", &self.result)
            .field("optional_override", &self.optional.is_some())
            .finish()
    }
}

impl<T> ValidationSession<T> {
    pub(crate) fn new(name: String, template: RuleTemplate<T>, result: ValidationResult) -> Self {
        let notified = result.failure_states();
        Self {
            name,
            template,
            result,
            optional: None,
            notified,
        }
    }

    /// Session name, as given to [`RuleTemplate::create_rule`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The template this session was created from.
    #[must_use]
    pub fn template(&self) -> &RuleTemplate<T> {
        &self.template
    }

    /// Current validation state.
    #[must_use]
    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    /// Overrides the template's optional predicate for this session only.
    pub fn set_optional<F>(&mut self, predicate: F)
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.optional = Some(Arc::new(predicate));
    }

    /// Drops the session override; the template predicate applies again.
    pub fn clear_optional(&mut self) {
        self.optional = None;
    }

    /// Clears every record and notifies the slots that had errors.
    pub fn reset(&mut self) -> &ValidationResult {
        self.result.clear();
        let notified = self.publish();
        tracing::debug!(session = %self.name, notified, "validation state reset");
        &self.result
    }

    /// Runs a synchronous pass over `data`.
    ///
    /// Evaluators that only offer an asynchronous form are skipped.
    #[tracing::instrument(level = "debug", skip_all, fields(session = %self.name))]
    pub fn validate(&mut self, data: &T) -> Result<&ValidationResult, RuleError>
    where
        T: Properties,
    {
        if self.is_optional(data) {
            return Ok(self.skip());
        }

        let mut evaluated = 0_usize;

        for (property, evaluators) in self.template.property_rules() {
            let value = data.property(property);
            for evaluator in evaluators {
                if !evaluator.mode().is_sync() {
                    tracing::trace!(
                        %property,
                        evaluator = evaluator.name(),
                        "async-only evaluator skipped"
                    );
                    continue;
                }
                let failure = evaluator
                    .evaluate(&value)
                    .map_err(|fault| evaluator_fault(property, evaluator.name(), fault))?;
                self.result.record(property, evaluator.name(), failure);
                evaluated += 1;
            }
        }

        for binding in self.template.shared_rules() {
            let evaluator = binding.rule().evaluator();
            if !evaluator.mode().is_sync() {
                tracing::trace!(rule = binding.name(), "async-only shared rule skipped");
                continue;
            }
            let failure = evaluator
                .evaluate(data)
                .map_err(|fault| evaluator_fault(binding.name(), binding.name(), fault))?;
            self.result.record(binding.name(), binding.name(), failure);
            evaluated += 1;
        }

        let notified = self.publish();
        tracing::debug!(
            evaluated,
            notified,
            has_errors = self.result.has_errors(),
            "validation pass finished"
        );
        Ok(&self.result)
    }

    /// Runs an asynchronous pass over `data`.
    ///
    /// Every evaluator runs through its asynchronous form when it has one;
    /// synchronous ones resolve immediately. All evaluators are started
    /// before any is awaited and the pass joins on all of them. Records are
    /// then written, and slots notified, in registration order regardless of
    /// which evaluator settled first.
    #[tracing::instrument(level = "debug", skip_all, fields(session = %self.name))]
    pub async fn validate_async(&mut self, data: &T) -> Result<&ValidationResult, RuleError>
    where
        T: Properties,
    {
        if self.is_optional(data) {
            return Ok(self.skip());
        }

        let template = &self.template;

        let values: Vec<Value> = template
            .property_names()
            .map(|property| data.property(property))
            .collect();

        let mut targets: Vec<(&str, &str)> = Vec::new();
        let mut pending: Vec<BoxFuture<'_, Evaluation>> = Vec::new();

        for ((property, evaluators), value) in template.property_rules().iter().zip(&values) {
            for evaluator in evaluators {
                targets.push((property.as_str(), evaluator.name()));
                pending.push(dispatch(&**evaluator, value));
            }
        }

        for binding in template.shared_rules() {
            targets.push((binding.name(), binding.name()));
            pending.push(dispatch(binding.rule().evaluator(), data));
        }

        tracing::debug!(evaluators = pending.len(), "awaiting evaluators");
        let outcomes = future::join_all(pending).await;

        for ((slot, evaluator), outcome) in targets.into_iter().zip(outcomes) {
            let failure = outcome.map_err(|fault| evaluator_fault(slot, evaluator, fault))?;
            self.result.record(slot, evaluator, failure);
        }

        let notified = self.publish();
        tracing::debug!(
            notified,
            has_errors = self.result.has_errors(),
            "asynchronous validation pass finished"
        );
        Ok(&self.result)
    }

    /// Notifies slots whose failing set differs from the last notified
    /// state and records the new baseline.
    fn publish(&mut self) -> usize {
        let notified = self.result.notify_changed(&self.notified);
        self.notified = self.result.failure_states();
        notified
    }

    fn is_optional(&self, data: &T) -> bool {
        self.optional
            .as_ref()
            .or_else(|| self.template.optional())
            .is_some_and(|predicate| predicate(data))
    }

    fn skip(&mut self) -> &ValidationResult {
        match self.template.config().skip_policy {
            SkipPolicy::Retain => {
                tracing::debug!("optional predicate holds; pass skipped");
                &self.result
            }
            SkipPolicy::Reset => {
                tracing::debug!("optional predicate holds; pass skipped, records reset");
                self.reset()
            }
        }
    }
}

/// Picks the evaluator's asynchronous form if it has one, otherwise wraps
/// the synchronous result in a ready future.
fn dispatch<'a, I: ?Sized>(
    evaluator: &'a dyn Evaluator<I>,
    input: &'a I,
) -> BoxFuture<'a, Evaluation> {
    if evaluator.mode().is_async() {
        evaluator.evaluate_async(input)
    } else {
        future::ready(evaluator.evaluate(input)).boxed()
    }
}

fn evaluator_fault(slot: &str, evaluator: &str, fault: EvaluatorFault) -> RuleError {
    tracing::warn!(slot, evaluator, %fault, "evaluator fault aborted validation pass");
    RuleError::evaluator_fault(slot, evaluator, fault)
}
