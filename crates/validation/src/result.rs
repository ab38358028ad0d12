//! Validation results
//!
//! A [`ValidationResult`] maps every slot name of a session to its
//! [`ErrorSlot`]. The set of slots is fixed when the session is created and
//! mirrors the names registered on the template.

use std::ops::Index;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::foundation::{RuleError, ValidationFailure};
use crate::slot::{ErrorSlot, FailureState};

/// Failure state of one data object, owned by one session.
///
/// Slots can be looked up with [`slot`](Self::slot), which reports unknown
/// names as [`RuleError::UnknownSlot`], or by indexing, which panics on them.
///
/// # Examples
///
/// ```rust,ignore
/// let result = session.validate(&person)?;
///
/// assert!(result.has_errors());
/// assert!(result["FirstName"].validation_failures()["required"].has_error);
/// ```
#[derive(Debug)]
pub struct ValidationResult {
    name: String,
    errors: IndexMap<String, ErrorSlot>,
}

impl ValidationResult {
    pub(crate) fn new<I, S>(name: impl Into<String>, slot_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut errors = IndexMap::new();
        for slot_name in slot_names {
            let slot_name = slot_name.into();
            errors
                .entry(slot_name.clone())
                .or_insert_with(|| ErrorSlot::new(slot_name));
        }

        Self {
            name: name.into(),
            errors,
        }
    }

    /// Name of the session this result belongs to.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` if any slot has errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors.values().any(ErrorSlot::has_errors)
    }

    /// All slots, in template registration order.
    #[must_use]
    pub fn errors(&self) -> &IndexMap<String, ErrorSlot> {
        &self.errors
    }

    /// Looks up a slot by name.
    pub fn slot(&self, name: &str) -> Result<&ErrorSlot, RuleError> {
        self.errors
            .get(name)
            .ok_or_else(|| RuleError::UnknownSlot(name.to_owned()))
    }

    /// Slots that currently have errors.
    pub fn failing_slots(&self) -> impl Iterator<Item = &ErrorSlot> {
        self.errors.values().filter(|slot| slot.has_errors())
    }

    pub(crate) fn record(&mut self, slot: &str, evaluator: &str, failure: ValidationFailure) {
        if let Some(slot) = self.errors.get_mut(slot) {
            slot.record(evaluator, failure);
        }
    }

    pub(crate) fn clear(&mut self) {
        for slot in self.errors.values_mut() {
            slot.clear();
        }
    }

    pub(crate) fn failure_states(&self) -> Vec<FailureState> {
        self.errors.values().map(ErrorSlot::failure_state).collect()
    }

    /// Fires `errors_changed` on every slot whose failing set differs from
    /// `before`, in slot order. Returns how many slots were notified.
    pub(crate) fn notify_changed(&self, before: &[FailureState]) -> usize {
        let mut notified = 0;
        for (slot, previous) in self.errors.values().zip(before) {
            if slot.failure_state() != *previous {
                tracing::trace!(
                    slot = slot.name(),
                    has_errors = slot.has_errors(),
                    "errors changed"
                );
                slot.notify();
                notified += 1;
            }
        }
        notified
    }
}

impl Index<&str> for ValidationResult {
    type Output = ErrorSlot;

    /// # Panics
    ///
    /// Panics if `name` is not a registered slot.
    fn index(&self, name: &str) -> &ErrorSlot {
        match self.errors.get(name) {
            Some(slot) => slot,
            None => panic!("unknown error slot: {name}"),
        }
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 3)?;
        state.serialize_field("Name", &self.name)?;
        state.serialize_field("HasErrors", &self.has_errors())?;
        state.serialize_field("Errors", &self.errors)?;
        state.end()
    }
}
