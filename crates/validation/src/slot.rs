//! Error slots and change notification
//!
//! An [`ErrorSlot`] aggregates the failure records of every evaluator bound
//! to one name: a property, or a shared rule. Its [`ErrorsChanged`] channel
//! lets observers (typically UI bindings) react when the slot's failing set
//! actually changes.
//!
//! # Examples
//!
//! ```rust,ignore
//! let slot = session.result().slot("FirstName")?;
//! let id = slot.errors_changed().add(|slot| {
//!     println!("{} now has errors: {}", slot.name(), slot.has_errors());
//! });
//!
//! slot.errors_changed().remove(id);
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::foundation::ValidationFailure;

/// The failing records of a slot as `(evaluator, message)` pairs.
///
/// Passing records are left out, so a slot whose records were never written
/// and a slot whose records all pass compare equal.
pub(crate) type FailureState = BTreeSet<(String, String)>;

type Observer = Arc<dyn Fn(&ErrorSlot) + Send + Sync>;

// ============================================================================
// SUBSCRIPTIONS
// ============================================================================

/// Handle returned by [`ErrorsChanged::add`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Observer list of one slot.
///
/// Observers are invoked synchronously, in subscription order, inside the
/// pass that detected the change. Subscribing from within an observer is
/// allowed; the new observer is first called on the next change.
#[derive(Default)]
pub struct ErrorsChanged {
    observers: RwLock<Vec<(SubscriptionId, Observer)>>,
    next_id: AtomicU64,
}

impl ErrorsChanged {
    /// Registers an observer and returns its handle.
    pub fn add<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&ErrorSlot) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers.write().push((id, Arc::new(observer)));
        id
    }

    /// Unregisters an observer. Returns `false` if the handle was unknown.
    pub fn remove(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.read().len()
    }

    /// Returns `true` if nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.read().is_empty()
    }

    /// Drops every observer.
    pub fn clear(&self) {
        self.observers.write().clear();
    }

    pub(crate) fn emit(&self, slot: &ErrorSlot) {
        // Snapshot so observers may (un)subscribe without deadlocking.
        let observers: Vec<Observer> = self
            .observers
            .read()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for observer in observers {
            observer(slot);
        }
    }
}

impl fmt::Debug for ErrorsChanged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorsChanged")
            .field("observers", &self.len())
            .finish()
    }
}

// ============================================================================
// ERROR SLOT
// ============================================================================

/// Failure state of one property or shared rule.
///
/// Holds one [`ValidationFailure`] per evaluator name. [`has_errors`](Self::has_errors)
/// is always derived from the records.
#[derive(Debug)]
pub struct ErrorSlot {
    name: String,
    validation_failures: IndexMap<String, ValidationFailure>,
    errors_changed: ErrorsChanged,
}

impl ErrorSlot {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            validation_failures: IndexMap::new(),
            errors_changed: ErrorsChanged::default(),
        }
    }

    /// Property or shared-rule name this slot belongs to.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` if any record in this slot failed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.validation_failures.values().any(|f| f.has_error)
    }

    /// Records keyed by evaluator name, in the order they were first written.
    #[must_use]
    pub fn validation_failures(&self) -> &IndexMap<String, ValidationFailure> {
        &self.validation_failures
    }

    /// Record written by the evaluator named `evaluator`, if it has run.
    #[must_use]
    pub fn failure(&self, evaluator: &str) -> Option<&ValidationFailure> {
        self.validation_failures.get(evaluator)
    }

    /// Messages of the failing records.
    pub fn error_messages(&self) -> impl Iterator<Item = &str> {
        self.validation_failures
            .values()
            .filter(|f| f.has_error)
            .map(|f| f.error_message.as_str())
    }

    /// Messages of the failing records joined by newlines. Empty when the slot passes.
    #[must_use]
    pub fn error_message(&self) -> String {
        self.error_messages().collect::<Vec<_>>().join("\n")
    }

    /// Observer channel fired when this slot's failing set changes.
    #[must_use]
    pub fn errors_changed(&self) -> &ErrorsChanged {
        &self.errors_changed
    }

    pub(crate) fn record(&mut self, evaluator: &str, failure: ValidationFailure) {
        // Existing keys keep their position.
        self.validation_failures
            .insert(evaluator.to_owned(), failure);
    }

    pub(crate) fn clear(&mut self) {
        for failure in self.validation_failures.values_mut() {
            failure.clear();
        }
    }

    pub(crate) fn failure_state(&self) -> FailureState {
        self.validation_failures
            .iter()
            .filter(|(_, f)| f.has_error)
            .map(|(name, f)| (name.clone(), f.error_message.clone()))
            .collect()
    }

    pub(crate) fn notify(&self) {
        self.errors_changed.emit(self);
    }
}

impl Serialize for ErrorSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ErrorSlot", 4)?;
        state.serialize_field("Name", &self.name)?;
        state.serialize_field("HasErrors", &self.has_errors())?;
        state.serialize_field("ErrorMessage", &self.error_message())?;
        state.serialize_field("ValidationFailures", &self.validation_failures)?;
        state.end()
    }
}
