//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use nebula_validation::prelude::*;
use parking_lot::Mutex;
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct Person {
    pub checked: bool,
    pub first_name: String,
    pub last_name: String,
    pub job: String,
}

impl Person {
    pub fn named(first_name: &str, last_name: &str) -> Self {
        Self {
            checked: true,
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            ..Self::default()
        }
    }

    pub fn with_job(job: &str) -> Self {
        Self {
            job: job.to_owned(),
            ..Self::default()
        }
    }
}

impl Properties for Person {
    fn property(&self, name: &str) -> Value {
        match name {
            "Checked" => Value::Bool(self.checked),
            "FirstName" => Value::from(self.first_name.as_str()),
            "LastName" => Value::from(self.last_name.as_str()),
            "Job" => Value::from(self.job.as_str()),
            _ => Value::Null,
        }
    }
}

/// Records every notification as `(slot name, has_errors)`.
#[derive(Clone, Default)]
pub struct Spy {
    calls: Arc<Mutex<Vec<(String, bool)>>>,
}

impl Spy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes this spy to each named slot of `session`.
    pub fn watch<T>(&self, session: &ValidationSession<T>, slots: &[&str]) {
        for name in slots {
            let calls = Arc::clone(&self.calls);
            session
                .result()
                .slot(name)
                .expect("slot is registered")
                .errors_changed()
                .add(move |slot| {
                    calls
                        .lock()
                        .push((slot.name().to_owned(), slot.has_errors()));
                });
        }
    }

    pub fn called(&self) -> bool {
        !self.calls.lock().is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn calls(&self) -> Vec<(String, bool)> {
        self.calls.lock().clone()
    }

    pub fn reset(&self) {
        self.calls.lock().clear();
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Required + max length 15 on both name properties.
pub fn name_rules() -> RuleTemplateBuilder<Person> {
    let required_rule = Arc::new(required());
    let max_length_rule = Arc::new(max_length(15));

    RuleTemplate::builder()
        .rule_for("FirstName", Arc::clone(&required_rule))
        .rule_for("FirstName", Arc::clone(&max_length_rule))
        .rule_for("LastName", required_rule)
        .rule_for("LastName", max_length_rule)
}

pub const JOBS: [&str; 5] = [
    "business man",
    "unemployed",
    "construction worker",
    "programmer",
    "shop assistant",
];

pub const ONE_SPACE_MESSAGE: &str = "Full name can contain only one space.";

pub fn has_space(person: &Person) -> bool {
    person.first_name.contains(' ') || person.last_name.contains(' ')
}
