//! Rule templates
//!
//! A [`RuleTemplate`] describes, once, which evaluators apply to which
//! property and which shared rules span several properties. It is frozen by
//! [`RuleTemplateBuilder::build`] and then shared read-only by every
//! [`ValidationSession`] created from it.
//!
//! # Examples
//!
//! ```rust,ignore
//! use nebula_validation::prelude::*;
//!
//! let template = RuleTemplate::<serde_json::Value>::builder()
//!     .rule_for("FirstName", required())
//!     .rule_for("FirstName", max_length(15))
//!     .rule_for("LastName", required())
//!     .rule_for("LastName", max_length(15))
//!     .build();
//!
//! let mut person = template.create_rule("Person");
//! let result = person.validate(&serde_json::json!({ "FirstName": "John", "LastName": "Smith" }))?;
//! assert!(!result.has_errors());
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::config::ValidatorConfig;
use crate::foundation::{
    Evaluation, Evaluator, EvaluatorFault, ValidationFailure, async_evaluator_fn, evaluator_fn,
};
use crate::result::ValidationResult;
use crate::session::ValidationSession;

/// Predicate over the data object; when it holds, a pass evaluates nothing.
pub type OptionalPredicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Evaluator bound to a single property.
pub type PropertyEvaluator = Arc<dyn Evaluator<Value>>;

// ============================================================================
// SHARED RULE
// ============================================================================

/// A named evaluator over the whole data object.
///
/// Attach it to several properties with
/// [`RuleTemplateBuilder::validation_for`]; it still runs once per pass and
/// writes one record, keyed by its own name, into the slot of the same name.
pub struct SharedRule<T> {
    name: String,
    evaluator: Arc<dyn Evaluator<T>>,
}

impl<T> Clone for SharedRule<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            evaluator: Arc::clone(&self.evaluator),
        }
    }
}

impl<T> fmt::Debug for SharedRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedRule")
            .field("name", &self.name)
            .field("mode", &self.evaluator.mode())
            .finish()
    }
}

impl<T: 'static> SharedRule<T> {
    /// Creates a synchronous shared rule.
    ///
    /// `func` receives the data object and a fresh passing record to fill in.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let one_space = SharedRule::new("OneSpaceForbidden", |person: &Person, args| {
    ///     if person.first_name.contains(' ') || person.last_name.contains(' ') {
    ///         args.fail("Full name can contain only one space.");
    ///     }
    ///     Ok(())
    /// });
    /// ```
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&T, &mut ValidationFailure) -> Result<(), EvaluatorFault> + Send + Sync + 'static,
    {
        let name = name.into();
        let evaluator = evaluator_fn(name.clone(), move |data: &T| {
            let mut args = ValidationFailure::passed();
            func(data, &mut args)?;
            Ok(args)
        });
        Self {
            name,
            evaluator: Arc::new(evaluator),
        }
    }

    /// Creates an asynchronous shared rule.
    ///
    /// `func` runs synchronously, copies what it needs out of the data
    /// object, and returns a `'static` future producing the record.
    pub fn new_async<F, Fut>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Evaluation> + Send + 'static,
    {
        let name = name.into();
        let evaluator = async_evaluator_fn(name.clone(), func);
        Self {
            name,
            evaluator: Arc::new(evaluator),
        }
    }

    /// Wraps an existing evaluator under a rule name.
    pub fn from_evaluator(name: impl Into<String>, evaluator: impl Evaluator<T> + 'static) -> Self {
        Self {
            name: name.into(),
            evaluator: Arc::new(evaluator),
        }
    }
}

impl<T> SharedRule<T> {
    /// Rule name; also the slot name and the record key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The evaluator run for this rule.
    #[must_use]
    pub fn evaluator(&self) -> &dyn Evaluator<T> {
        self.evaluator.as_ref()
    }
}

/// A shared rule together with the properties that reference it.
pub struct SharedBinding<T> {
    rule: SharedRule<T>,
    property_names: IndexSet<String>,
}

impl<T> SharedBinding<T> {
    /// The bound rule.
    #[must_use]
    pub fn rule(&self) -> &SharedRule<T> {
        &self.rule
    }

    /// Rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.rule.name()
    }

    /// Properties referencing this rule, in registration order.
    #[must_use]
    pub fn property_names(&self) -> &IndexSet<String> {
        &self.property_names
    }
}

impl<T> fmt::Debug for SharedBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedBinding")
            .field("rule", &self.rule)
            .field("property_names", &self.property_names)
            .finish()
    }
}

// ============================================================================
// TEMPLATE
// ============================================================================

struct TemplateRules<T> {
    property_rules: IndexMap<String, Vec<PropertyEvaluator>>,
    shared_rules: IndexMap<String, SharedBinding<T>>,
    optional: Option<OptionalPredicate<T>>,
    config: ValidatorConfig,
}

/// Immutable, reusable set of rules for data objects of type `T`.
///
/// Cloning is cheap; clones share the same rules.
pub struct RuleTemplate<T> {
    rules: Arc<TemplateRules<T>>,
}

impl<T> Clone for RuleTemplate<T> {
    fn clone(&self) -> Self {
        Self {
            rules: Arc::clone(&self.rules),
        }
    }
}

impl<T> fmt::Debug for RuleTemplate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleTemplate")
            .field("properties", &self.rules.property_rules.keys().collect::<Vec<_>>())
            .field("shared_rules", &self.rules.shared_rules.keys().collect::<Vec<_>>())
            .field("optional", &self.rules.optional.is_some())
            .field("config", &self.rules.config)
            .finish()
    }
}

impl<T> RuleTemplate<T> {
    /// Starts a new template.
    #[must_use]
    pub fn builder() -> RuleTemplateBuilder<T> {
        RuleTemplateBuilder::new()
    }

    /// Creates a validation session with a fresh result.
    ///
    /// The result holds one slot per property with rules, followed by one per
    /// shared rule, all empty.
    pub fn create_rule(&self, name: impl Into<String>) -> ValidationSession<T> {
        let name = name.into();
        let result = ValidationResult::new(name.clone(), self.slot_names());
        tracing::debug!(session = %name, slots = result.errors().len(), "created validation session");
        ValidationSession::new(name, self.clone(), result)
    }

    /// Slot names in notification order.
    pub fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.rules
            .property_rules
            .keys()
            .chain(self.rules.shared_rules.keys())
            .map(String::as_str)
    }

    /// Properties with at least one rule, in registration order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.rules.property_rules.keys().map(String::as_str)
    }

    /// Evaluators bound to `property`, in registration order.
    #[must_use]
    pub fn rules_for(&self, property: &str) -> &[PropertyEvaluator] {
        self.rules
            .property_rules
            .get(property)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All property rules, grouped by property.
    #[must_use]
    pub fn property_rules(&self) -> &IndexMap<String, Vec<PropertyEvaluator>> {
        &self.rules.property_rules
    }

    /// All shared rules, in registration order.
    pub fn shared_rules(&self) -> impl Iterator<Item = &SharedBinding<T>> {
        self.rules.shared_rules.values()
    }

    /// Shared rules referenced by `property`.
    pub fn shared_rules_for<'a>(
        &'a self,
        property: &'a str,
    ) -> impl Iterator<Item = &'a SharedBinding<T>> + 'a {
        self.shared_rules()
            .filter(move |binding| binding.property_names.contains(property))
    }

    /// Template-wide optional predicate.
    #[must_use]
    pub fn optional(&self) -> Option<&OptionalPredicate<T>> {
        self.rules.optional.as_ref()
    }

    /// Template configuration.
    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.rules.config
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Registers rules, then freezes them into a [`RuleTemplate`].
pub struct RuleTemplateBuilder<T> {
    rules: TemplateRules<T>,
}

impl<T> RuleTemplateBuilder<T> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: TemplateRules {
                property_rules: IndexMap::new(),
                shared_rules: IndexMap::new(),
                optional: None,
                config: ValidatorConfig::default(),
            },
        }
    }

    /// Binds `evaluator` to `property`.
    ///
    /// Bindings accumulate in call order, which is also evaluation order.
    /// The record key is [`Evaluator::name`]; binding two evaluators with the
    /// same name to one property makes the later one overwrite the earlier
    /// one's record.
    pub fn rule_for(
        mut self,
        property: impl Into<String>,
        evaluator: impl Evaluator<Value> + 'static,
    ) -> Self {
        let property = property.into();
        let evaluators = self
            .rules
            .property_rules
            .entry(property.clone())
            .or_default();
        if evaluators.iter().any(|e| e.name() == evaluator.name()) {
            tracing::warn!(
                %property,
                evaluator = evaluator.name(),
                "evaluator name already bound to this property; records will collide"
            );
        }
        evaluators.push(Arc::new(evaluator));
        self
    }

    /// Attaches a shared rule to `property`.
    ///
    /// If a rule with the same name is already registered, `property` joins
    /// its property set and the new rule's evaluator is discarded.
    pub fn validation_for(mut self, property: impl Into<String>, rule: SharedRule<T>) -> Self {
        let property = property.into();
        self.rules
            .shared_rules
            .entry(rule.name.clone())
            .or_insert_with(|| SharedBinding {
                rule,
                property_names: IndexSet::new(),
            })
            .property_names
            .insert(property);
        self
    }

    /// Sets the template-wide optional predicate, replacing any earlier one.
    pub fn set_optional<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.rules.optional = Some(Arc::new(predicate));
        self
    }

    /// Sets the template configuration.
    pub fn config(mut self, config: ValidatorConfig) -> Self {
        self.rules.config = config;
        self
    }

    /// Freezes the registered rules.
    #[must_use]
    pub fn build(self) -> RuleTemplate<T> {
        RuleTemplate {
            rules: Arc::new(self.rules),
        }
    }
}

impl<T> Default for RuleTemplateBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
