//! Template configuration

use serde::{Deserialize, Serialize};

/// What a pass skipped by the optional predicate does to existing records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipPolicy {
    /// Leave every record as the previous pass wrote it.
    #[default]
    Retain,
    /// Clear every record and notify the slots that had errors.
    Reset,
}

/// Behaviour switches shared by every session of a template.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_validation::config::{SkipPolicy, ValidatorConfig};
///
/// let config = ValidatorConfig::from_json(r#"{ "skip_policy": "reset" }"#)?;
/// assert_eq!(config.skip_policy, SkipPolicy::Reset);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Applied when the optional predicate skips a pass.
    pub skip_policy: SkipPolicy,
}

impl ValidatorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the skip policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_skip_policy(mut self, policy: SkipPolicy) -> Self {
        self.skip_policy = policy;
        self
    }

    /// Parses a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
