//! Tunable thresholds for rule evaluation.
//!
//! Hosts can load an [`AiConfig`] from their own data files (it is serde
//! serializable) or build one in code. Contexts without an explicit config
//! use [`AiConfig::DEFAULT`].

use serde::{Deserialize, Serialize};

/// Thresholds used by the named predicates and target rules.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// `low` holds strictly below this percentage of the maximum.
    pub low_percent: f64,

    /// `high` holds strictly above this percentage of the maximum.
    pub high_percent: f64,

    /// `low` threshold for values without a maximum.
    pub low_absolute: f64,

    /// `high` threshold for values without a maximum.
    ///
    /// `max` degrades to "at least this value" when there is no maximum.
    pub high_absolute: f64,

    /// Weight multiplier for `target` rules that give none.
    pub default_multiplier: f64,
}

impl AiConfig {
    pub const DEFAULT: AiConfig = AiConfig {
        low_percent: 33.0,
        high_percent: 66.0,
        low_absolute: 3.0,
        high_absolute: 5.0,
        default_multiplier: 2.0,
    };

    /// Set percentage thresholds for `low` and `high`.
    #[must_use]
    pub fn with_percent_thresholds(mut self, low: f64, high: f64) -> Self {
        self.low_percent = low;
        self.high_percent = high;
        self
    }

    /// Set absolute thresholds for `low` and `high`.
    #[must_use]
    pub fn with_absolute_thresholds(mut self, low: f64, high: f64) -> Self {
        self.low_absolute = low;
        self.high_absolute = high;
        self
    }

    /// Set the default target multiplier.
    ///
    /// Panics if the multiplier is not positive.
    #[must_use]
    pub fn with_default_multiplier(mut self, multiplier: f64) -> Self {
        assert!(multiplier > 0.0, "Target multiplier must be positive");
        self.default_multiplier = multiplier;
        self
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
