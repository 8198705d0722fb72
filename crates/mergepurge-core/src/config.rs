//! Configuration for mergepurge-core
//!
//! Centralized configuration for normalization, blocking, and fuzzy
//! scoring parameters.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergePurgeConfig {
    /// Fuzzy scoring parameters
    pub matching: MatchConfig,
    /// Candidate lookup parameters
    pub blocking: BlockingConfig,
    /// Normalization parameters
    pub normalization: NormalizationConfig,
}

/// Fuzzy scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// A pair links fuzzily only when its score is strictly above this
    pub threshold: f64,
    /// Total weight of the fields both records share before a score counts
    pub min_compared_weight: f64,
    /// Per-field weights
    pub weights: FieldWeights,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: 0.85,
            min_compared_weight: 0.3,
            weights: FieldWeights::default(),
        }
    }
}

/// Relative weight of each compared field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    pub first_name: f64,
    pub last_name: f64,
    pub company_name: f64,
    pub street_number: f64,
    pub street: f64,
    pub city: f64,
    pub state: f64,
    pub zip: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            first_name: 0.15,
            last_name: 0.25,
            company_name: 0.2,
            street_number: 0.1,
            street: 0.15,
            city: 0.05,
            state: 0.02,
            zip: 0.08,
        }
    }
}

impl FieldWeights {
    fn values(&self) -> [f64; 8] {
        [
            self.first_name,
            self.last_name,
            self.company_name,
            self.street_number,
            self.street,
            self.city,
            self.state,
            self.zip,
        ]
    }

    /// Sum of all weights
    pub fn total(&self) -> f64 {
        self.values().iter().sum()
    }
}

/// Candidate lookup configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockingConfig {
    /// Also offer canonical records sharing zip, last name, or company
    pub loose_keys: bool,
}

impl Default for BlockingConfig {
    fn default() -> Self {
        Self { loose_keys: true }
    }
}

/// Normalization configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationConfig {
    /// Keep the digits after "ext" in phone columns
    pub phone_extension: bool,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            phone_extension: true,
        }
    }
}

impl MergePurgeConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.matching.validate()
    }
}

impl MatchConfig {
    /// Validate scoring parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::OutOfRange(format!(
                "threshold must be between 0.0 and 1.0, got {}",
                self.threshold
            )));
        }

        if self.min_compared_weight < 0.0 || self.min_compared_weight.is_nan() {
            return Err(ConfigError::OutOfRange(format!(
                "min_compared_weight must be non-negative, got {}",
                self.min_compared_weight
            )));
        }

        if self.weights.values().iter().any(|w| *w < 0.0 || w.is_nan()) {
            return Err(ConfigError::InvalidWeights(
                "field weights must be non-negative".to_string(),
            ));
        }

        if self.weights.total() <= 0.0 {
            return Err(ConfigError::InvalidWeights(
                "at least one field weight must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
