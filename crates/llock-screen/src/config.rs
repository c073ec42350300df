//! # Screening Configuration
//!
//! YAML configuration. Every section and field is optional; omitted values
//! fall back to the built-in defaults.
//!
//! ```yaml
//! kyc:
//!   verified_accounts: [IN12345, US67890, SG34567]
//! compliance:
//!   max_amount: 25000
//! risk:
//!   high_amount: 10000
//!   fast_speed: 2
//! model:
//!   threshold: 0.5
//!   feature_names: [amount, sender_balance, receiver_balance, transaction_speed]
//!   scorer:
//!     bias: -4.0
//!     weights: { amount: 0.0002 }
//! ```

use std::path::Path;

use llock_core::AccountId;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::features::default_feature_names;
use crate::kyc::DEFAULT_VERIFIED_ACCOUNTS;
use crate::risk::RiskConfig;
use crate::rules::AmountCeiling;
use crate::scorer::LogisticScorer;

/// Top-level screening configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScreeningConfig {
    pub kyc: KycConfig,
    pub compliance: ComplianceConfig,
    pub risk: RiskConfig,
    pub model: ModelConfig,
}

/// Verified KYC accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KycConfig {
    pub verified_accounts: Vec<AccountId>,
}

impl Default for KycConfig {
    fn default() -> Self {
        Self {
            verified_accounts: DEFAULT_VERIFIED_ACCOUNTS
                .iter()
                .filter_map(|id| AccountId::new(*id).ok())
                .collect(),
        }
    }
}

/// Rule-based AML limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComplianceConfig {
    /// Amounts strictly above this are rejected.
    pub max_amount: u64,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            max_amount: AmountCeiling::DEFAULT_MAX_AMOUNT,
        }
    }
}

/// Fraud model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Probabilities strictly above this flag the transaction as fraud.
    pub threshold: f64,
    /// Model columns, in training order.
    pub feature_names: Vec<String>,
    pub scorer: LogisticScorer,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            feature_names: default_feature_names(),
            scorer: LogisticScorer::default(),
        }
    }
}

impl ScreeningConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Check value ranges serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let model = &self.model;
        if !(0.0..=1.0).contains(&model.threshold) {
            return Err(ConfigError::Invalid(format!(
                "model.threshold must be within [0, 1], got {}",
                model.threshold
            )));
        }
        if !model.scorer.bias.is_finite() {
            return Err(ConfigError::Invalid("model.scorer.bias must be finite".into()));
        }
        if let Some((name, _)) = model.scorer.weights.iter().find(|(_, w)| !w.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "model.scorer.weights.{name} must be finite"
            )));
        }
        if model.feature_names.is_empty() {
            return Err(ConfigError::Invalid(
                "model.feature_names must not be empty".into(),
            ));
        }
        Ok(())
    }
}
