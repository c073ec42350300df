//! # Fraud Scoring
//!
//! A [`FraudScorer`] maps an encoded [`FeatureVector`] to a [`Probability`]
//! that the transaction is fraudulent. [`LogisticScorer`] is a configured
//! linear model; any trained model can be plugged in behind the trait.
//!
//! Probabilities are recorded in the ledger as integer basis points, never
//! as floats, so the recorded value has one canonical encoding.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::features::FeatureVector;

/// A probability in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Probability(f64);

impl Probability {
    /// Basis points in 1.0.
    pub const SCALE: u16 = 10_000;

    /// Clamp `p` into `[0, 1]`. NaN becomes 0.
    pub fn new(p: f64) -> Self {
        if p.is_nan() {
            Self(0.0)
        } else {
            Self(p.clamp(0.0, 1.0))
        }
    }

    /// Build from basis points, saturating at 10 000.
    pub fn from_basis_points(bp: u16) -> Self {
        Self(f64::from(bp.min(Self::SCALE)) / f64::from(Self::SCALE))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// `round(p * 10 000)`; 2 decimal places of a percentage.
    pub fn basis_points(self) -> u16 {
        (self.0 * f64::from(Self::SCALE)).round() as u16
    }
}

impl std::fmt::Display for Probability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bp = self.basis_points();
        write!(f, "{}.{:02}%", bp / 100, bp % 100)
    }
}

/// Produces a fraud probability from model inputs.
pub trait FraudScorer: Send + Sync + std::fmt::Debug {
    fn score(&self, features: &FeatureVector) -> Probability;
}

/// `sigmoid(bias + Σ weight[column] · value)`.
///
/// Columns without a weight contribute nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogisticScorer {
    pub bias: f64,
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
}

impl LogisticScorer {
    pub fn new(bias: f64, weights: BTreeMap<String, f64>) -> Self {
        Self { bias, weights }
    }

    /// The pre-sigmoid linear term.
    pub fn logit(&self, features: &FeatureVector) -> f64 {
        features.iter().fold(self.bias, |acc, (name, value)| {
            acc + self.weights.get(name).copied().unwrap_or(0.0) * value
        })
    }
}

impl Default for LogisticScorer {
    fn default() -> Self {
        let weights = [
            ("amount", 0.0002),
            ("sender_balance", -0.00002),
            ("transaction_speed", -0.6),
            ("sender_country_UK", 0.8),
            ("receiver_country_UK", 0.8),
            ("receiver_country_SG", 0.4),
            ("receiver_country_US", 0.3),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Self::new(-4.0, weights)
    }
}

impl FraudScorer for LogisticScorer {
    fn score(&self, features: &FeatureVector) -> Probability {
        let z = self.logit(features);
        Probability::new(1.0 / (1.0 + (-z).exp()))
    }
}
