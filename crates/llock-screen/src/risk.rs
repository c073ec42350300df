//! # Heuristic Risk Assessment
//!
//! An additive score computed before model scoring:
//!
//! | Factor         | Condition                      | Weight |
//! |----------------|--------------------------------|--------|
//! | `HighAmount`   | `amount > high_amount`         | 2      |
//! | `FastTransfer` | `transaction_speed < fast_speed` | 1    |
//! | `CrossBorder`  | sender and receiver countries differ | 1 |
//!
//! The score is informational: it is recorded alongside the fraud
//! probability but does not by itself reject a transaction.

use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;

/// Highest possible score.
pub const MAX_RISK_SCORE: u8 = 4;

/// A triggered risk factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    HighAmount,
    FastTransfer,
    CrossBorder,
}

impl RiskFactor {
    /// Score contribution.
    pub fn weight(self) -> u8 {
        match self {
            Self::HighAmount => 2,
            Self::FastTransfer | Self::CrossBorder => 1,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::HighAmount => "High Transaction Amount",
            Self::FastTransfer => "Very Fast Transaction",
            Self::CrossBorder => "Cross-Border Transfer",
        }
    }
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Thresholds for [`assess_risk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RiskConfig {
    /// Amounts strictly above this trigger `HighAmount`.
    pub high_amount: u64,
    /// Speeds strictly below this trigger `FastTransfer`.
    pub fast_speed: u32,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            high_amount: 10_000,
            fast_speed: 2,
        }
    }
}

/// Result of [`assess_risk`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Sum of factor weights, `0..=MAX_RISK_SCORE`.
    pub score: u8,
    /// Triggered factors in evaluation order.
    pub factors: Vec<RiskFactor>,
}

/// Score `tx` against `config`.
pub fn assess_risk(tx: &Transaction, config: &RiskConfig) -> RiskAssessment {
    let mut factors = Vec::with_capacity(3);
    if tx.amount > config.high_amount {
        factors.push(RiskFactor::HighAmount);
    }
    if tx.transaction_speed < config.fast_speed {
        factors.push(RiskFactor::FastTransfer);
    }
    if tx.is_cross_border() {
        factors.push(RiskFactor::CrossBorder);
    }
    let score = factors.iter().map(|f| f.weight()).sum();
    RiskAssessment { score, factors }
}
