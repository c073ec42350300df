//! # AML Compliance Rules
//!
//! Rule-based checks that run after KYC and before any scoring. A failing
//! rule rejects the transaction outright; nothing is recorded.

use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;

/// Rejection reason of [`AmountCeiling`].
pub const HIGH_RISK_AMOUNT_REASON: &str = "High-risk transaction amount";

/// A single pass/fail compliance check.
pub trait ComplianceRule: Send + Sync + std::fmt::Debug {
    /// Short stable identifier, used in logs.
    fn name(&self) -> &'static str;

    /// `Err(reason)` if `tx` violates the rule.
    fn check(&self, tx: &Transaction) -> Result<(), String>;
}

/// Rejects amounts strictly above `max_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountCeiling {
    pub max_amount: u64,
}

impl AmountCeiling {
    /// Default ceiling.
    pub const DEFAULT_MAX_AMOUNT: u64 = 25_000;

    pub fn new(max_amount: u64) -> Self {
        Self { max_amount }
    }
}

impl Default for AmountCeiling {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_AMOUNT)
    }
}

impl ComplianceRule for AmountCeiling {
    fn name(&self) -> &'static str {
        "amount_ceiling"
    }

    fn check(&self, tx: &Transaction) -> Result<(), String> {
        if tx.amount > self.max_amount {
            Err(HIGH_RISK_AMOUNT_REASON.to_string())
        } else {
            Ok(())
        }
    }
}
