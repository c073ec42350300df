//! # llock-screen — Transaction Screening
//!
//! Runs each transaction through a fixed pipeline and records the outcome of
//! every accepted screening in the hash-linked ledger:
//!
//! ```text
//! Transaction
//!   │
//!   ├─ KYC: both parties verified?            ── no ──▶ Rejected(KycFailed)
//!   ├─ AML rules: every rule passes?          ── no ──▶ Rejected(Compliance)
//!   ├─ heuristic risk score (0..=4)
//!   ├─ feature encoding ─▶ fraud probability
//!   └─ append ScreeningRecord ─────────────────────────▶ Recorded { index, hash, .. }
//! ```
//!
//! Rejected transactions are never appended.
//!
//! ## Module Map
//!
//! - [`transaction`]: the screened transaction record.
//! - [`kyc`]: verified-party registry.
//! - [`rules`]: rule-based AML checks.
//! - [`risk`]: additive heuristic risk assessment.
//! - [`features`]: one-hot feature encoding in model column order.
//! - [`scorer`]: fraud probability models.
//! - [`config`]: YAML configuration with defaults.
//! - [`screener`]: the pipeline and the recorded [`ScreeningRecord`].

pub mod config;
pub mod error;
pub mod features;
pub mod kyc;
pub mod risk;
pub mod rules;
pub mod scorer;
pub mod screener;
pub mod transaction;

pub use config::{ComplianceConfig, KycConfig, ModelConfig, ScreeningConfig};
pub use error::{ConfigError, ScreenError};
pub use features::{FeatureEncoder, FeatureVector};
pub use kyc::{KycRegistry, StaticKycRegistry};
pub use risk::{assess_risk, RiskAssessment, RiskConfig, RiskFactor, MAX_RISK_SCORE};
pub use rules::{AmountCeiling, ComplianceRule, HIGH_RISK_AMOUNT_REASON};
pub use scorer::{FraudScorer, LogisticScorer, Probability};
pub use screener::{Decision, Recorded, RejectionReason, Screener, ScreeningRecord};
pub use transaction::Transaction;
