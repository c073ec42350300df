//! # Screener
//!
//! The screening pipeline. A [`Screener`] is built once from configuration
//! and is immutable afterwards; all mutable state lives in the ledger it is
//! handed on each call.
//!
//! ## Recorded Data
//!
//! Every transaction that passes KYC and the AML rules is appended as a
//! [`ScreeningRecord`], whether or not it is flagged as fraud. The fraud
//! probability is stored as integer basis points (`1234` = 12.34%).

use llock_core::AccountId;
use llock_ledger::{Entry, EntrySink, SharedLedger};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ScreeningConfig;
use crate::error::ScreenError;
use crate::features::FeatureEncoder;
use crate::kyc::{KycRegistry, StaticKycRegistry};
use crate::risk::{assess_risk, RiskAssessment, RiskConfig, RiskFactor};
use crate::rules::{AmountCeiling, ComplianceRule};
use crate::scorer::{FraudScorer, Probability};
use crate::transaction::Transaction;

/// The payload appended to the ledger for each accepted screening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScreeningRecord {
    /// Unique per screening, so identical transactions stay distinguishable.
    pub screening_id: Uuid,
    pub transaction: Transaction,
    pub risk_score: u8,
    pub risk_factors: Vec<RiskFactor>,
    /// Fraud probability in basis points, `0..=10000`.
    pub fraud_probability_bp: u16,
    pub is_fraud: bool,
}

impl ScreeningRecord {
    pub fn fraud_probability(&self) -> Probability {
        Probability::from_basis_points(self.fraud_probability_bp)
    }
}

/// Why a transaction was rejected before scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// Sender or receiver is not KYC-verified.
    KycFailed {
        /// The unverified parties, sender first.
        unverified: Vec<AccountId>,
    },
    /// An AML rule failed.
    Compliance {
        rule: &'static str,
        reason: String,
    },
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KycFailed { .. } => f.write_str("KYC Failed"),
            Self::Compliance { reason, .. } => f.write_str(reason),
        }
    }
}

/// A screening that was appended to the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    /// Ledger index of the new entry.
    pub index: u64,
    /// Hash of the new entry.
    pub hash: String,
    pub screening_id: Uuid,
    pub risk: RiskAssessment,
    pub probability: Probability,
    pub is_fraud: bool,
}

/// Outcome of screening one transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Not recorded.
    Rejected(RejectionReason),
    /// Recorded in the ledger.
    Recorded(Recorded),
}

impl Decision {
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded(_))
    }

    /// One-line status for operator output.
    pub fn status(&self) -> String {
        match self {
            Self::Rejected(reason) => format!("Transaction Rejected: {reason}"),
            Self::Recorded(_) => "Transaction Processed Successfully".to_string(),
        }
    }
}

/// Runs transactions through KYC, AML rules, risk scoring and the fraud model.
#[derive(Debug)]
pub struct Screener {
    kyc: Box<dyn KycRegistry>,
    rules: Vec<Box<dyn ComplianceRule>>,
    risk: RiskConfig,
    encoder: FeatureEncoder,
    scorer: Box<dyn FraudScorer>,
    threshold: Probability,
}

impl Screener {
    /// A screener with no compliance rules, default risk thresholds, the
    /// default feature columns and a 0.5 fraud threshold.
    pub fn new(kyc: impl KycRegistry + 'static, scorer: impl FraudScorer + 'static) -> Self {
        Self {
            kyc: Box::new(kyc),
            rules: Vec::new(),
            risk: RiskConfig::default(),
            encoder: FeatureEncoder::default(),
            scorer: Box::new(scorer),
            threshold: Probability::new(0.5),
        }
    }

    /// Build the full pipeline from configuration.
    pub fn from_config(config: &ScreeningConfig) -> Self {
        let kyc = StaticKycRegistry::new(config.kyc.verified_accounts.iter().cloned());
        Self::new(kyc, config.model.scorer.clone())
            .with_rule(AmountCeiling::new(config.compliance.max_amount))
            .with_risk_config(config.risk)
            .with_encoder(FeatureEncoder::new(config.model.feature_names.clone()))
            .with_threshold(Probability::new(config.model.threshold))
    }

    /// Add a compliance rule. Rules run in insertion order.
    pub fn with_rule(mut self, rule: impl ComplianceRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn with_risk_config(mut self, risk: RiskConfig) -> Self {
        self.risk = risk;
        self
    }

    pub fn with_encoder(mut self, encoder: FeatureEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Probabilities strictly above `threshold` are flagged as fraud.
    pub fn with_threshold(mut self, threshold: Probability) -> Self {
        self.threshold = threshold;
        self
    }

    /// Screen `tx` and record it in `ledger` if it passes KYC and the rules.
    pub fn screen(
        &self,
        tx: &Transaction,
        ledger: &SharedLedger<ScreeningRecord>,
    ) -> Result<Decision, ScreenError> {
        self.screen_with(tx, |record| Ok(ledger.append(record)?))
    }

    /// Like [`Screener::screen`], also handing the new entry to `sink` under
    /// the ledger's write lock.
    pub fn screen_persisted<S>(
        &self,
        tx: &Transaction,
        ledger: &SharedLedger<ScreeningRecord>,
        sink: &mut S,
    ) -> Result<Decision, ScreenError>
    where
        S: EntrySink<ScreeningRecord> + ?Sized,
    {
        self.screen_with(tx, |record| Ok(ledger.append_persisted(record, sink)?))
    }

    /// Screen each transaction in order.
    ///
    /// Stops at the first pipeline error; decisions for earlier transactions
    /// are already recorded in the ledger.
    pub fn screen_batch(
        &self,
        txs: &[Transaction],
        ledger: &SharedLedger<ScreeningRecord>,
    ) -> Result<Vec<Decision>, ScreenError> {
        txs.iter().map(|tx| self.screen(tx, ledger)).collect()
    }

    /// Run the KYC and rule checks only.
    pub fn precheck(&self, tx: &Transaction) -> Result<(), RejectionReason> {
        let unverified = self.kyc.unverified_parties(tx);
        if !unverified.is_empty() {
            return Err(RejectionReason::KycFailed { unverified });
        }
        for rule in &self.rules {
            if let Err(reason) = rule.check(tx) {
                return Err(RejectionReason::Compliance {
                    rule: rule.name(),
                    reason,
                });
            }
        }
        Ok(())
    }

    /// Risk assessment and fraud probability, without touching any ledger.
    pub fn evaluate(&self, tx: &Transaction) -> (RiskAssessment, Probability) {
        let risk = assess_risk(tx, &self.risk);
        let probability = self.scorer.score(&self.encoder.encode(tx));
        (risk, probability)
    }

    fn screen_with<F>(&self, tx: &Transaction, append: F) -> Result<Decision, ScreenError>
    where
        F: FnOnce(ScreeningRecord) -> Result<Entry<ScreeningRecord>, ScreenError>,
    {
        if let Err(reason) = self.precheck(tx) {
            match &reason {
                RejectionReason::KycFailed { unverified } => tracing::warn!(
                    sender = %tx.sender_id,
                    receiver = %tx.receiver_id,
                    unverified = ?unverified.iter().map(AccountId::as_str).collect::<Vec<_>>(),
                    "KYC verification failed"
                ),
                RejectionReason::Compliance { rule, reason } => tracing::warn!(
                    sender = %tx.sender_id,
                    amount = tx.amount,
                    rule = *rule,
                    reason = %reason,
                    "AML compliance failed"
                ),
            }
            return Ok(Decision::Rejected(reason));
        }

        let (risk, probability) = self.evaluate(tx);
        let is_fraud = probability > self.threshold;
        let screening_id = Uuid::new_v4();
        tracing::debug!(
            %screening_id,
            risk_score = risk.score,
            fraud_probability = %probability,
            "transaction scored"
        );

        let record = ScreeningRecord {
            screening_id,
            transaction: tx.clone(),
            risk_score: risk.score,
            risk_factors: risk.factors.clone(),
            fraud_probability_bp: probability.basis_points(),
            is_fraud,
        };
        let entry = append(record)?;

        tracing::info!(
            %screening_id,
            index = entry.index,
            hash = %entry.hash,
            fraud_probability = %probability,
            is_fraud,
            "screening recorded"
        );

        Ok(Decision::Recorded(Recorded {
            index: entry.index,
            hash: entry.hash,
            screening_id,
            risk,
            probability,
            is_fraud,
        }))
    }
}

impl Default for Screener {
    fn default() -> Self {
        Self::from_config(&ScreeningConfig::default())
    }
}
