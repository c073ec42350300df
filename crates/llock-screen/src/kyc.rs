//! # KYC Registry
//!
//! A transaction may proceed only if both its sender and receiver are
//! verified accounts.

use std::collections::BTreeSet;

use llock_core::AccountId;

use crate::transaction::Transaction;

/// Accounts verified by default: `IN12345`, `US67890`, `SG34567`.
pub const DEFAULT_VERIFIED_ACCOUNTS: [&str; 3] = ["IN12345", "US67890", "SG34567"];

/// A source of KYC verification status.
pub trait KycRegistry: Send + Sync + std::fmt::Debug {
    /// Whether `account` has passed KYC.
    fn is_verified(&self, account: &AccountId) -> bool;

    /// Parties of `tx` that are not verified, sender first. Empty means the
    /// transaction passes KYC.
    fn unverified_parties(&self, tx: &Transaction) -> Vec<AccountId> {
        [&tx.sender_id, &tx.receiver_id]
            .into_iter()
            .filter(|id| !self.is_verified(id))
            .cloned()
            .collect()
    }
}

/// A fixed set of verified accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticKycRegistry {
    verified: BTreeSet<AccountId>,
}

impl StaticKycRegistry {
    pub fn new(verified: impl IntoIterator<Item = AccountId>) -> Self {
        Self {
            verified: verified.into_iter().collect(),
        }
    }

    /// Mark an account as verified.
    pub fn insert(&mut self, account: AccountId) -> bool {
        self.verified.insert(account)
    }

    pub fn len(&self) -> usize {
        self.verified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verified.is_empty()
    }
}

impl Default for StaticKycRegistry {
    fn default() -> Self {
        Self::new(
            DEFAULT_VERIFIED_ACCOUNTS
                .iter()
                .filter_map(|id| AccountId::new(*id).ok()),
        )
    }
}

impl KycRegistry for StaticKycRegistry {
    fn is_verified(&self, account: &AccountId) -> bool {
        self.verified.contains(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::fixtures::{account, transaction};

    #[test]
    fn default_registry_holds_sample_accounts() {
        let registry = StaticKycRegistry::default();
        assert_eq!(registry.len(), 3);
        for id in DEFAULT_VERIFIED_ACCOUNTS {
            assert!(registry.is_verified(&account(id)));
        }
        assert!(!registry.is_verified(&account("UK54321")));
    }

    #[test]
    fn both_parties_must_be_verified() {
        let registry = StaticKycRegistry::default();
        let tx = transaction();
        assert!(registry.unverified_parties(&tx).is_empty());

        let mut unknown_sender = transaction();
        unknown_sender.sender_id = account("UK54321");
        assert_eq!(
            registry.unverified_parties(&unknown_sender),
            vec![account("UK54321")]
        );

        let mut unknown_receiver = transaction();
        unknown_receiver.receiver_id = account("UK54321");
        assert_eq!(
            registry.unverified_parties(&unknown_receiver),
            vec![account("UK54321")]
        );
    }

    #[test]
    fn self_transfer_of_verified_account_passes() {
        let registry = StaticKycRegistry::default();
        let mut tx = transaction();
        tx.receiver_id = tx.sender_id.clone();
        assert!(registry.unverified_parties(&tx).is_empty());
    }

    #[test]
    fn empty_registry_rejects_everyone() {
        let mut registry = StaticKycRegistry::new(Vec::new());
        assert!(registry.is_empty());
        assert_eq!(registry.unverified_parties(&transaction()).len(), 2);
        assert!(registry.insert(account("IN12345")));
        assert!(!registry.insert(account("IN12345")));
        assert_eq!(registry.unverified_parties(&transaction()).len(), 1);
    }
}
