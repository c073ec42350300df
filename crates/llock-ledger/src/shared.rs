//! # Shared Ledger Handle
//!
//! `Arc<RwLock<Ledger>>` wrapper for services that append from several
//! threads. Reads share the lock; `append` takes it exclusively, so reading
//! the last hash and pushing the new entry happen as one step.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::chain::Ledger;
use crate::entry::Entry;
use crate::error::{AppendError, LedgerError, TamperDetected};
use crate::store::EntrySink;

/// A cloneable, thread-safe handle to one [`Ledger`].
pub struct SharedLedger<P> {
    inner: Arc<RwLock<Ledger<P>>>,
}

impl<P> Clone for SharedLedger<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: Serialize + Clone> SharedLedger<P> {
    /// A fresh ledger holding only genesis, stamped by the system clock.
    pub fn new() -> Self {
        Self::from_ledger(Ledger::new())
    }

    /// Append a record and return a copy of the new entry.
    pub fn append(&self, record: P) -> Result<Entry<P>, LedgerError> {
        let mut ledger = self.inner.write();
        ledger.append(record).cloned()
    }

    /// Append a record and hand the new entry to `sink` while still holding
    /// the write lock, so the sink sees entries in chain order.
    ///
    /// A sink failure does not roll back the in-memory append; the entry is
    /// reported in [`AppendError::Persist`].
    pub fn append_persisted<S>(&self, record: P, sink: &mut S) -> Result<Entry<P>, AppendError>
    where
        S: EntrySink<P> + ?Sized,
    {
        let mut ledger = self.inner.write();
        let entry = ledger.append(record)?.clone();
        sink.persist(&entry).map_err(|source| AppendError::Persist {
            index: entry.index,
            hash: entry.hash.clone(),
            source,
        })?;
        Ok(entry)
    }

    /// Copy of the most recent entry.
    pub fn last_entry(&self) -> Entry<P> {
        self.inner.read().last_entry().clone()
    }

    /// Copy of every entry, genesis first.
    pub fn snapshot(&self) -> Vec<Entry<P>> {
        self.inner.read().entries().to_vec()
    }

    /// Verify the chain under a read lock.
    pub fn verify_chain(&self) -> Result<(), TamperDetected> {
        self.inner.read().verify_chain()
    }
}

impl<P> SharedLedger<P> {
    /// Wrap an existing ledger.
    pub fn from_ledger(ledger: Ledger<P>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Number of entries, including genesis.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Always false.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Run `f` against the ledger under a read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Ledger<P>) -> R) -> R {
        f(&self.inner.read())
    }
}

impl<P: Serialize + Clone> Default for SharedLedger<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> std::fmt::Debug for SharedLedger<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedLedger")
            .field("entries", &self.len())
            .finish()
    }
}
