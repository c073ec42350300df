//! # Ledger
//!
//! The owned, in-memory chain. A `Ledger` is created once per session, owns
//! all of its entries exclusively, and is dropped with the session.
//!
//! ## Security Invariants
//!
//! - Entries can only be appended, never modified or removed.
//! - `append` computes everything before pushing, so a failed append leaves
//!   the ledger untouched.
//! - Timestamps stamped by one `Ledger` value are non-decreasing even if the
//!   clock steps backwards. Timestamps of restored entries are not consulted.

use std::sync::Arc;

use llock_core::Timestamp;
use serde::Serialize;

use crate::clock::{Clock, SystemClock};
use crate::entry::{compute_entry_hash, Entry, GenesisMarker, Payload, GENESIS_PREVIOUS_HASH};
use crate::error::{LedgerError, TamperDetected};
use crate::verify::verify_entries;

/// An append-only, hash-linked sequence of entries.
///
/// ## Thread Safety
///
/// `append` takes `&mut self`. Share across threads with
/// [`crate::SharedLedger`].
pub struct Ledger<P> {
    entries: Vec<Entry<P>>,
    clock: Arc<dyn Clock>,
    last_stamped: Option<Timestamp>,
}

impl<P: Serialize> Ledger<P> {
    /// Initialize a ledger holding only the genesis entry, stamped by the
    /// system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Initialize a ledger holding only the genesis entry, stamped by `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let timestamp = clock.now();
        let payload = Payload::Genesis(GenesisMarker::default());
        // The genesis payload is a single string field; JCS cannot reject it.
        let hash = compute_entry_hash(GENESIS_PREVIOUS_HASH, &payload, &timestamp)
            .expect("genesis marker always canonicalizes");
        let genesis = Entry {
            index: 1,
            previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
            payload,
            timestamp,
            hash,
        };
        Self {
            entries: vec![genesis],
            clock,
            last_stamped: Some(timestamp),
        }
    }

    /// Rebuild a ledger from previously persisted entries.
    ///
    /// The entries are verified first; a tampered sequence is rejected with
    /// the earliest offending index.
    pub fn restore(
        entries: Vec<Entry<P>>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, TamperDetected> {
        verify_entries(&entries)?;
        Ok(Self {
            entries,
            clock,
            last_stamped: None,
        })
    }

    /// Append a caller record and return the new entry.
    ///
    /// # Errors
    ///
    /// `LedgerError::Serialization` if the record cannot be canonicalized.
    /// The ledger is unchanged in that case.
    pub fn append(&mut self, record: P) -> Result<&Entry<P>, LedgerError> {
        let previous_hash = self.last_entry().hash.clone();
        let timestamp = self.next_timestamp();
        let payload = Payload::Record(record);
        let hash = compute_entry_hash(&previous_hash, &payload, &timestamp)?;

        self.entries.push(Entry {
            index: self.entries.len() as u64 + 1,
            previous_hash,
            payload,
            timestamp,
            hash,
        });
        self.last_stamped = Some(timestamp);
        Ok(self.last_entry())
    }

    /// Recompute every hash and link. See [`verify_entries`].
    pub fn verify_chain(&self) -> Result<(), TamperDetected> {
        verify_entries(&self.entries)
    }

    fn next_timestamp(&self) -> Timestamp {
        let now = self.clock.now();
        match self.last_stamped {
            Some(last) if now < last => last,
            _ => now,
        }
    }
}

impl<P> Ledger<P> {
    /// The most recently appended entry (the genesis entry if nothing was appended).
    pub fn last_entry(&self) -> &Entry<P> {
        // Never empty: every constructor installs or verifies a genesis entry.
        &self.entries[self.entries.len() - 1]
    }

    /// The genesis entry.
    pub fn genesis(&self) -> &Entry<P> {
        &self.entries[0]
    }

    /// Hash of the last entry.
    pub fn head_hash(&self) -> &str {
        &self.last_entry().hash
    }

    /// All entries, genesis first.
    pub fn entries(&self) -> &[Entry<P>] {
        &self.entries
    }

    /// Look up an entry by its 1-based index.
    pub fn get(&self, index: u64) -> Option<&Entry<P>> {
        let position = usize::try_from(index.checked_sub(1)?).ok()?;
        self.entries.get(position)
    }

    /// Iterate over entries, genesis first.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry<P>> {
        self.entries.iter()
    }

    /// Number of entries, including genesis. Always at least 1.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<P: Serialize> Default for Ledger<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, P> IntoIterator for &'a Ledger<P> {
    type Item = &'a Entry<P>;
    type IntoIter = std::slice::Iter<'a, Entry<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<P> std::fmt::Debug for Ledger<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("entries", &self.entries.len())
            .field("head", &self.head_hash())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::entry::GENESIS_MARKER;
    use crate::error::TamperKind;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn fixed(s: &str) -> Arc<FixedClock> {
        Arc::new(FixedClock::new(ts(s)))
    }

    #[test]
    fn initialize_yields_single_genesis() {
        let ledger: Ledger<Value> = Ledger::new();
        assert_eq!(ledger.len(), 1);
        let genesis = ledger.genesis();
        assert_eq!(genesis.index, 1);
        assert_eq!(genesis.previous_hash, "0");
        assert_eq!(
            genesis.payload,
            Payload::Genesis(GenesisMarker {
                system: GENESIS_MARKER.into()
            })
        );
        assert_eq!(ledger.last_entry(), genesis);
        assert_eq!(ledger.verify_chain(), Ok(()));
    }

    #[test]
    fn append_links_to_previous_entry() {
        let mut ledger: Ledger<Value> = Ledger::with_clock(fixed("2026-01-15T12:00:00Z"));
        let genesis_hash = ledger.head_hash().to_string();

        let first = ledger.append(json!({"amount": 5000})).unwrap().clone();
        assert_eq!(first.index, 2);
        assert_eq!(first.previous_hash, genesis_hash);

        let second = ledger.append(json!({"amount": 12000})).unwrap().clone();
        assert_eq!(second.index, 3);
        assert_eq!(second.previous_hash, first.hash);
        assert_eq!(ledger.last_entry(), &second);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn failed_append_leaves_ledger_unchanged() {
        let mut ledger: Ledger<Value> = Ledger::new();
        ledger.append(json!({"amount": 5000})).unwrap();
        let before: Vec<_> = ledger.entries().to_vec();

        let err = ledger.append(json!({"fraud_probability": 0.73})).unwrap_err();
        assert!(matches!(err, LedgerError::Serialization(_)));
        assert_eq!(ledger.entries(), before.as_slice());

        // Still appendable afterwards, at the next index.
        assert_eq!(ledger.append(json!({"amount": 1})).unwrap().index, 3);
    }

    #[test]
    fn non_string_keys_fail_fast() {
        let mut ledger: Ledger<HashMap<(u8, u8), u8>> = Ledger::new();
        let mut record = HashMap::new();
        record.insert((1, 2), 3);
        assert!(ledger.append(record).is_err());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn timestamps_clamped_when_clock_steps_back() {
        let clock = fixed("2026-01-15T12:00:00Z");
        let mut ledger: Ledger<Value> = Ledger::with_clock(clock.clone());
        clock.set(ts("2026-01-15T12:05:00Z"));
        let a = ledger.append(json!({"n": 1})).unwrap().timestamp;
        clock.set(ts("2026-01-15T11:00:00Z"));
        let b = ledger.append(json!({"n": 2})).unwrap().timestamp;
        assert_eq!(a, ts("2026-01-15T12:05:00Z"));
        assert_eq!(b, a);
        assert_eq!(ledger.verify_chain(), Ok(()));
    }

    #[test]
    fn restore_accepts_verified_entries_and_continues_chain() {
        let mut original: Ledger<Value> = Ledger::with_clock(fixed("2026-01-15T12:00:00Z"));
        original.append(json!({"amount": 5000})).unwrap();
        let entries = original.entries().to_vec();

        // Restored after a clock reset: earlier timestamps are allowed.
        let mut restored = Ledger::restore(entries, fixed("2020-01-01T00:00:00Z")).unwrap();
        let next = restored.append(json!({"amount": 800})).unwrap().clone();
        assert_eq!(next.index, 3);
        assert_eq!(next.timestamp, ts("2020-01-01T00:00:00Z"));
        assert_eq!(restored.verify_chain(), Ok(()));
    }

    #[test]
    fn restore_rejects_tampered_entries() {
        let mut original: Ledger<Value> = Ledger::new();
        original.append(json!({"amount": 5000})).unwrap();
        let mut entries = original.entries().to_vec();
        entries[1].payload = Payload::Record(json!({"amount": 99999}));

        let err = Ledger::restore(entries, Arc::new(SystemClock)).unwrap_err();
        assert_eq!(err.index, 2);
        assert!(matches!(err.kind, TamperKind::HashMismatch { .. }));
    }

    #[test]
    fn get_uses_one_based_indices() {
        let mut ledger: Ledger<Value> = Ledger::new();
        ledger.append(json!({"n": 1})).unwrap();
        assert!(ledger.get(0).is_none());
        assert!(ledger.get(1).unwrap().is_genesis());
        assert_eq!(ledger.get(2).unwrap().record(), Some(&json!({"n": 1})));
        assert!(ledger.get(3).is_none());
    }

    #[test]
    fn verification_is_idempotent() {
        let mut ledger: Ledger<Value> = Ledger::new();
        for n in 0..5 {
            ledger.append(json!({"n": n})).unwrap();
        }
        let snapshot = ledger.entries().to_vec();
        for _ in 0..3 {
            assert_eq!(ledger.verify_chain(), Ok(()));
        }
        assert_eq!(ledger.entries(), snapshot.as_slice());
    }

    #[test]
    fn debug_format() {
        let ledger: Ledger<Value> = Ledger::new();
        let dbg = format!("{ledger:?}");
        assert!(dbg.contains("Ledger"));
        assert!(dbg.contains("entries: 1"));
    }
}
