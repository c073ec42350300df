//! # Chain Verification
//!
//! Walks the chain from genesis and, at each position, checks in order:
//!
//! 1. `index` equals the 1-based position.
//! 2. `previous_hash` equals the predecessor's stored hash (`"0"` for genesis).
//! 3. The first entry carries the genesis marker.
//! 4. The hash recomputed from `{previous_hash, payload, timestamp}` equals
//!    the stored hash.
//!
//! The first failure is returned. Verification never mutates and never
//! assumes timestamps are ordered.

use serde::Serialize;

use crate::entry::{Entry, Payload, GENESIS_MARKER, GENESIS_PREVIOUS_HASH};
use crate::error::{TamperDetected, TamperKind};

/// Verify a detached sequence of entries, e.g. one re-parsed from a file.
pub fn verify_entries<P: Serialize>(entries: &[Entry<P>]) -> Result<(), TamperDetected> {
    if entries.is_empty() {
        return Err(TamperDetected::new(1, TamperKind::MissingGenesis));
    }

    let mut expected_previous = GENESIS_PREVIOUS_HASH;
    for (position, entry) in entries.iter().enumerate() {
        let expected_index = position as u64 + 1;

        if entry.index != expected_index {
            return Err(TamperDetected::new(
                expected_index,
                TamperKind::IndexMismatch {
                    expected: expected_index,
                    found: entry.index,
                },
            ));
        }

        if entry.previous_hash != expected_previous {
            return Err(TamperDetected::new(
                expected_index,
                TamperKind::PreviousHashMismatch {
                    expected: expected_previous.to_string(),
                    found: entry.previous_hash.clone(),
                },
            ));
        }

        if position == 0 && !is_genesis_marker(&entry.payload) {
            return Err(TamperDetected::new(1, TamperKind::MissingGenesis));
        }

        match entry.recompute_hash() {
            Ok(recomputed) if recomputed == entry.hash => {}
            Ok(recomputed) => {
                return Err(TamperDetected::new(
                    expected_index,
                    TamperKind::HashMismatch {
                        expected: recomputed,
                        found: entry.hash.clone(),
                    },
                ));
            }
            Err(e) => {
                return Err(TamperDetected::new(
                    expected_index,
                    TamperKind::Unserializable(e.to_string()),
                ));
            }
        }

        expected_previous = entry.hash.as_str();
    }

    Ok(())
}

fn is_genesis_marker<P>(payload: &Payload<P>) -> bool {
    matches!(payload, Payload::Genesis(marker) if marker.system == GENESIS_MARKER)
}
