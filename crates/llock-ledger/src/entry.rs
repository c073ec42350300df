//! # Ledger Entries
//!
//! An [`Entry`] is one immutable link of the chain. Its `hash` commits to
//! exactly three fields: `previous_hash`, `payload`, and `timestamp`. The
//! `index` is checked positionally during verification and is not hashed.

use llock_core::{
    sha256_digest, CanonicalBytes, CanonicalizationError, ContentDigest, DigestError, Timestamp,
};
use serde::{Deserialize, Serialize};

/// `previous_hash` sentinel of the genesis entry.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// System marker carried by the genesis entry.
pub const GENESIS_MARKER: &str = "Ledger-Lock Initialized";

/// Payload of the genesis entry: `{"system": "Ledger-Lock Initialized"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenesisMarker {
    /// Initialization marker text.
    pub system: String,
}

impl Default for GenesisMarker {
    fn default() -> Self {
        Self {
            system: GENESIS_MARKER.to_string(),
        }
    }
}

/// The payload committed by an entry.
///
/// Untagged on the wire, so a record's canonical form is exactly the
/// caller's record and the genesis payload is exactly the marker object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload<P> {
    /// The fixed genesis marker.
    Genesis(GenesisMarker),
    /// A caller-supplied record.
    Record(P),
}

impl<P> Payload<P> {
    /// Returns the caller record, or `None` for the genesis marker.
    pub fn record(&self) -> Option<&P> {
        match self {
            Self::Genesis(_) => None,
            Self::Record(p) => Some(p),
        }
    }

    /// Returns true for the genesis marker.
    pub fn is_genesis(&self) -> bool {
        matches!(self, Self::Genesis(_))
    }
}

/// One block of the ledger.
///
/// Entries handed out by a [`crate::Ledger`] are shared references or clones;
/// the ledger's own copies are never mutated after append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<P> {
    /// 1-based position in the chain.
    pub index: u64,
    /// Hex hash of the predecessor, or `"0"` for genesis.
    pub previous_hash: String,
    /// Committed payload.
    pub payload: Payload<P>,
    /// UTC append time (seconds precision).
    pub timestamp: Timestamp,
    /// Lowercase hex SHA-256 over the canonical `{previous_hash, payload, timestamp}`.
    pub hash: String,
}

impl<P> Entry<P> {
    /// Returns true if this is the genesis entry.
    pub fn is_genesis(&self) -> bool {
        self.payload.is_genesis()
    }

    /// Returns the caller record, or `None` for genesis.
    pub fn record(&self) -> Option<&P> {
        self.payload.record()
    }

    /// Parse the stored hash back into a digest.
    pub fn digest(&self) -> Result<ContentDigest, DigestError> {
        ContentDigest::from_hex(&self.hash)
    }
}

impl<P: Serialize> Entry<P> {
    /// Recompute this entry's hash from its own committed fields.
    pub fn recompute_hash(&self) -> Result<String, CanonicalizationError> {
        compute_entry_hash(&self.previous_hash, &self.payload, &self.timestamp)
    }
}

/// The committed fields, in the shape that is canonicalized and hashed.
#[derive(Serialize)]
struct HashInput<'a, P> {
    previous_hash: &'a str,
    payload: &'a Payload<P>,
    timestamp: &'a Timestamp,
}

/// Compute an entry hash:
///
/// ```text
/// hex(SHA256(JCS({"payload": .., "previous_hash": .., "timestamp": ..})))
/// ```
///
/// # Errors
///
/// Fails if the payload cannot be canonicalized (floats, non-string map keys,
/// or a `Serialize` impl that errors).
pub fn compute_entry_hash<P: Serialize>(
    previous_hash: &str,
    payload: &Payload<P>,
    timestamp: &Timestamp,
) -> Result<String, CanonicalizationError> {
    let canonical = CanonicalBytes::new(&HashInput {
        previous_hash,
        payload,
        timestamp,
    })?;
    Ok(sha256_digest(&canonical).to_hex())
}
