//! # Ledger Errors
//!
//! - [`LedgerError`]: append-time failures, raised before any mutation.
//! - [`TamperDetected`]: verification failures, with the earliest offending index.
//! - [`StoreError`]: persistence failures, kept separate from integrity.
//! - [`AppendError`]: append-then-persist failures.
//!
//! There is no runtime variant for concurrent-access violations: appends
//! require `&mut Ledger` or the write half of [`crate::SharedLedger`]'s lock,
//! so two writers can never observe the same last entry.

use std::path::PathBuf;

use llock_core::CanonicalizationError;
use thiserror::Error;

/// Errors raised by [`crate::Ledger::append`].
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The payload could not be canonically serialized. Nothing was appended.
    #[error("payload is not canonically serializable: {0}")]
    Serialization(#[from] CanonicalizationError),
}

/// Which check failed at a tampered position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TamperKind {
    /// The chain is empty or its first entry is not the genesis marker.
    MissingGenesis,
    /// The stored index does not equal the entry's 1-based position.
    IndexMismatch {
        /// Position-derived index.
        expected: u64,
        /// Stored index.
        found: u64,
    },
    /// `previous_hash` does not equal the predecessor's stored hash.
    PreviousHashMismatch {
        /// Predecessor hash (or the genesis sentinel).
        expected: String,
        /// Stored `previous_hash`.
        found: String,
    },
    /// Recomputed hash differs from the stored hash.
    HashMismatch {
        /// Recomputed from the entry's fields.
        expected: String,
        /// Stored hash.
        found: String,
    },
    /// The stored payload can no longer be canonicalized.
    Unserializable(String),
}

impl std::fmt::Display for TamperKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingGenesis => f.write_str("missing genesis entry"),
            Self::IndexMismatch { expected, found } => {
                write!(f, "index mismatch: expected {expected}, found {found}")
            }
            Self::PreviousHashMismatch { expected, found } => {
                write!(f, "previous_hash mismatch: expected {expected}, found {found}")
            }
            Self::HashMismatch { expected, found } => {
                write!(f, "hash mismatch: recomputed {expected}, stored {found}")
            }
            Self::Unserializable(reason) => write!(f, "payload not canonicalizable: {reason}"),
        }
    }
}

/// Verification failed at `index`.
///
/// Entries `1..index` are still trustworthy; `index` and everything after it
/// are not.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("tamper detected at entry {index}: {kind}")]
pub struct TamperDetected {
    /// 1-based index of the earliest failing entry.
    pub index: u64,
    /// The failed check.
    pub kind: TamperKind,
}

impl TamperDetected {
    /// Create a tamper report.
    pub fn new(index: u64, kind: TamperKind) -> Self {
        Self { index, kind }
    }

    /// Number of leading entries that still verify.
    pub fn trusted_prefix_len(&self) -> u64 {
        self.index.saturating_sub(1)
    }
}

/// Errors raised by ledger persistence.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("io error on {}: {source}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A line could not be parsed as an entry.
    #[error("{}:{line}: malformed entry: {source}", path.display())]
    Parse {
        /// File being read.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// An entry could not be canonicalized for writing.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

/// Errors raised by [`crate::SharedLedger::append_persisted`].
#[derive(Error, Debug)]
pub enum AppendError {
    /// The append itself failed; nothing was stored or persisted.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The entry is in the ledger but was not persisted.
    #[error("entry {index} ({hash}) appended in memory but not persisted: {source}")]
    Persist {
        /// Index of the appended entry.
        index: u64,
        /// Hash of the appended entry.
        hash: String,
        /// Persistence failure.
        #[source]
        source: StoreError,
    },
}
