//! Screening and configuration errors.
//!
//! A rejected transaction is not an error: it is a
//! [`crate::Decision::Rejected`]. Errors here mean the pipeline itself could
//! not complete.

use std::path::PathBuf;

use llock_ledger::{AppendError, LedgerError, StoreError};
use thiserror::Error;

/// Errors raised while screening a transaction.
#[derive(Error, Debug)]
pub enum ScreenError {
    /// The screening record could not be appended. Nothing was recorded.
    #[error("failed to record screening: {0}")]
    Ledger(#[from] LedgerError),

    /// The screening is in the ledger but the sink failed to persist it.
    #[error("screening recorded at entry {index} ({hash}) but not persisted: {source}")]
    Persist {
        /// Ledger index of the recorded entry.
        index: u64,
        /// Hash of the recorded entry.
        hash: String,
        /// Underlying store failure.
        #[source]
        source: StoreError,
    },
}

impl From<AppendError> for ScreenError {
    fn from(err: AppendError) -> Self {
        match err {
            AppendError::Ledger(e) => Self::Ledger(e),
            AppendError::Persist {
                index,
                hash,
                source,
            } => Self::Persist {
                index,
                hash,
                source,
            },
        }
    }
}

/// Errors raised while loading a [`crate::ScreeningConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file parsed but a value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
