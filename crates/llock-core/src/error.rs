//! # Error Types
//!
//! Structured error hierarchy for the core primitives. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Amounts must be integers; probabilities are carried as basis points.
    #[error("float values are not permitted in canonical representations; use an integer: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// A domain value was rejected by its validating constructor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Account identifier is malformed.
    #[error("invalid account id {value:?}: {reason}")]
    AccountId {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Country code is not two uppercase ASCII letters.
    #[error("invalid country code {0:?}: expected two uppercase ASCII letters")]
    CountryCode(String),

    /// Timestamp is not a UTC RFC 3339 string.
    #[error("invalid timestamp: {0}")]
    Timestamp(String),
}

/// A hex digest could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DigestError {
    /// Wrong number of hex characters.
    #[error("expected 64 hex chars, got {0}")]
    Length(usize),

    /// A character pair is not valid hex.
    #[error("invalid hex at byte {0}")]
    InvalidHex(usize),
}
