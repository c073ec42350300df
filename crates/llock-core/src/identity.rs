//! # Identity Newtypes
//!
//! Validated identifiers for transaction parties. You cannot pass a
//! [`CountryCode`] where an [`AccountId`] is expected, and neither can hold a
//! malformed value.
//!
//! ## Validation
//!
//! - `AccountId`: 1–64 ASCII alphanumeric characters (e.g. `IN12345`).
//! - `CountryCode`: exactly two uppercase ASCII letters (e.g. `SG`).
//!
//! Validation runs at construction and at deserialization.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum length of an [`AccountId`].
pub const MAX_ACCOUNT_ID_LEN: usize = 64;

/// Implements `Deserialize` for string newtypes by routing through `new()`,
/// so invalid values are rejected at deserialization time.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// A KYC account identifier for a sender or receiver.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Validate and wrap an account identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let reason = if id.is_empty() {
            Some("must not be empty")
        } else if id.len() > MAX_ACCOUNT_ID_LEN {
            Some("longer than 64 characters")
        } else if !id.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Some("must be ASCII alphanumeric")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(ValidationError::AccountId { value: id, reason }),
            None => Ok(Self(id)),
        }
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl_validating_deserialize!(AccountId);

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for AccountId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// An ISO 3166-1 alpha-2 style country code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    /// Validate and wrap a country code.
    pub fn new(code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = code.into();
        if code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(Self(code))
        } else {
            Err(ValidationError::CountryCode(code))
        }
    }

    /// Access the two-letter code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl_validating_deserialize!(CountryCode);

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CountryCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
