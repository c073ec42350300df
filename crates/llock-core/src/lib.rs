//! # llock-core — Foundational Types for Ledger-Lock
//!
//! Leaf crate of the workspace. Every digest the ledger stores is computed
//! from types defined here, and every other crate depends on it.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** ALL digest computation flows through
//!    `CanonicalBytes::new()`. Payloads are never hashed from ad hoc
//!    `serde_json::to_vec()` output, so re-serialization of a stored entry
//!    always reproduces the bytes that were hashed.
//!
//! 2. **`sha256_digest()` accepts only `&CanonicalBytes`.** The signature makes
//!    it a compile error to digest raw, non-canonical bytes.
//!
//! 3. **UTC-only timestamps.** `Timestamp` is UTC with `Z` suffix and seconds
//!    precision, so its canonical form never depends on the host locale.
//!
//! 4. **Validated identifiers.** `AccountId` and `CountryCode` reject malformed
//!    input at construction and at deserialization.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `llock-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, sha256_hex, ContentDigest};
pub use error::{CanonicalizationError, DigestError, ValidationError};
pub use identity::{AccountId, CountryCode};
pub use temporal::Timestamp;
