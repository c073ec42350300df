//! # llock-ledger — Hash-Linked Audit Ledger
//!
//! An append-only, tamper-evident log. Every entry commits to its predecessor:
//!
//! ```text
//! hash = SHA256(JCS({previous_hash, payload, timestamp}))
//! ```
//!
//! and the first entry is a genesis entry whose `previous_hash` is `"0"`.
//!
//! ## Integrity Invariants
//!
//! - Entry at position `i` (1-based) has `index == i`.
//! - Entry `i > 1` has `previous_hash == entries[i - 2].hash`.
//! - Every `hash` is reproducible from the entry's own fields.
//! - A ledger is never empty: it owns its genesis entry from construction.
//!
//! ## Architecture
//!
//! - **Entry** (`entry.rs`): entry and payload types, hash computation.
//! - **Ledger** (`chain.rs`): the owned chain. Mutation requires `&mut self`.
//! - **Verification** (`verify.rs`): recomputes hashes and links, reporting
//!   the earliest offending index.
//! - **Clock** (`clock.rs`): injectable time source.
//! - **SharedLedger** (`shared.rs`): `Arc<RwLock<Ledger>>` handle that
//!   serializes appends across threads.
//! - **Store** (`store.rs`): one canonical JSON object per line.
//!
//! ## Crate Policy
//!
//! - The ledger never logs, retries, or repairs. Every failure is returned.
//! - Persistence runs after the in-memory append and never rolls it back.

pub mod chain;
pub mod clock;
pub mod entry;
pub mod error;
pub mod shared;
pub mod store;
pub mod verify;

pub use chain::Ledger;
pub use clock::{Clock, FixedClock, SystemClock};
pub use entry::{
    compute_entry_hash, Entry, GenesisMarker, Payload, GENESIS_MARKER, GENESIS_PREVIOUS_HASH,
};
pub use error::{AppendError, LedgerError, StoreError, TamperDetected, TamperKind};
pub use shared::SharedLedger;
pub use store::{EntrySink, JsonlStore};
pub use verify::verify_entries;
