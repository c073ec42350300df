//! # llock-cli — Ledger-Lock Command-Line Interface
//!
//! ## Subcommands
//!
//! - `screen`: screen a batch of transactions and append accepted
//!   screenings to a JSON-lines ledger file.
//! - `verify`: recompute every hash and link of a ledger file.
//! - `show`: print the entries of a ledger file.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers here return an exit code.
//! - Handlers delegate to `llock-screen` and `llock-ledger`; no screening or
//!   hashing logic lives in this crate.

pub mod screen;
pub mod show;
pub mod verify;

use std::path::Path;

use anyhow::{Context, Result};
use llock_ledger::{Entry, JsonlStore};
use serde_json::Value;

/// Load every entry of a ledger file as untyped JSON payloads.
///
/// Fails if the file is missing or holds no entries.
pub fn load_untyped(path: &Path) -> Result<Vec<Entry<Value>>> {
    let store = JsonlStore::new(path);
    if !store.exists() {
        anyhow::bail!("ledger file not found: {}", path.display());
    }
    let entries: Vec<Entry<Value>> = store
        .load()
        .with_context(|| format!("failed to read ledger {}", path.display()))?;
    if entries.is_empty() {
        anyhow::bail!("ledger file is empty: {}", path.display());
    }
    Ok(entries)
}
