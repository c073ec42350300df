//! # Show Subcommand
//!
//! Prints ledger entries, oldest first. Does not verify; run `verify` for
//! that.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use llock_ledger::Entry;
use serde_json::Value;

use crate::load_untyped;

/// Arguments for the show subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Ledger file (JSON lines).
    #[arg(long)]
    pub ledger: PathBuf,

    /// Only print the last N entries.
    #[arg(long)]
    pub last: Option<usize>,
}

/// Execute the show subcommand.
pub fn run_show(args: &ShowArgs) -> Result<u8> {
    let entries = load_untyped(&args.ledger)?;
    for entry in select(&entries, args.last) {
        println!("{}", render(entry));
    }
    Ok(0)
}

fn select(entries: &[Entry<Value>], last: Option<usize>) -> &[Entry<Value>] {
    match last {
        Some(n) => &entries[entries.len().saturating_sub(n)..],
        None => entries,
    }
}

fn render(entry: &Entry<Value>) -> String {
    let payload = serde_json::to_string(&entry.payload).unwrap_or_else(|e| format!("<{e}>"));
    format!(
        "#{} {} {}\n  previous: {}\n  payload:  {}",
        entry.index, entry.timestamp, entry.hash, entry.previous_hash, payload
    )
}
