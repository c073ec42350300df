//! # Verify Subcommand
//!
//! Recomputes every hash and link of a ledger file. Payloads are checked as
//! untyped JSON, so any ledger file can be verified regardless of what it
//! records.
//!
//! ```bash
//! ledger-lock verify --ledger out/screenings.jsonl
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use llock_ledger::verify_entries;

use crate::load_untyped;

/// Arguments for the verify subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Ledger file (JSON lines).
    #[arg(long)]
    pub ledger: PathBuf,
}

/// Execute the verify subcommand.
///
/// A tampered ledger is an error naming the earliest offending entry.
pub fn run_verify(args: &VerifyArgs) -> Result<u8> {
    let entries = load_untyped(&args.ledger)?;
    match verify_entries(&entries) {
        Ok(()) => {
            let head = &entries[entries.len() - 1];
            println!("OK: {} entries verified", entries.len());
            println!("head: #{} {}", head.index, head.hash);
            Ok(0)
        }
        Err(tamper) => {
            tracing::warn!(
                ledger = %args.ledger.display(),
                index = tamper.index,
                "ledger verification failed"
            );
            println!("TAMPERED: {tamper}");
            println!("trusted entries: {}", tamper.trusted_prefix_len());
            Err(anyhow::Error::new(tamper)
                .context(format!("ledger {} failed verification", args.ledger.display())))
        }
    }
}
