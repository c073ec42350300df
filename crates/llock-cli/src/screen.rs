//! # Screen Subcommand
//!
//! Screens a JSON array of transactions and appends every accepted
//! screening to a ledger file. An existing ledger file is verified and
//! extended; a missing one is created with a fresh genesis entry.
//!
//! ```bash
//! ledger-lock screen --input demos/transactions.json --ledger out/screenings.jsonl
//! ledger-lock screen --config demos/config.yaml --input demos/transactions.json --ledger out/screenings.jsonl
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use llock_ledger::{Entry, JsonlStore, Ledger, SharedLedger, SystemClock};
use llock_screen::{
    Decision, ScreeningConfig, ScreeningRecord, Screener, Transaction, MAX_RISK_SCORE,
};

/// Arguments for the screen subcommand.
#[derive(Args, Debug)]
pub struct ScreenArgs {
    /// Screening configuration (YAML). Defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON array of transactions.
    #[arg(long)]
    pub input: PathBuf,

    /// Ledger file (JSON lines). Created if missing.
    #[arg(long)]
    pub ledger: PathBuf,
}

/// Execute the screen subcommand.
pub fn run_screen(args: &ScreenArgs) -> Result<u8> {
    let config = match &args.config {
        Some(path) => ScreeningConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ScreeningConfig::default(),
    };
    let screener = Screener::from_config(&config);

    let input = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let txs = Transaction::list_from_json(&input)
        .with_context(|| format!("invalid transactions in {}", args.input.display()))?;

    let mut store = JsonlStore::new(&args.ledger);
    let ledger = open_ledger(&mut store)?;
    tracing::info!(
        ledger = %args.ledger.display(),
        entries = ledger.len(),
        transactions = txs.len(),
        "screening batch"
    );

    let mut recorded = 0usize;
    for (n, tx) in txs.iter().enumerate() {
        let decision = screener
            .screen_persisted(tx, &ledger, &mut store)
            .with_context(|| format!("transaction {} could not be recorded", n + 1))?;
        print_decision(n + 1, tx, &decision);
        if decision.is_recorded() {
            recorded += 1;
        }
    }

    println!(
        "{recorded} of {} transactions recorded; ledger now holds {} entries",
        txs.len(),
        ledger.len()
    );
    Ok(0)
}

/// Restore the ledger from `store`, or start one and persist its genesis.
fn open_ledger(store: &mut JsonlStore) -> Result<SharedLedger<ScreeningRecord>> {
    let path = store.path().to_path_buf();
    let entries: Vec<Entry<ScreeningRecord>> = store
        .load()
        .with_context(|| format!("failed to read ledger {}", path.display()))?;

    if entries.is_empty() {
        let ledger: Ledger<ScreeningRecord> = Ledger::new();
        store
            .append(ledger.genesis())
            .with_context(|| format!("failed to initialize ledger {}", path.display()))?;
        tracing::info!(ledger = %path.display(), "initialized new ledger");
        return Ok(SharedLedger::from_ledger(ledger));
    }

    let ledger = Ledger::restore(entries, Arc::new(SystemClock))
        .with_context(|| format!("refusing to extend tampered ledger {}", path.display()))?;
    Ok(SharedLedger::from_ledger(ledger))
}

fn print_decision(n: usize, tx: &Transaction, decision: &Decision) {
    println!(
        "Transaction {n}: {} -> {} amount {}",
        tx.sender_id, tx.receiver_id, tx.amount
    );
    if let Decision::Recorded(r) = decision {
        println!("  risk score:        {} / {MAX_RISK_SCORE}", r.risk.score);
        for factor in &r.risk.factors {
            println!("    - {factor}");
        }
        println!("  fraud probability: {}", r.probability);
        println!("  fraud detected:    {}", if r.is_fraud { "YES" } else { "NO" });
        println!("  entry:             #{} {}", r.index, r.hash);
    }
    println!("  status:            {}", decision.status());
}

#[cfg(test)]
mod tests {
    use super::*;
    use llock_ledger::verify_entries;
    use std::path::Path;

    const TXS: &str = r#"[
      {"amount": 5000, "sender_balance": 20000, "receiver_balance": 15000, "transaction_speed": 2,
       "sender_country": "IN", "receiver_country": "US", "sender_id": "IN12345", "receiver_id": "US67890"},
      {"amount": 30000, "sender_balance": 50000, "receiver_balance": 25000, "transaction_speed": 1,
       "sender_country": "UK", "receiver_country": "SG", "sender_id": "UK54321", "receiver_id": "SG34567"}
    ]"#;

    fn args(dir: &Path) -> ScreenArgs {
        let input = dir.join("txs.json");
        std::fs::write(&input, TXS).unwrap();
        ScreenArgs {
            config: None,
            input,
            ledger: dir.join("ledger.jsonl"),
        }
    }

    #[test]
    fn screen_creates_and_extends_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path());

        assert_eq!(run_screen(&args).unwrap(), 0);
        let entries: Vec<Entry<ScreeningRecord>> = JsonlStore::new(&args.ledger).load().unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(run_screen(&args).unwrap(), 0);
        let entries: Vec<Entry<ScreeningRecord>> = JsonlStore::new(&args.ledger).load().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(verify_entries(&entries), Ok(()));
    }

    #[test]
    fn screen_refuses_tampered_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path());
        run_screen(&args).unwrap();

        let text = std::fs::read_to_string(&args.ledger).unwrap();
        std::fs::write(&args.ledger, text.replace("\"amount\":5000", "\"amount\":500")).unwrap();

        let err = run_screen(&args).unwrap_err();
        assert!(format!("{err:#}").contains("tamper detected at entry 2"));
    }

    #[test]
    fn screen_reports_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path());
        let config = dir.path().join("config.yaml");
        std::fs::write(&config, "model:\n  threshold: 2.0\n").unwrap();
        args.config = Some(config);
        assert!(run_screen(&args).is_err());
        assert!(!args.ledger.exists());
    }
}
