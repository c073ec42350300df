//! # ledger-lock CLI Entry Point
//!
//! Parses arguments, initializes tracing and dispatches to the subcommand
//! handlers in `llock_cli`.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use llock_cli::screen::{run_screen, ScreenArgs};
use llock_cli::show::{run_show, ShowArgs};
use llock_cli::verify::{run_verify, VerifyArgs};

/// Ledger-Lock: transaction screening with a tamper-evident audit ledger.
#[derive(Parser, Debug)]
#[command(name = "ledger-lock", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    /// `RUST_LOG` takes precedence when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Screen transactions and record accepted ones in a ledger file.
    Screen(ScreenArgs),
    /// Verify every hash and link of a ledger file.
    Verify(VerifyArgs),
    /// Print the entries of a ledger file.
    Show(ShowArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Screen(args) => run_screen(args),
        Commands::Verify(args) => run_verify(args),
        Commands::Show(args) => run_show(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
