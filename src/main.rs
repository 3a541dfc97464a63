//! Wallet Ledger CLI
//!
//! Command-line interface for applying wallet operations from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.csv > accounts.csv
//! cargo run -- --strategy sync operations.csv > accounts.csv
//! cargo run -- --strategy concurrent operations.csv > accounts.csv
//! cargo run -- --strategy concurrent --batch-size 2000 --max-concurrent 8 operations.csv > accounts.csv
//! ```
//!
//! The program reads operation records (open / transfer / delete) from the
//! input CSV file, applies them to a fresh ledger using the selected
//! processing strategy, and outputs the final account states to stdout.
//!
//! # Processing Strategies
//!
//! - **sync**: Single-threaded processing in strict file order
//! - **concurrent**: Batched processing with transfers executing in parallel
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use std::process;
use wallet_ledger::cli;
use wallet_ledger::strategy;

fn main() {
    let args = cli::parse_args();

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Concurrent) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config)
    };

    // Output goes to stdout
    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
