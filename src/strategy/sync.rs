//! Synchronous processing strategy
//!
//! Single-threaded implementation of the ProcessingStrategy trait. It
//! orchestrates the pipeline by coordinating the SyncReader (CSV input), the
//! ledger store and transfer engine (business logic), and the csv_format
//! writer (output).
//!
//! # Memory Efficiency
//!
//! Operation records are processed one at a time (streaming via iterator);
//! memory usage is O(accounts + payments), not O(all_operations).

use crate::core::{LedgerStore, MemoryLedgerStore, TransferEngine};
use crate::io::csv_format::write_accounts_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{apply_operation, ProcessingStrategy};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Synchronous processing strategy
///
/// Applies operations strictly in file order on the calling thread. Because
/// operations are serialized, results are fully deterministic even when
/// transfers contend for the same accounts.
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Process operations from input file and write results to output
    ///
    /// Pipeline:
    /// 1. Creates a fresh in-memory ledger store and transfer engine
    /// 2. Streams operation records from the CSV file
    /// 3. Applies each record (open / transfer / delete)
    /// 4. Writes the final account states as CSV
    ///
    /// Fatal errors (file not found, I/O errors) are returned immediately.
    /// Individual operation errors are logged to stderr and processing
    /// continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let store = Arc::new(MemoryLedgerStore::new());
        let engine = TransferEngine::new(Arc::clone(&store));

        let reader = SyncReader::new(input_path)?;

        for result in reader {
            match result {
                Ok(record) => {
                    if let Err(e) = apply_operation(&store, &engine, &record) {
                        eprintln!("Operation error: {}", e);
                    }
                }
                Err(e) => {
                    // Malformed record: skip and continue
                    eprintln!("Record error: {}", e);
                }
            }
        }

        let accounts = store
            .list_accounts()
            .map_err(|e| format!("Failed to list accounts: {}", e))?;
        write_accounts_csv(&accounts, output)
    }
}
