//! Processing strategy module for wallet operation ingestion
//!
//! This module defines the Strategy pattern for complete ingestion pipelines,
//! encompassing CSV parsing, ledger operations, and account output. This
//! allows different processing implementations (synchronous, concurrent
//! batch) to be selected at runtime.

use crate::cli::StrategyType;
use crate::core::{LedgerStore, MemoryLedgerStore, TransferEngine};
use crate::types::{OperationRecord, OperationType, TransferError};
use std::io::Write;
use std::path::Path;

pub mod concurrent;
pub mod sync;

pub use concurrent::{BatchConfig, ConcurrentProcessingStrategy};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete ingestion pipelines
///
/// Each strategy reads operation records from a CSV file, applies them to a
/// fresh ledger (opening accounts, running transfers through the engine,
/// deleting accounts), and writes the final account states to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Process operations from input file and write final account states
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the input CSV file containing operation records
    /// * `output` - Mutable reference to a writer for outputting account states
    ///
    /// # Returns
    ///
    /// * `Ok(())` if processing completed (possibly with recoverable errors)
    /// * `Err(String)` if a fatal error occurred (file not found, I/O error)
    ///
    /// # Error Handling
    ///
    /// Individual operation failures (insufficient funds, unknown account,
    /// malformed record) are logged to stderr and processing continues with
    /// the next record. Only pipeline-level failures abort.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Apply one operation record to the ledger
///
/// Shared by both strategies: opens go to the store, transfers go through
/// the engine, deletes go to the store.
pub(crate) fn apply_operation(
    store: &MemoryLedgerStore,
    engine: &TransferEngine<MemoryLedgerStore>,
    record: &OperationRecord,
) -> Result<(), TransferError> {
    match record.op {
        OperationType::Open => {
            // Amount and currency presence were validated during conversion.
            let balance = record.amount.unwrap_or_default();
            let currency = record.currency.clone().unwrap_or_default();
            store.create_account(crate::types::Account::new(
                record.account.clone(),
                balance,
                currency,
            ))
        }
        OperationType::Transfer => {
            let to = record.to_account.as_deref().unwrap_or_default();
            let amount = record.amount.unwrap_or_default();
            engine.transfer(&record.account, to, amount)
        }
        OperationType::Delete => store.delete_account(&record.account),
    }
}

/// Create a processing strategy based on the specified strategy type
///
/// Factory for the Strategy pattern: selects and instantiates the
/// appropriate implementation at runtime.
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create
/// * `config` - Optional configuration for concurrent batch processing
///   (ignored for sync)
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Concurrent => {
            let config = config.unwrap_or_default();
            Box::new(ConcurrentProcessingStrategy::new(config))
        }
    }
}
