//! Concurrent batch processing strategy
//!
//! Multi-threaded implementation of the ProcessingStrategy trait. Operation
//! records are read in batches; within each batch, transfers run in parallel
//! and synchronize only on the store's row locks — exactly the concurrency
//! model the transfer engine is built for.
//!
//! # Architecture
//!
//! ```text
//! ConcurrentProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent)
//!     ├── AsyncReader (batch CSV reading)
//!     └── TransferEngine over MemoryLedgerStore
//!         (row-locking transactions serialize conflicting transfers)
//! ```
//!
//! # Ordering
//!
//! Batches are processed sequentially. Within a batch, opens are applied
//! first, then all transfers execute concurrently, then deletes are applied
//! last. Transfers inside one batch therefore have no guaranteed relative
//! order; inputs whose outcome depends on transfer order should use the
//! sync strategy.

use crate::core::{LedgerStore, MemoryLedgerStore, TransferEngine};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_accounts_csv;
use crate::strategy::{apply_operation, ProcessingStrategy};
use crate::types::{OperationRecord, OperationType};
use futures::stream::{self, StreamExt};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Configuration for concurrent batch processing
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of operation records per batch
    pub batch_size: usize,
    /// Maximum number of transfers executing concurrently within a batch
    pub max_concurrent: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning on stderr.
    pub fn new(batch_size: usize, max_concurrent: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            eprintln!(
                "Warning: Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent = if max_concurrent == 0 {
            eprintln!(
                "Warning: Invalid max_concurrent ({}), using default ({})",
                max_concurrent, default.max_concurrent
            );
            default.max_concurrent
        } else {
            max_concurrent
        };

        Self {
            batch_size,
            max_concurrent,
        }
    }
}

/// Concurrent batch processing strategy
///
/// Reads operations in batches and lets the transfers of each batch race:
/// cross-transfer safety comes entirely from the store's row-locking
/// transactions, with no in-process coordination of account state.
#[derive(Debug, Clone)]
pub struct ConcurrentProcessingStrategy {
    /// Batch processing configuration
    config: BatchConfig,
}

impl ConcurrentProcessingStrategy {
    /// Create a new ConcurrentProcessingStrategy with the specified configuration
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Apply one batch: opens first, transfers concurrently, deletes last
    async fn process_batch(
        &self,
        store: &Arc<MemoryLedgerStore>,
        engine: &Arc<TransferEngine<MemoryLedgerStore>>,
        batch: Vec<OperationRecord>,
    ) {
        let mut transfers = Vec::new();
        let mut deletes = Vec::new();

        for record in batch {
            match record.op {
                OperationType::Open => {
                    if let Err(e) = apply_operation(store, engine, &record) {
                        eprintln!("Operation error: {}", e);
                    }
                }
                OperationType::Transfer => transfers.push(record),
                OperationType::Delete => deletes.push(record),
            }
        }

        // Transfers block on row locks, so run them on the blocking pool
        // rather than on the async workers.
        stream::iter(transfers)
            .for_each_concurrent(self.config.max_concurrent, |record| {
                let store = Arc::clone(store);
                let engine = Arc::clone(engine);
                async move {
                    let result =
                        tokio::task::spawn_blocking(move || apply_operation(&store, &engine, &record))
                            .await;
                    match result {
                        Ok(Err(e)) => eprintln!("Operation error: {}", e),
                        Err(e) => eprintln!("Worker task failed: {}", e),
                        Ok(Ok(())) => {}
                    }
                }
            })
            .await;

        for record in deletes {
            if let Err(e) = apply_operation(store, engine, &record) {
                eprintln!("Operation error: {}", e);
            }
        }
    }
}

impl ProcessingStrategy for ConcurrentProcessingStrategy {
    /// Process operations from input file and write results to output
    ///
    /// Pipeline:
    /// 1. Creates a tokio multi-thread runtime
    /// 2. Creates a shared ledger store and transfer engine
    /// 3. Reads operation records in batches via AsyncReader
    /// 4. Processes each batch (transfers in parallel) before the next
    /// 5. Writes the final account states as CSV
    ///
    /// Fatal errors (file not found, runtime errors) are returned
    /// immediately. Individual operation errors are logged to stderr and
    /// processing continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let store = Arc::new(MemoryLedgerStore::new());
            let engine = Arc::new(TransferEngine::new(Arc::clone(&store)));

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            // Batches run one after another so opens and deletes act as
            // ordering barriers between batches.
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }
                self.process_batch(&store, &engine, batch).await;
            }

            let accounts = store
                .list_accounts()
                .map_err(|e| format!("Failed to list accounts: {}", e))?;
            write_accounts_csv(&accounts, output)
        })
    }
}
