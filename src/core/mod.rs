//! Core business logic module
//!
//! This module contains the funds-transfer core:
//! - `traits` - Capability contracts between the engine and storage backends
//! - `memory` - In-memory ledger store with row-locking transactions
//! - `engine` - The transfer engine (validation, locking, double entry, commit)
//! - `query` - Read-only account and payment lookups

pub mod engine;
pub mod memory;
pub mod query;
pub mod traits;

pub use engine::{TransferConfig, TransferEngine};
pub use memory::MemoryLedgerStore;
pub use query::QueryService;
pub use traits::{LedgerStore, LedgerTx};
