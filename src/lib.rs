//! Wallet Ledger Library
//! # Overview
//!
//! This library provides a mobile-wallet ledger: account balances plus an
//! auditable double-entry record of payments moved between accounts. The
//! heart of the crate is the funds-transfer core, which atomically moves
//! money between two accounts under row-locking transactions.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Payment, operation records, errors)
//! - [`core`] - Business logic components:
//!   - [`core::traits`] - Storage capability contracts ([`core::LedgerStore`], [`core::LedgerTx`])
//!   - [`core::memory`] - In-memory store with row-locking transactions
//!   - [`core::engine`] - The transfer engine (validation, locking, double entry)
//!   - [`core::query`] - Read-only account and payment lookups
//! - [`io`] - CSV input/output with sync and async readers
//! - [`strategy`] - Runtime-selectable ingestion pipelines
//! - [`cli`] - CLI argument parsing
//!
//! # Transfer semantics
//!
//! A transfer validates in a fixed order (positive amount, source exists,
//! sufficient funds, destination exists, matching currency), locks both
//! account rows in ascending id order so opposite-direction transfers cannot
//! deadlock, and commits the debit, the credit, and two ledger entries
//! atomically. Business-rule violations are terminal; transient store
//! failures are retried a bounded number of times with fresh reads.
//!
//! # Invariants
//!
//! - No account balance is ever negative after a commit
//! - Every committed transfer appends exactly two ledger entries (one
//!   outgoing, one incoming) sharing the amount
//! - A failed transfer leaves the store exactly as it was before the call

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{
    LedgerStore, LedgerTx, MemoryLedgerStore, QueryService, TransferConfig, TransferEngine,
};
pub use io::write_accounts_csv;
pub use types::{
    Account, AccountId, Direction, OperationRecord, OperationType, Payment, PaymentDraft,
    PaymentId, TransferError,
};
