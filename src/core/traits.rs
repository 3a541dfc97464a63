//! Core traits for ledger storage and transactions
//!
//! This module defines the capability contracts between the transfer engine
//! and whatever storage backend persists accounts and payments. The engine
//! only ever talks to the store through these traits, so any backend that
//! provides row-locking exclusive reads and atomic multi-statement
//! transactions can sit behind it.

use crate::types::{Account, Payment, PaymentDraft, TransferError};
use rust_decimal::Decimal;

/// Persistence contract for accounts and payments
///
/// Provides durable create/read/delete for accounts, append-only indexed
/// reads for payments, and transactions ([`LedgerStore::begin`]) with
/// exclusive row locks and full rollback.
///
/// # Consistency
///
/// Implementations must provide strong read-after-write consistency: a read
/// issued after a committed transaction observes that transaction's writes,
/// and a read inside an open transaction observes the transaction's own
/// buffered writes.
pub trait LedgerStore {
    /// Transaction handle tied to this store
    type Tx<'a>: LedgerTx
    where
        Self: 'a;

    /// Begin an atomic transaction
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::TransactionFailure`] if the backend cannot
    /// open a transaction.
    fn begin(&self) -> Result<Self::Tx<'_>, TransferError>;

    /// Create an account
    ///
    /// # Errors
    ///
    /// - [`TransferError::DuplicateAccount`] if the id is already taken
    /// - [`TransferError::InvalidAmount`] if the opening balance is negative
    fn create_account(&self, account: Account) -> Result<(), TransferError>;

    /// Point-in-time read of a single account
    ///
    /// Returns `None` when no account exists with the given id. Blocks no
    /// longer than the store needs for a consistent snapshot of the row.
    fn find_account(&self, id: &str) -> Result<Option<Account>, TransferError>;

    /// Point-in-time read of all accounts, ordered by account id
    fn list_accounts(&self) -> Result<Vec<Account>, TransferError>;

    /// All ledger entries attached to the given account, both directions,
    /// in insertion order
    ///
    /// An unknown account id yields an empty list, not an error.
    fn find_payments(&self, account_id: &str) -> Result<Vec<Payment>, TransferError>;

    /// All ledger entries in insertion order
    fn list_payments(&self) -> Result<Vec<Payment>, TransferError>;

    /// Delete an account
    ///
    /// Takes the row lock before removal, so a concurrent transfer either
    /// completes first or observes the account as gone.
    ///
    /// # Errors
    ///
    /// - [`TransferError::AccountNotFound`] if no such account exists
    /// - [`TransferError::AccountNotEmpty`] if the balance is nonzero
    fn delete_account(&self, id: &str) -> Result<(), TransferError>;
}

/// An open atomic transaction against a [`LedgerStore`]
///
/// Balance updates and payment inserts are buffered and become visible to
/// other sessions only when [`LedgerTx::commit`] returns. Dropping the
/// transaction without committing rolls everything back and releases all
/// row locks.
pub trait LedgerTx {
    /// Read an account under an exclusive row lock
    ///
    /// The lock is held until this transaction commits or rolls back; other
    /// transactions reading the same row for update block until then.
    /// Re-reading a row already locked by this transaction returns the
    /// buffered state and does not block. Returns `None` when the account
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::TransactionFailure`] if the lock cannot be
    /// acquired within the store's lock-wait timeout.
    fn read_for_update(&mut self, id: &str) -> Result<Option<Account>, TransferError>;

    /// Buffer a balance update for a row locked by this transaction
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::TransactionFailure`] if the row is not
    /// locked by this transaction.
    fn update_balance(&mut self, id: &str, new_balance: Decimal) -> Result<(), TransferError>;

    /// Buffer a ledger entry for insertion at commit
    ///
    /// The store assigns the payment id when the transaction commits.
    fn insert_payment(&mut self, draft: PaymentDraft) -> Result<(), TransferError>;

    /// Atomically apply all buffered writes and release the row locks
    ///
    /// Either every buffered balance update and payment insert becomes
    /// visible, or none do.
    fn commit(self) -> Result<(), TransferError>;

    /// Discard all buffered writes and release the row locks
    ///
    /// Dropping the transaction has the same effect; this method exists so
    /// callers can make the rollback explicit.
    fn rollback(self);
}
