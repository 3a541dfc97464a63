//! Read-only account and payment queries
//!
//! Thin read layer over the ledger store: single-account lookup, account
//! listing, and payment history queries. No transaction coordination is
//! needed — the store's point-in-time reads are enough — so this service
//! never takes locks of its own.

use crate::core::traits::LedgerStore;
use crate::types::{Account, Payment, TransferError};
use std::sync::Arc;

/// Read-only lookups over accounts and payments
pub struct QueryService<S: LedgerStore> {
    store: Arc<S>,
}

impl<S: LedgerStore> QueryService<S> {
    /// Create a query service over the given store
    pub fn new(store: Arc<S>) -> Self {
        QueryService { store }
    }

    /// Look up a single account
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::AccountNotFound`] when no account exists
    /// with the given id.
    pub fn find_account(&self, id: &str) -> Result<Account, TransferError> {
        self.store
            .find_account(id)?
            .ok_or_else(|| TransferError::account_not_found(id))
    }

    /// All accounts, ordered by account id
    ///
    /// An empty ledger yields an empty list, not an error.
    pub fn list_accounts(&self) -> Result<Vec<Account>, TransferError> {
        self.store.list_accounts()
    }

    /// All ledger entries attached to an account, both directions, in
    /// insertion order
    ///
    /// An account with no payments (or an unknown id) yields an empty list.
    pub fn find_payments(&self, account_id: &str) -> Result<Vec<Payment>, TransferError> {
        self.store.find_payments(account_id)
    }

    /// All ledger entries in insertion order
    pub fn list_payments(&self) -> Result<Vec<Payment>, TransferError> {
        self.store.list_payments()
    }
}
