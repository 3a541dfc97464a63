//! Funds-transfer engine
//!
//! This module provides the `TransferEngine` that moves money between two
//! accounts: it validates the request, locks both account rows, checks the
//! business invariants, debits and credits the balances, appends the
//! double-entry ledger records, and commits — all-or-nothing.
//!
//! # Locking discipline
//!
//! Two concurrent transfers may touch the same pair of accounts in opposite
//! directions. If each locked its source row first, they could each hold one
//! row and wait forever on the other. The engine therefore always acquires
//! the two row locks in ascending account-id order, independent of which
//! side is the source, and applies the debit/credit to the correct side once
//! both locks are held. Validation failures are still reported in the
//! documented order (source missing, insufficient funds, destination
//! missing, currency mismatch) even when the destination row was locked
//! first.
//!
//! # Retries
//!
//! Business-rule violations are terminal. Transient store failures
//! (lock-wait timeout, broken transaction) are retried up to
//! [`TransferConfig::max_retries`] times; every attempt starts a fresh
//! transaction and re-reads both accounts, never trusting previously
//! observed balances.

use crate::core::traits::{LedgerStore, LedgerTx};
use crate::types::{Account, PaymentDraft, TransferError};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Engine tuning knobs
#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// How many times a transfer is re-attempted after a transient
    /// store failure. Zero disables retries.
    pub max_retries: u32,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self { max_retries: 3 }
    }
}

/// Orchestrates single funds movements against a ledger store
///
/// The engine holds no account state of its own: every call (and every
/// retry) re-reads fresh state under row locks, so the store is the only
/// shared mutable resource.
pub struct TransferEngine<S: LedgerStore> {
    store: Arc<S>,
    config: TransferConfig,
}

impl<S: LedgerStore> TransferEngine<S> {
    /// Create an engine over the given store with default configuration
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, TransferConfig::default())
    }

    /// Create an engine with a caller-supplied configuration
    pub fn with_config(store: Arc<S>, config: TransferConfig) -> Self {
        TransferEngine { store, config }
    }

    /// The ledger store this engine operates on
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Atomically move `amount` from `from` to `to`
    ///
    /// On success both balances have been updated and exactly two ledger
    /// entries (one outgoing for `from`, one incoming for `to`, both of
    /// `amount`) have been committed. On any failure the store is exactly as
    /// it was before the call.
    ///
    /// # Errors
    ///
    /// First violation wins, in this order:
    ///
    /// - [`TransferError::InvalidAmount`] - `amount` is zero or negative
    /// - [`TransferError::AccountNotFound`] - `from` does not exist
    /// - [`TransferError::InsufficientFunds`] - `from` holds less than `amount`
    /// - [`TransferError::AccountNotFound`] - `to` does not exist
    /// - [`TransferError::CurrencyMismatch`] - the accounts hold different currencies
    /// - [`TransferError::TransactionFailure`] - transient store failure that
    ///   persisted through every retry
    pub fn transfer(&self, from: &str, to: &str, amount: Decimal) -> Result<(), TransferError> {
        if amount <= Decimal::ZERO {
            return Err(TransferError::invalid_amount(amount));
        }

        let mut attempt = 0;
        loop {
            match self.execute(from, to, amount) {
                Err(error) if error.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    /// One transfer attempt: fresh transaction, fresh reads
    fn execute(&self, from: &str, to: &str, amount: Decimal) -> Result<(), TransferError> {
        let mut tx = self.store.begin()?;

        // Lock both rows in ascending id order; see the module docs.
        let (first, second) = if from <= to { (from, to) } else { (to, from) };
        let first_account = tx.read_for_update(first)?;
        let second_account = if from == to {
            first_account.clone()
        } else {
            tx.read_for_update(second)?
        };
        let (from_account, to_account) = if from <= to {
            (first_account, second_account)
        } else {
            (second_account, first_account)
        };

        // Validation order is part of the contract and independent of the
        // lock acquisition order above.
        let from_account = from_account.ok_or_else(|| TransferError::account_not_found(from))?;
        if from_account.balance < amount {
            return Err(TransferError::insufficient_funds(
                from,
                from_account.balance,
                amount,
            ));
        }
        let to_account = to_account.ok_or_else(|| TransferError::account_not_found(to))?;
        if from_account.currency != to_account.currency {
            return Err(TransferError::currency_mismatch(
                from,
                &from_account.currency,
                to,
                &to_account.currency,
            ));
        }

        self.apply(&mut tx, &from_account, &to_account, amount)?;
        tx.commit()
    }

    /// Buffer the debit, credit, and both ledger entries
    fn apply(
        &self,
        tx: &mut S::Tx<'_>,
        from_account: &Account,
        to_account: &Account,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        let from = from_account.id.as_str();
        let to = to_account.id.as_str();

        // A self-transfer leaves the balance untouched but is still recorded
        // as a double-entry pair.
        if from != to {
            let debited = from_account
                .balance
                .checked_sub(amount)
                .ok_or_else(|| TransferError::arithmetic_overflow(from))?;
            let credited = to_account
                .balance
                .checked_add(amount)
                .ok_or_else(|| TransferError::arithmetic_overflow(to))?;
            tx.update_balance(from, debited)?;
            tx.update_balance(to, credited)?;
        }

        tx.insert_payment(PaymentDraft::outgoing(from, to, amount))?;
        tx.insert_payment(PaymentDraft::incoming(to, from, amount))?;
        Ok(())
    }
}
