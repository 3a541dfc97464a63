//! Error types for the wallet ledger
//!
//! This module defines the closed error taxonomy for the funds-transfer core
//! and the account/payment operations layered around it.
//!
//! # Error Categories
//!
//! - **Business-rule violations**: invalid amount, unknown account,
//!   insufficient funds, currency mismatch, duplicate account, non-empty
//!   account on delete. Deterministic, never retried, never leave partial
//!   effects.
//! - **Transient store failures**: lock-wait timeouts and other
//!   transaction-level failures. The only retryable class; retries must
//!   re-validate from fresh reads.

use crate::types::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the transfer core and the services around it
///
/// Each variant carries enough context for a caller to log the failure and
/// decide between retry and permanent rejection. Only
/// [`TransferError::TransactionFailure`] is retryable; see
/// [`TransferError::is_retryable`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransferError {
    /// Transfer amount was zero or negative, or an opening balance was negative
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// No account exists with the given id
    #[error("Account not found: {id}")]
    AccountNotFound {
        /// The id that failed to resolve
        id: AccountId,
    },

    /// Source account balance is lower than the transfer amount
    #[error("Insufficient funds in account {id}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Source account id
        id: AccountId,
        /// Balance observed under the row lock
        balance: Decimal,
        /// Requested transfer amount
        requested: Decimal,
    },

    /// Source and destination accounts hold different currencies
    #[error("Currency mismatch: account {from_id} holds {from_currency}, account {to_id} holds {to_currency}")]
    CurrencyMismatch {
        /// Source account id
        from_id: AccountId,
        /// Source account currency
        from_currency: String,
        /// Destination account id
        to_id: AccountId,
        /// Destination account currency
        to_currency: String,
    },

    /// An account with this id already exists
    #[error("Account already exists: {id}")]
    DuplicateAccount {
        /// The conflicting id
        id: AccountId,
    },

    /// Deletion refused because the account still holds funds
    #[error("Account {id} still holds a balance of {balance}")]
    AccountNotEmpty {
        /// The account that was to be deleted
        id: AccountId,
        /// Its remaining balance
        balance: Decimal,
    },

    /// Crediting the destination would overflow its balance
    #[error("Arithmetic overflow crediting account {id}")]
    ArithmeticOverflow {
        /// The account whose balance would overflow
        id: AccountId,
    },

    /// Transient, store-level failure (lock-wait timeout, broken transaction)
    ///
    /// The transaction has been rolled back; no partial effect survives.
    /// Safe to retry with fresh reads.
    #[error("Transaction failure: {message}")]
    TransactionFailure {
        /// Description of the store-level failure
        message: String,
    },
}

// Helper functions for creating common errors

impl TransferError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        TransferError::InvalidAmount { amount }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(id: &str) -> Self {
        TransferError::AccountNotFound { id: id.to_string() }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(id: &str, balance: Decimal, requested: Decimal) -> Self {
        TransferError::InsufficientFunds {
            id: id.to_string(),
            balance,
            requested,
        }
    }

    /// Create a CurrencyMismatch error
    pub fn currency_mismatch(
        from_id: &str,
        from_currency: &str,
        to_id: &str,
        to_currency: &str,
    ) -> Self {
        TransferError::CurrencyMismatch {
            from_id: from_id.to_string(),
            from_currency: from_currency.to_string(),
            to_id: to_id.to_string(),
            to_currency: to_currency.to_string(),
        }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(id: &str) -> Self {
        TransferError::DuplicateAccount { id: id.to_string() }
    }

    /// Create an AccountNotEmpty error
    pub fn account_not_empty(id: &str, balance: Decimal) -> Self {
        TransferError::AccountNotEmpty {
            id: id.to_string(),
            balance,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(id: &str) -> Self {
        TransferError::ArithmeticOverflow { id: id.to_string() }
    }

    /// Create a TransactionFailure error
    pub fn transaction_failure(message: impl Into<String>) -> Self {
        TransferError::TransactionFailure {
            message: message.into(),
        }
    }

    /// Whether the failure is transient and a retry with fresh reads may succeed
    ///
    /// Business-rule violations are deterministic: retrying them with the
    /// same inputs can only fail the same way.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransferError::TransactionFailure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case::invalid_amount(
        TransferError::invalid_amount(Decimal::new(-1000, 2)),
        "Invalid amount: -10.00"
    )]
    #[case::account_not_found(
        TransferError::account_not_found("alice"),
        "Account not found: alice"
    )]
    #[case::insufficient_funds(
        TransferError::insufficient_funds("alice", Decimal::new(10000, 2), Decimal::new(20000, 2)),
        "Insufficient funds in account alice: balance 100.00, requested 200.00"
    )]
    #[case::currency_mismatch(
        TransferError::currency_mismatch("alice", "USD", "bob", "EUR"),
        "Currency mismatch: account alice holds USD, account bob holds EUR"
    )]
    #[case::duplicate_account(
        TransferError::duplicate_account("alice"),
        "Account already exists: alice"
    )]
    #[case::account_not_empty(
        TransferError::account_not_empty("alice", Decimal::new(50, 2)),
        "Account alice still holds a balance of 0.50"
    )]
    #[case::arithmetic_overflow(
        TransferError::arithmetic_overflow("bob"),
        "Arithmetic overflow crediting account bob"
    )]
    #[case::transaction_failure(
        TransferError::transaction_failure("lock wait timed out"),
        "Transaction failure: lock wait timed out"
    )]
    fn test_error_display(#[case] error: TransferError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::transaction_failure(TransferError::transaction_failure("boom"), true)]
    #[case::invalid_amount(TransferError::invalid_amount(Decimal::ZERO), false)]
    #[case::account_not_found(TransferError::account_not_found("x"), false)]
    #[case::insufficient_funds(
        TransferError::insufficient_funds("x", Decimal::ZERO, Decimal::ONE),
        false
    )]
    #[case::currency_mismatch(
        TransferError::currency_mismatch("a", "USD", "b", "EUR"),
        false
    )]
    fn test_is_retryable(#[case] error: TransferError, #[case] retryable: bool) {
        assert_eq!(error.is_retryable(), retryable);
    }
}
