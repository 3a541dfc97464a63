//! Account-related types for the wallet ledger
//!
//! This module defines the Account structure representing a single
//! mobile-wallet account and its current balance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account identifier
///
/// Opaque, caller-assigned string (e.g. "alice456"). Immutable once the
/// account has been opened.
pub type AccountId = String;

/// A mobile-wallet account
///
/// Represents one account row in the ledger store: the caller-assigned
/// identifier, the current balance, and the currency the account is
/// denominated in.
///
/// # Invariants
///
/// - `balance` is never negative after a committed operation
/// - `id` and `currency` are immutable once the account is opened
/// - `balance` is mutated only by the transfer engine, inside a store
///   transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Caller-assigned unique identifier
    pub id: AccountId,

    /// Current balance
    ///
    /// Signed fixed-point amount. Must be >= 0 at all times post-commit.
    pub balance: Decimal,

    /// ISO-style currency code (e.g. "USD")
    ///
    /// Transfers are only permitted between accounts holding the same
    /// currency.
    pub currency: String,
}

impl Account {
    /// Create a new account
    ///
    /// # Arguments
    ///
    /// * `id` - Caller-assigned unique identifier
    /// * `balance` - Opening balance (validated non-negative by the store)
    /// * `currency` - ISO-style currency code
    pub fn new(id: impl Into<AccountId>, balance: Decimal, currency: impl Into<String>) -> Self {
        Account {
            id: id.into(),
            balance,
            currency: currency.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_account_new() {
        let account = Account::new("alice", Decimal::new(10000, 2), "USD");
        assert_eq!(account.id, "alice");
        assert_eq!(account.balance, Decimal::new(10000, 2));
        assert_eq!(account.currency, "USD");
    }
}
