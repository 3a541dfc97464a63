//! Wallet operation types ingested from CSV
//!
//! The CLI front end reads a stream of operation records and applies them to
//! the ledger: opening accounts, transferring funds, and deleting accounts.
//! The amount field is optional because delete operations carry no amount.

use crate::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Operations supported by the ingestion front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    /// Open a new account with an opening balance and currency
    Open,

    /// Move funds from `account` to `to_account`
    ///
    /// Runs the full transfer path: validation, row locks, double-entry
    /// ledger append, atomic commit.
    Transfer,

    /// Remove an account
    ///
    /// Refused while the account still holds a balance.
    Delete,
}

/// Input operation record as read from CSV
///
/// `to_account`, `amount` and `currency` are optional at the record level;
/// per-operation requirements (a transfer needs a destination and an amount,
/// an open needs an amount and a currency) are enforced during conversion in
/// [`crate::io::csv_format`].
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRecord {
    /// The operation to perform
    pub op: OperationType,

    /// The primary account: opened, debited, or deleted depending on `op`
    pub account: AccountId,

    /// Destination account for transfers
    pub to_account: Option<AccountId>,

    /// Opening balance (open) or transfer amount (transfer)
    pub amount: Option<Decimal>,

    /// ISO-style currency code; required when opening an account
    pub currency: Option<String>,
}
