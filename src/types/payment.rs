//! Payment (ledger entry) types for the wallet ledger
//!
//! A committed transfer is recorded as two immutable ledger entries: an
//! outgoing entry attached to the source account and an incoming entry
//! attached to the destination account. Both entries share the transfer
//! amount. Payments are append-only; they are never mutated or deleted.

use crate::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment identifier
///
/// Assigned by the ledger store at commit time. Unique and monotonically
/// increasing within one store.
pub type PaymentId = u64;

/// Direction of a ledger entry relative to its owning account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Funds arrived at the owning account
    Incoming,
    /// Funds left the owning account
    Outgoing,
}

/// One leg of a committed transfer
///
/// Each transfer produces exactly two `Payment` rows: one `Outgoing` entry
/// where `account` is the source and `to_account` names the destination, and
/// one `Incoming` entry where `account` is the destination and `from_account`
/// names the source. Exactly one of the counterparty fields is set, matching
/// the direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Store-assigned unique identifier
    pub id: PaymentId,

    /// The account this entry is attached to (for query purposes)
    pub account: AccountId,

    /// Positive magnitude of the movement
    pub amount: Decimal,

    /// Source counterparty; set on incoming entries
    pub from_account: Option<AccountId>,

    /// Destination counterparty; set on outgoing entries
    pub to_account: Option<AccountId>,

    /// Whether funds arrived at or left the owning account
    pub direction: Direction,
}

/// A ledger entry pending insertion inside an open transaction
///
/// Drafts carry everything except the id, which the store assigns when the
/// transaction commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDraft {
    /// The account this entry will be attached to
    pub account: AccountId,

    /// Positive magnitude of the movement
    pub amount: Decimal,

    /// Source counterparty; set on incoming entries
    pub from_account: Option<AccountId>,

    /// Destination counterparty; set on outgoing entries
    pub to_account: Option<AccountId>,

    /// Whether funds arrived at or left the owning account
    pub direction: Direction,
}

impl PaymentDraft {
    /// Draft the outgoing leg of a transfer (attached to the source account)
    pub fn outgoing(
        account: impl Into<AccountId>,
        to_account: impl Into<AccountId>,
        amount: Decimal,
    ) -> Self {
        PaymentDraft {
            account: account.into(),
            amount,
            from_account: None,
            to_account: Some(to_account.into()),
            direction: Direction::Outgoing,
        }
    }

    /// Draft the incoming leg of a transfer (attached to the destination account)
    pub fn incoming(
        account: impl Into<AccountId>,
        from_account: impl Into<AccountId>,
        amount: Decimal,
    ) -> Self {
        PaymentDraft {
            account: account.into(),
            amount,
            from_account: Some(from_account.into()),
            to_account: None,
            direction: Direction::Incoming,
        }
    }

    /// Attach a store-assigned id, producing the final ledger entry
    pub fn into_payment(self, id: PaymentId) -> Payment {
        Payment {
            id,
            account: self.account,
            amount: self.amount,
            from_account: self.from_account,
            to_account: self.to_account,
            direction: self.direction,
        }
    }
}
