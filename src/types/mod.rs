//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account-related types
//! - `payment`: Double-entry ledger entry types
//! - `operation`: Input operation records for the ingestion front end
//! - `error`: Error taxonomy of the transfer core

pub mod account;
pub mod error;
pub mod operation;
pub mod payment;

pub use account::{Account, AccountId};
pub use error::TransferError;
pub use operation::{OperationRecord, OperationType};
pub use payment::{Direction, Payment, PaymentDraft, PaymentId};
