//! CSV format handling for operation records and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to domain types
//! - Account output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{Account, OperationRecord, OperationType};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: op, account, to, amount,
/// currency. The last three columns are optional at the format level; what
/// each operation requires is enforced in [`convert_csv_record`].
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub op: String,
    pub account: String,
    pub to: Option<String>,
    pub amount: Option<String>,
    pub currency: Option<String>,
}

/// Convert a CsvRecord to an OperationRecord
///
/// This function:
/// - Parses the operation string into an OperationType
/// - Parses the amount string into a Decimal (if present)
/// - Validates that opens carry an amount and a currency
/// - Validates that transfers carry a destination and an amount
///
/// # Arguments
///
/// * `csv_record` - The deserialized CSV record
///
/// # Returns
///
/// Result containing either:
/// - Ok(OperationRecord) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<OperationRecord, String> {
    let op = match csv_record.op.to_lowercase().as_str() {
        "open" => OperationType::Open,
        "transfer" => OperationType::Transfer,
        "delete" => OperationType::Delete,
        _ => {
            return Err(format!(
                "Invalid operation '{}' for account {}",
                csv_record.op, csv_record.account
            ))
        }
    };

    if csv_record.account.is_empty() {
        return Err(format!("Missing account id for {:?} operation", op));
    }

    // Parse amount if present
    let amount = match csv_record.amount {
        Some(amount_str) if !amount_str.trim().is_empty() => {
            match Decimal::from_str(amount_str.trim()) {
                Ok(decimal) => Some(decimal),
                Err(_) => {
                    return Err(format!(
                        "Invalid amount '{}' for account {}",
                        amount_str, csv_record.account
                    ))
                }
            }
        }
        _ => None,
    };

    let to_account = csv_record.to.filter(|to| !to.is_empty());
    let currency = csv_record.currency.filter(|currency| !currency.is_empty());

    // Per-operation field requirements
    match op {
        OperationType::Open => {
            if amount.is_none() {
                return Err(format!(
                    "open operation for account {} requires an opening balance",
                    csv_record.account
                ));
            }
            if currency.is_none() {
                return Err(format!(
                    "open operation for account {} requires a currency",
                    csv_record.account
                ));
            }
        }
        OperationType::Transfer => {
            if to_account.is_none() {
                return Err(format!(
                    "transfer from account {} requires a destination account",
                    csv_record.account
                ));
            }
            if amount.is_none() {
                return Err(format!(
                    "transfer from account {} requires an amount",
                    csv_record.account
                ));
            }
        }
        OperationType::Delete => {
            // Deletes carry no amount or counterparty; extra fields are ignored
        }
    }

    Ok(OperationRecord {
        op,
        account: csv_record.account,
        to_account,
        amount,
        currency,
    })
}

/// Write account states to CSV format
///
/// Writes accounts in CSV format with columns: id, balance, currency.
/// Accounts are sorted by id for deterministic output.
///
/// # Arguments
///
/// * `accounts` - Slice of account states to write
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["id", "balance", "currency"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    // Sort accounts by id for deterministic output
    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by(|a, b| a.id.cmp(&b.id));

    for account in sorted_accounts {
        writer
            .write_record(&[
                account.id.clone(),
                account.balance.to_string(),
                account.currency.clone(),
            ])
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(
        op: &str,
        account: &str,
        to: Option<&str>,
        amount: Option<&str>,
        currency: Option<&str>,
    ) -> CsvRecord {
        CsvRecord {
            op: op.to_string(),
            account: account.to_string(),
            to: to.map(str::to_string),
            amount: amount.map(str::to_string),
            currency: currency.map(str::to_string),
        }
    }

    #[rstest]
    #[case::open("open", OperationType::Open)]
    #[case::open_uppercase("OPEN", OperationType::Open)] // case insensitive
    #[case::transfer("transfer", OperationType::Transfer)]
    #[case::transfer_mixed_case("Transfer", OperationType::Transfer)]
    fn test_operation_parsing(#[case] op: &str, #[case] expected: OperationType) {
        let csv_record = record(op, "alice", Some("bob"), Some("10.00"), Some("USD"));
        let converted = convert_csv_record(csv_record).unwrap();
        assert_eq!(converted.op, expected);
    }

    #[test]
    fn test_convert_open_record() {
        let csv_record = record("open", "alice", None, Some("100.00"), Some("USD"));
        let converted = convert_csv_record(csv_record).unwrap();
        assert_eq!(converted.op, OperationType::Open);
        assert_eq!(converted.account, "alice");
        assert_eq!(converted.amount.unwrap().to_string(), "100.00");
        assert_eq!(converted.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_convert_delete_record_ignores_extra_fields() {
        let csv_record = record("delete", "alice", Some(""), Some(""), Some(""));
        let converted = convert_csv_record(csv_record).unwrap();
        assert_eq!(converted.op, OperationType::Delete);
        assert_eq!(converted.to_account, None);
        assert_eq!(converted.amount, None);
        assert_eq!(converted.currency, None);
    }

    #[rstest]
    #[case::unknown_op(record("withdraw", "alice", None, Some("1"), None))]
    #[case::missing_account(record("open", "", None, Some("1"), Some("USD")))]
    #[case::open_without_amount(record("open", "alice", None, None, Some("USD")))]
    #[case::open_without_currency(record("open", "alice", None, Some("1"), None))]
    #[case::transfer_without_destination(record("transfer", "alice", None, Some("1"), None))]
    #[case::transfer_without_amount(record("transfer", "alice", Some("bob"), None, None))]
    #[case::malformed_amount(record("transfer", "alice", Some("bob"), Some("ten"), None))]
    fn test_conversion_errors(#[case] csv_record: CsvRecord) {
        assert!(convert_csv_record(csv_record).is_err());
    }

    #[test]
    fn test_write_accounts_csv_sorted() {
        let accounts = vec![
            Account::new("bob", "50.01".parse().unwrap(), "USD"),
            Account::new("alice", "50.00".parse().unwrap(), "USD"),
        ];
        let mut output = Vec::new();
        write_accounts_csv(&accounts, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "id,balance,currency\nalice,50.00,USD\nbob,50.01,USD\n");
    }

    #[test]
    fn test_write_accounts_csv_empty() {
        let mut output = Vec::new();
        write_accounts_csv(&[], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "id,balance,currency\n");
    }
}
