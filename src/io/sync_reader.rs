//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over operation records from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Design
//!
//! The SyncReader uses csv::Reader to read and deserialize CSV records
//! sequentially. It maintains streaming behavior by processing CSV records
//! one at a time without loading the entire file into memory.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record parsing errors are yielded as Err variants in the
//!   iterator, with line numbers for debugging

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::OperationRecord;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Provides an iterator interface over operation records.
/// Maintains streaming behavior with constant memory usage.
///
/// # Examples
///
/// ```no_run
/// use wallet_ledger::io::sync_reader::SyncReader;
/// use std::path::Path;
///
/// let reader = SyncReader::new(Path::new("operations.csv")).unwrap();
/// for result in reader {
///     match result {
///         Ok(record) => println!("Processing operation: {:?}", record),
///         Err(e) => eprintln!("Error: {}", e),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// Opens the CSV file and prepares it for streaming iteration.
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (for the optional trailing columns)
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the CSV file
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if file opened successfully
    /// * `Err(String)` if file could not be opened
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<OperationRecord, String>;

    /// Get the next operation record from the CSV file
    ///
    /// Reads and deserializes the next CSV row, then converts it with
    /// [`convert_csv_record`]. Errors carry the data line number.
    fn next(&mut self) -> Option<Self::Item> {
        self.line_num += 1;

        let mut records = self.reader.deserialize::<CsvRecord>();
        match records.next() {
            Some(Ok(csv_record)) => Some(
                convert_csv_record(csv_record)
                    .map_err(|e| format!("Line {}: {}", self.line_num, e)),
            ),
            Some(Err(e)) => Some(Err(format!("Line {}: CSV parse error: {}", self.line_num, e))),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OperationType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_reads_operations_in_order() {
        let file = temp_csv(
            "op,account,to,amount,currency\n\
             open,alice,,100.00,USD\n\
             open,bob,,0.01,USD\n\
             transfer,alice,bob,50.00,\n",
        );

        let reader = SyncReader::new(file.path()).unwrap();
        let records: Vec<OperationRecord> = reader.map(|r| r.unwrap()).collect();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].op, OperationType::Open);
        assert_eq!(records[0].account, "alice");
        assert_eq!(records[2].op, OperationType::Transfer);
        assert_eq!(records[2].to_account.as_deref(), Some("bob"));
    }

    #[test]
    fn test_invalid_record_yields_error_with_line_number() {
        let file = temp_csv(
            "op,account,to,amount,currency\n\
             open,alice,,100.00,USD\n\
             teleport,alice,bob,1.00,\n",
        );

        let reader = SyncReader::new(file.path()).unwrap();
        let results: Vec<_> = reader.collect();
        assert!(results[0].is_ok());
        let err = results[1].as_ref().unwrap_err();
        assert!(err.starts_with("Line 2:"), "unexpected error: {err}");
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = SyncReader::new(Path::new("does_not_exist.csv"));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Failed to open file"));
    }
}
