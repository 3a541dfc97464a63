//! Asynchronous CSV reader with batch interface
//!
//! Provides batch reading of operation records from an async byte source.
//! Used by the concurrent processing strategy, which executes the transfers
//! of each batch in parallel.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - futures for the record stream
//! - Batch reading so the strategy can bound in-flight work

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::OperationRecord;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous CSV reader
///
/// Provides a batch reading interface over operation records.
/// Maintains streaming behavior with constant memory usage per batch.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    ///
    /// # Arguments
    ///
    /// * `reader` - Async reader providing CSV data
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read a batch of operation records
    ///
    /// Reads up to `batch_size` records, converting them to
    /// OperationRecords. Invalid records are logged to stderr and skipped.
    /// Returns an empty vector when the end of the input is reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<OperationRecord> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => match convert_csv_record(csv_record) {
                    Ok(operation_record) => batch.push(operation_record),
                    Err(e) => eprintln!("Record conversion error: {}", e),
                },
                Some(Err(e)) => eprintln!("CSV parse error: {}", e),
                None => break,
            }
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OperationType;
    use futures::io::Cursor;

    #[tokio::test]
    async fn test_read_batch() {
        let csv_content = "op,account,to,amount,currency\n\
                           open,alice,,100.00,USD\n\
                           open,bob,,0.01,USD\n\
                           transfer,alice,bob,50.00,\n";
        let mut reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = reader.read_batch(10).await;
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].op, OperationType::Open);
        assert_eq!(batch[2].op, OperationType::Transfer);

        // End of input yields an empty batch
        assert!(reader.read_batch(10).await.is_empty());
    }

    #[tokio::test]
    async fn test_read_batch_respects_batch_size() {
        let csv_content = "op,account,to,amount,currency\n\
                           open,a,,1,USD\n\
                           open,b,,1,USD\n\
                           open,c,,1,USD\n";
        let mut reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let first = reader.read_batch(2).await;
        assert_eq!(first.len(), 2);
        let second = reader.read_batch(2).await;
        assert_eq!(second.len(), 1);
    }

    #[tokio::test]
    async fn test_read_batch_skips_invalid_records() {
        let csv_content = "op,account,to,amount,currency\n\
                           open,alice,,100.00,USD\n\
                           teleport,alice,bob,1.00,\n\
                           open,bob,,0.01,USD\n";
        let mut reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = reader.read_batch(10).await;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].account, "alice");
        assert_eq!(batch[1].account, "bob");
    }
}
