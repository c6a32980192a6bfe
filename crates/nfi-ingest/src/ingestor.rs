//! Object-content parsing and per-record fan-out
//!
//! A malformed container aborts the whole object; a bad record only
//! skips itself. Records are walked in input order so log output
//! follows the array.

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::store::RecordStore;
use crate::types::IngestionOutcome;
use crate::validator;

/// The fetched content is not a well-formed array of records
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("object content is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("object content is not an array of records")]
    NotAnArray,
}

/// Drives retrieved object content through validation and the store
pub struct BatchIngestor {
    store: Arc<dyn RecordStore>,
}

impl BatchIngestor {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Parse `content` as a JSON array of raw records and ingest each
    ///
    /// Validation and store failures increment the failure tally and
    /// processing continues with the next record.
    pub async fn ingest(&self, content: &[u8]) -> Result<IngestionOutcome, ParseError> {
        let parsed: Value = serde_json::from_slice(content)?;
        let Value::Array(entries) = parsed else {
            return Err(ParseError::NotAnArray);
        };

        let total_records = entries.len();
        info!("Parsed object content: {} records", total_records);

        let mut succeeded = 0;
        for entry in &entries {
            if self.ingest_record(entry).await {
                succeeded += 1;
            }
        }

        info!(
            "Ingestion finished: {} of {} records stored",
            succeeded, total_records
        );

        Ok(IngestionOutcome {
            total_records,
            succeeded,
        })
    }

    /// Validate and store one entry; failures are logged and absorbed
    async fn ingest_record(&self, entry: &Value) -> bool {
        let Some(raw) = entry.as_object() else {
            warn!("Skipping record: array element is not an object");
            return false;
        };

        let invoice = match validator::validate(raw) {
            Ok(invoice) => invoice,
            Err(rejection) => {
                warn!("Skipping record: {}", rejection);
                return false;
            }
        };

        match self.store.upsert(&invoice).await {
            Ok(()) => {
                debug!(id = %invoice.id, "Record stored");
                true
            }
            Err(error) => {
                warn!(id = %invoice.id, "Skipping record: {}", error);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use bigdecimal::BigDecimal;
    use serde_json::json;
    use std::str::FromStr;

    fn ingestor_with_store() -> (BatchIngestor, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (BatchIngestor::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_ingest_stores_all_valid_records() {
        let (ingestor, store) = ingestor_with_store();
        let content = json!([
            { "id": "nf-1", "cliente": "A", "valor": 19.99, "data_emissao": "2024-01-01" },
            { "id": "nf-2", "cliente": "B", "valor": 5, "data_emissao": "2024-01-02" }
        ]);

        let outcome = ingestor
            .ingest(content.to_string().as_bytes())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            IngestionOutcome {
                total_records: 2,
                succeeded: 2
            }
        );
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get("nf-1").unwrap().amount,
            BigDecimal::from_str("19.99").unwrap()
        );
    }

    #[tokio::test]
    async fn test_one_bad_record_never_aborts_the_rest() {
        let (ingestor, store) = ingestor_with_store();
        let content = json!([
            { "id": "nf-1", "cliente": "A", "valor": 10, "data_emissao": "2024-01-01" },
            { "id": "nf-2", "cliente": "B" },
            { "id": "nf-3", "cliente": "C", "valor": "oops", "data_emissao": "2024-01-03" },
            "not even an object",
            { "id": "nf-5", "cliente": "E", "valor": 50, "data_emissao": "2024-01-05" }
        ]);

        let outcome = ingestor
            .ingest(content.to_string().as_bytes())
            .await
            .unwrap();

        assert_eq!(outcome.total_records, 5);
        assert_eq!(outcome.succeeded, 2);
        assert_eq!(outcome.failed(), 3);
        assert!(store.get("nf-1").is_some());
        assert!(store.get("nf-5").is_some());
        assert!(store.get("nf-2").is_none());
        assert!(store.get("nf-3").is_none());
    }

    #[tokio::test]
    async fn test_non_array_container_is_a_parse_error() {
        let (ingestor, store) = ingestor_with_store();

        let error = ingestor
            .ingest(br#"{"id": "nf-1"}"#)
            .await
            .unwrap_err();
        assert!(matches!(error, ParseError::NotAnArray));

        let error = ingestor.ingest(b"not json at all").await.unwrap_err();
        assert!(matches!(error, ParseError::Json(_)));

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_empty_array_is_an_empty_outcome() {
        let (ingestor, store) = ingestor_with_store();

        let outcome = ingestor.ingest(b"[]").await.unwrap();

        assert_eq!(
            outcome,
            IngestionOutcome {
                total_records: 0,
                succeeded: 0
            }
        );
        assert!(store.is_empty());
    }
}
