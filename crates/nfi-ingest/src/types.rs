//! Core types for the invoice ingestion pipeline

use bigdecimal::BigDecimal;
use serde::Serialize;
use serde_json::{Map, Value};

/// One undecoded element of an ingested array, pre-validation
pub type RawRecord = Map<String, Value>;

/// Wire field names of the invoice object format
pub const FIELD_ID: &str = "id";
pub const FIELD_CUSTOMER: &str = "cliente";
pub const FIELD_AMOUNT: &str = "valor";
pub const FIELD_ISSUED_AT: &str = "data_emissao";

/// A validated invoice, ready for persistence
///
/// Wire-to-struct mapping: `id` -> `id`, `cliente` -> `customer`,
/// `valor` -> `amount`, `data_emissao` -> `issued_at`. Fields outside
/// the required set are carried through untouched in `extra`.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    /// Unique record identifier; the persistence key
    pub id: String,
    /// Counterparty name
    pub customer: String,
    /// Exact decimal amount, never a binary float
    pub amount: BigDecimal,
    /// Issuance date as received (ISO-8601 expected, not enforced)
    pub issued_at: String,
    /// Non-required fields, persisted as-is
    pub extra: Map<String, Value>,
}

/// Per-object ingestion tally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestionOutcome {
    pub total_records: usize,
    pub succeeded: usize,
}

impl IngestionOutcome {
    /// Records that failed validation or storage
    pub fn failed(&self) -> usize {
        self.total_records - self.succeeded
    }
}

/// Aggregated result of one notification batch
///
/// Observability only: the batch handler reports nominal completion
/// regardless of these counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    /// Notifications walked, including failed ones
    pub objects_processed: usize,
    /// Notifications abandoned on retrieval or parse failure
    pub objects_failed: usize,
    /// Records attempted across all parsed objects
    pub records_total: usize,
    /// Records that passed validation and were stored
    pub records_succeeded: usize,
}
