//! Idempotent invoice persistence
//!
//! Writes unconditionally overwrite any existing record with the same
//! id: no conditional expressions, no read-before-write, no internal
//! retry. Retry policy, if any, belongs to the caller.

use async_trait::async_trait;
use aws_sdk_dynamodb::{error::DisplayErrorContext, types::AttributeValue, Client};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::types::{Invoice, FIELD_AMOUNT, FIELD_CUSTOMER, FIELD_ID, FIELD_ISSUED_AT};

/// Backend write failure
///
/// Connectivity, throttling, and malformed-item failures are not
/// classified further; any store error means "this record failed,
/// continue to the next".
#[derive(Debug, Error)]
#[error("store write failed: {0}")]
pub struct StoreError(pub String);

/// Idempotent upsert of validated invoices, keyed by invoice id
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn upsert(&self, invoice: &Invoice) -> Result<(), StoreError>;
}

/// DynamoDB-backed store
pub struct DynamoStore {
    client: Client,
    table: String,
}

impl DynamoStore {
    pub fn new(shared: &aws_config::SdkConfig, table: impl Into<String>) -> Self {
        Self {
            client: Client::new(shared),
            table: table.into(),
        }
    }

    /// Table the invoices are written to
    pub fn table(&self) -> &str {
        &self.table
    }
}

#[async_trait]
impl RecordStore for DynamoStore {
    #[instrument(skip(self, invoice), fields(id = %invoice.id))]
    async fn upsert(&self, invoice: &Invoice) -> Result<(), StoreError> {
        let mut request = self.client.put_item().table_name(&self.table);
        for (name, value) in item_attributes(invoice) {
            request = request.item(name, value);
        }

        request
            .send()
            .await
            .map_err(|e| StoreError(DisplayErrorContext(&e).to_string()))?;

        debug!(table = %self.table, "Invoice stored");
        Ok(())
    }
}

/// Flatten an invoice into DynamoDB attributes
///
/// The amount is written as a number attribute from its exact decimal
/// string form; extra fields keep their JSON structure.
fn item_attributes(invoice: &Invoice) -> Vec<(String, AttributeValue)> {
    let mut item = vec![
        (FIELD_ID.to_string(), AttributeValue::S(invoice.id.clone())),
        (
            FIELD_CUSTOMER.to_string(),
            AttributeValue::S(invoice.customer.clone()),
        ),
        (
            FIELD_AMOUNT.to_string(),
            AttributeValue::N(invoice.amount.to_string()),
        ),
        (
            FIELD_ISSUED_AT.to_string(),
            AttributeValue::S(invoice.issued_at.clone()),
        ),
    ];

    for (name, value) in &invoice.extra {
        item.push((name.clone(), to_attribute_value(value)));
    }

    item
}

/// JSON value to DynamoDB attribute, recursively
fn to_attribute_value(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(flag) => AttributeValue::Bool(*flag),
        Value::Number(number) => AttributeValue::N(number.to_string()),
        Value::String(text) => AttributeValue::S(text.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(to_attribute_value).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(key, value)| (key.clone(), to_attribute_value(value)))
                .collect(),
        ),
    }
}

/// In-process store for tests and local development
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Invoice>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<Invoice> {
        self.records.lock().ok().and_then(|r| r.get(id).cloned())
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn upsert(&self, invoice: &Invoice) -> Result<(), StoreError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| StoreError("memory store lock poisoned".to_string()))?;
        records.insert(invoice.id.clone(), invoice.clone());
        Ok(())
    }
}
