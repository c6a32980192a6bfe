//! Shared helpers for integration tests

use async_trait::async_trait;
use nfi_ingest::notification::S3Event;
use nfi_ingest::retriever::{ObjectRetriever, RetrievalError};
use serde_json::{json, Value};
use std::collections::HashMap;

/// Retriever backed by a fixed (bucket, key) -> bytes map
///
/// Anything not registered fails with a RetrievalError, standing in
/// for not-found/denied/transient backend failures.
#[derive(Default)]
pub struct MapRetriever {
    objects: HashMap<(String, String), Vec<u8>>,
}

impl MapRetriever {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, bucket: &str, key: &str, content: impl Into<Vec<u8>>) -> Self {
        self.objects
            .insert((bucket.to_string(), key.to_string()), content.into());
        self
    }
}

#[async_trait]
impl ObjectRetriever for MapRetriever {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, RetrievalError> {
        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| RetrievalError {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: "object not found".to_string(),
            })
    }
}

/// Build an S3 event referencing the given (bucket, key) pairs
pub fn s3_event(objects: &[(&str, &str)]) -> S3Event {
    serde_json::from_value(s3_event_json(objects)).expect("valid event shape")
}

/// The raw notification JSON for the given (bucket, key) pairs
pub fn s3_event_json(objects: &[(&str, &str)]) -> Value {
    let records: Vec<Value> = objects
        .iter()
        .map(|(bucket, key)| {
            json!({
                "s3": {
                    "bucket": { "name": bucket },
                    "object": { "key": key }
                }
            })
        })
        .collect();

    json!({ "Records": records })
}

/// One complete, valid raw invoice record
pub fn valid_record(id: &str, amount: f64) -> Value {
    json!({
        "id": id,
        "cliente": "ACME Ltda",
        "valor": amount,
        "data_emissao": "2024-01-15"
    })
}
