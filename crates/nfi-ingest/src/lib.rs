//! NFI Ingest Library
//!
//! Notification-triggered ingestion of nota fiscal (invoice) records.
//!
//! # Overview
//!
//! The service reacts to object-creation notifications from an S3 bucket:
//!
//! - **Notification intake**: a batch of S3 event records arrives at the
//!   HTTP surface ([`api`]) and is walked by the [`dispatcher`]
//! - **Retrieval**: each referenced object is fetched by the [`retriever`]
//! - **Ingestion**: the object content is parsed as a JSON array of raw
//!   invoice records by the [`ingestor`]
//! - **Validation**: each record is checked and coerced by the
//!   [`validator`]; monetary amounts become exact decimals
//! - **Persistence**: valid records are upserted into DynamoDB by the
//!   [`store`], keyed by invoice id (last write wins)
//!
//! # Failure model
//!
//! Failures are isolated at two levels and never escape the dispatcher:
//! a rejected or unstorable record skips only that record, and a
//! missing or malformed object skips only that notification. The
//! handler always completes nominally; failures are visible in logs and
//! in the aggregated [`DispatchSummary`].

pub mod api;
pub mod config;
pub mod dispatcher;
pub mod ingestor;
pub mod notification;
pub mod retriever;
pub mod store;
pub mod types;
pub mod validator;

// Re-export commonly used types
pub use dispatcher::NotificationDispatcher;
pub use ingestor::BatchIngestor;
pub use types::{DispatchSummary, IngestionOutcome, Invoice};
