//! Notification fan-out with per-notification failure isolation
//!
//! One bad notification never aborts the batch: retrieval and parse
//! failures are logged with the offending bucket/key and the walk
//! continues. Nothing here propagates an error upward.

use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, info_span, Instrument};

use crate::ingestor::{BatchIngestor, ParseError};
use crate::notification::S3Event;
use crate::retriever::{ObjectRetriever, RetrievalError};
use crate::types::{DispatchSummary, IngestionOutcome};

/// Why one notification's processing was abandoned
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error("failed to parse object content: {0}")]
    Parse(#[from] ParseError),
}

/// Walks notification batches through retrieval and ingestion
pub struct NotificationDispatcher {
    retriever: Arc<dyn ObjectRetriever>,
    ingestor: BatchIngestor,
}

impl NotificationDispatcher {
    pub fn new(retriever: Arc<dyn ObjectRetriever>, ingestor: BatchIngestor) -> Self {
        Self {
            retriever,
            ingestor,
        }
    }

    /// Process every notification in the batch, in order
    ///
    /// Infallible by design: the summary is observability only and the
    /// handler reports nominal completion regardless of inner failures.
    pub async fn handle(&self, event: S3Event) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        for record in &event.records {
            let bucket = record.bucket_name();
            let key = record.decoded_key();
            summary.objects_processed += 1;

            // Record-level logs inside inherit the bucket/key context.
            let span = info_span!("notification", %bucket, %key);
            match self.process_object(bucket, &key).instrument(span).await {
                Ok(outcome) => {
                    summary.records_total += outcome.total_records;
                    summary.records_succeeded += outcome.succeeded;
                }
                Err(cause) => {
                    summary.objects_failed += 1;
                    error!(%bucket, %key, "Notification abandoned: {}", cause);
                }
            }
        }

        info!(
            objects = summary.objects_processed,
            objects_failed = summary.objects_failed,
            records = summary.records_total,
            stored = summary.records_succeeded,
            "Notification batch complete"
        );

        summary
    }

    async fn process_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<IngestionOutcome, NotificationError> {
        info!("Processing object s3://{}/{}", bucket, key);
        let content = self.retriever.fetch(bucket, key).await?;
        let outcome = self.ingestor.ingest(&content).await?;
        Ok(outcome)
    }
}
