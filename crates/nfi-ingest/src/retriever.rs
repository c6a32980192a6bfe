//! Object retrieval from the notification bucket

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::Client;
use thiserror::Error;
use tracing::{debug, instrument};

/// Failure to fetch one object
///
/// Not-found, access-denied, and transient failures are not
/// distinguished; the caller abandons this one notification and
/// continues with the rest of the batch either way.
#[derive(Debug, Error)]
#[error("failed to retrieve s3://{bucket}/{key}: {message}")]
pub struct RetrievalError {
    pub bucket: String,
    pub key: String,
    pub message: String,
}

/// Fetch the raw byte content of one object by (bucket, key)
#[async_trait]
pub trait ObjectRetriever: Send + Sync {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, RetrievalError>;
}

/// S3-backed retriever
pub struct S3Retriever {
    client: Client,
}

impl S3Retriever {
    /// Build the S3 client from the shared AWS configuration
    ///
    /// `path_style` must be set when the endpoint is a LocalStack or
    /// MinIO style local stack.
    pub fn new(shared: &aws_config::SdkConfig, path_style: bool) -> Self {
        let config = aws_sdk_s3::config::Builder::from(shared)
            .force_path_style(path_style)
            .build();

        Self {
            client: Client::from_conf(config),
        }
    }
}

#[async_trait]
impl ObjectRetriever for S3Retriever {
    #[instrument(skip(self))]
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, RetrievalError> {
        debug!("Downloading from s3://{}/{}", bucket, key);

        let error = |e: String| RetrievalError {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message: e,
        };

        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| error(DisplayErrorContext(&e).to_string()))?;

        // The buffer lives only for this single-object processing step.
        let data = response
            .body
            .collect()
            .await
            .map_err(|e| error(e.to_string()))?
            .into_bytes()
            .to_vec();

        debug!("Downloaded {} bytes from s3://{}/{}", data.len(), bucket, key);

        Ok(data)
    }
}
