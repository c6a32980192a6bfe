//! S3 object-creation notifications
//!
//! The inbound envelope follows the S3 event notification shape:
//! `Records[].s3.bucket.name` and `Records[].s3.object.key`.

use percent_encoding::percent_decode_str;
use serde::Deserialize;

/// A batch of object-creation notifications
#[derive(Debug, Clone, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records")]
    pub records: Vec<S3EventRecord>,
}

/// One entry describing a created object
#[derive(Debug, Clone, Deserialize)]
pub struct S3EventRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Object {
    pub key: String,
}

impl S3EventRecord {
    pub fn bucket_name(&self) -> &str {
        &self.s3.bucket.name
    }

    /// Object key with the transport encoding removed
    ///
    /// Keys arrive percent-encoded with `+` standing for space, so
    /// `invoice%2Bjan.json` resolves to the literal `invoice+jan.json`.
    pub fn decoded_key(&self) -> String {
        unquote_plus(&self.s3.object.key)
    }
}

/// Percent-decode with `+`-as-space semantics
pub fn unquote_plus(key: &str) -> String {
    let plus_as_space = key.replace('+', " ");
    percent_decode_str(&plus_as_space)
        .decode_utf8_lossy()
        .into_owned()
}
