//! Stored object record.

use std::collections::BTreeMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};

/// Storage class recorded when the caller does not pick one.
pub const DEFAULT_STORAGE_CLASS: &str = "STANDARD";

/// Content type recorded when neither the caller nor the payload supplies one.
pub const DEFAULT_CONTENT_TYPE: &str = "binary/octet-stream";

/// An object held by the simulated store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockObject {
    /// The object key.
    pub key: String,
    /// The object body.
    pub body: Bytes,
    /// The MIME type of the object.
    pub content_type: String,
    /// The entity tag (quoted hex MD5 of the body).
    pub etag: String,
    /// The object size in bytes.
    pub size: u64,
    /// The storage class (default `STANDARD`).
    pub storage_class: String,
    /// When this record was written.
    pub last_modified: DateTime<Utc>,
    /// Allow-listed request headers copied onto the object, keyed by
    /// lower-cased name.
    pub headers: BTreeMap<String, String>,
}

impl MockObject {
    /// User-defined metadata (`x-amz-meta-*`) with the prefix stripped.
    #[must_use]
    pub fn user_metadata(&self) -> BTreeMap<&str, &str> {
        self.headers
            .iter()
            .filter_map(|(k, v)| {
                k.strip_prefix(bucketput_core::options::X_AMZ_META_PREFIX)
                    .map(|name| (name, v.as_str()))
            })
            .collect()
    }
}
