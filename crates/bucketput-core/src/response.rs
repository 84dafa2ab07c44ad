//! The response of a successful put.

use chrono::{DateTime, Utc};
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, ETAG, LAST_MODIFIED};
use http::{HeaderMap, StatusCode};

use crate::utils::parse_http_date;

/// Status and headers returned by a put.
///
/// The live client fills this from the HTTP response; the in-memory store
/// synthesizes it with the same header names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutObjectResponse {
    /// The response status (200 on success).
    pub status: StatusCode,
    /// The response headers.
    pub headers: HeaderMap,
}

impl PutObjectResponse {
    /// Create a response from its parts.
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap) -> Self {
        Self { status, headers }
    }

    /// A header value as a string, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The entity tag, including its quotes.
    #[must_use]
    pub fn etag(&self) -> Option<&str> {
        self.header(ETAG.as_str())
    }

    /// The `Content-Length` header, parsed.
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        self.header(CONTENT_LENGTH.as_str())
            .and_then(|v| v.parse().ok())
    }

    /// The `Content-Type` header.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE.as_str())
    }

    /// The `Last-Modified` header, parsed from its HTTP date form.
    #[must_use]
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.header(LAST_MODIFIED.as_str())
            .and_then(parse_http_date)
    }
}
