//! Payload normalization.
//!
//! A put accepts raw bytes, text, a file path, or any async reader.
//! [`Payload::normalize`] turns each of these into a single in-memory body
//! plus the baseline headers inferred from it (`Content-Length` always,
//! `Content-Type` when the source has a file name to guess from). Caller
//! options are merged over these headers later.

use std::fmt;
use std::path::PathBuf;

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

use crate::error::StorageError;

/// The data to upload.
pub enum Payload {
    /// Raw bytes.
    Bytes(Bytes),
    /// UTF-8 text.
    Text(String),
    /// The contents of a file; its extension drives the inferred content type.
    File(PathBuf),
    /// Any async byte source, read to the end.
    Reader(Box<dyn AsyncRead + Send + Unpin>),
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(b) => f.debug_struct("Bytes").field("size", &b.len()).finish(),
            Self::Text(s) => f.debug_struct("Text").field("size", &s.len()).finish(),
            Self::File(p) => f.debug_tuple("File").field(p).finish(),
            Self::Reader(_) => f.debug_struct("Reader").finish_non_exhaustive(),
        }
    }
}

impl From<Bytes> for Payload {
    fn from(b: Bytes) -> Self {
        Self::Bytes(b)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(v))
    }
}

impl From<&'static [u8]> for Payload {
    fn from(s: &'static [u8]) -> Self {
        Self::Bytes(Bytes::from_static(s))
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<PathBuf> for Payload {
    fn from(p: PathBuf) -> Self {
        Self::File(p)
    }
}

/// A payload reduced to its body and the headers inferred from it.
#[derive(Debug, Clone)]
pub struct NormalizedPayload {
    /// The complete body.
    pub body: Bytes,
    /// Baseline headers (`Content-Length`, optionally `Content-Type`).
    pub headers: HeaderMap,
}

impl NormalizedPayload {
    /// Wrap an in-memory body, inferring only its length.
    #[must_use]
    pub fn from_bytes(body: Bytes) -> Self {
        Self::with_content_type(body, None)
    }

    fn with_content_type(body: Bytes, content_type: Option<&str>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
        if let Some(ct) = content_type.and_then(|ct| HeaderValue::from_str(ct).ok()) {
            headers.insert(CONTENT_TYPE, ct);
        }
        Self { body, headers }
    }

    /// The inferred content type, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// The body length in bytes.
    #[must_use]
    pub fn content_length(&self) -> u64 {
        self.body.len() as u64
    }
}

impl Payload {
    /// Read the payload into memory and infer its baseline headers.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Payload`] if a file or reader fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use bucketput_core::Payload;
    ///
    /// # tokio_test::block_on(async {
    /// let normalized = Payload::from("hello").normalize().await.unwrap();
    /// assert_eq!(normalized.body.as_ref(), b"hello");
    /// assert_eq!(normalized.content_length(), 5);
    /// assert!(normalized.content_type().is_none());
    /// # });
    /// ```
    pub async fn normalize(self) -> Result<NormalizedPayload, StorageError> {
        let normalized = match self {
            Self::Bytes(body) => NormalizedPayload::from_bytes(body),
            Self::Text(text) => NormalizedPayload::from_bytes(Bytes::from(text)),
            Self::File(path) => {
                let data = tokio::fs::read(&path).await?;
                let guessed: Option<mime::Mime> = mime_guess::from_path(&path).first();
                trace!(path = %path.display(), content_type = ?guessed, "read file payload");
                NormalizedPayload::with_content_type(
                    Bytes::from(data),
                    guessed.as_ref().map(mime::Mime::essence_str),
                )
            }
            Self::Reader(mut reader) => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf).await?;
                NormalizedPayload::from_bytes(Bytes::from(buf))
            }
        };
        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn test_should_normalize_bytes() {
        let normalized = Payload::from(vec![0u8, 1, 2])
            .normalize()
            .await
            .expect("normalize");
        assert_eq!(normalized.body.as_ref(), &[0, 1, 2]);
        assert_eq!(
            normalized.headers.get(CONTENT_LENGTH).and_then(|v| v.to_str().ok()),
            Some("3")
        );
        assert!(normalized.content_type().is_none());
    }

    #[tokio::test]
    async fn test_should_normalize_empty_text() {
        let normalized = Payload::from("").normalize().await.expect("normalize");
        assert!(normalized.body.is_empty());
        assert_eq!(normalized.content_length(), 0);
    }

    #[tokio::test]
    async fn test_should_infer_content_type_from_file_extension() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("tempfile");
        file.write_all(b"{\"a\":1}").expect("write");

        let normalized = Payload::File(file.path().to_path_buf())
            .normalize()
            .await
            .expect("normalize");
        assert_eq!(normalized.body.as_ref(), b"{\"a\":1}");
        assert_eq!(normalized.content_type(), Some("application/json"));
        assert_eq!(normalized.content_length(), 7);
    }

    #[tokio::test]
    async fn test_should_leave_content_type_unset_for_unknown_extension() {
        let file = tempfile::Builder::new()
            .suffix(".zzunknown")
            .tempfile()
            .expect("tempfile");
        let normalized = Payload::File(file.path().to_path_buf())
            .normalize()
            .await
            .expect("normalize");
        assert!(normalized.content_type().is_none());
    }

    #[tokio::test]
    async fn test_should_read_async_reader_to_end() {
        let reader: Box<dyn AsyncRead + Send + Unpin> = Box::new(&b"streamed body"[..]);
        let normalized = Payload::Reader(reader).normalize().await.expect("normalize");
        assert_eq!(normalized.body.as_ref(), b"streamed body");
        assert_eq!(normalized.content_length(), 13);
    }

    #[tokio::test]
    async fn test_should_report_missing_file_as_payload_error() {
        let err = Payload::File(PathBuf::from("/nonexistent/bucketput/file.txt"))
            .normalize()
            .await
            .expect_err("missing file");
        assert!(matches!(err, StorageError::Payload(_)));
    }

    #[test]
    fn test_should_debug_format_without_body() {
        let debug_str = format!("{:?}", Payload::from("secret"));
        assert!(debug_str.contains("size"));
        assert!(!debug_str.contains("secret"));
    }
}
