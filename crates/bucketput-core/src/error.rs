//! Storage error types.
//!
//! Defines [`StorageError`], the single error type returned by both put-object
//! implementations. Every variant maps to an S3-style error code, and the
//! variants that correspond to an HTTP exchange also carry a status code, so
//! callers can treat the live and the simulated failure the same way.
//!
//! # Usage
//!
//! ```
//! use bucketput_core::error::StorageError;
//!
//! let err = StorageError::NoSuchBucket {
//!     bucket: "my-bucket".to_owned(),
//! };
//! assert!(err.is_not_found());
//! assert_eq!(err.code(), "NoSuchBucket");
//! ```

use http::StatusCode;

/// Boxed error used for transport failures from the HTTP client.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error returned by [`crate::ObjectStorage::put_object`].
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    // -----------------------------------------------------------------------
    // Request errors
    // -----------------------------------------------------------------------
    /// The `x-amz-acl` option is not one of the canned presets.
    #[error("Invalid canned ACL: {value}")]
    InvalidAcl {
        /// The rejected option value.
        value: String,
    },

    /// An option header cannot be carried by HTTP or cannot be interpreted.
    #[error("Invalid header {name}: {reason}")]
    InvalidHeader {
        /// The offending header name.
        name: String,
        /// Why the header was rejected.
        reason: String,
    },

    // -----------------------------------------------------------------------
    // Bucket errors
    // -----------------------------------------------------------------------
    /// The specified bucket does not exist.
    #[error("The specified bucket does not exist: {bucket}")]
    NoSuchBucket {
        /// The bucket name that was not found.
        bucket: String,
    },

    /// The bucket already exists.
    #[error("The requested bucket name is not available: {bucket}")]
    BucketAlreadyExists {
        /// The bucket name that already exists.
        bucket: String,
    },

    // -----------------------------------------------------------------------
    // Service / transport errors
    // -----------------------------------------------------------------------
    /// The service answered with a status other than the expected one.
    #[error("Expected status {expected}, got {status}{}", describe(.code.as_deref(), .message.as_deref()))]
    UnexpectedStatus {
        /// The status the operation expects on success.
        expected: StatusCode,
        /// The status that was received.
        status: StatusCode,
        /// The S3 error code from the response body, if any.
        code: Option<String>,
        /// The S3 error message from the response body, if any.
        message: Option<String>,
    },

    /// The payload could not be read.
    #[error("Failed to read payload: {0}")]
    Payload(#[from] std::io::Error),

    /// The request could not be delivered.
    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    // -----------------------------------------------------------------------
    // Internal / catch-all
    // -----------------------------------------------------------------------
    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl StorageError {
    /// Status every successful put is expected to return.
    pub const EXPECTED_STATUS: StatusCode = StatusCode::OK;

    /// The HTTP status associated with this error, if it has one.
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::InvalidAcl { .. } | Self::InvalidHeader { .. } => Some(StatusCode::BAD_REQUEST),
            Self::NoSuchBucket { .. } => Some(StatusCode::NOT_FOUND),
            Self::BucketAlreadyExists { .. } => Some(StatusCode::CONFLICT),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Internal(_) => Some(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Payload(_) | Self::Transport(_) => None,
        }
    }

    /// The status the failed operation expected, for status-carrying errors.
    #[must_use]
    pub fn expected_status(&self) -> Option<StatusCode> {
        match self {
            Self::UnexpectedStatus { expected, .. } => Some(*expected),
            Self::InvalidAcl { .. } | Self::InvalidHeader { .. } | Self::NoSuchBucket { .. } => {
                Some(Self::EXPECTED_STATUS)
            }
            _ => None,
        }
    }

    /// The S3-style error code for this error.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::InvalidAcl { .. } | Self::InvalidHeader { .. } => "InvalidArgument",
            Self::NoSuchBucket { .. } => "NoSuchBucket",
            Self::BucketAlreadyExists { .. } => "BucketAlreadyExists",
            Self::UnexpectedStatus { code, .. } => code.as_deref().unwrap_or("UnexpectedStatus"),
            Self::Payload(_) => "PayloadError",
            Self::Transport(_) => "TransportError",
            Self::Internal(_) => "InternalError",
        }
    }

    /// Whether the error means the target does not exist (404).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(StatusCode::NOT_FOUND)
    }

    /// Whether the error means the request itself was rejected (400).
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        self.status_code() == Some(StatusCode::BAD_REQUEST)
    }
}

fn describe(code: Option<&str>, message: Option<&str>) -> String {
    match (code, message) {
        (Some(c), Some(m)) => format!(" ({c}: {m})"),
        (Some(c), None) => format!(" ({c})"),
        (None, Some(m)) => format!(" ({m})"),
        (None, None) => String::new(),
    }
}

/// Convenience result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
