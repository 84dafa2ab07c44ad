//! Put objects into S3-compatible buckets.
//!
//! [`StorageBackend`] is the entry point. It is built from a
//! [`StorageConfig`] and either talks to a live endpoint ([`LiveS3`]) or to
//! an in-memory simulation ([`MockS3`]). Both sides implement
//! [`ObjectStorage`], so callers never branch on the mode.
//!
//! ```
//! use bucketput::{ObjectStorage, Payload, PutObjectOptions, StorageBackend, StorageConfig};
//!
//! # tokio_test::block_on(async {
//! let config = StorageConfig::builder()
//!     .mock(true)
//!     .mock_buckets(vec!["photos".to_owned()])
//!     .build();
//! let storage = StorageBackend::from_config(config)?;
//!
//! let resp = storage
//!     .put_object("photos", "hello.txt", Payload::from("hello"), PutObjectOptions::new())
//!     .await?;
//! assert_eq!(resp.status.as_u16(), 200);
//! assert!(resp.etag().is_some());
//! # Ok::<(), bucketput::StorageError>(())
//! # }).unwrap();
//! ```

use async_trait::async_trait;
pub use bucketput_core::{
    CannedAcl, NormalizedPayload, ObjectStorage, Payload, PutObjectOptions, PutObjectResponse,
    StorageConfig, StorageError, StorageResult,
};
pub use bucketput_http::LiveS3;
pub use bucketput_mock::{ManualClock, MockObject, MockS3};
use tracing::info;

/// The storage implementation chosen at construction time.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// Real HTTP requests to an S3-compatible endpoint.
    Live(LiveS3),
    /// In-memory simulation.
    Mock(MockS3),
}

impl StorageBackend {
    /// Build the backend selected by `config.mock`.
    ///
    /// In mock mode every bucket in `config.mock_buckets` is created up front.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transport`] if the live HTTP client cannot be
    /// built.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        if !config.mock {
            info!(host = %config.host, scheme = %config.scheme, "using live storage");
            return LiveS3::new(config).map(Self::Live);
        }

        let mock = MockS3::new().with_region(config.region.clone());
        for name in &config.mock_buckets {
            if !mock.state().bucket_exists(name) {
                mock.create_bucket(name)?;
            }
        }
        info!(buckets = config.mock_buckets.len(), "using in-memory storage");
        Ok(Self::Mock(mock))
    }

    /// Whether this backend is the in-memory simulation.
    #[must_use]
    pub fn is_mock(&self) -> bool {
        matches!(self, Self::Mock(_))
    }

    /// The simulation, for arranging and inspecting state.
    #[must_use]
    pub fn as_mock(&self) -> Option<&MockS3> {
        match self {
            Self::Mock(mock) => Some(mock),
            Self::Live(_) => None,
        }
    }

    /// The live client.
    #[must_use]
    pub fn as_live(&self) -> Option<&LiveS3> {
        match self {
            Self::Live(live) => Some(live),
            Self::Mock(_) => None,
        }
    }
}

impl From<LiveS3> for StorageBackend {
    fn from(live: LiveS3) -> Self {
        Self::Live(live)
    }
}

impl From<MockS3> for StorageBackend {
    fn from(mock: MockS3) -> Self {
        Self::Mock(mock)
    }
}

#[async_trait]
impl ObjectStorage for StorageBackend {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        payload: Payload,
        options: PutObjectOptions,
    ) -> Result<PutObjectResponse, StorageError> {
        match self {
            Self::Live(live) => live.put_object(bucket, key, payload, options).await,
            Self::Mock(mock) => mock.put_object(bucket, key, payload, options).await,
        }
    }
}
