//! Simulated object store provider.
//!
//! [`MockS3`] owns the bucket table and the clock used for last-modified
//! stamps. It implements [`ObjectStorage`] so it can stand in for the live
//! client anywhere the trait is accepted.

use std::sync::Arc;

use async_trait::async_trait;
use bucketput_core::{
    CannedAcl, ObjectStorage, Payload, PutObjectOptions, PutObjectResponse, StorageError,
};

use crate::clock::{Clock, SystemClock};
use crate::ops::object::parse_acl;
use crate::state::{MockObject, MockState};

/// Default region assigned to buckets created through [`MockS3::create_bucket`].
const DEFAULT_REGION: &str = "us-east-1";

/// In-memory object store.
#[derive(Debug, Clone)]
pub struct MockS3 {
    /// Bucket table.
    state: Arc<MockState>,
    /// Source of last-modified stamps.
    clock: Arc<dyn Clock>,
    /// Region recorded on new buckets.
    region: String,
}

impl Default for MockS3 {
    fn default() -> Self {
        Self::new()
    }
}

impl MockS3 {
    /// Create an empty store driven by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(MockState::new()),
            clock: Arc::new(SystemClock),
            region: DEFAULT_REGION.to_owned(),
        }
    }

    /// Replace the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the region recorded on new buckets.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// The bucket table.
    #[must_use]
    pub fn state(&self) -> &MockState {
        &self.state
    }

    /// The clock in use.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Create an empty bucket.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::BucketAlreadyExists`] if the name is taken.
    pub fn create_bucket(&self, name: &str) -> Result<(), StorageError> {
        self.state
            .create_bucket(name.to_owned(), self.region.clone(), self.clock.now())
    }

    /// A copy of the object stored under `bucket`/`key`.
    #[must_use]
    pub fn object(&self, bucket: &str, key: &str) -> Option<MockObject> {
        self.state.get_bucket(bucket).ok()?.object(key)
    }

    /// The ACL recorded for `bucket`/`key`.
    #[must_use]
    pub fn object_acl(&self, bucket: &str, key: &str) -> Option<CannedAcl> {
        self.state.get_bucket(bucket).ok()?.acl(key)
    }

    /// Number of objects in `bucket`, or `None` if it does not exist.
    #[must_use]
    pub fn object_count(&self, bucket: &str) -> Option<usize> {
        self.state.get_bucket(bucket).ok().map(|b| b.object_count())
    }

    /// Remove every bucket and object.
    pub fn reset(&self) {
        self.state.reset();
    }
}

#[async_trait]
impl ObjectStorage for MockS3 {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        payload: Payload,
        options: PutObjectOptions,
    ) -> Result<PutObjectResponse, StorageError> {
        // ACL errors win over payload errors.
        let acl = parse_acl(&options)?;
        let normalized = payload.normalize().await?;
        self.handle_put_object(bucket, key, acl, normalized, &options)
    }
}
