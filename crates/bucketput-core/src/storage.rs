//! The put-object operation shared by every backend.
//!
//! # Object safety
//!
//! [`ObjectStorage`] uses `#[async_trait]` so it can be held as
//! `Arc<dyn ObjectStorage>` and chosen at runtime from configuration.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::options::PutObjectOptions;
use crate::payload::Payload;
use crate::response::PutObjectResponse;

/// A store that accepts object uploads.
#[async_trait]
pub trait ObjectStorage: Send + Sync + std::fmt::Debug {
    /// Upload `payload` to `bucket` under `key`.
    ///
    /// `options` are request headers; they are merged over the headers
    /// inferred from the payload and win on conflict. A repeated identical
    /// call has the same effect as a single one.
    ///
    /// # Errors
    ///
    /// - [`StorageError::InvalidAcl`] if the backend validates `x-amz-acl` and
    ///   the value is not a canned preset.
    /// - [`StorageError::NoSuchBucket`] or [`StorageError::UnexpectedStatus`]
    ///   if the bucket is missing or the service answers with a status other
    ///   than 200.
    /// - [`StorageError::Payload`] if the payload cannot be read.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        payload: Payload,
        options: PutObjectOptions,
    ) -> Result<PutObjectResponse, StorageError>;
}
