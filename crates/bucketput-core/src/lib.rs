//! Core types, configuration, and the storage trait for bucketput.
//!
//! This crate holds everything the live and the in-memory put-object
//! implementations share:
//!
//! - [`StorageConfig`] -- environment-driven configuration
//! - [`StorageError`] -- the error type every put returns
//! - [`CannedAcl`] -- the four access-control presets
//! - [`PutObjectOptions`] -- caller-supplied request headers
//! - [`Payload`] / [`NormalizedPayload`] -- body normalization
//! - [`PutObjectResponse`] -- status plus response headers
//! - [`ObjectStorage`] -- the operation both implementations expose
//!
//! # Architecture
//!
//! ```text
//!            ObjectStorage::put_object
//!                /              \
//!               v                v
//!   LiveS3 (bucketput-http)   MockS3 (bucketput-mock)
//!        HTTP PUT             owned bucket/object tables
//! ```

pub mod acl;
pub mod config;
pub mod error;
pub mod options;
pub mod payload;
pub mod response;
pub mod storage;
pub mod utils;

pub use acl::CannedAcl;
pub use config::StorageConfig;
pub use error::{StorageError, StorageResult};
pub use options::PutObjectOptions;
pub use payload::{NormalizedPayload, Payload};
pub use response::PutObjectResponse;
pub use storage::ObjectStorage;
