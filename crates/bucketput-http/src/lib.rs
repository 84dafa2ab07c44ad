//! Live HTTP client for the bucketput put-object operation.
//!
//! [`LiveS3`] implements [`bucketput_core::ObjectStorage`] by sending a single
//! `PUT` to an S3-compatible endpoint.
//!
//! # Architecture
//!
//! ```text
//! Payload + PutObjectOptions
//!        |
//!        v
//!   prepare_put (normalize, merge headers, build URL)
//!        |
//!        v
//!   PreparedPut --reqwest--> S3 endpoint
//!        |
//!        v
//!   PutObjectResponse | StorageError::UnexpectedStatus (error_body)
//! ```

pub mod client;
pub mod error_body;
pub mod request;

pub use client::LiveS3;
pub use error_body::ErrorBody;
pub use request::{PreparedPut, object_url, prepare_put};
