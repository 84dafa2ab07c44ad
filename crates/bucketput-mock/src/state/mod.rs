//! Simulated store state.
//!
//! - [`MockState`] -- top-level table owning all buckets
//! - [`MockBucket`] -- per-bucket object table and ACL table
//! - [`MockObject`] -- one stored object record
//!
//! # Thread Safety
//!
//! All types are `Send + Sync`. The bucket table is a `DashMap`; each
//! bucket's object and ACL tables sit behind `parking_lot::RwLock`.

pub(crate) mod bucket;
pub(crate) mod object;
pub(crate) mod service;

pub use bucket::MockBucket;
pub use object::{DEFAULT_CONTENT_TYPE, DEFAULT_STORAGE_CLASS, MockObject};
pub use service::MockState;
