//! In-memory simulation of the bucketput put-object operation.
//!
//! [`MockS3`] implements [`bucketput_core::ObjectStorage`] against owned,
//! in-process tables so code that uploads objects can be exercised offline.
//!
//! # Architecture
//!
//! ```text
//! MockS3 (ObjectStorage impl, clock)
//!        |
//!        v
//!   MockState (bucket name -> MockBucket)
//!        |
//!        v
//!   MockBucket (key -> MockObject, key -> CannedAcl)
//! ```

pub mod checksums;
pub mod clock;
mod ops;
pub mod provider;
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use provider::MockS3;
pub use state::{MockBucket, MockObject, MockState};
