//! Simulated bucket.
//!
//! A [`MockBucket`] owns two tables keyed by object key: the object records
//! and the access-control entries. Both are replaced together by
//! [`MockBucket::store`], so a reader never sees an object without its ACL.

use std::collections::BTreeMap;

use bucketput_core::CannedAcl;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::trace;

use super::object::MockObject;

/// A bucket in the simulated store.
pub struct MockBucket {
    /// Bucket name.
    pub name: String,
    /// Region where this bucket was created.
    pub region: String,
    /// When the bucket was created.
    pub creation_date: DateTime<Utc>,
    /// Object records, keyed by object key.
    objects: RwLock<BTreeMap<String, MockObject>>,
    /// Access-control entries, keyed by object key.
    acls: RwLock<BTreeMap<String, CannedAcl>>,
}

impl std::fmt::Debug for MockBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBucket")
            .field("name", &self.name)
            .field("region", &self.region)
            .field("creation_date", &self.creation_date)
            .field("object_count", &self.objects.read().len())
            .finish_non_exhaustive()
    }
}

impl MockBucket {
    /// Create an empty bucket.
    #[must_use]
    pub fn new(name: String, region: String, creation_date: DateTime<Utc>) -> Self {
        Self {
            name,
            region,
            creation_date,
            objects: RwLock::new(BTreeMap::new()),
            acls: RwLock::new(BTreeMap::new()),
        }
    }

    /// Store an object and its ACL, replacing any previous record for the key.
    pub fn store(&self, object: MockObject, acl: CannedAcl) {
        let mut objects = self.objects.write();
        let mut acls = self.acls.write();
        trace!(bucket = %self.name, key = %object.key, %acl, "storing object");
        acls.insert(object.key.clone(), acl);
        objects.insert(object.key.clone(), object);
    }

    /// A copy of the object stored under `key`.
    #[must_use]
    pub fn object(&self, key: &str) -> Option<MockObject> {
        self.objects.read().get(key).cloned()
    }

    /// The ACL recorded for `key`.
    #[must_use]
    pub fn acl(&self, key: &str) -> Option<CannedAcl> {
        self.acls.read().get(key).copied()
    }

    /// All object keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.objects.read().keys().cloned().collect()
    }

    /// Number of stored objects.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.read().len()
    }

    /// Whether the bucket holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}
