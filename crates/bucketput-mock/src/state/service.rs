//! Top-level simulated store state.
//!
//! [`MockState`] owns every bucket by name. All operations are thread-safe
//! via `DashMap`.

use bucketput_core::StorageError;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::one::Ref;
use tracing::{debug, info};

use super::bucket::MockBucket;

/// Top-level state holding all simulated buckets.
pub struct MockState {
    /// Bucket name to `MockBucket` mapping.
    buckets: DashMap<String, MockBucket>,
}

impl std::fmt::Debug for MockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockState")
            .field("bucket_count", &self.buckets.len())
            .finish_non_exhaustive()
    }
}

impl Default for MockState {
    fn default() -> Self {
        Self::new()
    }
}

impl MockState {
    /// Create a new, empty state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buckets: DashMap::new(),
        }
    }

    /// Create a new bucket.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::BucketAlreadyExists`] if the name is taken.
    pub fn create_bucket(
        &self,
        name: String,
        region: String,
        creation_date: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        match self.buckets.entry(name.clone()) {
            dashmap::Entry::Occupied(_) => Err(StorageError::BucketAlreadyExists { bucket: name }),
            dashmap::Entry::Vacant(entry) => {
                entry.insert(MockBucket::new(name.clone(), region, creation_date));
                info!(bucket = %name, "bucket created");
                Ok(())
            }
        }
    }

    /// Get a reference to a bucket.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NoSuchBucket`] if the bucket does not exist.
    pub fn get_bucket(&self, name: &str) -> Result<Ref<'_, String, MockBucket>, StorageError> {
        self.buckets
            .get(name)
            .ok_or_else(|| StorageError::NoSuchBucket {
                bucket: name.to_owned(),
            })
    }

    /// List all buckets, returning `(name, creation_date)` pairs sorted by name.
    #[must_use]
    pub fn list_buckets(&self) -> Vec<(String, DateTime<Utc>)> {
        let mut buckets: Vec<(String, DateTime<Utc>)> = self
            .buckets
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().creation_date))
            .collect();
        buckets.sort_by(|a, b| a.0.cmp(&b.0));
        buckets
    }

    /// Check whether a bucket exists.
    #[must_use]
    pub fn bucket_exists(&self, name: &str) -> bool {
        self.buckets.contains_key(name)
    }

    /// Reset all state, removing all buckets.
    pub fn reset(&self) {
        debug!("resetting all simulated state");
        self.buckets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(state: &MockState, name: &str) -> Result<(), StorageError> {
        state.create_bucket(name.to_owned(), "us-east-1".to_owned(), Utc::now())
    }

    #[test]
    fn test_should_create_empty_state() {
        let state = MockState::new();
        assert!(!state.bucket_exists("anything"));
        assert!(state.list_buckets().is_empty());
    }

    #[test]
    fn test_should_create_and_get_bucket() {
        let state = MockState::new();
        create(&state, "alpha").expect("create");
        assert!(state.bucket_exists("alpha"));
        let bucket = state.get_bucket("alpha").expect("get");
        assert_eq!(bucket.name, "alpha");
        assert_eq!(bucket.region, "us-east-1");
    }

    #[test]
    fn test_should_reject_duplicate_bucket() {
        let state = MockState::new();
        create(&state, "dup").expect("first create");
        let err = create(&state, "dup").expect_err("second create");
        assert!(matches!(err, StorageError::BucketAlreadyExists { ref bucket } if bucket == "dup"));
    }

    #[test]
    fn test_should_return_no_such_bucket() {
        let state = MockState::new();
        let err = state.get_bucket("ghost").expect_err("missing");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_should_list_buckets_sorted() {
        let state = MockState::new();
        for name in ["charlie", "alpha", "bravo"] {
            create(&state, name).expect("create");
        }
        let names: Vec<String> = state.list_buckets().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn test_should_reset_state() {
        let state = MockState::new();
        create(&state, "gone").expect("create");
        state.reset();
        assert!(!state.bucket_exists("gone"));
    }

    #[test]
    fn test_should_debug_format_state() {
        let state = MockState::new();
        assert!(format!("{state:?}").contains("bucket_count"));
    }
}
