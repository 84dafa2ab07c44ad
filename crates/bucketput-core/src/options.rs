//! Caller-supplied put options.
//!
//! [`PutObjectOptions`] is a string-keyed mapping of request header name to
//! value. Header names are case-insensitive on the wire, so keys are stored
//! lower-cased and a later insert under any casing replaces an earlier one.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use http::{HeaderMap, HeaderName, HeaderValue};

use crate::acl::CannedAcl;
use crate::error::StorageError;

/// `Cache-Control` option key.
pub const CACHE_CONTROL: &str = "cache-control";
/// `Content-Disposition` option key.
pub const CONTENT_DISPOSITION: &str = "content-disposition";
/// `Content-Encoding` option key.
pub const CONTENT_ENCODING: &str = "content-encoding";
/// `Content-Length` option key.
pub const CONTENT_LENGTH: &str = "content-length";
/// `Content-MD5` option key.
pub const CONTENT_MD5: &str = "content-md5";
/// `Content-Type` option key.
pub const CONTENT_TYPE: &str = "content-type";
/// `Expires` option key.
pub const EXPIRES: &str = "expires";
/// Canned ACL option key.
pub const X_AMZ_ACL: &str = "x-amz-acl";
/// Storage class option key.
pub const X_AMZ_STORAGE_CLASS: &str = "x-amz-storage-class";
/// Prefix of user-defined metadata option keys.
pub const X_AMZ_META_PREFIX: &str = "x-amz-meta-";

/// Option keys copied verbatim onto a stored object, besides `x-amz-meta-*`.
const PASSTHROUGH_HEADERS: [&str; 5] = [
    CACHE_CONTROL,
    CONTENT_DISPOSITION,
    CONTENT_ENCODING,
    CONTENT_MD5,
    EXPIRES,
];

/// Whether an option key belongs to the set copied onto stored objects.
///
/// # Examples
///
/// ```
/// use bucketput_core::options::is_passthrough_header;
///
/// assert!(is_passthrough_header("Cache-Control"));
/// assert!(is_passthrough_header("x-amz-meta-owner"));
/// assert!(!is_passthrough_header("x-custom-trace"));
/// ```
#[must_use]
pub fn is_passthrough_header(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    PASSTHROUGH_HEADERS.contains(&name.as_str())
        || (name.starts_with(X_AMZ_META_PREFIX) && name.len() > X_AMZ_META_PREFIX.len())
}

/// Request headers supplied by the caller of a put.
///
/// # Examples
///
/// ```
/// use bucketput_core::{CannedAcl, PutObjectOptions};
///
/// let options = PutObjectOptions::new()
///     .acl(CannedAcl::PublicRead)
///     .content_type("text/plain")
///     .metadata("owner", "alice")
///     .header("Cache-Control", "max-age=60");
///
/// assert_eq!(options.get("x-amz-acl"), Some("public-read"));
/// assert_eq!(options.get("X-AMZ-META-OWNER"), Some("alice"));
/// assert_eq!(options.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutObjectOptions {
    headers: BTreeMap<String, String>,
}

impl PutObjectOptions {
    /// Create an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header, replacing any previous value under the same name.
    #[must_use]
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a header in place, returning the previous value.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into())
    }

    /// Set the canned ACL.
    #[must_use]
    pub fn acl(self, acl: CannedAcl) -> Self {
        self.header(X_AMZ_ACL, acl.as_str())
    }

    /// Set the content type.
    #[must_use]
    pub fn content_type(self, content_type: impl Into<String>) -> Self {
        self.header(CONTENT_TYPE, content_type)
    }

    /// Set the storage class.
    #[must_use]
    pub fn storage_class(self, storage_class: impl Into<String>) -> Self {
        self.header(X_AMZ_STORAGE_CLASS, storage_class)
    }

    /// Add a user-defined metadata entry (`x-amz-meta-{name}`).
    #[must_use]
    pub fn metadata(self, name: &str, value: impl Into<String>) -> Self {
        self.header(format!("{X_AMZ_META_PREFIX}{name}"), value)
    }

    /// Look up a header value by case-insensitive name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The raw `x-amz-acl` value, if set.
    #[must_use]
    pub fn acl_value(&self) -> Option<&str> {
        self.get(X_AMZ_ACL)
    }

    /// Number of headers set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Whether no headers are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Iterate over `(lower-cased name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The headers copied verbatim onto a stored object.
    #[must_use]
    pub fn passthrough(&self) -> BTreeMap<String, String> {
        self.headers
            .iter()
            .filter(|(k, _)| is_passthrough_header(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Convert to an HTTP header map.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidHeader`] if a name or value cannot be
    /// represented in an HTTP header.
    pub fn to_header_map(&self) -> Result<HeaderMap, StorageError> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| StorageError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| StorageError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for PutObjectOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (k, v) in iter {
            options.insert(k, v);
        }
        options
    }
}

impl<S: BuildHasher> From<HashMap<String, String, S>> for PutObjectOptions {
    fn from(map: HashMap<String, String, S>) -> Self {
        map.into_iter().collect()
    }
}
