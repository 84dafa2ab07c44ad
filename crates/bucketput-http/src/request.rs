//! Request preparation for the live put.
//!
//! Turns a normalized payload and the caller's options into the URL, headers
//! and body of a single `PUT`. Nothing here touches the network, so the
//! merge and addressing rules can be checked directly.

use bucketput_core::utils::escape_object_key;
use bucketput_core::{NormalizedPayload, PutObjectOptions, StorageConfig, StorageError};
use bytes::Bytes;
use http::{HeaderMap, Method};

/// A fully assembled put, ready to hand to the HTTP client.
#[derive(Debug, Clone)]
pub struct PreparedPut {
    /// Always `PUT`.
    pub method: Method,
    /// Absolute target URL with the key already escaped.
    pub url: String,
    /// Payload headers overlaid with the caller's options.
    pub headers: HeaderMap,
    /// The request body.
    pub body: Bytes,
    /// A put of the same bytes to the same key can be safely repeated.
    pub idempotent: bool,
}

/// Build the target URL for `bucket`/`key`.
///
/// # Examples
///
/// ```
/// use bucketput_core::StorageConfig;
/// use bucketput_http::object_url;
///
/// let config = StorageConfig::default();
/// assert_eq!(
///     object_url(&config, "photos", "2024/a b.jpg"),
///     "https://photos.s3.amazonaws.com/2024/a%20b.jpg"
/// );
///
/// let path_style = StorageConfig::builder()
///     .scheme("http".to_owned())
///     .host("localhost".to_owned())
///     .port(9000)
///     .virtual_hosting(false)
///     .build();
/// assert_eq!(
///     object_url(&path_style, "photos", "cat.jpg"),
///     "http://localhost:9000/photos/cat.jpg"
/// );
/// ```
#[must_use]
pub fn object_url(config: &StorageConfig, bucket: &str, key: &str) -> String {
    let authority = config.authority_for(bucket);
    let key = escape_object_key(key);
    if config.virtual_hosted() {
        format!("{}://{authority}/{key}", config.scheme)
    } else {
        format!("{}://{authority}/{bucket}/{key}", config.scheme)
    }
}

/// Assemble the put request.
///
/// Payload headers form the baseline and every caller option replaces the
/// baseline value of the same name. Option values are not validated.
///
/// # Errors
///
/// Returns [`StorageError::InvalidHeader`] if an option cannot be carried as
/// an HTTP header.
pub fn prepare_put(
    config: &StorageConfig,
    bucket: &str,
    key: &str,
    payload: NormalizedPayload,
    options: &PutObjectOptions,
) -> Result<PreparedPut, StorageError> {
    let mut headers = payload.headers;
    for (name, value) in options.to_header_map()? {
        if let Some(name) = name {
            headers.insert(name, value);
        }
    }

    Ok(PreparedPut {
        method: Method::PUT,
        url: object_url(config, bucket, key),
        headers,
        body: payload.body,
        idempotent: true,
    })
}

#[cfg(test)]
mod tests {
    use bucketput_core::CannedAcl;
    use http::header;

    use super::*;

    fn json_payload(body: &'static [u8]) -> NormalizedPayload {
        let mut payload = NormalizedPayload::from_bytes(Bytes::from_static(body));
        payload.headers.insert(
            header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        payload
    }

    #[test]
    fn test_should_prepare_idempotent_put() {
        let config = StorageConfig::default();
        let prepared = prepare_put(
            &config,
            "my-bucket",
            "a/b.json",
            json_payload(b"{}"),
            &PutObjectOptions::new(),
        )
        .expect("prepare");

        assert_eq!(prepared.method, Method::PUT);
        assert_eq!(prepared.url, "https://my-bucket.s3.amazonaws.com/a/b.json");
        assert!(prepared.idempotent);
        assert_eq!(prepared.body, Bytes::from_static(b"{}"));
        assert_eq!(prepared.headers[header::CONTENT_LENGTH], "2");
        assert_eq!(prepared.headers[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_should_let_options_override_payload_headers() {
        let config = StorageConfig::default();
        let options = PutObjectOptions::new()
            .header("Content-Type", "text/plain")
            .acl(CannedAcl::PublicRead)
            .header("x-custom-trace", "abc");
        let prepared = prepare_put(&config, "b", "k", json_payload(b"{}"), &options)
            .expect("prepare");

        assert_eq!(prepared.headers[header::CONTENT_TYPE], "text/plain");
        assert_eq!(prepared.headers.get_all(header::CONTENT_TYPE).iter().count(), 1);
        assert_eq!(prepared.headers["x-amz-acl"], "public-read");
        assert_eq!(prepared.headers["x-custom-trace"], "abc");
        assert_eq!(prepared.headers[header::CONTENT_LENGTH], "2");
    }

    #[test]
    fn test_should_pass_unknown_acl_through() {
        let options = PutObjectOptions::new().header("x-amz-acl", "bucket-owner-full-control");
        let prepared = prepare_put(
            &StorageConfig::default(),
            "b",
            "k",
            json_payload(b""),
            &options,
        )
        .expect("prepare");
        assert_eq!(prepared.headers["x-amz-acl"], "bucket-owner-full-control");
    }

    #[test]
    fn test_should_reject_unrepresentable_header() {
        let options = PutObjectOptions::new().header("x-amz-meta-note", "line\nbreak");
        let err = prepare_put(
            &StorageConfig::default(),
            "b",
            "k",
            json_payload(b""),
            &options,
        )
        .expect_err("newline in value");
        assert!(matches!(err, StorageError::InvalidHeader { ref name, .. } if name == "x-amz-meta-note"));
    }

    #[test]
    fn test_should_build_parseable_url_for_ipv6_host() {
        let config = StorageConfig::builder()
            .scheme("http".to_owned())
            .host("::1".to_owned())
            .port(43571)
            .virtual_hosting(false)
            .build();
        let url = object_url(&config, "b", "k");
        assert_eq!(url, "http://[::1]:43571/b/k");

        let parsed = reqwest::Url::parse(&url).expect("valid url");
        assert_eq!(parsed.host_str(), Some("[::1]"));
        assert_eq!(parsed.port(), Some(43571));
        assert_eq!(parsed.path(), "/b/k");
    }

    #[test]
    fn test_should_escape_key_in_url() {
        let config = StorageConfig::builder()
            .scheme("http".to_owned())
            .host("s3.test".to_owned())
            .port(8080)
            .build();
        assert_eq!(
            object_url(&config, "b", "dir/über file+1.txt"),
            "http://b.s3.test:8080/dir/%C3%BCber%20file%2B1.txt"
        );
    }
}
