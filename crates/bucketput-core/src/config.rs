//! Storage configuration.
//!
//! Provides [`StorageConfig`], which selects between the live and the
//! in-memory implementation and describes the endpoint the live client
//! talks to. Values are loaded from environment variables.

use std::net::{IpAddr, Ipv6Addr};

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Storage configuration.
///
/// # Examples
///
/// ```
/// use bucketput_core::config::StorageConfig;
///
/// let config = StorageConfig::default();
/// assert!(!config.mock);
/// assert_eq!(config.host, "s3.amazonaws.com");
/// assert!(config.virtual_hosting);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    /// Use the in-memory simulation instead of the live service.
    #[builder(default = false)]
    pub mock: bool,

    /// Service host; buckets are addressed as `{bucket}.{host}`.
    #[builder(default = String::from("s3.amazonaws.com"))]
    pub host: String,

    /// URL scheme (`https` or `http`).
    #[builder(default = String::from("https"))]
    pub scheme: String,

    /// Explicit port, if the service does not listen on the scheme default.
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Virtual-hosted-style addressing. When `false` the bucket becomes the
    /// first path segment instead.
    #[builder(default = true)]
    pub virtual_hosting: bool,

    /// Region of the service endpoint.
    #[builder(default = String::from("us-east-1"))]
    pub region: String,

    /// Overall per-request timeout in seconds.
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Buckets pre-created in the in-memory store.
    #[builder(default)]
    #[serde(default)]
    pub mock_buckets: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            mock: false,
            host: String::from("s3.amazonaws.com"),
            scheme: String::from("https"),
            port: None,
            virtual_hosting: true,
            region: String::from("us-east-1"),
            request_timeout_secs: None,
            log_level: String::from("info"),
            mock_buckets: Vec::new(),
        }
    }
}

impl StorageConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `BUCKETPUT_MOCK` | `false` |
    /// | `S3_HOST` | `s3.amazonaws.com` |
    /// | `S3_SCHEME` | `https` |
    /// | `S3_PORT` | *(unset)* |
    /// | `S3_VIRTUAL_HOSTING` | `true` |
    /// | `DEFAULT_REGION` | `us-east-1` |
    /// | `S3_REQUEST_TIMEOUT` | *(unset)* |
    /// | `LOG_LEVEL` | `info` |
    /// | `MOCK_BUCKETS` | *(empty, comma separated)* |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("BUCKETPUT_MOCK") {
            config.mock = parse_bool(&v);
        }
        if let Ok(v) = std::env::var("S3_HOST") {
            config.host = v;
        }
        if let Ok(v) = std::env::var("S3_SCHEME") {
            config.scheme = v;
        }
        if let Ok(v) = std::env::var("S3_PORT") {
            if let Ok(n) = v.parse::<u16>() {
                config.port = Some(n);
            }
        }
        if let Ok(v) = std::env::var("S3_VIRTUAL_HOSTING") {
            config.virtual_hosting = parse_bool(&v);
        }
        if let Ok(v) = std::env::var("DEFAULT_REGION") {
            config.region = v;
        }
        if let Ok(v) = std::env::var("S3_REQUEST_TIMEOUT") {
            if let Ok(n) = v.parse::<u64>() {
                config.request_timeout_secs = Some(n);
            }
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = std::env::var("MOCK_BUCKETS") {
            config.mock_buckets = parse_list(&v);
        }

        config
    }

    /// Whether requests address the bucket through the host name.
    ///
    /// IP literal hosts cannot carry a bucket label, so they always use
    /// path-style addressing.
    #[must_use]
    pub fn virtual_hosted(&self) -> bool {
        self.virtual_hosting && unbracketed(&self.host).parse::<IpAddr>().is_err()
    }

    /// The `host[:port]` authority for `bucket`, honoring the addressing style.
    ///
    /// IPv6 hosts are bracketed.
    ///
    /// # Examples
    ///
    /// ```
    /// use bucketput_core::StorageConfig;
    ///
    /// let config = StorageConfig::builder().host("::1".to_owned()).port(9000).build();
    /// assert_eq!(config.authority_for("photos"), "[::1]:9000");
    /// ```
    #[must_use]
    pub fn authority_for(&self, bucket: &str) -> String {
        let bare = unbracketed(&self.host);
        let host = if self.virtual_hosted() {
            format!("{bucket}.{}", self.host)
        } else if bare.parse::<Ipv6Addr>().is_ok() {
            format!("[{bare}]")
        } else {
            self.host.clone()
        };
        match self.port {
            Some(port) => format!("{host}:{port}"),
            None => host,
        }
    }
}

/// Strip the brackets of an already bracketed IPv6 literal.
fn unbracketed(host: &str) -> &str {
    host.strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host)
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

/// Split a comma-separated list, dropping blanks.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_create_default_config() {
        let config = StorageConfig::default();
        assert!(!config.mock);
        assert_eq!(config.host, "s3.amazonaws.com");
        assert_eq!(config.scheme, "https");
        assert_eq!(config.port, None);
        assert!(config.virtual_hosting);
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.request_timeout_secs, None);
        assert_eq!(config.log_level, "info");
        assert!(config.mock_buckets.is_empty());
    }

    #[test]
    fn test_should_match_builder_defaults() {
        assert_eq!(StorageConfig::builder().build(), StorageConfig::default());
    }

    #[test]
    fn test_should_build_with_typed_builder() {
        let config = StorageConfig::builder()
            .mock(true)
            .host("storage.local".into())
            .scheme("http".into())
            .port(9000)
            .virtual_hosting(false)
            .region("eu-west-1".into())
            .request_timeout_secs(30)
            .log_level("debug".into())
            .mock_buckets(vec!["a".into(), "b".into()])
            .build();

        assert!(config.mock);
        assert_eq!(config.host, "storage.local");
        assert_eq!(config.scheme, "http");
        assert_eq!(config.port, Some(9000));
        assert!(!config.virtual_hosting);
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.request_timeout_secs, Some(30));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.mock_buckets, vec!["a", "b"]);
    }

    #[test]
    fn test_should_load_from_env() {
        let config = StorageConfig::from_env();
        assert!(!config.host.is_empty());
    }

    #[test]
    fn test_should_serialize_to_camel_case_json() {
        let config = StorageConfig::default();
        let json = serde_json::to_string(&config).expect("test serialization");
        assert!(json.contains("virtualHosting"));
        assert!(json.contains("mockBuckets"));
        assert!(!json.contains("requestTimeoutSecs"));
    }

    #[test]
    fn test_should_build_virtual_hosted_authority() {
        let config = StorageConfig::default();
        assert_eq!(config.authority_for("photos"), "photos.s3.amazonaws.com");

        let config = StorageConfig::builder()
            .host("localhost".into())
            .port(4566)
            .build();
        assert_eq!(config.authority_for("photos"), "photos.localhost:4566");
    }

    #[test]
    fn test_should_build_path_style_authority() {
        let config = StorageConfig::builder()
            .host("localhost".into())
            .port(4566)
            .virtual_hosting(false)
            .build();
        assert_eq!(config.authority_for("photos"), "localhost:4566");
    }

    #[test]
    fn test_should_bracket_ipv6_hosts() {
        let config = StorageConfig::builder()
            .host("::1".into())
            .port(43571)
            .virtual_hosting(false)
            .build();
        assert_eq!(config.authority_for("b"), "[::1]:43571");

        let config = StorageConfig::builder()
            .host("[fe80::1]".into())
            .virtual_hosting(false)
            .build();
        assert_eq!(config.authority_for("b"), "[fe80::1]");
    }

    #[test]
    fn test_should_use_path_style_for_ip_hosts() {
        let config = StorageConfig::builder()
            .host("::1".into())
            .port(9000)
            .build();
        assert!(!config.virtual_hosted());
        assert_eq!(config.authority_for("photos"), "[::1]:9000");

        let config = StorageConfig::builder().host("127.0.0.1".into()).build();
        assert!(!config.virtual_hosted());
        assert_eq!(config.authority_for("photos"), "127.0.0.1");

        assert!(StorageConfig::default().virtual_hosted());
    }

    #[test]
    fn test_should_parse_bool_values() {
        assert!(parse_bool("1"));
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn test_should_parse_bucket_list() {
        assert_eq!(parse_list("a, b,,c "), vec!["a", "b", "c"]);
        assert!(parse_list("").is_empty());
    }
}
