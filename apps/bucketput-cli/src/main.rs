//! bucketput - put one file into an S3-compatible bucket.
//!
//! # Usage
//!
//! ```text
//! bucketput photos 2024/cat.jpg ./cat.jpg --acl public-read
//! BUCKETPUT_MOCK=1 bucketput photos cat.jpg ./cat.jpg
//! ```
//!
//! The ETag of the stored object is printed on success.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BUCKETPUT_MOCK` | `false` | Use the in-memory store |
//! | `S3_HOST` | `s3.amazonaws.com` | Service host |
//! | `S3_SCHEME` | `https` | URL scheme |
//! | `S3_PORT` | *(unset)* | Explicit port |
//! | `S3_VIRTUAL_HOSTING` | `true` | `{bucket}.{host}` addressing |
//! | `S3_REQUEST_TIMEOUT` | *(unset)* | Request timeout in seconds |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod args;

use anyhow::{Context, Result};
use bucketput::{ObjectStorage, Payload, StorageBackend, StorageConfig};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::args::Args;

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
/// Logs go to stderr so stdout carries only the ETag.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Merge command-line switches into the environment configuration.
///
/// With `--mock` the target bucket is created in the in-memory store so a
/// single invocation can succeed.
fn resolve_config(mut config: StorageConfig, args: &Args) -> StorageConfig {
    if args.mock {
        config.mock = true;
    }
    if config.mock && !config.mock_buckets.contains(&args.bucket) {
        config.mock_buckets.push(args.bucket.clone());
    }
    config
}

async fn run(args: Args, config: StorageConfig) -> Result<String> {
    let storage = StorageBackend::from_config(config).context("failed to build storage backend")?;
    let options = args.options();
    debug!(options = options.len(), mock = storage.is_mock(), "prepared put");

    let resp = storage
        .put_object(&args.bucket, &args.key, Payload::File(args.file.clone()), options)
        .await
        .with_context(|| {
            format!(
                "failed to put {} into {}/{}",
                args.file.display(),
                args.bucket,
                args.key
            )
        })?;

    let etag = resp.etag().unwrap_or_default().to_owned();
    info!(bucket = %args.bucket, key = %args.key, etag = %etag, "object stored");
    Ok(etag)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = resolve_config(StorageConfig::from_env(), &args);
    init_tracing(&config.log_level)?;

    let etag = run(args, config).await?;
    println!("{etag}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn parse_args(extra: &[&str]) -> Args {
        let mut argv = vec!["bucketput"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).expect("parse")
    }

    #[test]
    fn test_should_add_target_bucket_in_mock_mode() {
        let config = resolve_config(
            StorageConfig::default(),
            &parse_args(&["photos", "k", "f", "--mock"]),
        );
        assert!(config.mock);
        assert_eq!(config.mock_buckets, vec!["photos"]);
    }

    #[test]
    fn test_should_leave_live_config_untouched() {
        let config = resolve_config(StorageConfig::default(), &parse_args(&["photos", "k", "f"]));
        assert!(!config.mock);
        assert!(config.mock_buckets.is_empty());
    }

    #[tokio::test]
    async fn test_should_print_etag_of_uploaded_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(b"hello").expect("write");
        let path = file.path().to_string_lossy().into_owned();

        let args = parse_args(&["photos", "greeting", path.as_str(), "--mock"]);
        let config = resolve_config(StorageConfig::default(), &args);
        let etag = run(args, config).await.expect("run");
        assert_eq!(etag, "\"5d41402abc4b2a76b9719d911017c592\"");
    }

    #[tokio::test]
    async fn test_should_fail_with_context_on_bad_acl() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(b"x").expect("write");
        let path = file.path().to_string_lossy().into_owned();

        let args = parse_args(&["photos", "k", path.as_str(), "--mock", "--acl", "everyone"]);
        let config = resolve_config(StorageConfig::default(), &args);
        let err = run(args, config).await.expect_err("bad acl");
        assert!(format!("{err:#}").contains("Invalid canned ACL: everyone"));
    }
}
