//! Live object store client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bucketput_core::{
    ObjectStorage, Payload, PutObjectOptions, PutObjectResponse, StorageConfig, StorageError,
};
use http::StatusCode;
use tracing::{debug, warn};

use crate::error_body::ErrorBody;
use crate::request::{PreparedPut, prepare_put};

/// Client that puts objects to an S3-compatible endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct LiveS3 {
    client: reqwest::Client,
    config: Arc<StorageConfig>,
}

impl LiveS3 {
    /// Create a client, applying the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| StorageError::Transport(Box::new(e)))?;
        Ok(Self::with_http_client(config, client))
    }

    /// Use an already configured HTTP client. The config's timeout is not
    /// applied to it.
    #[must_use]
    pub fn with_http_client(config: StorageConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Send a prepared put and interpret the response.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transport`] if the request cannot be delivered
    /// and [`StorageError::UnexpectedStatus`] for any status other than 200.
    pub async fn send(&self, prepared: PreparedPut) -> Result<PutObjectResponse, StorageError> {
        debug!(
            method = %prepared.method,
            url = %prepared.url,
            size = prepared.body.len(),
            idempotent = prepared.idempotent,
            "sending put_object"
        );

        let response = self
            .client
            .request(prepared.method, &prepared.url)
            .headers(prepared.headers)
            .body(prepared.body)
            .send()
            .await
            .map_err(|e| StorageError::Transport(Box::new(e)))?;

        let status = response.status();
        let headers = response.headers().clone();

        if status != StorageError::EXPECTED_STATUS {
            // A body that cannot be read is treated like one without an error document.
            let body = response.bytes().await.unwrap_or_default();
            let parsed = ErrorBody::parse(&body).unwrap_or_default();
            warn!(
                url = %prepared.url,
                %status,
                code = parsed.code.as_deref().unwrap_or("-"),
                request_id = parsed.request_id.as_deref().unwrap_or("-"),
                "put_object failed"
            );
            return Err(StorageError::UnexpectedStatus {
                expected: StorageError::EXPECTED_STATUS,
                status,
                code: parsed.code,
                message: parsed.message,
            });
        }

        let response = PutObjectResponse::new(StatusCode::OK, headers);
        if response.etag().is_none() {
            warn!(url = %prepared.url, "put_object succeeded without an ETag");
        }
        Ok(response)
    }
}

#[async_trait]
impl ObjectStorage for LiveS3 {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        payload: Payload,
        options: PutObjectOptions,
    ) -> Result<PutObjectResponse, StorageError> {
        let normalized = payload.normalize().await?;
        let prepared = prepare_put(&self.config, bucket, key, normalized, &options)?;
        self.send(prepared).await
    }
}
