//! Object put handler.

use bucketput_core::options::{CONTENT_LENGTH, CONTENT_TYPE, X_AMZ_STORAGE_CLASS};
use bucketput_core::utils::format_http_date;
use bucketput_core::{
    CannedAcl, NormalizedPayload, PutObjectOptions, PutObjectResponse, StorageError,
};
use http::header::{self, HeaderMap, HeaderValue};
use http::StatusCode;
use tracing::debug;

use crate::checksums::compute_etag;
use crate::clock::Clock;
use crate::provider::MockS3;
use crate::state::{DEFAULT_CONTENT_TYPE, DEFAULT_STORAGE_CLASS, MockObject};

impl MockS3 {
    /// Store `payload` under `bucket`/`key` with an already resolved `acl`.
    ///
    /// Every check runs before the bucket is touched, so a failed put leaves
    /// both the object table and the ACL table as they were.
    pub(crate) fn handle_put_object(
        &self,
        bucket_name: &str,
        key: &str,
        acl: CannedAcl,
        payload: NormalizedPayload,
        options: &PutObjectOptions,
    ) -> Result<PutObjectResponse, StorageError> {
        let bucket = self.state().get_bucket(bucket_name)?;

        let size = match options.get(CONTENT_LENGTH) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| StorageError::InvalidHeader {
                    name: CONTENT_LENGTH.to_owned(),
                    reason: e.to_string(),
                })?,
            None => payload.content_length(),
        };

        let content_type = options
            .get(CONTENT_TYPE)
            .or_else(|| payload.content_type())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_owned();
        let content_type_value =
            HeaderValue::from_str(&content_type).map_err(|e| StorageError::InvalidHeader {
                name: CONTENT_TYPE.to_owned(),
                reason: e.to_string(),
            })?;

        let obj = MockObject {
            key: key.to_owned(),
            etag: compute_etag(&payload.body),
            body: payload.body,
            content_type,
            size,
            storage_class: options
                .get(X_AMZ_STORAGE_CLASS)
                .unwrap_or(DEFAULT_STORAGE_CLASS)
                .to_owned(),
            last_modified: self.clock().now(),
            headers: options.passthrough(),
        };

        let mut headers = HeaderMap::with_capacity(4);
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(obj.size));
        headers.insert(header::CONTENT_TYPE, content_type_value);
        headers.insert(header::ETAG, header_value(&obj.etag)?);
        headers.insert(
            header::LAST_MODIFIED,
            header_value(&format_http_date(&obj.last_modified))?,
        );

        debug!(
            bucket = %bucket_name,
            key = %key,
            size = obj.size,
            etag = %obj.etag,
            %acl,
            "put_object completed"
        );

        bucket.store(obj, acl);

        Ok(PutObjectResponse::new(StatusCode::OK, headers))
    }
}

/// Resolve the canned ACL option, defaulting to `private`.
pub(crate) fn parse_acl(options: &PutObjectOptions) -> Result<CannedAcl, StorageError> {
    options.acl_value().map_or(Ok(CannedAcl::default()), |raw| {
        raw.parse::<CannedAcl>()
            .map_err(|_| StorageError::InvalidAcl {
                value: raw.to_owned(),
            })
    })
}

fn header_value(value: &str) -> Result<HeaderValue, StorageError> {
    HeaderValue::from_str(value)
        .map_err(|e| StorageError::Internal(anyhow::anyhow!("invalid response header: {e}")))
}
