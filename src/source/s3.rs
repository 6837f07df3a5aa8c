//! Amazon S3 object store

use super::ObjectStore;
use crate::error::EtlError;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use eyre::Result;

/// Object store backed by the AWS SDK S3 client
///
/// Credentials and region come from the default AWS provider chain
/// (environment, profile, instance metadata).
#[derive(Clone, Debug)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the default AWS configuration
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(Client::new(&config))
    }
}

impl ObjectStore for S3ObjectStore {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let unavailable = |reason: String| EtlError::SourceUnavailable {
            bucket: bucket.to_string(),
            key: key.to_string(),
            reason,
        };

        log::debug!("GetObject s3://{}/{}", bucket, key);
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| unavailable(DisplayErrorContext(&e).to_string()))?;

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| unavailable(format!("failed to read object body: {}", e)))?;

        Ok(body.into_bytes().to_vec())
    }
}
