/// Object storage for uploaded images
///
/// `ObjectStore` is the single write the handler performs; `S3ObjectStore`
/// backs it with Amazon S3 (or any S3-compatible endpoint).
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;

use crate::config::S3Config;
use crate::error::{InfraError, Result};

/// Key-addressed blob storage the handler writes to
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `body` under `key`, overwriting any existing object
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> Result<()>;

    /// Public address of the object stored under `key`
    fn public_url(&self, key: &str) -> String;
}

/// Virtual-hosted S3 address, or `<base>/<key>` when a base URL is configured
pub fn public_url(config: &S3Config, key: &str) -> String {
    match &config.public_base_url {
        Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
        None => format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            config.bucket, config.region, key
        ),
    }
}

/// Build the S3 client for this function
///
/// In Lambda no keys are set and the SDK resolves the execution role. Static
/// keys and a custom endpoint exist for running against MinIO locally; a
/// custom endpoint also switches to path-style addressing.
pub async fn build_s3_client(config: &S3Config) -> Client {
    use aws_sdk_s3::config::Region;

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.region.clone()));
    if let Some(credentials) = static_credentials(config) {
        loader = loader.credentials_provider(credentials);
    }
    let shared = loader.load().await;

    let mut s3 = aws_sdk_s3::config::Builder::from(&shared);
    if let Some(endpoint) = &config.endpoint {
        s3 = s3.endpoint_url(endpoint).force_path_style(true);
    }

    Client::from_conf(s3.build())
}

fn static_credentials(config: &S3Config) -> Option<aws_sdk_s3::config::Credentials> {
    match (&config.access_key_id, &config.secret_access_key) {
        (Some(key), Some(secret)) => Some(aws_sdk_s3::config::Credentials::new(
            key,
            secret,
            None,
            None,
            "uploader-env",
        )),
        _ => None,
    }
}

/// S3-backed object store
pub struct S3ObjectStore {
    client: Client,
    config: S3Config,
}

impl S3ObjectStore {
    pub fn new(client: Client, config: S3Config) -> Self {
        Self { client, config }
    }

    pub async fn from_config(config: S3Config) -> Self {
        let client = build_s3_client(&config).await;
        Self::new(client, config)
    }

    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                let error_msg = aws_sdk_s3::error::DisplayErrorContext(&e).to_string();
                if error_msg.contains("403") || error_msg.contains("Forbidden") {
                    InfraError::Storage("S3 auth failed (403): Check AWS credentials".to_string())
                } else if error_msg.contains("NoSuchBucket") {
                    InfraError::Storage(format!("S3 bucket not found: {}", self.config.bucket))
                } else {
                    InfraError::Storage(format!("S3 upload failed: {}", error_msg))
                }
            })?;

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        public_url(&self.config, key)
    }
}
