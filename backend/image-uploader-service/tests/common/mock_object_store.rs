//! In-memory ObjectStore for integration tests
//!
//! Records every write so tests can assert on keys, payloads and content
//! types without talking to S3.

use async_trait::async_trait;
use bytes::Bytes;
use image_uploader_service::config::S3Config;
use image_uploader_service::services::storage::public_url;
use image_uploader_service::services::ObjectStore;
use image_uploader_service::InfraError;
use std::sync::{Arc, Mutex};

/// One recorded PutObject call
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub body: Bytes,
    pub content_type: String,
}

#[derive(Clone, Default)]
pub struct MockObjectStore {
    objects: Arc<Mutex<Vec<StoredObject>>>,
    fail_with: Option<String>,
    config: S3Config,
}

impl MockObjectStore {
    /// Store that accepts every write, using the default bucket/region for URLs
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose writes always fail
    pub fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            ..Self::default()
        }
    }

    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), InfraError> {
        if let Some(reason) = &self.fail_with {
            return Err(InfraError::Storage(reason.clone()));
        }

        self.objects.lock().unwrap().push(StoredObject {
            key: key.to_string(),
            body,
            content_type: content_type.to_string(),
        });
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        public_url(&self.config, key)
    }
}
