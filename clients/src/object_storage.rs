//! REST client for the hosted object storage service.

use crate::config::StorageConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use roblesmun_core::environment::ObjectStorage;
use roblesmun_core::error::StorageError;
use serde::Deserialize;

/// Object storage client over the hosted REST API.
///
/// Uploads land under one bucket; the service answers with the public URL of
/// the stored object.
#[derive(Clone)]
pub struct RestObjectStorage {
    client: Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

#[derive(Deserialize)]
struct StoredObject {
    url: String,
}

impl RestObjectStorage {
    /// Create a client from configuration.
    #[must_use]
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait]
impl ObjectStorage for RestObjectStorage {
    async fn upload(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let response = self
            .client
            .post(format!(
                "{}/buckets/{}/objects/{filename}",
                self.base_url, self.bucket
            ))
            .bearer_auth(&self.api_key)
            .header("content-type", content_type.to_string())
            .body(bytes)
            .send()
            .await
            .map_err(|e| StorageError::RequestFailed(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let stored: StoredObject = response
                    .json()
                    .await
                    .map_err(|e| StorageError::RequestFailed(e.to_string()))?;
                tracing::debug!(filename, url = %stored.url, "object uploaded");
                Ok(stored.url)
            }
            StatusCode::PAYLOAD_TOO_LARGE => Err(StorageError::InvalidObject {
                reason: "object exceeds the service size limit".to_string(),
            }),
            StatusCode::UNSUPPORTED_MEDIA_TYPE => Err(StorageError::InvalidObject {
                reason: format!("content type {content_type} rejected"),
            }),
            status => {
                let message = response.text().await.unwrap_or_default();
                Err(StorageError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
