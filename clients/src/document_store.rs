//! REST client for the hosted document database.
//!
//! Collections are addressed as `{base}/collections/{name}/documents`;
//! updates merge a JSON patch into one document, adds append a new document
//! and return its store-assigned id.

use crate::config::DocumentStoreConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use roblesmun_core::environment::DocumentStore;
use roblesmun_core::error::StoreError;
use serde::Deserialize;

/// Document store client over the hosted REST API.
#[derive(Clone)]
pub struct RestDocumentStore {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct CreatedDocument {
    id: String,
}

impl RestDocumentStore {
    /// Create a client from configuration.
    #[must_use]
    pub fn new(config: &DocumentStoreConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StoreError::PermissionDenied),
            status => {
                let message = response.text().await.unwrap_or_default();
                Err(StoreError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(format!(
                "{}/collections/{collection}/documents/{id}",
                self.base_url
            ))
            .bearer_auth(&self.api_key)
            .json(&patch)
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed(e.to_string()))?;

        Self::check_status(response).await?;
        tracing::debug!(collection, id, "document updated");
        Ok(())
    }

    async fn add(&self, collection: &str, record: serde_json::Value) -> Result<String, StoreError> {
        let response = self
            .client
            .post(format!("{}/collections/{collection}/documents", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&record)
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;
        let created: CreatedDocument = response
            .json()
            .await
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        tracing::debug!(collection, id = %created.id, "document added");
        Ok(created.id)
    }
}
