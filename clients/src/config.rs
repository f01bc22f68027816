//! Configuration management for the back-office clients.
//!
//! Loads configuration from environment variables with sensible defaults.
//! The SMTP section is optional: when absent, the mailer reports itself as
//! not configured and the workflow skips notifications.

use serde::{Deserialize, Serialize};
use std::env;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Hosted document database.
    pub document_store: DocumentStoreConfig,
    /// Hosted object storage for assignment PDFs.
    pub storage: StorageConfig,
    /// SMTP transport, present only when `SMTP_SERVER` is set.
    pub smtp: Option<SmtpConfig>,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

/// Document database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStoreConfig {
    /// Base URL of the document API.
    pub base_url: String,
    /// Bearer token for the document API.
    pub api_key: String,
}

/// Object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base URL of the storage API.
    pub base_url: String,
    /// Bearer token for the storage API.
    pub api_key: String,
    /// Bucket holding assignment documents.
    pub bucket: String,
}

/// SMTP configuration for the assignment mailer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// SMTP server address.
    pub server: String,
    /// SMTP server port.
    pub port: u16,
    /// SMTP authentication username.
    pub username: String,
    /// SMTP authentication password.
    pub password: String,
    /// Sender email address.
    pub from_email: String,
    /// Sender display name.
    pub from_name: String,
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            document_store: DocumentStoreConfig {
                base_url: env::var("DOCUMENT_STORE_URL")
                    .unwrap_or_else(|_| "http://localhost:8085/v1".to_string()),
                api_key: env::var("DOCUMENT_STORE_API_KEY").unwrap_or_default(),
            },
            storage: StorageConfig {
                base_url: env::var("STORAGE_URL")
                    .unwrap_or_else(|_| "http://localhost:8086/storage/v1".to_string()),
                api_key: env::var("STORAGE_API_KEY").unwrap_or_default(),
                bucket: env::var("STORAGE_BUCKET")
                    .unwrap_or_else(|_| "assignments".to_string()),
            },
            smtp: env::var("SMTP_SERVER").ok().map(|server| SmtpConfig {
                server,
                port: env::var("SMTP_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(587),
                username: env::var("SMTP_USERNAME").unwrap_or_default(),
                password: env::var("SMTP_PASSWORD").unwrap_or_default(),
                from_email: env::var("SMTP_FROM_EMAIL")
                    .unwrap_or_else(|_| "registro@roblesmun.example".to_string()),
                from_name: env::var("SMTP_FROM_NAME")
                    .unwrap_or_else(|_| "ROBLESMUN Registration".to_string()),
            }),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}
