//! Error types for the collaborator boundaries.

use thiserror::Error;

/// Errors from the hosted document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed before a response arrived.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The store rejected the credentials or the rules denied the write.
    #[error("Permission denied by the document store")]
    PermissionDenied,

    /// The store returned an error response.
    #[error("Store error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the store.
        message: String,
    },

    /// A record could not be serialized or a response could not be parsed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors from the hosted object storage service.
#[derive(Debug, Error)]
pub enum StorageError {
    /// HTTP request failed before a response arrived.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The service rejected the object itself (type or size).
    #[error("Invalid object: {reason}")]
    InvalidObject {
        /// Why the object was rejected.
        reason: String,
    },

    /// The service returned an error response.
    #[error("Storage error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the service.
        message: String,
    },
}

/// Errors from the email collaborator.
#[derive(Debug, Error)]
pub enum MailError {
    /// No transport is configured; sends are impossible.
    #[error("Email sender is not configured")]
    NotConfigured,

    /// The registration has no recipient address.
    #[error("Recipient email address is empty")]
    EmptyRecipient,

    /// The message could not be built (bad address, bad body).
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// The transport rejected the send.
    #[error("Transport error: {0}")]
    Transport(String),
}
