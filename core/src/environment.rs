//! Collaborator traits for the assignment workflow.
//!
//! All external dependencies are abstracted behind traits and injected into
//! the processor, so production clients and test fakes are interchangeable
//! and the best-effort failure semantics stay explicit at call sites.

use crate::error::{MailError, StorageError, StoreError};
use crate::types::{Registration, SeatLabel};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Clock trait - abstracts time operations for testability.
pub trait Clock: Send + Sync {
    /// Get the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Keyed collection access to the hosted document database.
///
/// Collections are named; records are JSON documents. Writes are
/// idempotent-by-overwrite; there is no client-side locking or versioning.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Merge `patch` into the document `id` in `collection`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on any transport or permission problem.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<(), StoreError>;

    /// Append a new document to `collection`, returning the store-assigned
    /// id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on any transport or permission problem.
    async fn add(&self, collection: &str, record: serde_json::Value) -> Result<String, StoreError>;
}

/// Binary upload to the hosted object storage service.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload `bytes` under `filename`, returning the public URL.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on invalid type/size or transport failure.
    /// The assignment flow treats this as non-fatal.
    async fn upload(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;
}

/// Template-based assignment notification delivery.
///
/// Abstraction over email services (SMTP relays, hosted email APIs).
#[async_trait]
pub trait AssignmentMailer: Send + Sync {
    /// Whether a transport is configured. When false, the workflow skips the
    /// notification step entirely.
    fn is_configured(&self) -> bool;

    /// Send the assignment notification for `registration`.
    ///
    /// The registration passed here is the *updated* view, with the
    /// assignment record already applied.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] if the recipient address is empty or the
    /// transport rejects the send.
    async fn send_assignment(
        &self,
        registration: &Registration,
        assigned: &[SeatLabel],
        notes: &str,
    ) -> Result<bool, MailError>;
}

/// Renders the assignment summary document.
///
/// Pure and synchronous; no failure path is modeled. The workflow guarantees
/// `assigned` has been validated before this is invoked.
pub trait PdfRenderer: Send + Sync {
    /// Produce the binary document for `registration` and its assigned
    /// seats.
    fn render(&self, registration: &Registration, assigned: &[SeatLabel]) -> Vec<u8>;
}
