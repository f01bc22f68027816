//! Mock implementations of the collaborator traits.
//!
//! In-memory fakes for testing only: each records its calls and can be
//! toggled to fail, so tests can assert both the happy path and the
//! best-effort degradation paths.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use roblesmun_core::environment::{
    AssignmentMailer, Clock, DocumentStore, ObjectStorage, PdfRenderer,
};
use roblesmun_core::error::{MailError, StorageError, StoreError};
use roblesmun_core::types::{Registration, SeatLabel};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Fixed clock for deterministic tests. Always returns the same time.
#[derive(Debug, Clone)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time.
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Create a default fixed clock for tests (2026-02-14 09:00:00 UTC).
///
/// # Panics
///
/// Panics if the hardcoded timestamp fails to parse, which should never
/// happen in practice.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_clock() -> FixedClock {
    FixedClock::new(
        DateTime::parse_from_rfc3339("2026-02-14T09:00:00Z")
            .expect("hardcoded timestamp should always parse")
            .with_timezone(&Utc),
    )
}

/// One recorded `update` call.
#[derive(Clone, Debug)]
pub struct RecordedUpdate {
    /// Collection name.
    pub collection: String,
    /// Document id.
    pub id: String,
    /// The merged patch.
    pub patch: serde_json::Value,
}

/// One recorded `add` call.
#[derive(Clone, Debug)]
pub struct RecordedAdd {
    /// Collection name.
    pub collection: String,
    /// The appended record.
    pub record: serde_json::Value,
}

/// In-memory document store.
///
/// Records every write and can be toggled to fail updates or adds.
///
/// **WARNING**: Do NOT use in production. This is for testing only!
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    updates: Arc<Mutex<Vec<RecordedUpdate>>>,
    adds: Arc<Mutex<Vec<RecordedAdd>>>,
    next_id: Arc<AtomicUsize>,
    fail_updates: Arc<Mutex<bool>>,
    fail_adds: Arc<Mutex<bool>>,
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `update` calls fail.
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn fail_updates(&self) {
        *self.fail_updates.lock().unwrap() = true;
    }

    /// Make subsequent `add` calls fail.
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn fail_adds(&self) {
        *self.fail_adds.lock().unwrap() = true;
    }

    /// All recorded updates.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn updates(&self) -> Vec<RecordedUpdate> {
        self.updates.lock().unwrap().clone()
    }

    /// Number of recorded updates.
    #[must_use]
    pub fn update_count(&self) -> usize {
        self.updates().len()
    }

    /// All recorded adds to `collection`.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn added_to(&self, collection: &str) -> Vec<serde_json::Value> {
        self.adds
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.collection == collection)
            .map(|a| a.record.clone())
            .collect()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<(), StoreError> {
        if *self.fail_updates.lock().unwrap() {
            return Err(StoreError::Api {
                status: 503,
                message: "update failure injected by test".to_string(),
            });
        }
        self.updates.lock().unwrap().push(RecordedUpdate {
            collection: collection.to_string(),
            id: id.to_string(),
            patch,
        });
        Ok(())
    }

    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    async fn add(&self, collection: &str, record: serde_json::Value) -> Result<String, StoreError> {
        if *self.fail_adds.lock().unwrap() {
            return Err(StoreError::Api {
                status: 503,
                message: "add failure injected by test".to_string(),
            });
        }
        self.adds.lock().unwrap().push(RecordedAdd {
            collection: collection.to_string(),
            record,
        });
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("doc-{n}"))
    }
}

/// One recorded upload.
#[derive(Clone, Debug)]
pub struct RecordedUpload {
    /// Object filename.
    pub filename: String,
    /// Uploaded byte count.
    pub size: usize,
    /// Declared content type.
    pub content_type: String,
}

/// Object storage fake that either serves a public URL or fails every
/// upload.
#[derive(Clone)]
pub struct StubObjectStorage {
    base_url: String,
    fail: bool,
    uploads: Arc<Mutex<Vec<RecordedUpload>>>,
}

impl StubObjectStorage {
    /// A storage fake whose uploads succeed with URLs under `base_url`.
    #[must_use]
    pub fn succeeding(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            fail: false,
            uploads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A storage fake whose uploads always fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            base_url: String::new(),
            fail: true,
            uploads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All recorded uploads.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }

    /// Number of recorded uploads, attempted or not.
    #[must_use]
    pub fn upload_count(&self) -> usize {
        self.uploads().len()
    }
}

#[async_trait]
impl ObjectStorage for StubObjectStorage {
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    async fn upload(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.uploads.lock().unwrap().push(RecordedUpload {
            filename: filename.to_string(),
            size: bytes.len(),
            content_type: content_type.to_string(),
        });
        if self.fail {
            return Err(StorageError::Api {
                status: 503,
                message: "upload failure injected by test".to_string(),
            });
        }
        Ok(format!("{}/{filename}", self.base_url))
    }
}

/// One recorded notification.
#[derive(Clone, Debug)]
pub struct SentNotification {
    /// Recipient address.
    pub to: String,
    /// Assigned seats included in the message.
    pub assigned: Vec<SeatLabel>,
    /// Notes included in the message.
    pub notes: String,
    /// Status carried by the registration view the mailer saw.
    pub status: roblesmun_core::types::RegistrationStatus,
}

/// Mailer fake that records sends and can present itself as unconfigured or
/// failing.
#[derive(Clone)]
pub struct RecordingMailer {
    configured: bool,
    fail: bool,
    sent: Arc<Mutex<Vec<SentNotification>>>,
}

impl RecordingMailer {
    /// A configured mailer whose sends succeed.
    #[must_use]
    pub fn configured() -> Self {
        Self {
            configured: true,
            fail: false,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A mailer that reports itself as not configured.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            fail: false,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A configured mailer whose sends fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            configured: true,
            fail: true,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All successfully recorded notifications.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of successfully recorded notifications.
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.sent().len()
    }
}

#[async_trait]
impl AssignmentMailer for RecordingMailer {
    fn is_configured(&self) -> bool {
        self.configured
    }

    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    async fn send_assignment(
        &self,
        registration: &Registration,
        assigned: &[SeatLabel],
        notes: &str,
    ) -> Result<bool, MailError> {
        if !self.configured {
            return Err(MailError::NotConfigured);
        }
        if registration.email.is_empty() {
            return Err(MailError::EmptyRecipient);
        }
        if self.fail {
            return Err(MailError::Transport(
                "send failure injected by test".to_string(),
            ));
        }
        self.sent.lock().unwrap().push(SentNotification {
            to: registration.email.clone(),
            assigned: assigned.to_vec(),
            notes: notes.to_string(),
            status: registration.status,
        });
        Ok(true)
    }
}

/// Renderer fake returning a fixed byte blob.
#[derive(Clone)]
pub struct StaticPdfRenderer {
    bytes: Vec<u8>,
}

impl StaticPdfRenderer {
    /// A renderer returning the given bytes for every call.
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl Default for StaticPdfRenderer {
    fn default() -> Self {
        Self::new(b"%PDF-stub".to_vec())
    }
}

impl PdfRenderer for StaticPdfRenderer {
    fn render(&self, _registration: &Registration, _assigned: &[SeatLabel]) -> Vec<u8> {
        self.bytes.clone()
    }
}
