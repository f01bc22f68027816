//! # ROBLESMUN Clients
//!
//! Production implementations of the collaborator traits from
//! `roblesmun-core`: REST clients for the hosted document database and
//! object storage, SMTP/console mailers, and the summary renderer, plus the
//! env-based configuration that wires them.

pub mod config;
pub mod document_store;
pub mod mailer;
pub mod object_storage;
pub mod pdf;

pub use config::{Config, DocumentStoreConfig, SmtpConfig, StorageConfig};
pub use document_store::RestDocumentStore;
pub use mailer::{
    mailer_from_config, ConsoleAssignmentMailer, SmtpAssignmentMailer, UnconfiguredMailer,
};
pub use object_storage::RestObjectStorage;
pub use pdf::PlainTextRenderer;
