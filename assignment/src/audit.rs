//! Best-effort audit trail.
//!
//! Entries are appended to a dedicated collection and never read back by
//! this crate. A failed write is logged and swallowed: the audit trail is
//! telemetry, not a durability guarantee.

use roblesmun_core::environment::DocumentStore;
use roblesmun_core::outcome::StepOutcome;
use roblesmun_core::types::AuditLogEntry;
use std::sync::Arc;

/// Collection holding append-only audit entries.
pub const AUDIT_LOG_COLLECTION: &str = "audit_log";

/// Append-only writer for [`AuditLogEntry`] records.
#[derive(Clone)]
pub struct AuditTrail {
    store: Arc<dyn DocumentStore>,
}

impl AuditTrail {
    /// Create a trail writing through the given store.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Append one entry. Failures are logged and reported as
    /// [`StepOutcome::FailedNonFatal`], never escalated.
    pub async fn record(&self, entry: AuditLogEntry) -> StepOutcome {
        let registration_id = entry.registration_id.clone();
        let action = entry.action;

        let value = match serde_json::to_value(&entry) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(
                    registration_id = %registration_id,
                    action = %action,
                    %error,
                    "audit entry could not be serialized; entry dropped"
                );
                return StepOutcome::FailedNonFatal;
            }
        };

        match self.store.add(AUDIT_LOG_COLLECTION, value).await {
            Ok(entry_id) => {
                tracing::debug!(
                    registration_id = %registration_id,
                    action = %action,
                    entry_id = %entry_id,
                    "audit entry recorded"
                );
                StepOutcome::Succeeded
            }
            Err(error) => {
                tracing::warn!(
                    registration_id = %registration_id,
                    action = %action,
                    %error,
                    "audit-log write failed; entry dropped"
                );
                StepOutcome::FailedNonFatal
            }
        }
    }
}
