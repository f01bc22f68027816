//! Admin actions on registrations outside the assignment workflow.
//!
//! Rejection lives here, not in [`crate::processor`]: the processor only
//! ever moves a registration to `verified`, and the invariant holds because
//! rejection is a separate operation with its own audit tag.

use crate::audit::AuditTrail;
use crate::processor::REGISTRATIONS_COLLECTION;
use roblesmun_core::environment::{Clock, DocumentStore};
use roblesmun_core::error::StoreError;
use roblesmun_core::types::{AuditAction, AuditLogEntry, Registration, RegistrationStatus};
use std::sync::Arc;

/// Admin-side registration operations.
#[derive(Clone)]
pub struct RegistrationAdmin {
    store: Arc<dyn DocumentStore>,
    audit: AuditTrail,
    clock: Arc<dyn Clock>,
}

impl RegistrationAdmin {
    /// Create an admin handle over the given store and clock.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        let audit = AuditTrail::new(Arc::clone(&store));
        Self {
            store,
            audit,
            clock,
        }
    }

    /// Reject a registration with a reason.
    ///
    /// Persists the status change and writes a best-effort audit entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the status update cannot be persisted; the
    /// audit write is best-effort and never fails the operation.
    pub async fn reject(&self, registration: &Registration, reason: &str) -> Result<(), StoreError> {
        let now = self.clock.now();
        let patch = serde_json::json!({
            "status": RegistrationStatus::Rejected,
            "updated_at": now,
        });
        self.store
            .update(REGISTRATIONS_COLLECTION, registration.id.as_str(), patch)
            .await?;
        tracing::info!(
            registration_id = %registration.id,
            "registration rejected"
        );

        self.audit
            .record(AuditLogEntry::new(
                registration.id.clone(),
                AuditAction::RegistrationRejected,
                serde_json::json!({ "reason": reason }),
                now,
            ))
            .await;
        Ok(())
    }
}
