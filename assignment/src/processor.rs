//! Seat-assignment orchestration.
//!
//! Coordinates the full assignment lifecycle for one registration:
//! validate, render the summary document, upload it, persist the assignment
//! record, notify, and audit. Each step's failure policy is explicit:
//! validation failures stop everything before any side effect, the
//! document-store write is the one escalated step, and the upload, email,
//! and audit steps are best-effort.

use crate::audit::AuditTrail;
use chrono::{DateTime, Utc};
use roblesmun_core::environment::{
    AssignmentMailer, Clock, DocumentStore, ObjectStorage, PdfRenderer,
};
use roblesmun_core::error::StoreError;
use roblesmun_core::format;
use roblesmun_core::outcome::{ProcessOutcome, ResendOutcome, SideEffects, StepOutcome};
use roblesmun_core::types::{
    AssignmentRecord, AuditAction, AuditLogEntry, Registration, RegistrationStatus, SeatLabel,
};
use roblesmun_core::validation::{validate_assignment, ValidationReport};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Collection holding registration documents.
pub const REGISTRATIONS_COLLECTION: &str = "registrations";

/// Internal failures escalated to the `process` boundary. Never crosses it:
/// the caller sees a generic message while the detail goes to the log and
/// the audit trail.
#[derive(Debug, Error)]
enum ProcessError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Injected collaborators for the assignment workflow.
#[derive(Clone)]
pub struct AssignmentEnvironment {
    /// Hosted document database.
    pub store: Arc<dyn DocumentStore>,
    /// Hosted object storage for the summary PDFs.
    pub storage: Arc<dyn ObjectStorage>,
    /// Notification delivery.
    pub mailer: Arc<dyn AssignmentMailer>,
    /// Summary document renderer.
    pub renderer: Arc<dyn PdfRenderer>,
    /// Clock for assignment timestamps.
    pub clock: Arc<dyn Clock>,
}

impl AssignmentEnvironment {
    /// Bundle the collaborators.
    #[must_use]
    pub fn new(
        store: Arc<dyn DocumentStore>,
        storage: Arc<dyn ObjectStorage>,
        mailer: Arc<dyn AssignmentMailer>,
        renderer: Arc<dyn PdfRenderer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            storage,
            mailer,
            renderer,
            clock,
        }
    }
}

/// Orchestrates seat assignment for registrations.
///
/// Concurrent `process` calls against the same registration are not
/// coordinated; the hosted store's overwrite semantics make the race
/// last-write-wins.
#[derive(Clone)]
pub struct AssignmentProcessor {
    env: AssignmentEnvironment,
    audit: AuditTrail,
}

/// The fields merged into the registration document on a successful
/// assignment.
#[derive(Serialize)]
struct RegistrationPatch<'a> {
    #[serde(flatten)]
    assignment: &'a AssignmentRecord,
    status: RegistrationStatus,
}

impl AssignmentProcessor {
    /// Create a processor over the given collaborators.
    #[must_use]
    pub fn new(env: AssignmentEnvironment) -> Self {
        let audit = AuditTrail::new(Arc::clone(&env.store));
        Self { env, audit }
    }

    /// Validate and persist a seat assignment for `registration`.
    ///
    /// Never returns a raw error for the documented paths: validation
    /// failures and internal faults are both encoded in the returned
    /// [`ProcessOutcome`]. A later call with a new proposal overwrites the
    /// previous assignment wholesale.
    pub async fn process(
        &self,
        registration: &Registration,
        proposed: &[SeatLabel],
        notes: &str,
    ) -> ProcessOutcome {
        let report = validate_assignment(registration, proposed);
        if !report.is_valid() {
            tracing::info!(
                registration_id = %registration.id,
                errors = report.errors.len(),
                "assignment proposal rejected by validation"
            );
            let message = format::rejection_message(&report);
            return ProcessOutcome {
                success: false,
                message,
                validation: report,
                email_sent: false,
            };
        }

        match self.confirm(registration, proposed, notes, &report).await {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::error!(
                    registration_id = %registration.id,
                    %error,
                    "assignment processing failed after validation"
                );
                self.audit
                    .record(AuditLogEntry::new(
                        registration.id.clone(),
                        AuditAction::AssignmentError,
                        serde_json::json!({
                            "error": error.to_string(),
                            "proposed_count": proposed.len(),
                        }),
                        self.env.clock.now(),
                    ))
                    .await;
                ProcessOutcome {
                    success: false,
                    message: format::INTERNAL_ERROR_MESSAGE.to_string(),
                    validation: report,
                    email_sent: false,
                }
            }
        }
    }

    /// Steps 2-8 of the workflow, entered only with a valid proposal.
    async fn confirm(
        &self,
        registration: &Registration,
        proposed: &[SeatLabel],
        notes: &str,
        report: &ValidationReport,
    ) -> Result<ProcessOutcome, ProcessError> {
        let mut effects = SideEffects::default();
        let now = self.env.clock.now();

        // Step 2: render the summary document.
        let pdf = self.env.renderer.render(registration, proposed);

        // Step 3: upload, non-fatal on failure.
        let filename = assignment_filename(&registration.institution, now);
        let pdf_url = match self
            .env
            .storage
            .upload(&filename, pdf, "application/pdf")
            .await
        {
            Ok(url) => {
                effects.pdf_upload = StepOutcome::Succeeded;
                url
            }
            Err(error) => {
                tracing::warn!(
                    registration_id = %registration.id,
                    %error,
                    "assignment PDF upload failed; continuing without a receipt URL"
                );
                effects.pdf_upload = StepOutcome::FailedNonFatal;
                String::new()
            }
        };

        // Step 4: the assignment record.
        let record = AssignmentRecord::new(
            proposed.to_vec(),
            notes,
            pdf_url,
            registration.seats,
            now,
        );

        // Step 5: persist. The one step whose failure is escalated.
        let patch = serde_json::to_value(RegistrationPatch {
            assignment: &record,
            status: RegistrationStatus::Verified,
        })?;
        self.env
            .store
            .update(REGISTRATIONS_COLLECTION, registration.id.as_str(), patch)
            .await?;
        tracing::info!(
            registration_id = %registration.id,
            assigned = record.assigned_seats.len(),
            requested = registration.seats,
            "assignment persisted"
        );

        // Step 6: best-effort notify with the updated registration view.
        if self.env.mailer.is_configured() {
            let updated = registration.clone().with_assignment(record.clone());
            effects.email = match self
                .env
                .mailer
                .send_assignment(&updated, &record.assigned_seats, notes)
                .await
            {
                Ok(true) => StepOutcome::Succeeded,
                Ok(false) => StepOutcome::FailedNonFatal,
                Err(error) => {
                    tracing::warn!(
                        registration_id = %registration.id,
                        %error,
                        "assignment notification failed; assignment already persisted"
                    );
                    StepOutcome::FailedNonFatal
                }
            };
        } else {
            effects.email = StepOutcome::SkippedNotConfigured;
        }

        // Step 7: audit, unconditionally.
        effects.audit = self
            .audit
            .record(AuditLogEntry::new(
                registration.id.clone(),
                AuditAction::AssignmentCreated,
                serde_json::json!({
                    "assigned_count": record.assigned_seats.len(),
                    "requested_count": registration.seats,
                    "email_sent": effects.email_sent(),
                    "warnings": report.warning_texts(),
                    "pdf_url": record.assignment_pdf_url,
                }),
                now,
            ))
            .await;

        // Step 8: compose the outcome message.
        let message = format::success_message(record.assigned_seats.len(), report, &effects);
        Ok(ProcessOutcome {
            success: true,
            message,
            validation: report.clone(),
            email_sent: effects.email_sent(),
        })
    }

    /// Re-send the assignment notification using the already-persisted
    /// seats and notes. Does not re-validate or re-render.
    pub async fn resend_assignment_pdf(&self, registration: &Registration) -> ResendOutcome {
        let Some(assignment) = registration
            .assignment
            .as_ref()
            .filter(|a| !a.assigned_seats.is_empty())
        else {
            return ResendOutcome {
                success: false,
                message: "No seats have been assigned to this registration yet.".to_string(),
            };
        };

        if !self.env.mailer.is_configured() {
            return ResendOutcome {
                success: false,
                message: "Email sender not configured; nothing was sent.".to_string(),
            };
        }

        match self
            .env
            .mailer
            .send_assignment(
                registration,
                &assignment.assigned_seats,
                &assignment.assignment_notes,
            )
            .await
        {
            Ok(true) => {
                self.audit
                    .record(AuditLogEntry::new(
                        registration.id.clone(),
                        AuditAction::PdfResent,
                        serde_json::json!({
                            "assigned_count": assignment.assigned_seats.len(),
                            "pdf_url": assignment.assignment_pdf_url,
                        }),
                        self.env.clock.now(),
                    ))
                    .await;
                ResendOutcome {
                    success: true,
                    message: format!(
                        "Assignment notification re-sent to {}.",
                        registration.email
                    ),
                }
            }
            Ok(false) => ResendOutcome {
                success: false,
                message: "The notification could not be re-sent.".to_string(),
            },
            Err(error) => {
                tracing::warn!(
                    registration_id = %registration.id,
                    %error,
                    "assignment notification re-send failed"
                );
                ResendOutcome {
                    success: false,
                    message: "The notification could not be re-sent.".to_string(),
                }
            }
        }
    }
}

/// Storage filename for an assignment document: sanitized institution name
/// plus a timestamp to avoid collisions.
#[must_use]
pub fn assignment_filename(institution: &str, now: DateTime<Utc>) -> String {
    let mut slug = String::with_capacity(institution.len());
    let mut last_dash = true;
    for c in institution.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    let slug = slug.trim_end_matches('-');
    let slug = if slug.is_empty() { "registration" } else { slug };
    format!("assignment-{slug}-{}.pdf", now.format("%Y%m%d%H%M%S"))
}
