//! Outcome types returned by the assignment workflow.
//!
//! Best-effort side effects (PDF upload, email, audit write) each record a
//! three-valued [`StepOutcome`] in a [`SideEffects`] accumulator; the final
//! composed message derives from the accumulator rather than ad hoc flags.

use crate::validation::ValidationReport;

/// What happened to one best-effort step of the workflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step ran and succeeded.
    Succeeded,
    /// The step ran and failed; the workflow continued.
    FailedNonFatal,
    /// The step was skipped because its collaborator is not configured.
    SkippedNotConfigured,
}

impl StepOutcome {
    /// Whether the step succeeded.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Accumulated outcomes of the workflow's best-effort steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SideEffects {
    /// PDF upload to object storage.
    pub pdf_upload: StepOutcome,
    /// Assignment notification email.
    pub email: StepOutcome,
    /// Audit-log write.
    pub audit: StepOutcome,
}

impl SideEffects {
    /// Whether the notification email went out.
    #[must_use]
    pub const fn email_sent(&self) -> bool {
        self.email.succeeded()
    }
}

impl Default for SideEffects {
    fn default() -> Self {
        Self {
            pdf_upload: StepOutcome::Succeeded,
            email: StepOutcome::SkippedNotConfigured,
            audit: StepOutcome::Succeeded,
        }
    }
}

/// Consolidated result of one `process` call, rendered directly by the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Whether the assignment was validated and persisted.
    pub success: bool,
    /// Human-readable summary of what happened.
    pub message: String,
    /// The full validation report, errors and warnings included.
    pub validation: ValidationReport,
    /// Whether the notification email went out.
    pub email_sent: bool,
}

/// Result of re-sending the assignment notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResendOutcome {
    /// Whether the notification went out.
    pub success: bool,
    /// Human-readable summary of what happened.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_side_effects_have_email_skipped() {
        let effects = SideEffects::default();
        assert!(!effects.email_sent());
        assert!(effects.pdf_upload.succeeded());
    }

    #[test]
    fn email_sent_tracks_the_email_step_only() {
        let effects = SideEffects {
            pdf_upload: StepOutcome::FailedNonFatal,
            email: StepOutcome::Succeeded,
            audit: StepOutcome::FailedNonFatal,
        };
        assert!(effects.email_sent());
    }
}
