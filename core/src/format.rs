//! Prose composition for workflow outcomes.
//!
//! The validator and processor return structured data; this module is the
//! presentation step that turns it into the sentences the admin UI renders
//! verbatim.

use crate::outcome::{SideEffects, StepOutcome};
use crate::validation::ValidationReport;

/// Generic message for unexpected internal failures. The underlying error is
/// logged, never shown to the caller.
pub const INTERNAL_ERROR_MESSAGE: &str =
    "An internal error occurred while saving the assignment. No changes were confirmed.";

/// Message for a proposal that failed validation: the joined error strings.
#[must_use]
pub fn rejection_message(report: &ValidationReport) -> String {
    let joined = report
        .errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    format!("Assignment rejected: {joined}.")
}

/// Compose the success message: base sentence with the assigned count, then
/// warnings, then the email clause, then the fixed status clause.
#[must_use]
pub fn success_message(
    assigned_count: usize,
    report: &ValidationReport,
    effects: &SideEffects,
) -> String {
    let mut message = format!("Assignment saved with {assigned_count} seat(s).");

    if !report.warnings.is_empty() {
        let joined = report
            .warnings
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        message.push_str(&format!(" Warnings: {joined}."));
    }

    message.push_str(match effects.email {
        StepOutcome::Succeeded => " Confirmation email sent.",
        StepOutcome::FailedNonFatal => " Confirmation email could not be sent.",
        StepOutcome::SkippedNotConfigured => " Email sender not configured; no notification sent.",
    });

    message.push_str(" Status changed to verified.");
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{ValidationError, ValidationWarning};

    #[test]
    fn rejection_joins_all_errors() {
        let report = ValidationReport {
            errors: vec![
                ValidationError::CapacityExceeded {
                    limit: 2,
                    attempted: 3,
                },
                ValidationError::DuplicateSeats,
            ],
            warnings: Vec::new(),
        };
        let message = rejection_message(&report);
        assert!(message.starts_with("Assignment rejected: "));
        assert!(message.contains("cannot assign 3 seats"));
        assert!(message.contains("; duplicate seats detected"));
    }

    #[test]
    fn success_message_orders_clauses() {
        let report = ValidationReport {
            errors: Vec::new(),
            warnings: vec![ValidationWarning::PartialAssignment {
                assigned: 2,
                requested: 3,
            }],
        };
        let effects = SideEffects {
            pdf_upload: StepOutcome::Succeeded,
            email: StepOutcome::Succeeded,
            audit: StepOutcome::Succeeded,
        };
        let message = success_message(2, &report, &effects);
        assert_eq!(
            message,
            "Assignment saved with 2 seat(s). Warnings: only 2 of 3 requested seats assigned. \
             Confirmation email sent. Status changed to verified."
        );
    }

    #[test]
    fn success_message_without_warnings_or_email() {
        let effects = SideEffects {
            pdf_upload: StepOutcome::FailedNonFatal,
            email: StepOutcome::SkippedNotConfigured,
            audit: StepOutcome::Succeeded,
        };
        let message = success_message(1, &ValidationReport::default(), &effects);
        assert_eq!(
            message,
            "Assignment saved with 1 seat(s). Email sender not configured; no notification sent. \
             Status changed to verified."
        );
    }
}
