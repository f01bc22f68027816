//! Pure validation of a proposed seat assignment against a registration's
//! constraints.
//!
//! All checks run and accumulate; nothing short-circuits, so the caller sees
//! the full error and warning set in one pass. Warnings never affect
//! validity.

use crate::types::{Registration, SeatLabel};
use std::collections::HashSet;
use std::fmt;

/// A blocking problem with a proposed assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// More seats proposed than the registration paid for.
    CapacityExceeded {
        /// The registration's seat count.
        limit: u32,
        /// How many seats were proposed.
        attempted: usize,
    },
    /// The proposal contains the same label more than once. The offending
    /// labels are deliberately not enumerated.
    DuplicateSeats,
    /// Labels outside the registration's eligible pool.
    IneligibleSeats {
        /// The offending labels, in proposal order.
        labels: Vec<SeatLabel>,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { limit, attempted } => write!(
                f,
                "cannot assign {attempted} seats to a registration with {limit} requested"
            ),
            Self::DuplicateSeats => write!(f, "duplicate seats detected in the proposed assignment"),
            Self::IneligibleSeats { labels } => {
                let joined = labels
                    .iter()
                    .map(SeatLabel::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "seats not among the requested options: {joined}")
            }
        }
    }
}

/// A non-blocking observation about a proposed assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationWarning {
    /// Fewer seats assigned than requested.
    PartialAssignment {
        /// How many seats were proposed.
        assigned: usize,
        /// The registration's seat count.
        requested: u32,
    },
    /// Every assigned seat comes from the backup pool.
    BackupOnly,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PartialAssignment {
                assigned,
                requested,
            } => write!(f, "only {assigned} of {requested} requested seats assigned"),
            Self::BackupOnly => write!(f, "all assigned seats are backup options"),
        }
    }
}

/// The accumulated result of validating one proposed assignment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Blocking errors; non-empty means the assignment must not proceed.
    pub errors: Vec<ValidationError>,
    /// Non-blocking warnings surfaced alongside a success outcome.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Whether the proposal may proceed. Warnings never affect validity.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Warning texts, for audit snapshots and message composition.
    #[must_use]
    pub fn warning_texts(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

/// Check a proposed assignment against a registration's constraints.
///
/// Checks run in order: capacity, duplicates, pool membership, then the
/// partial-assignment and backup-only warnings. An empty proposal passes
/// every check and raises no warning; rejecting it is the caller's call.
#[must_use]
pub fn validate_assignment(registration: &Registration, proposed: &[SeatLabel]) -> ValidationReport {
    let mut report = ValidationReport::default();

    if proposed.len() > registration.seats as usize {
        report.errors.push(ValidationError::CapacityExceeded {
            limit: registration.seats,
            attempted: proposed.len(),
        });
    }

    let distinct: HashSet<&SeatLabel> = proposed.iter().collect();
    if distinct.len() != proposed.len() {
        report.errors.push(ValidationError::DuplicateSeats);
    }

    let mut eligible: HashSet<&SeatLabel> = registration.seats_requested.iter().collect();
    if registration.requires_backup {
        eligible.extend(registration.backup_seats_requested.iter());
    }
    let ineligible: Vec<SeatLabel> = proposed
        .iter()
        .filter(|label| !eligible.contains(*label))
        .cloned()
        .collect();
    if !ineligible.is_empty() {
        report.errors.push(ValidationError::IneligibleSeats {
            labels: ineligible,
        });
    }

    if !proposed.is_empty() && proposed.len() < registration.seats as usize {
        report.warnings.push(ValidationWarning::PartialAssignment {
            assigned: proposed.len(),
            requested: registration.seats,
        });
    }

    let primary: HashSet<&SeatLabel> = registration.seats_requested.iter().collect();
    if !proposed.is_empty() && proposed.iter().all(|label| !primary.contains(label)) {
        report.warnings.push(ValidationWarning::BackupOnly);
    }

    report
}
