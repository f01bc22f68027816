//! Domain types for the ROBLESMUN registration back-office.
//!
//! This module contains the value objects and entities shared by the
//! assignment workflow: registrations, seat labels, payment metadata,
//! assignment records, and audit-log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Opaque identifier for a registration, assigned by the hosted document
/// store when the intake flow creates the record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationId(String);

impl RegistrationId {
    /// Wrap an existing store-assigned identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RegistrationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// ============================================================================
// Seat labels
// ============================================================================

/// Separator between the committee name and the seat name in a label.
pub const SEAT_LABEL_SEPARATOR: &str = " - ";

/// A single delegate slot, identified by the composite label
/// `"{committee} - {seat name}"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatLabel(String);

impl SeatLabel {
    /// Wrap an existing composite label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Compose a label from a committee name and a seat name.
    #[must_use]
    pub fn compose(committee: &str, seat_name: &str) -> Self {
        Self(format!("{committee}{SEAT_LABEL_SEPARATOR}{seat_name}"))
    }

    /// Get the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The committee part of the label, if the label is well-formed.
    #[must_use]
    pub fn committee(&self) -> Option<&str> {
        self.0.split_once(SEAT_LABEL_SEPARATOR).map(|(c, _)| c)
    }

    /// The seat-name part of the label, if the label is well-formed.
    #[must_use]
    pub fn seat_name(&self) -> Option<&str> {
        self.0.split_once(SEAT_LABEL_SEPARATOR).map(|(_, s)| s)
    }
}

impl fmt::Display for SeatLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SeatLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

// ============================================================================
// Money Value Object (cents-based to avoid floating point errors)
// ============================================================================

/// Represents money in cents to avoid floating-point arithmetic errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(u64);

impl Money {
    /// Creates a `Money` value from cents.
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Creates a `Money` value from whole currency units with overflow
    /// checking.
    #[must_use]
    pub const fn checked_from_units(units: u64) -> Option<Self> {
        match units.checked_mul(100) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Checks if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiply by a per-seat count (saturating).
    #[must_use]
    pub const fn multiply(&self, count: u32) -> Self {
        Self(self.0.saturating_mul(count as u64))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// ============================================================================
// Payment metadata
// ============================================================================

/// How a registration was paid. Captured by the intake wizard; the
/// assignment core carries it but never interprets it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Bank transfer with an external reference number.
    BankTransfer,
    /// Cash deposit at a branch.
    Deposit,
    /// Cash handed in at the event desk.
    Cash,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BankTransfer => write!(f, "bank transfer"),
            Self::Deposit => write!(f, "deposit"),
            Self::Cash => write!(f, "cash"),
        }
    }
}

/// Payment metadata for a registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    /// Payment method selected in the wizard.
    pub method: PaymentMethod,
    /// Transaction reference (empty for cash payments).
    pub reference: String,
    /// Computed amount for the requested seats.
    pub amount: Money,
}

// ============================================================================
// Registration status
// ============================================================================

/// Verification status of a registration.
///
/// `Verified` is set only as a side effect of a successful seat assignment;
/// `Rejected` is set by a separate admin action, never by the assignment
/// processor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    /// Created by intake, not yet assigned or rejected.
    Pending,
    /// Seats assigned and persisted.
    Verified,
    /// Rejected by an admin.
    Rejected,
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Verified => write!(f, "verified"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

// ============================================================================
// Assignment record
// ============================================================================

/// The assignment fields written back onto a registration by a successful
/// `process` call. A re-assignment overwrites the whole record; there are no
/// merge semantics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Confirmed seat labels, a subset of the registration's eligible pool.
    pub assigned_seats: Vec<SeatLabel>,
    /// When the assignment was made.
    pub assignment_date: DateTime<Utc>,
    /// Free-text notes from the admin, possibly empty.
    pub assignment_notes: String,
    /// Whether the assignment passed validation (always true for persisted
    /// records; kept for parity with the stored document shape).
    pub assignment_validated: bool,
    /// When validation ran.
    pub assignment_validation_date: DateTime<Utc>,
    /// Public URL of the uploaded PDF, or empty if the upload failed.
    pub assignment_pdf_url: String,
    /// Rounded share of the requested seats that were assigned, 0-100.
    pub assignment_percentage: u8,
    /// Whether every requested seat was assigned.
    pub is_complete_assignment: bool,
    /// Last-modified timestamp for the registration document.
    pub updated_at: DateTime<Utc>,
}

impl AssignmentRecord {
    /// Build a record for the given seats, deriving the completion fields
    /// from the registration's seat capacity.
    #[must_use]
    pub fn new(
        assigned_seats: Vec<SeatLabel>,
        notes: impl Into<String>,
        pdf_url: impl Into<String>,
        seat_capacity: u32,
        now: DateTime<Utc>,
    ) -> Self {
        let assigned = assigned_seats.len();
        Self {
            assigned_seats,
            assignment_date: now,
            assignment_notes: notes.into(),
            assignment_validated: true,
            assignment_validation_date: now,
            assignment_pdf_url: pdf_url.into(),
            assignment_percentage: assignment_percentage(assigned, seat_capacity),
            is_complete_assignment: is_complete_assignment(assigned, seat_capacity),
            updated_at: now,
        }
    }
}

/// Rounded share of the requested seats that were assigned, 0-100.
///
/// A zero-seat capacity yields 0 rather than dividing.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn assignment_percentage(assigned: usize, seat_capacity: u32) -> u8 {
    if seat_capacity == 0 {
        return 0;
    }
    ((assigned as f64 / f64::from(seat_capacity)) * 100.0).round() as u8
}

/// Whether every requested seat was assigned.
#[must_use]
pub const fn is_complete_assignment(assigned: usize, seat_capacity: u32) -> bool {
    assigned == seat_capacity as usize
}

// ============================================================================
// Registration
// ============================================================================

/// One institution's or individual's application to attend.
///
/// Created by the intake flow (out of this crate's scope) in `Pending`
/// status with no assignment. The assignment core only ever writes the
/// `assignment` and `status` fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    /// Store-assigned identifier.
    pub id: RegistrationId,
    /// When the intake flow created the record.
    pub created_at: DateTime<Utc>,
    /// Requester contact email.
    pub email: String,
    /// Requester first name.
    pub first_name: String,
    /// Requester last name.
    pub last_name: String,
    /// Institution (school) the requester represents.
    pub institution: String,
    /// Whether the requester is faculty rather than a delegate.
    pub is_faculty: bool,
    /// Contractually requested seat count; the upper bound for any
    /// assignment.
    pub seats: u32,
    /// Ordered primary seat choices.
    pub seats_requested: Vec<SeatLabel>,
    /// Ordered backup seat choices, eligible only when `requires_backup`.
    pub backup_seats_requested: Vec<SeatLabel>,
    /// Gate on whether the backup pool is eligible for assignment.
    pub requires_backup: bool,
    /// Payment metadata captured by the wizard.
    pub payment: PaymentInfo,
    /// Verification status.
    pub status: RegistrationStatus,
    /// Assignment fields, present once seats have been assigned.
    pub assignment: Option<AssignmentRecord>,
}

impl Registration {
    /// Requester's full name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether a non-empty assignment has been persisted.
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        self.assignment
            .as_ref()
            .is_some_and(|a| !a.assigned_seats.is_empty())
    }

    /// The registration as it looks after the given assignment is applied:
    /// record attached and status moved to `Verified`.
    #[must_use]
    pub fn with_assignment(mut self, record: AssignmentRecord) -> Self {
        self.assignment = Some(record);
        self.status = RegistrationStatus::Verified;
        self
    }
}

// ============================================================================
// Audit log
// ============================================================================

/// Action tag for an audit-log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A seat assignment was validated and persisted.
    AssignmentCreated,
    /// The assignment workflow failed after validation.
    AssignmentError,
    /// The assignment notification was re-sent.
    PdfResent,
    /// An admin rejected the registration.
    RegistrationRejected,
}

impl AuditAction {
    /// Stable tag written to the audit collection.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AssignmentCreated => "assignment_created",
            Self::AssignmentError => "assignment_error",
            Self::PdfResent => "pdf_resent",
            Self::RegistrationRejected => "registration_rejected",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Append-only audit-log entry. Written best-effort: a failed write is
/// logged and swallowed, never surfaced to the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Registration the entry is about.
    pub registration_id: RegistrationId,
    /// What happened.
    pub action: AuditAction,
    /// Snapshot of relevant counts and flags at the time of the action.
    pub details: serde_json::Value,
    /// When the entry was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl AuditLogEntry {
    /// Create an entry with an arbitrary detail snapshot.
    #[must_use]
    pub const fn new(
        registration_id: RegistrationId,
        action: AuditAction,
        details: serde_json::Value,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            registration_id,
            action,
            details,
            recorded_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn seat_label_splits_on_separator() {
        let label = SeatLabel::compose("Security Council", "France");
        assert_eq!(label.as_str(), "Security Council - France");
        assert_eq!(label.committee(), Some("Security Council"));
        assert_eq!(label.seat_name(), Some("France"));
    }

    #[test]
    fn seat_label_without_separator_has_no_parts() {
        let label = SeatLabel::new("malformed");
        assert_eq!(label.committee(), None);
        assert_eq!(label.seat_name(), None);
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        assert_eq!(assignment_percentage(7, 10), 70);
        assert_eq!(assignment_percentage(2, 3), 67);
        assert_eq!(assignment_percentage(5, 5), 100);
        assert_eq!(assignment_percentage(0, 4), 0);
    }

    #[test]
    fn percentage_of_zero_capacity_is_zero() {
        assert_eq!(assignment_percentage(0, 0), 0);
    }

    #[test]
    fn completion_requires_exact_count() {
        assert!(is_complete_assignment(5, 5));
        assert!(!is_complete_assignment(7, 10));
        assert!(!is_complete_assignment(0, 1));
    }

    #[test]
    fn record_derives_completion_fields() {
        let now = Utc.with_ymd_and_hms(2026, 2, 14, 9, 0, 0).unwrap();
        let record = AssignmentRecord::new(
            vec![SeatLabel::new("C1 - A"), SeatLabel::new("C1 - B")],
            "note",
            "",
            3,
            now,
        );
        assert_eq!(record.assignment_percentage, 67);
        assert!(!record.is_complete_assignment);
        assert!(record.assignment_validated);
        assert_eq!(record.assignment_date, now);
        assert_eq!(record.updated_at, now);
    }

    #[test]
    fn with_assignment_moves_status_to_verified() {
        let now = Utc.with_ymd_and_hms(2026, 2, 14, 9, 0, 0).unwrap();
        let registration = Registration {
            id: RegistrationId::new("r1"),
            created_at: now,
            email: "delegate@example.com".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Robles".to_string(),
            institution: "Colegio Los Robles".to_string(),
            is_faculty: false,
            seats: 1,
            seats_requested: vec![SeatLabel::new("C1 - A")],
            backup_seats_requested: Vec::new(),
            requires_backup: false,
            payment: PaymentInfo {
                method: PaymentMethod::Cash,
                reference: String::new(),
                amount: Money::from_cents(2500),
            },
            status: RegistrationStatus::Pending,
            assignment: None,
        };

        let record = AssignmentRecord::new(vec![SeatLabel::new("C1 - A")], "", "", 1, now);
        let updated = registration.with_assignment(record);
        assert_eq!(updated.status, RegistrationStatus::Verified);
        assert!(updated.is_assigned());
        assert_eq!(updated.full_name(), "Ana Robles");
    }

    #[test]
    fn money_display_uses_two_decimals() {
        assert_eq!(Money::from_cents(2550).to_string(), "$25.50");
        assert_eq!(Money::checked_from_units(40).unwrap().cents(), 4000);
        assert!(Money::from_cents(0).is_zero());
        assert_eq!(Money::from_cents(100).multiply(3).cents(), 300);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Completion fields are pure functions of the two counts.
            #[test]
            fn percentage_is_bounded_for_valid_assignments(seats in 1u32..50, assigned in 0usize..50) {
                let assigned = assigned.min(seats as usize);
                let pct = assignment_percentage(assigned, seats);
                prop_assert!(pct <= 100);
                prop_assert_eq!(pct == 100, assigned == seats as usize);
                prop_assert_eq!(
                    is_complete_assignment(assigned, seats),
                    assigned == seats as usize
                );
            }
        }
    }
}
