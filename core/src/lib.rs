//! # ROBLESMUN Core
//!
//! Domain types and pure logic for the ROBLESMUN registration back-office:
//! registrations, seat labels, the assignment validator, outcome types, and
//! the collaborator traits the processor is wired with.
//!
//! ## Architecture principles
//!
//! - Pure validation, explicit effects: the validator does no I/O and the
//!   processor's side effects are injected via traits.
//! - Structured results: errors and warnings are typed enums; prose is a
//!   separate formatting step.
//! - Dependency injection via traits, so tests substitute fakes.
//!
//! ## Example
//!
//! ```
//! use roblesmun_core::types::SeatLabel;
//! use roblesmun_core::validation::validate_assignment;
//! # use roblesmun_core::types::*;
//! # use chrono::Utc;
//! # let registration = Registration {
//! #     id: RegistrationId::new("r1"),
//! #     created_at: Utc::now(),
//! #     email: "a@b.c".into(),
//! #     first_name: "A".into(),
//! #     last_name: "B".into(),
//! #     institution: "X".into(),
//! #     is_faculty: false,
//! #     seats: 2,
//! #     seats_requested: vec![SeatLabel::new("C1 - A"), SeatLabel::new("C1 - B")],
//! #     backup_seats_requested: vec![],
//! #     requires_backup: false,
//! #     payment: PaymentInfo {
//! #         method: PaymentMethod::Cash,
//! #         reference: String::new(),
//! #         amount: Money::from_cents(0),
//! #     },
//! #     status: RegistrationStatus::Pending,
//! #     assignment: None,
//! # };
//! let proposed = vec![SeatLabel::new("C1 - A")];
//! let report = validate_assignment(&registration, &proposed);
//! assert!(report.is_valid());
//! ```

pub mod committee;
pub mod environment;
pub mod error;
pub mod format;
pub mod outcome;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use environment::{AssignmentMailer, Clock, DocumentStore, ObjectStorage, PdfRenderer, SystemClock};
pub use error::{MailError, StorageError, StoreError};
pub use outcome::{ProcessOutcome, ResendOutcome, SideEffects, StepOutcome};
pub use types::{
    AssignmentRecord, AuditAction, AuditLogEntry, Registration, RegistrationId,
    RegistrationStatus, SeatLabel,
};
pub use validation::{validate_assignment, ValidationError, ValidationReport, ValidationWarning};
