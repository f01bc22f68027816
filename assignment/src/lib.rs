//! # ROBLESMUN Assignment
//!
//! Orchestration of the seat-assignment lifecycle: validate a proposed
//! assignment, render and upload the summary PDF, persist the assignment
//! record, notify the requester, and record the audit trail.
//!
//! The processor is wired with the collaborator traits from
//! `roblesmun-core`; production clients live in `roblesmun-clients` and
//! test fakes in `roblesmun-testing`.

pub mod admin;
pub mod audit;
pub mod processor;

pub use admin::RegistrationAdmin;
pub use audit::{AuditTrail, AUDIT_LOG_COLLECTION};
pub use processor::{
    assignment_filename, AssignmentEnvironment, AssignmentProcessor, REGISTRATIONS_COLLECTION,
};
