//! End-to-end tests for the assignment workflow against mock collaborators.

#![allow(clippy::unwrap_used)]

use roblesmun_assignment::{AssignmentEnvironment, AssignmentProcessor, RegistrationAdmin};
use roblesmun_core::format::INTERNAL_ERROR_MESSAGE;
use roblesmun_core::types::{AssignmentRecord, Registration, SeatLabel};
use roblesmun_core::validation::ValidationWarning;
use roblesmun_testing::fixtures::registration;
use roblesmun_testing::mocks::{
    test_clock, InMemoryDocumentStore, RecordingMailer, StaticPdfRenderer, StubObjectStorage,
};
use roblesmun_core::environment::Clock;
use std::sync::Arc;

struct Harness {
    store: InMemoryDocumentStore,
    storage: StubObjectStorage,
    mailer: RecordingMailer,
    processor: AssignmentProcessor,
}

fn harness(storage: StubObjectStorage, mailer: RecordingMailer) -> Harness {
    let store = InMemoryDocumentStore::new();
    let env = AssignmentEnvironment::new(
        Arc::new(store.clone()),
        Arc::new(storage.clone()),
        Arc::new(mailer.clone()),
        Arc::new(StaticPdfRenderer::default()),
        Arc::new(test_clock()),
    );
    Harness {
        store,
        storage,
        mailer,
        processor: AssignmentProcessor::new(env),
    }
}

fn default_harness() -> Harness {
    harness(
        StubObjectStorage::succeeding("https://storage.example.com/receipts"),
        RecordingMailer::configured(),
    )
}

fn labels(names: &[&str]) -> Vec<SeatLabel> {
    names.iter().map(|s| SeatLabel::new(*s)).collect()
}

fn scenario_a_registration() -> Registration {
    registration()
        .seats(3)
        .requested(&["C1 - A", "C1 - B", "C1 - C"])
        .build()
}

#[tokio::test]
async fn partial_assignment_persists_with_warning() {
    let h = default_harness();
    let reg = scenario_a_registration();

    let outcome = h
        .processor
        .process(&reg, &labels(&["C1 - A", "C1 - B"]), "note")
        .await;

    assert!(outcome.success);
    assert!(outcome.email_sent);
    assert!(outcome.validation.errors.is_empty());
    assert_eq!(
        outcome.validation.warnings,
        vec![ValidationWarning::PartialAssignment {
            assigned: 2,
            requested: 3
        }]
    );

    let updates = h.store.updates();
    assert_eq!(updates.len(), 1);
    let patch = &updates[0].patch;
    assert_eq!(updates[0].collection, "registrations");
    assert_eq!(updates[0].id, reg.id.as_str());
    assert_eq!(patch["assigned_seats"].as_array().unwrap().len(), 2);
    assert_eq!(patch["assignment_percentage"], 67);
    assert_eq!(patch["is_complete_assignment"], false);
    assert_eq!(patch["status"], "verified");
    assert_eq!(patch["assignment_notes"], "note");
    assert!(
        patch["assignment_pdf_url"]
            .as_str()
            .unwrap()
            .starts_with("https://storage.example.com/receipts/assignment-colegio-los-robles-")
    );
}

#[tokio::test]
async fn duplicate_proposal_is_rejected_without_side_effects() {
    let h = default_harness();
    let reg = scenario_a_registration();

    let outcome = h
        .processor
        .process(&reg, &labels(&["C1 - A", "C1 - A"]), "")
        .await;

    assert!(!outcome.success);
    assert!(outcome.message.contains("duplicate seats detected"));
    assert_eq!(h.store.update_count(), 0);
    assert_eq!(h.storage.upload_count(), 0);
    assert_eq!(h.mailer.sent_count(), 0);
}

#[tokio::test]
async fn capacity_violation_is_rejected_without_side_effects() {
    let h = default_harness();
    let reg = registration().seats(1).requested(&["C1 - A", "C1 - B"]).build();

    let outcome = h
        .processor
        .process(&reg, &labels(&["C1 - A", "C1 - B"]), "")
        .await;

    assert!(!outcome.success);
    assert_eq!(h.store.update_count(), 0);
    assert_eq!(h.storage.upload_count(), 0);
    assert_eq!(h.mailer.sent_count(), 0);
}

#[tokio::test]
async fn backup_only_assignment_can_be_complete() {
    let h = default_harness();
    let reg = registration()
        .seats(2)
        .requested(&["C1 - A"])
        .backups(&["C1 - X", "C1 - Y"])
        .requires_backup(true)
        .build();

    let outcome = h
        .processor
        .process(&reg, &labels(&["C1 - X", "C1 - Y"]), "")
        .await;

    assert!(outcome.success);
    assert_eq!(outcome.validation.warnings, vec![ValidationWarning::BackupOnly]);

    let patch = &h.store.updates()[0].patch;
    assert_eq!(patch["assignment_percentage"], 100);
    assert_eq!(patch["is_complete_assignment"], true);
}

#[tokio::test]
async fn upload_failure_is_non_fatal() {
    let h = harness(StubObjectStorage::failing(), RecordingMailer::configured());
    let reg = scenario_a_registration();

    let outcome = h
        .processor
        .process(&reg, &labels(&["C1 - A", "C1 - B", "C1 - C"]), "")
        .await;

    assert!(outcome.success);
    assert!(outcome.email_sent);
    assert_eq!(h.store.update_count(), 1);
    let patch = &h.store.updates()[0].patch;
    assert_eq!(patch["assignment_pdf_url"], "");
}

#[tokio::test]
async fn store_failure_yields_generic_internal_error() {
    let h = default_harness();
    h.store.fail_updates();
    let reg = scenario_a_registration();

    let outcome = h
        .processor
        .process(&reg, &labels(&["C1 - A"]), "")
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.message, INTERNAL_ERROR_MESSAGE);
    assert!(!outcome.email_sent);
    assert_eq!(h.mailer.sent_count(), 0);

    let audit = h.store.added_to("audit_log");
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0]["action"], "assignment_error");
}

#[tokio::test]
async fn email_failure_does_not_fail_the_assignment() {
    let h = harness(
        StubObjectStorage::succeeding("https://storage.example.com/receipts"),
        RecordingMailer::failing(),
    );
    let reg = scenario_a_registration();

    let outcome = h
        .processor
        .process(&reg, &labels(&["C1 - A"]), "")
        .await;

    assert!(outcome.success);
    assert!(!outcome.email_sent);
    assert!(outcome.message.contains("could not be sent"));
    assert_eq!(h.store.update_count(), 1);
}

#[tokio::test]
async fn unconfigured_mailer_skips_notification() {
    let h = harness(
        StubObjectStorage::succeeding("https://storage.example.com/receipts"),
        RecordingMailer::unconfigured(),
    );
    let reg = scenario_a_registration();

    let outcome = h
        .processor
        .process(&reg, &labels(&["C1 - A"]), "")
        .await;

    assert!(outcome.success);
    assert!(!outcome.email_sent);
    assert!(outcome.message.contains("not configured"));
    assert_eq!(h.mailer.sent_count(), 0);
}

#[tokio::test]
async fn notification_carries_the_updated_registration_view() {
    let h = default_harness();
    let reg = scenario_a_registration();

    let outcome = h
        .processor
        .process(&reg, &labels(&["C1 - A", "C1 - B"]), "see you there")
        .await;
    assert!(outcome.success);

    let sent = h.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "delegate@example.com");
    assert_eq!(sent[0].assigned, labels(&["C1 - A", "C1 - B"]));
    assert_eq!(sent[0].notes, "see you there");
    assert_eq!(
        sent[0].status,
        roblesmun_core::types::RegistrationStatus::Verified
    );
}

#[tokio::test]
async fn successful_assignment_writes_one_audit_entry() {
    let h = default_harness();
    let reg = scenario_a_registration();

    h.processor
        .process(&reg, &labels(&["C1 - A", "C1 - B"]), "")
        .await;

    let audit = h.store.added_to("audit_log");
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0]["action"], "assignment_created");
    assert_eq!(audit[0]["registration_id"], reg.id.as_str());
    assert_eq!(audit[0]["details"]["assigned_count"], 2);
    assert_eq!(audit[0]["details"]["requested_count"], 3);
    assert_eq!(audit[0]["details"]["email_sent"], true);
    assert_eq!(
        audit[0]["details"]["warnings"][0],
        "only 2 of 3 requested seats assigned"
    );
}

#[tokio::test]
async fn audit_write_failure_is_swallowed() {
    let h = default_harness();
    h.store.fail_adds();
    let reg = scenario_a_registration();

    let outcome = h
        .processor
        .process(&reg, &labels(&["C1 - A"]), "")
        .await;

    assert!(outcome.success);
    assert_eq!(h.store.update_count(), 1);
}

#[tokio::test]
async fn reassignment_overwrites_wholesale() {
    let h = default_harness();
    let reg = scenario_a_registration();

    h.processor
        .process(&reg, &labels(&["C1 - A"]), "first")
        .await;
    h.processor
        .process(&reg, &labels(&["C1 - B", "C1 - C"]), "second")
        .await;

    let updates = h.store.updates();
    assert_eq!(updates.len(), 2);
    let last = &updates[1].patch;
    let seats: Vec<&str> = last["assigned_seats"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(seats, vec!["C1 - B", "C1 - C"]);
    assert_eq!(last["assignment_notes"], "second");
}

fn assigned_registration() -> Registration {
    let record = AssignmentRecord::new(
        labels(&["C1 - A"]),
        "original notes",
        "https://storage.example.com/receipts/a.pdf",
        1,
        test_clock().now(),
    );
    registration()
        .seats(1)
        .requested(&["C1 - A"])
        .assigned(record)
        .build()
}

#[tokio::test]
async fn resend_requires_a_persisted_assignment() {
    let h = default_harness();
    let reg = registration().seats(2).requested(&["C1 - A"]).build();

    let outcome = h.processor.resend_assignment_pdf(&reg).await;

    assert!(!outcome.success);
    assert_eq!(h.mailer.sent_count(), 0);
    assert!(h.store.added_to("audit_log").is_empty());
}

#[tokio::test]
async fn resend_requires_a_configured_mailer() {
    let h = harness(
        StubObjectStorage::succeeding("https://storage.example.com/receipts"),
        RecordingMailer::unconfigured(),
    );
    let reg = assigned_registration();

    let outcome = h.processor.resend_assignment_pdf(&reg).await;

    assert!(!outcome.success);
    assert!(outcome.message.contains("not configured"));
    assert_eq!(h.mailer.sent_count(), 0);
}

#[tokio::test]
async fn resend_reuses_persisted_seats_and_notes() {
    let h = default_harness();
    let reg = assigned_registration();

    let outcome = h.processor.resend_assignment_pdf(&reg).await;

    assert!(outcome.success);
    let sent = h.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].assigned, labels(&["C1 - A"]));
    assert_eq!(sent[0].notes, "original notes");

    let audit = h.store.added_to("audit_log");
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0]["action"], "pdf_resent");
}

#[tokio::test]
async fn admin_rejection_persists_status_and_audits() {
    let store = InMemoryDocumentStore::new();
    let admin = RegistrationAdmin::new(Arc::new(store.clone()), Arc::new(test_clock()));
    let reg = registration().build();

    admin.reject(&reg, "payment never arrived").await.unwrap();

    let updates = store.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].patch["status"], "rejected");

    let audit = store.added_to("audit_log");
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0]["action"], "registration_rejected");
    assert_eq!(audit[0]["details"]["reason"], "payment never arrived");
}
