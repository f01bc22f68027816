//! Seat Assignment Demo
//!
//! Walks one registration through the assignment workflow against in-memory
//! collaborators: a valid partial assignment, a rejected duplicate proposal,
//! and a notification re-send.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin assign-demo
//! ```

use roblesmun_assignment::{AssignmentEnvironment, AssignmentProcessor};
use roblesmun_clients::{ConsoleAssignmentMailer, PlainTextRenderer};
use roblesmun_core::environment::{Clock, SystemClock};
use roblesmun_core::types::{AssignmentRecord, SeatLabel};
use roblesmun_testing::fixtures::registration;
use roblesmun_testing::mocks::{InMemoryDocumentStore, StubObjectStorage};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,roblesmun_assignment=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("\n============================================");
    println!("   ROBLESMUN Seat Assignment - Demo");
    println!("============================================\n");

    let store = InMemoryDocumentStore::new();
    let clock = Arc::new(SystemClock);
    let env = AssignmentEnvironment::new(
        Arc::new(store.clone()),
        Arc::new(StubObjectStorage::succeeding(
            "https://storage.roblesmun.example/assignments",
        )),
        Arc::new(ConsoleAssignmentMailer),
        Arc::new(PlainTextRenderer),
        clock,
    );
    let processor = AssignmentProcessor::new(env);

    let reg = registration()
        .seats(3)
        .requested(&[
            "Security Council - France",
            "Security Council - Ghana",
            "WHO - Chile",
        ])
        .backups(&["WHO - Peru"])
        .requires_backup(true)
        .institution("Colegio Los Robles")
        .build();

    println!("1. Assigning 2 of 3 requested seats...");
    let proposed = vec![
        SeatLabel::new("Security Council - France"),
        SeatLabel::new("WHO - Chile"),
    ];
    let outcome = processor
        .process(&reg, &proposed, "Welcome to the XII edition")
        .await;
    println!("   -> {}\n", outcome.message);

    println!("2. Trying a duplicate proposal...");
    let duplicate = vec![
        SeatLabel::new("Security Council - France"),
        SeatLabel::new("Security Council - France"),
    ];
    let outcome = processor.process(&reg, &duplicate, "").await;
    println!("   -> {}\n", outcome.message);

    println!("3. Re-sending the notification...");
    let persisted = AssignmentRecord::new(
        proposed,
        "Welcome to the XII edition",
        "https://storage.roblesmun.example/assignments/demo.pdf",
        reg.seats,
        SystemClock.now(),
    );
    let assigned_view = reg.with_assignment(persisted);
    let outcome = processor.resend_assignment_pdf(&assigned_view).await;
    println!("   -> {}\n", outcome.message);

    println!(
        "Document-store writes recorded: {} update(s), {} audit entr(ies)",
        store.update_count(),
        store.added_to("audit_log").len()
    );
}
