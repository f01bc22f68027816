//! # ROBLESMUN Testing
//!
//! Testing utilities for the assignment workflow: a fixed clock, in-memory
//! and recording fakes for every collaborator trait, and a registration
//! fixture builder.
//!
//! ## Example
//!
//! ```
//! use roblesmun_testing::fixtures::registration;
//! use roblesmun_testing::mocks::InMemoryDocumentStore;
//!
//! let reg = registration().seats(3).requested(&["C1 - A", "C1 - B"]).build();
//! let store = InMemoryDocumentStore::new();
//! assert_eq!(store.update_count(), 0);
//! assert_eq!(reg.seats, 3);
//! ```

pub mod fixtures;
pub mod mocks;

pub use mocks::test_clock;
