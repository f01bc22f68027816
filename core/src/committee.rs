//! Committee and seat vocabulary behind the composite seat labels.
//!
//! The admin back-office manages committees; the assignment core only ever
//! sees the composite labels, so this module is the single place that knows
//! how a committee's seats become labels.

use crate::types::SeatLabel;
use serde::{Deserialize, Serialize};

/// A committee with its named seats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Committee {
    /// Committee name, e.g. "Security Council".
    pub name: String,
    /// Seat names within the committee, e.g. country delegations.
    pub seats: Vec<String>,
}

impl Committee {
    /// Create a committee from a name and seat names.
    #[must_use]
    pub fn new(name: impl Into<String>, seats: Vec<String>) -> Self {
        Self {
            name: name.into(),
            seats,
        }
    }

    /// Composite labels for every seat in this committee.
    #[must_use]
    pub fn labels(&self) -> Vec<SeatLabel> {
        self.seats
            .iter()
            .map(|seat| SeatLabel::compose(&self.name, seat))
            .collect()
    }
}

/// The full committee catalog for an event edition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeCatalog {
    /// Committees in display order.
    pub committees: Vec<Committee>,
}

impl CommitteeCatalog {
    /// Create a catalog from a list of committees.
    #[must_use]
    pub const fn new(committees: Vec<Committee>) -> Self {
        Self { committees }
    }

    /// Every seat label across the catalog, in catalog order.
    #[must_use]
    pub fn all_labels(&self) -> Vec<SeatLabel> {
        self.committees.iter().flat_map(Committee::labels).collect()
    }

    /// Whether a label names a seat that exists in the catalog.
    #[must_use]
    pub fn contains(&self, label: &SeatLabel) -> bool {
        let (Some(committee), Some(seat)) = (label.committee(), label.seat_name()) else {
            return false;
        };
        self.committees
            .iter()
            .any(|c| c.name == committee && c.seats.iter().any(|s| s == seat))
    }

    /// Total number of seats across the catalog.
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.committees.iter().map(|c| c.seats.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CommitteeCatalog {
        CommitteeCatalog::new(vec![
            Committee::new(
                "Security Council",
                vec!["France".to_string(), "Ghana".to_string()],
            ),
            Committee::new("WHO", vec!["Chile".to_string()]),
        ])
    }

    #[test]
    fn labels_compose_committee_and_seat() {
        let labels = catalog().all_labels();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0].as_str(), "Security Council - France");
        assert_eq!(labels[2].as_str(), "WHO - Chile");
    }

    #[test]
    fn contains_matches_only_real_seats() {
        let catalog = catalog();
        assert!(catalog.contains(&SeatLabel::new("WHO - Chile")));
        assert!(!catalog.contains(&SeatLabel::new("WHO - France")));
        assert!(!catalog.contains(&SeatLabel::new("no separator")));
        assert_eq!(catalog.seat_count(), 3);
    }
}
