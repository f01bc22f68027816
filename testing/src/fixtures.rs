//! Registration fixtures for tests and demos.

use crate::mocks::test_clock;
use roblesmun_core::environment::Clock;
use roblesmun_core::types::{
    AssignmentRecord, Money, PaymentInfo, PaymentMethod, Registration, RegistrationId,
    RegistrationStatus, SeatLabel,
};
use uuid::Uuid;

/// Start building a pending registration with sensible defaults.
#[must_use]
pub fn registration() -> RegistrationBuilder {
    RegistrationBuilder::default()
}

/// Builder for [`Registration`] fixtures.
pub struct RegistrationBuilder {
    registration: Registration,
}

impl Default for RegistrationBuilder {
    fn default() -> Self {
        Self {
            registration: Registration {
                id: RegistrationId::new(format!("reg-{}", Uuid::new_v4())),
                created_at: test_clock().now(),
                email: "delegate@example.com".to_string(),
                first_name: "Ana".to_string(),
                last_name: "Robles".to_string(),
                institution: "Colegio Los Robles".to_string(),
                is_faculty: false,
                seats: 1,
                seats_requested: Vec::new(),
                backup_seats_requested: Vec::new(),
                requires_backup: false,
                payment: PaymentInfo {
                    method: PaymentMethod::BankTransfer,
                    reference: "TX-0001".to_string(),
                    amount: Money::from_cents(2500),
                },
                status: RegistrationStatus::Pending,
                assignment: None,
            },
        }
    }
}

impl RegistrationBuilder {
    /// Set the requested seat count.
    #[must_use]
    pub fn seats(mut self, seats: u32) -> Self {
        self.registration.seats = seats;
        self
    }

    /// Set the primary seat pool from label strings.
    #[must_use]
    pub fn requested(mut self, labels: &[&str]) -> Self {
        self.registration.seats_requested = labels.iter().map(|s| SeatLabel::new(*s)).collect();
        self
    }

    /// Set the backup seat pool from label strings.
    #[must_use]
    pub fn backups(mut self, labels: &[&str]) -> Self {
        self.registration.backup_seats_requested =
            labels.iter().map(|s| SeatLabel::new(*s)).collect();
        self
    }

    /// Set whether the backup pool is eligible.
    #[must_use]
    pub fn requires_backup(mut self, requires: bool) -> Self {
        self.registration.requires_backup = requires;
        self
    }

    /// Set the requester email.
    #[must_use]
    pub fn email(mut self, email: &str) -> Self {
        self.registration.email = email.to_string();
        self
    }

    /// Set the institution name.
    #[must_use]
    pub fn institution(mut self, institution: &str) -> Self {
        self.registration.institution = institution.to_string();
        self
    }

    /// Attach a persisted assignment (for resend tests).
    #[must_use]
    pub fn assigned(mut self, record: AssignmentRecord) -> Self {
        self.registration.status = RegistrationStatus::Verified;
        self.registration.assignment = Some(record);
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Registration {
        self.registration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_are_pending_and_unassigned() {
        let reg = registration().build();
        assert_eq!(reg.status, RegistrationStatus::Pending);
        assert!(reg.assignment.is_none());
        assert!(reg.id.as_str().starts_with("reg-"));
    }

    #[test]
    fn builder_sets_pools() {
        let reg = registration()
            .seats(2)
            .requested(&["C1 - A"])
            .backups(&["C1 - X"])
            .requires_backup(true)
            .build();
        assert_eq!(reg.seats_requested, vec![SeatLabel::new("C1 - A")]);
        assert_eq!(reg.backup_seats_requested, vec![SeatLabel::new("C1 - X")]);
        assert!(reg.requires_backup);
    }
}
