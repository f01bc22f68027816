//! Assignment notification mailers.
//!
//! The SMTP mailer sends real email via Lettre; the console mailer prints to
//! the log for demo/development purposes; the unconfigured mailer stands in
//! when no transport is available and makes the workflow skip the
//! notification step.

use crate::config::SmtpConfig;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use roblesmun_core::environment::AssignmentMailer;
use roblesmun_core::error::MailError;
use roblesmun_core::types::{Registration, SeatLabel};
use std::sync::Arc;
use tracing::info;

/// Build the mailer matching the configuration: SMTP when configured,
/// otherwise a stand-in that reports itself as not configured.
#[must_use]
pub fn mailer_from_config(smtp: Option<&SmtpConfig>) -> Arc<dyn AssignmentMailer> {
    match smtp {
        Some(config) => Arc::new(SmtpAssignmentMailer::new(config.clone())),
        None => Arc::new(UnconfiguredMailer),
    }
}

fn seats_as_html(assigned: &[SeatLabel]) -> String {
    assigned
        .iter()
        .map(|seat| format!("<li>{seat}</li>"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn assignment_subject(registration: &Registration) -> String {
    format!("Seat assignment confirmed for {}", registration.institution)
}

/// SMTP assignment mailer using Lettre.
///
/// Sends real emails via SMTP, suitable for production use.
#[derive(Clone)]
pub struct SmtpAssignmentMailer {
    config: SmtpConfig,
    credentials: Credentials,
}

impl SmtpAssignmentMailer {
    /// Create a mailer from SMTP configuration.
    #[must_use]
    pub fn new(config: SmtpConfig) -> Self {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        Self {
            config,
            credentials,
        }
    }

    /// Build an SMTP transport for sending.
    ///
    /// Creates a new transport for each email to avoid connection pooling
    /// issues.
    fn build_transport(&self) -> Result<SmtpTransport, MailError> {
        Ok(SmtpTransport::relay(&self.config.server)
            .map_err(|e| MailError::Transport(format!("SMTP relay error: {e}")))?
            .port(self.config.port)
            .credentials(self.credentials.clone())
            .build())
    }

    fn from_header(&self) -> String {
        format!("{} <{}>", self.config.from_name, self.config.from_email)
    }
}

#[async_trait]
impl AssignmentMailer for SmtpAssignmentMailer {
    fn is_configured(&self) -> bool {
        true
    }

    async fn send_assignment(
        &self,
        registration: &Registration,
        assigned: &[SeatLabel],
        notes: &str,
    ) -> Result<bool, MailError> {
        if registration.email.is_empty() {
            return Err(MailError::EmptyRecipient);
        }

        let notes_block = if notes.is_empty() {
            String::new()
        } else {
            format!("<p><strong>Notes from the organizing team:</strong> {notes}</p>")
        };
        let html_body = format!(
            r#"
<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Seat assignment confirmed</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2 style="color: #2563eb;">Seat assignment confirmed</h2>
        <p>Dear {full_name},</p>
        <p>The following seats have been confirmed for {institution}:</p>
        <ul>
{seats}
        </ul>
        {notes_block}
        <p style="color: #666; font-size: 14px;">
            Your registration status is now <strong>verified</strong>. The
            attached summary is also available from the registration portal.
        </p>
    </div>
</body>
</html>
            "#,
            full_name = registration.full_name(),
            institution = registration.institution,
            seats = seats_as_html(assigned),
        );

        let email = Message::builder()
            .from(
                self.from_header()
                    .parse()
                    .map_err(|e| MailError::InvalidMessage(format!("Invalid from address: {e}")))?,
            )
            .to(registration
                .email
                .parse()
                .map_err(|e| MailError::InvalidMessage(format!("Invalid to address: {e}")))?)
            .subject(assignment_subject(registration))
            .header(ContentType::TEXT_HTML)
            .body(html_body)
            .map_err(|e| MailError::InvalidMessage(format!("Failed to build email: {e}")))?;

        let mailer = self.build_transport()?;

        tokio::task::spawn_blocking(move || {
            mailer
                .send(&email)
                .map(|_| ())
                .map_err(|e| MailError::Transport(format!("Failed to send email: {e}")))
        })
        .await
        .map_err(|e| MailError::Transport(format!("Email task failed: {e}")))??;

        Ok(true)
    }
}

/// Console assignment mailer (prints to the log for demo purposes).
#[derive(Debug, Clone, Default)]
pub struct ConsoleAssignmentMailer;

#[async_trait]
impl AssignmentMailer for ConsoleAssignmentMailer {
    fn is_configured(&self) -> bool {
        true
    }

    async fn send_assignment(
        &self,
        registration: &Registration,
        assigned: &[SeatLabel],
        notes: &str,
    ) -> Result<bool, MailError> {
        if registration.email.is_empty() {
            return Err(MailError::EmptyRecipient);
        }

        let seats = assigned
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        info!(
            "\n\n\
            ┌────────────────────────────────────────────────────────────────┐\n\
            │                  Seat Assignment Email                         │\n\
            ├────────────────────────────────────────────────────────────────┤\n\
            │ To: {:<58} │\n\
            │ Subject: {:<53} │\n\
            │                                                                │\n\
            │ Seats: {}  \n\
            │ Notes: {}  \n\
            └────────────────────────────────────────────────────────────────┘\n",
            registration.email,
            assignment_subject(registration),
            seats,
            if notes.is_empty() { "(none)" } else { notes },
        );

        Ok(true)
    }
}

/// Stand-in used when no email transport is configured.
///
/// The workflow checks `is_configured` and skips the notification step, so
/// `send_assignment` is never reached in practice.
#[derive(Debug, Clone, Default)]
pub struct UnconfiguredMailer;

#[async_trait]
impl AssignmentMailer for UnconfiguredMailer {
    fn is_configured(&self) -> bool {
        false
    }

    async fn send_assignment(
        &self,
        _registration: &Registration,
        _assigned: &[SeatLabel],
        _notes: &str,
    ) -> Result<bool, MailError> {
        Err(MailError::NotConfigured)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use roblesmun_testing::fixtures::registration;

    #[tokio::test]
    async fn console_mailer_sends() {
        let mailer = ConsoleAssignmentMailer;
        let reg = registration().build();
        let sent = mailer
            .send_assignment(&reg, &[SeatLabel::new("C1 - A")], "note")
            .await
            .unwrap();
        assert!(sent);
        assert!(mailer.is_configured());
    }

    #[tokio::test]
    async fn console_mailer_rejects_empty_recipient() {
        let mailer = ConsoleAssignmentMailer;
        let reg = registration().email("").build();
        let result = mailer.send_assignment(&reg, &[], "").await;
        assert!(matches!(result, Err(MailError::EmptyRecipient)));
    }

    #[tokio::test]
    async fn unconfigured_mailer_refuses_to_send() {
        let mailer = UnconfiguredMailer;
        assert!(!mailer.is_configured());
        let reg = registration().build();
        let result = mailer.send_assignment(&reg, &[], "").await;
        assert!(matches!(result, Err(MailError::NotConfigured)));
    }

    #[test]
    fn mailer_from_config_without_smtp_is_unconfigured() {
        let mailer = mailer_from_config(None);
        assert!(!mailer.is_configured());
    }
}
