//! Confirmation email rendering and delivery.
//!
//! Delivery goes through SendGrid when an API key is configured. Without
//! one, the mailer logs the message instead and reports a simulated send.

mod error;
mod format;
mod message;
mod sendgrid;

pub use error::EmailError;
pub use format::{format_duration, format_price};
pub use message::ConfirmationEmail;
pub use sendgrid::{DEFAULT_BASE_URL, SendGridClient, SendGridConfig};

/// How a confirmation email was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Accepted by the mail provider.
    Sent,
    /// No provider configured; nothing left the process.
    Simulated,
}

/// Outbound mail, either through SendGrid or disabled.
#[derive(Debug, Clone)]
pub enum Mailer {
    SendGrid(SendGridClient),
    Disabled,
}

impl Mailer {
    /// Build a SendGrid mailer when `config` is present, otherwise a disabled one.
    pub fn from_config(config: Option<SendGridConfig>) -> Result<Self, EmailError> {
        match config {
            Some(config) => Ok(Mailer::SendGrid(SendGridClient::new(config)?)),
            None => Ok(Mailer::Disabled),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Mailer::SendGrid(_))
    }

    /// Deliver `email`, or log it when mail is disabled.
    pub async fn deliver(&self, email: &ConfirmationEmail) -> Result<Delivery, EmailError> {
        match self {
            Mailer::SendGrid(client) => {
                client.send(email).await?;
                tracing::info!(to = %email.to, subject = %email.subject, "confirmation email sent");
                Ok(Delivery::Sent)
            }
            Mailer::Disabled => {
                tracing::warn!(
                    to = %email.to,
                    subject = %email.subject,
                    "email service not configured, simulating delivery"
                );
                tracing::debug!(body = %email.text, "simulated email body");
                Ok(Delivery::Simulated)
            }
        }
    }
}
