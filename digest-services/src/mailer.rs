//! Digest Mailer
//!
//! Sends the composed digest over SMTP, one individually addressed message
//! per subscriber with identical subject and body. A failed recipient is
//! logged and skipped so the remaining sends still go out.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

use digest_core::{Digest, Subscriber};

use crate::config::DigestConfig;

/// SMTP mailer for the daily digest
///
/// Generic over the lettre transport so tests can substitute a stub and
/// count send calls.
pub struct Mailer<T = AsyncSmtpTransport<Tokio1Executor>> {
    transport: T,
    from: Mailbox,
}

impl Mailer {
    /// Create a mailer from configuration
    ///
    /// Builds a STARTTLS transport against the configured relay with the
    /// configured credentials; `EMAIL_USER` doubles as the From address.
    pub fn from_config(config: &DigestConfig) -> Result<Self, MailError> {
        let from: Mailbox = config.email_user.parse()?;

        let creds = Credentials::new(config.email_user.clone(), config.email_pass.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        Ok(Self { transport, from })
    }
}

impl<T> Mailer<T>
where
    T: AsyncTransport + Sync,
    T::Error: std::fmt::Display,
{
    /// Create a mailer over an explicit transport (used by tests)
    pub fn with_transport(transport: T, from: Mailbox) -> Self {
        Self { transport, from }
    }

    /// Send the digest to every subscriber
    ///
    /// Per-recipient failures (bad address, rejected send) are logged and
    /// skipped. Returns the number of successful sends.
    pub async fn send_digest(&self, digest: &Digest, subscribers: &[Subscriber]) -> usize {
        let mut sent = 0;

        for subscriber in subscribers {
            let to: Mailbox = match subscriber.email.parse() {
                Ok(mailbox) => mailbox,
                Err(e) => {
                    warn!("Skipping invalid address '{}': {}", subscriber.email, e);
                    continue;
                }
            };

            let message = match Message::builder()
                .from(self.from.clone())
                .to(to)
                .subject(digest.subject.clone())
                .header(ContentType::TEXT_PLAIN)
                .body(digest.body.clone())
            {
                Ok(message) => message,
                Err(e) => {
                    warn!(
                        "Failed to build message for '{}': {}",
                        subscriber.email, e
                    );
                    continue;
                }
            };

            match self.transport.send(message).await {
                Ok(_) => sent += 1,
                Err(e) => warn!("Failed to send to '{}': {}", subscriber.email, e),
            }
        }

        info!("Sent digest to {}/{} subscribers", sent, subscribers.len());
        sent
    }
}

/// Errors that can occur while setting up the mailer
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid mailbox address: {0}")]
    InvalidAddress(#[from] lettre::address::AddressError),

    #[error("SMTP transport error: {0}")]
    Transport(String),
}
