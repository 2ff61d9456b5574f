// Outbound email port.
//
// Purpose
// - Describe the single capability the core needs from a mail transport: send one message
//   to one recipient and learn the provider message id.
//
// Boundaries
// - No retry, batching, or backoff. Callers log a failed send and move on.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub message_id: String,
}

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("mail transport unavailable: {0}")]
    Transport(String),

    #[error("mail relay rejected message: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<SentEmail, MailerError>;
}

pub mod http_relay;
pub mod in_memory;
