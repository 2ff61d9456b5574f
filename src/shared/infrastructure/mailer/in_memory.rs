// In memory implementation of the Mailer port.
//
// Purpose
// - Support tests and local development without an SMTP relay.
//
// Responsibilities
// - Keep every accepted message in an outbox for inspection.
// - Simulate an unreachable relay with toggle_offline.

use crate::shared::infrastructure::mailer::{Mailer, MailerError, OutgoingEmail, SentEmail};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryMailer {
    pub outbox: Mutex<Vec<OutgoingEmail>>,
    is_offline: bool,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn sent_to(&self, recipient: &str) -> Vec<OutgoingEmail> {
        self.outbox
            .lock()
            .await
            .iter()
            .filter(|email| email.to == recipient)
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl Mailer for InMemoryMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<SentEmail, MailerError> {
        if self.is_offline {
            return Err(MailerError::Transport("Mailer offline".into()));
        }

        tracing::debug!(to = %email.to, subject = %email.subject, "email kept in memory outbox");
        self.outbox.lock().await.push(email);
        Ok(SentEmail {
            message_id: format!("<{}@in-memory>", Uuid::now_v7()),
        })
    }
}
