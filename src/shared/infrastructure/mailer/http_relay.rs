// Mailer adapter that hands messages to an HTTP mail relay.
//
// The wire shape follows the Mailpit send API (`POST /api/v1/send`), which local
// development already runs as its SMTP catcher. Any relay that accepts the same
// JSON body and answers with `{"ID": "..."}` works.

use crate::shared::infrastructure::mailer::{Mailer, MailerError, OutgoingEmail, SentEmail};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
struct RelayMailbox {
    email: String,
    name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct RelaySendBody<'a> {
    from: &'a RelayMailbox,
    to: Vec<RelayMailbox>,
    subject: &'a str,
    text: &'a str,
    #[serde(rename = "HTML")]
    html: &'a str,
}

#[derive(Deserialize)]
struct RelaySendResponse {
    #[serde(rename = "ID")]
    id: String,
}

pub struct HttpMailRelay {
    client: Client,
    endpoint: String,
    from: RelayMailbox,
}

impl HttpMailRelay {
    pub fn new(base_url: &str, from: &str) -> Result<Self, MailerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| MailerError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/v1/send", base_url.trim_end_matches('/')),
            from: parse_mailbox(from),
        })
    }
}

/// Splits `Display Name <address>` into its parts. A bare address keeps an empty name.
fn parse_mailbox(value: &str) -> RelayMailbox {
    let value = value.trim();
    match (value.find('<'), value.rfind('>')) {
        (Some(open), Some(close)) if open < close => RelayMailbox {
            email: value[open + 1..close].trim().to_string(),
            name: value[..open].trim().trim_matches('"').to_string(),
        },
        _ => RelayMailbox {
            email: value.to_string(),
            name: String::new(),
        },
    }
}

#[async_trait]
impl Mailer for HttpMailRelay {
    async fn send(&self, email: OutgoingEmail) -> Result<SentEmail, MailerError> {
        let body = RelaySendBody {
            from: &self.from,
            to: vec![parse_mailbox(&email.to)],
            subject: &email.subject,
            text: &email.text,
            html: &email.html,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|err| MailerError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(MailerError::Rejected(format!("{status}: {detail}")));
        }

        let sent: RelaySendResponse = response
            .json()
            .await
            .map_err(|err| MailerError::Rejected(err.to_string()))?;
        Ok(SentEmail {
            message_id: sent.id,
        })
    }
}
