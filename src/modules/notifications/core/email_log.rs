// Append-only audit trail of every email the platform tried to send.

use crate::modules::notifications::core::notification::NotificationType;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    Sent,
    Failed,
    Pending,
}

impl EmailStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailStatus::Sent => "sent",
            EmailStatus::Failed => "failed",
            EmailStatus::Pending => "pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailLogEntry {
    pub id: String,
    pub recipient_email: String,
    pub recipient_name: Option<String>,
    pub subject: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub status: EmailStatus,
    pub message_id: Option<String>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}
