use serde::Deserialize;
use thiserror::Error;

/// PATCH /notifications body as sent by the dashboard.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadStateRequest {
    pub action: Option<String>,
    pub notification_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadStateChange {
    MarkRead { notification_id: String },
    MarkAllRead,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid action")]
pub struct InvalidAction;

impl TryFrom<ReadStateRequest> for ReadStateChange {
    type Error = InvalidAction;

    fn try_from(request: ReadStateRequest) -> Result<Self, Self::Error> {
        let notification_id = request.notification_id.filter(|id| !id.trim().is_empty());
        match (request.action.as_deref(), notification_id) {
            (Some("mark_read"), Some(notification_id)) => Ok(ReadStateChange::MarkRead { notification_id }),
            (Some("mark_all_read"), _) => Ok(ReadStateChange::MarkAllRead),
            _ => Err(InvalidAction),
        }
    }
}
