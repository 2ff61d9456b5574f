// In-app notifications shown to a single user.
//
// Lifecycle
// - Appended by fan-out steps (upload, completion, overdue sweep).
// - Only the recipient changes it afterwards, by marking it read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Notifications returned by a listing when the caller does not ask for a size.
pub const DEFAULT_PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    TaskAssignment,
    TaskCompletion,
    TaskReminder,
    SystemAlert,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::TaskAssignment => "task_assignment",
            NotificationType::TaskCompletion => "task_completion",
            NotificationType::TaskReminder => "task_reminder",
            NotificationType::SystemAlert => "system_alert",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "task_assignment" => Ok(NotificationType::TaskAssignment),
            "task_completion" => Ok(NotificationType::TaskCompletion),
            "task_reminder" => Ok(NotificationType::TaskReminder),
            "system_alert" => Ok(NotificationType::SystemAlert),
            other => Err(format!("unknown notification type: {other}")),
        }
    }
}

/// What a fan-out step wants to tell one user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub user_id: String,
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub data: Value,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    pub fn create(id: impl Into<String>, new: NewNotification, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            user_id: new.user_id,
            kind: new.kind,
            title: new.title,
            message: new.message,
            data: new.data,
            read: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod notification_tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn it_should_create_unread_notifications() {
        let now = Utc::now();
        let notification = Notification::create(
            "n-1",
            NewNotification {
                user_id: "u-1".into(),
                kind: NotificationType::TaskReminder,
                title: "Title".into(),
                message: "Message".into(),
                data: json!({"incompleteCount": 2}),
            },
            now,
        );
        assert!(!notification.read);
        assert_eq!(notification.created_at, notification.updated_at);
    }

    #[rstest]
    fn it_should_serialize_the_kind_as_type() {
        let notification = Notification::create(
            "n-1",
            NewNotification {
                user_id: "u-1".into(),
                kind: NotificationType::TaskAssignment,
                title: "t".into(),
                message: "m".into(),
                data: json!({}),
            },
            Utc::now(),
        );
        let value = serde_json::to_value(&notification).unwrap();
        assert_eq!(value["type"], "task_assignment");
        assert_eq!(value["user_id"], "u-1");
        assert_eq!(value["read"], false);
    }

    #[rstest]
    #[case(NotificationType::TaskAssignment)]
    #[case(NotificationType::TaskCompletion)]
    #[case(NotificationType::TaskReminder)]
    #[case(NotificationType::SystemAlert)]
    fn it_should_parse_what_it_prints(#[case] kind: NotificationType) {
        assert_eq!(kind.as_str().parse::<NotificationType>(), Ok(kind));
    }
}
