// Shared notification fixtures.

use crate::modules::notifications::core::notification::{
    NewNotification, Notification, NotificationType,
};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};

pub struct NotificationBuilder {
    id: String,
    created_at: DateTime<Utc>,
    inner: NewNotification,
}

impl Default for NotificationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl NotificationBuilder {
    pub fn new() -> Self {
        Self {
            id: "notif-fixed-0001".to_string(),
            created_at: Utc::now(),
            inner: NewNotification {
                user_id: "user-fixed-0001".to_string(),
                kind: NotificationType::TaskAssignment,
                title: "New Tasks Assigned".to_string(),
                message: "You have been assigned 2 new payment tasks for 2024-01-15".to_string(),
                data: json!({ "taskCount": 2, "paymentDate": "2024-01-15" }),
            },
        }
    }

    pub fn id(mut self, v: &str) -> Self {
        self.id = v.to_string();
        self
    }

    pub fn user_id(mut self, v: &str) -> Self {
        self.inner.user_id = v.to_string();
        self
    }

    pub fn kind(mut self, v: NotificationType) -> Self {
        self.inner.kind = v;
        self
    }

    pub fn data(mut self, v: Value) -> Self {
        self.inner.data = v;
        self
    }

    pub fn created_at(mut self, v: DateTime<Utc>) -> Self {
        self.created_at = v;
        self
    }

    pub fn build(self) -> Notification {
        Notification::create(self.id, self.inner, self.created_at)
    }
}
