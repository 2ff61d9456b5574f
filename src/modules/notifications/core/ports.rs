use crate::modules::notifications::core::email_log::EmailLogEntry;
use crate::modules::notifications::core::notification::Notification;
use crate::shared::core::repository_error::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: Notification) -> Result<(), RepositoryError>;

    /// Newest first, at most `limit` rows.
    async fn list_for_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<Notification>, RepositoryError>;

    /// Marks one of the user's notifications read. Returns false when the user owns no
    /// notification with that id.
    async fn mark_read(
        &self,
        user_id: &str,
        notification_id: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError>;

    /// Returns how many notifications flipped from unread to read.
    async fn mark_all_read(&self, user_id: &str, at: DateTime<Utc>) -> Result<u64, RepositoryError>;

    async fn unread_count(&self, user_id: &str) -> Result<u64, RepositoryError>;
}

#[async_trait]
pub trait EmailLogRepository: Send + Sync {
    async fn append(&self, entry: EmailLogEntry) -> Result<(), RepositoryError>;
}
