// In memory implementation of the notification and email log ports.

use crate::modules::notifications::core::email_log::EmailLogEntry;
use crate::modules::notifications::core::notification::Notification;
use crate::modules::notifications::core::ports::{EmailLogRepository, NotificationRepository};
use crate::shared::core::repository_error::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryNotifications {
    rows: RwLock<Vec<Notification>>,
    is_offline: bool,
}

impl InMemoryNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn all(&self) -> Vec<Notification> {
        self.rows.read().await.clone()
    }

    fn ensure_online(&self) -> Result<(), RepositoryError> {
        if self.is_offline {
            return Err(RepositoryError::Backend("Notification store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotifications {
    async fn create(&self, notification: Notification) -> Result<(), RepositoryError> {
        self.ensure_online()?;
        self.rows.write().await.push(notification);
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<Notification>, RepositoryError> {
        self.ensure_online()?;
        let rows = self.rows.read().await;
        // Rows are appended in creation order, so walking backwards yields newest first.
        let mut mine: Vec<Notification> = rows
            .iter()
            .rev()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        mine.truncate(limit);
        Ok(mine)
    }

    async fn mark_read(
        &self,
        user_id: &str,
        notification_id: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        self.ensure_online()?;
        let mut rows = self.rows.write().await;
        match rows
            .iter_mut()
            .find(|row| row.id == notification_id && row.user_id == user_id)
        {
            Some(row) => {
                row.read = true;
                row.updated_at = at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_read(&self, user_id: &str, at: DateTime<Utc>) -> Result<u64, RepositoryError> {
        self.ensure_online()?;
        let mut rows = self.rows.write().await;
        let mut flipped = 0;
        for row in rows.iter_mut().filter(|row| row.user_id == user_id && !row.read) {
            row.read = true;
            row.updated_at = at;
            flipped += 1;
        }
        Ok(flipped)
    }

    async fn unread_count(&self, user_id: &str) -> Result<u64, RepositoryError> {
        self.ensure_online()?;
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter(|row| row.user_id == user_id && !row.read)
            .count() as u64)
    }
}

#[derive(Default)]
pub struct InMemoryEmailLog {
    entries: RwLock<Vec<EmailLogEntry>>,
    is_offline: bool,
}

impl InMemoryEmailLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn entries(&self) -> Vec<EmailLogEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl EmailLogRepository for InMemoryEmailLog {
    async fn append(&self, entry: EmailLogEntry) -> Result<(), RepositoryError> {
        if self.is_offline {
            return Err(RepositoryError::Backend("Email log offline".into()));
        }
        self.entries.write().await.push(entry);
        Ok(())
    }
}
