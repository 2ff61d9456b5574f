// SQLite implementation of the notification and email log ports.

use crate::modules::notifications::core::email_log::EmailLogEntry;
use crate::modules::notifications::core::notification::Notification;
use crate::modules::notifications::core::ports::{EmailLogRepository, NotificationRepository};
use crate::shared::core::repository_error::RepositoryError;
use crate::shared::infrastructure::database::{decode_timestamp, encode_timestamp};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct NotificationRow {
    id: String,
    user_id: String,
    #[sqlx(rename = "type")]
    kind: String,
    title: String,
    message: String,
    data: String,
    read: bool,
    created_at: String,
    updated_at: String,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = RepositoryError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Ok(Notification {
            kind: row.kind.parse().map_err(RepositoryError::Corrupt)?,
            data: serde_json::from_str(&row.data)
                .map_err(|err| RepositoryError::Corrupt(format!("notification data: {err}")))?,
            created_at: decode_timestamp(&row.created_at)?,
            updated_at: decode_timestamp(&row.updated_at)?,
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            message: row.message,
            read: row.read,
        })
    }
}

pub struct SqliteNotifications {
    pool: SqlitePool,
}

impl SqliteNotifications {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for SqliteNotifications {
    async fn create(&self, notification: Notification) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO notifications (id, user_id, type, title, message, data, read, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&notification.id)
        .bind(&notification.user_id)
        .bind(notification.kind.as_str())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.data.to_string())
        .bind(notification.read)
        .bind(encode_timestamp(notification.created_at))
        .bind(encode_timestamp(notification.updated_at))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let rows: Vec<NotificationRow> = sqlx::query_as(
            "SELECT id, user_id, type, title, message, data, read, created_at, updated_at
             FROM notifications WHERE user_id = ?
             ORDER BY created_at DESC, rowid DESC LIMIT ?",
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Notification::try_from).collect()
    }

    async fn mark_read(
        &self,
        user_id: &str,
        notification_id: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE notifications SET read = 1, updated_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(encode_timestamp(at))
        .bind(notification_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn mark_all_read(&self, user_id: &str, at: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "UPDATE notifications SET read = 1, updated_at = ? WHERE user_id = ? AND read = 0",
        )
        .bind(encode_timestamp(at))
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn unread_count(&self, user_id: &str) -> Result<u64, RepositoryError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM notifications WHERE user_id = ? AND read = 0")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count.max(0) as u64)
    }
}

pub struct SqliteEmailLog {
    pool: SqlitePool,
}

impl SqliteEmailLog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmailLogRepository for SqliteEmailLog {
    async fn append(&self, entry: EmailLogEntry) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO email_logs
                (id, recipient_email, recipient_name, subject, type, status, message_id, error_message, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.id)
        .bind(&entry.recipient_email)
        .bind(&entry.recipient_name)
        .bind(&entry.subject)
        .bind(entry.kind.as_str())
        .bind(entry.status.as_str())
        .bind(&entry.message_id)
        .bind(&entry.error_message)
        .bind(encode_timestamp(entry.created_at))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
