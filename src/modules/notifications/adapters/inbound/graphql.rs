use async_graphql::{Context, Error, Json, Object, Result as GqlResult, SimpleObject};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tracing::error;

use crate::modules::accounts::adapters::inbound::graphql::session;
use crate::modules::notifications::core::notification::{DEFAULT_PAGE_SIZE, Notification};
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlNotification {
    pub id: String,
    pub user_id: String,
    #[graphql(name = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub data: Json<Value>,
    pub read: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Notification> for GqlNotification {
    fn from(v: Notification) -> Self {
        Self {
            id: v.id,
            user_id: v.user_id,
            kind: v.kind.to_string(),
            title: v.title,
            message: v.message,
            data: Json(v.data),
            read: v.read,
            created_at: v.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: v.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

fn internal(message: &str, err: impl std::fmt::Display) -> Error {
    error!(error = %err, "{message}");
    Error::new(message)
}

#[derive(Default)]
pub struct NotificationsQuery;

#[Object]
impl NotificationsQuery {
    /// The caller's notifications, newest first. `limit` is capped at the default page size.
    async fn notifications(
        &self,
        context: &Context<'_>,
        limit: Option<i64>,
    ) -> GqlResult<Vec<GqlNotification>> {
        let principal = session(context)?;
        let state = context.data_unchecked::<AppState>();
        let limit = limit
            .map(|limit| limit.clamp(0, DEFAULT_PAGE_SIZE as i64) as usize)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let list = state
            .notifications
            .list_for_user(&principal.user_id, limit)
            .await
            .map_err(|err| internal("Failed to fetch notifications", err))?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    async fn unread_notification_count(&self, context: &Context<'_>) -> GqlResult<u64> {
        let principal = session(context)?;
        let state = context.data_unchecked::<AppState>();
        state
            .notifications
            .unread_count(&principal.user_id)
            .await
            .map_err(|err| internal("Failed to fetch notification count", err))
    }
}

#[derive(Default)]
pub struct NotificationsMutation;

#[Object]
impl NotificationsMutation {
    async fn mark_notification_read(
        &self,
        context: &Context<'_>,
        notification_id: String,
    ) -> GqlResult<bool> {
        let principal = session(context)?;
        let state = context.data_unchecked::<AppState>();
        state
            .notifications
            .mark_read(&principal.user_id, &notification_id, Utc::now())
            .await
            .map_err(|err| internal("Failed to mark notification as read", err))?;
        Ok(true)
    }

    async fn mark_all_notifications_read(&self, context: &Context<'_>) -> GqlResult<bool> {
        let principal = session(context)?;
        let state = context.data_unchecked::<AppState>();
        state
            .notifications
            .mark_all_read(&principal.user_id, Utc::now())
            .await
            .map_err(|err| internal("Failed to mark all notifications as read", err))?;
        Ok(true)
    }
}
