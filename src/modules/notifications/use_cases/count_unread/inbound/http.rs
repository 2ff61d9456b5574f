use axum::{Json, extract::State};
use serde::Serialize;
use tracing::error;

use crate::modules::accounts::core::principal::Principal;
use crate::shell::api_error::ApiError;
use crate::shell::state::AppState;

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: u64,
}

pub async fn handle(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<UnreadCount>, ApiError> {
    match state.notifications.unread_count(&principal.user_id).await {
        Ok(count) => Ok(Json(UnreadCount { count })),
        Err(err) => {
            error!(user_id = %principal.user_id, error = %err, "counting unread notifications failed");
            Err(ApiError::internal("Failed to fetch notification count"))
        }
    }
}
