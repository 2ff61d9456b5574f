use axum::{Json, extract::State};
use tracing::error;

use crate::modules::accounts::core::principal::Principal;
use crate::modules::notifications::core::notification::{DEFAULT_PAGE_SIZE, Notification};
use crate::shell::api_error::ApiError;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<Vec<Notification>>, ApiError> {
    match state
        .notifications
        .list_for_user(&principal.user_id, DEFAULT_PAGE_SIZE)
        .await
    {
        Ok(notifications) => Ok(Json(notifications)),
        Err(err) => {
            error!(user_id = %principal.user_id, error = %err, "listing notifications failed");
            Err(ApiError::internal("Failed to fetch notifications"))
        }
    }
}
