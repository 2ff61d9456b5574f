// PATCH /notifications
//
// Marking a notification the caller does not own succeeds without touching it,
// so the response never reveals whether the id exists.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::{debug, error};

use crate::modules::accounts::core::principal::Principal;
use crate::modules::notifications::use_cases::update_read_state::command::{
    ReadStateChange, ReadStateRequest,
};
use crate::shell::api_error::ApiError;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    principal: Principal,
    body: Result<Json<ReadStateRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body.map_err(|_| ApiError::validation("Invalid JSON body"))?;
    let change = ReadStateChange::try_from(body).map_err(|err| ApiError::validation(err.to_string()))?;

    match change {
        ReadStateChange::MarkRead { notification_id } => {
            let updated = state
                .notifications
                .mark_read(&principal.user_id, &notification_id, Utc::now())
                .await
                .map_err(|err| {
                    error!(user_id = %principal.user_id, %notification_id, error = %err, "marking notification read failed");
                    ApiError::internal("Failed to mark notification as read")
                })?;
            if !updated {
                debug!(user_id = %principal.user_id, %notification_id, "mark read matched no owned notification");
            }
        }
        ReadStateChange::MarkAllRead => {
            state
                .notifications
                .mark_all_read(&principal.user_id, Utc::now())
                .await
                .map_err(|err| {
                    error!(user_id = %principal.user_id, error = %err, "marking all notifications read failed");
                    ApiError::internal("Failed to mark all notifications as read")
                })?;
        }
    }
    Ok(Json(json!({ "success": true })))
}
