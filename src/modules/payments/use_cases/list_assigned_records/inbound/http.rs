use axum::{Json, extract::State};
use tracing::error;

use crate::modules::accounts::adapters::inbound::session::DistributorSession;
use crate::modules::payments::use_cases::list_assigned_records::projection::AssignedRecordView;
use crate::shell::api_error::ApiError;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    DistributorSession(distributor): DistributorSession,
) -> Result<Json<Vec<AssignedRecordView>>, ApiError> {
    match state.payment_queries.assigned_to(&distributor.user_id).await {
        Ok(records) => Ok(Json(records.into_iter().map(Into::into).collect())),
        Err(err) => {
            error!(distributor_id = %distributor.user_id, error = %err, "listing assigned records failed");
            Err(ApiError::internal("Failed to fetch records"))
        }
    }
}
