use axum::{Json, extract::State};
use tracing::error;

use crate::modules::accounts::adapters::inbound::session::AdminSession;
use crate::modules::accounts::core::user::Role;
use crate::modules::payments::use_cases::dashboard_stats::projection::{
    DailyStats, DashboardStats, DistributorStats, daily_stats, dashboard_stats, distributor_stats,
};
use crate::shell::api_error::ApiError;
use crate::shell::state::AppState;

pub async fn stats(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Result<Json<DashboardStats>, ApiError> {
    let summaries = state.payment_queries.record_summaries().await.map_err(|err| {
        error!(error = %err, "loading dashboard stats failed");
        ApiError::internal("Internal server error")
    })?;
    Ok(Json(dashboard_stats(&summaries)))
}

pub async fn daily(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Result<Json<Vec<DailyStats>>, ApiError> {
    let summaries = state.payment_queries.record_summaries().await.map_err(|err| {
        error!(error = %err, "loading daily stats failed");
        ApiError::internal("Failed to fetch daily stats")
    })?;
    Ok(Json(daily_stats(&summaries)))
}

pub async fn distributors(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Result<Json<Vec<DistributorStats>>, ApiError> {
    let failed = |err: &dyn std::fmt::Display| {
        error!(error = %err, "loading distributor stats failed");
        ApiError::internal("Failed to fetch distributor stats")
    };
    let summaries = state
        .payment_queries
        .record_summaries()
        .await
        .map_err(|err| failed(&err))?;
    let roster = state
        .users
        .list_by_role(Role::Distributor)
        .await
        .map_err(|err| failed(&err))?;
    Ok(Json(distributor_stats(&summaries, &roster)))
}
