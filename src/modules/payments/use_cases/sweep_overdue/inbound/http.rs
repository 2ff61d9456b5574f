// GET /cron/check-incomplete-tasks
//
// Called by an external scheduler. The caller must present the configured
// CRON_SECRET as a bearer token; without a configured secret every call is refused.

use axum::{Json, extract::State, http::HeaderMap, http::header::AUTHORIZATION};
use chrono::Utc;
use serde::Serialize;
use tracing::{error, warn};

use crate::modules::payments::use_cases::sweep_overdue::command::SweepOverdue;
use crate::shell::api_error::ApiError;
use crate::shell::state::AppState;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SweepResponse {
    Idle {
        message: &'static str,
    },
    #[serde(rename_all = "camelCase")]
    Swept {
        success: bool,
        distributors_notified: usize,
        total_incomplete_records: usize,
        date: String,
    },
}

fn constant_time_eq(expected: &str, presented: &str) -> bool {
    let expected = expected.as_bytes();
    let presented = presented.as_bytes();
    let mut diff = expected.len() ^ presented.len();
    for index in 0..expected.len().max(presented.len()) {
        let left = expected.get(index).copied().unwrap_or(0);
        let right = presented.get(index).copied().unwrap_or(0);
        diff |= usize::from(left ^ right);
    }
    diff == 0
}

fn authorize(headers: &HeaderMap, secret: Option<&str>) -> Result<(), ApiError> {
    let Some(secret) = secret else {
        warn!("sweep refused, CRON_SECRET is not configured");
        return Err(ApiError::Unauthorized);
    };
    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .unwrap_or_default();
    if constant_time_eq(secret, presented.trim()) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}

pub async fn handle(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SweepResponse>, ApiError> {
    authorize(&headers, state.cron_secret.as_deref())?;

    let command = SweepOverdue {
        today: Utc::now().date_naive(),
    };
    let report = state.sweep_handler.handle(command).await.map_err(|err| {
        error!(error = %err, "overdue sweep failed");
        ApiError::internal("Internal server error")
    })?;

    if report.is_empty() {
        return Ok(Json(SweepResponse::Idle {
            message: "No incomplete tasks found",
        }));
    }
    Ok(Json(SweepResponse::Swept {
        success: true,
        distributors_notified: report.distributors_notified,
        total_incomplete_records: report.total_incomplete_records,
        date: report.payment_date.to_string(),
    }))
}
