use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::error;

use crate::modules::accounts::adapters::inbound::session::DistributorSession;
use crate::modules::payments::use_cases::complete_payment::command::CompletePayment;
use crate::modules::payments::use_cases::complete_payment::handler::CompletionError;
use crate::shell::api_error::ApiError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletePaymentBody {
    pub record_id: Option<String>,
}

pub async fn handle(
    State(state): State<AppState>,
    DistributorSession(distributor): DistributorSession,
    body: Result<Json<CompletePaymentBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body.map_err(|_| ApiError::validation("Invalid JSON body"))?;
    let record_id = body
        .record_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::validation("Record ID is required"))?;

    let command = CompletePayment {
        record_id,
        distributor_id: distributor.user_id,
        distributor_name: distributor.name,
        distributor_email: distributor.email,
    };

    match state.complete_handler.handle(command).await {
        Ok(_) => Ok(Json(json!({ "success": true }))),
        Err(CompletionError::Rejected(reason)) => Err(ApiError::not_found(reason.to_string())),
        Err(CompletionError::Repository(err)) => {
            error!(error = %err, "completion failed");
            Err(ApiError::internal("Failed to update record"))
        }
    }
}

#[cfg(test)]
mod complete_payment_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::post,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::modules::accounts::adapters::inbound::session::{USER_ID_HEADER, USER_ROLE_HEADER};
    use crate::modules::payments::core::ports::PaymentBatchRepository;
    use crate::shell::state::AppState;
    use crate::tests::fixtures::records::{assignment_for, date, records_on};
    use crate::tests::fixtures::state::{TestApp, make_test_app};
    use crate::tests::fixtures::users::{admin, distributor};

    use super::handle;

    async fn seeded_app() -> TestApp {
        let test_app = make_test_app(vec![
            admin("a-1", "Ada"),
            distributor("d-1", "Ann"),
            distributor("d-2", "Ben"),
        ]);
        let records = records_on("r", date("2024-01-15"), 2);
        let assignments = vec![
            assignment_for(&records[0], "d-1"),
            assignment_for(&records[1], "d-2"),
        ];
        test_app
            .store
            .replace_batch(date("2024-01-15"), records, assignments)
            .await
            .unwrap();
        test_app
    }

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/distributor/complete-payment", post(handle))
            .with_state(state)
    }

    fn request(user_id: &str, role: &str, body: &str) -> Request<Body> {
        Request::post("/distributor/complete-payment")
            .header(USER_ID_HEADER, user_id)
            .header(USER_ROLE_HEADER, role)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn error_message(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        json["error"].as_str().unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn it_should_return_200_when_completing_an_assigned_record() {
        let test_app = seeded_app().await;
        let response = app(test_app.state.clone())
            .oneshot(request("d-1", "distributor", r#"{"recordId":"r-1"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true }));
        assert_eq!(test_app.mailer.sent_to("a-1@example.com").await.len(), 1);
    }

    #[tokio::test]
    async fn it_should_return_404_for_a_record_assigned_to_someone_else() {
        let response = app(seeded_app().await.state)
            .oneshot(request("d-1", "distributor", r#"{"recordId":"r-2"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            error_message(response).await,
            "Record not found or not assigned to you"
        );
    }

    #[tokio::test]
    async fn it_should_return_400_when_the_record_id_is_missing() {
        let response = app(seeded_app().await.state)
            .oneshot(request("d-1", "distributor", r#"{}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_message(response).await, "Record ID is required");
    }

    #[tokio::test]
    async fn it_should_return_400_on_invalid_json() {
        let response = app(seeded_app().await.state)
            .oneshot(request("d-1", "distributor", "not-json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn it_should_return_401_for_an_admin() {
        let response = app(seeded_app().await.state)
            .oneshot(request("a-1", "admin", r#"{"recordId":"r-1"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn it_should_return_500_when_the_store_is_offline() {
        let test_app = TestApp::builder(vec![distributor("d-1", "Ann")])
            .offline_store()
            .build();
        let response = app(test_app.state)
            .oneshot(request("d-1", "distributor", r#"{"recordId":"r-1"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_message(response).await, "Failed to update record");
    }
}
