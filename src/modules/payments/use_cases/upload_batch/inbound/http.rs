use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info};

use crate::modules::accounts::adapters::inbound::session::AdminSession;
use crate::modules::payments::use_cases::upload_batch::command::UploadBatch;
use crate::modules::payments::use_cases::upload_batch::distribute::DistributionError;
use crate::modules::payments::use_cases::upload_batch::handler::UploadError;
use crate::shell::api_error::ApiError;
use crate::shell::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadBatchResponse {
    pub success: bool,
    pub records_processed: usize,
    pub distributors_assigned: usize,
    pub payment_date: String,
}

#[derive(Default)]
struct UploadForm {
    file: Option<Vec<u8>>,
    date: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::validation("Invalid form data"))?
    {
        match field.name() {
            Some("file") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::validation("Invalid form data"))?;
                form.file = Some(bytes.to_vec());
            }
            Some("date") => {
                let text = field
                    .text()
                    .await
                    .map_err(|_| ApiError::validation("Invalid form data"))?;
                form.date = Some(text);
            }
            _ => {}
        }
    }
    Ok(form)
}

fn upload_error_to_api(err: UploadError) -> ApiError {
    match err {
        UploadError::Ingest(ingest) => ApiError::validation(ingest.to_string()),
        UploadError::Distribution(DistributionError::NoDistributors) => {
            error!("upload failed, no distributors found");
            ApiError::internal("No distributors found")
        }
        UploadError::Repository(repository) => {
            error!(error = %repository, "upload failed while saving the batch");
            ApiError::internal("Failed to save records")
        }
    }
}

pub async fn handle(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadBatchResponse>, ApiError> {
    let multipart = multipart.map_err(|_| ApiError::validation("Invalid form data"))?;
    let form = read_form(multipart).await?;

    let file = form
        .file
        .ok_or_else(|| ApiError::validation("No file provided"))?;
    let date = form
        .date
        .map(|date| date.trim().to_string())
        .filter(|date| !date.is_empty())
        .ok_or_else(|| ApiError::validation("Payment date is required"))?;
    let payment_date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| ApiError::validation("Payment date must be formatted as YYYY-MM-DD"))?;
    let csv_text =
        String::from_utf8(file).map_err(|_| ApiError::validation("CSV file must be UTF-8 text"))?;

    info!(admin_id = %admin.user_id, %payment_date, "batch upload received");
    let summary = state
        .upload_handler
        .handle(UploadBatch {
            payment_date,
            csv_text,
        })
        .await
        .map_err(upload_error_to_api)?;

    Ok(Json(UploadBatchResponse {
        success: true,
        records_processed: summary.records_processed,
        distributors_assigned: summary.distributors_assigned,
        payment_date: summary.payment_date.to_string(),
    }))
}

#[cfg(test)]
mod upload_batch_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::post,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::modules::accounts::adapters::inbound::session::{USER_ID_HEADER, USER_ROLE_HEADER};
    use crate::modules::payments::core::ports::PaymentQueries;
    use crate::shell::state::AppState;
    use crate::tests::fixtures::records::batch_csv;
    use crate::tests::fixtures::state::{TestApp, make_test_app};
    use crate::tests::fixtures::users::{admin, distributor};

    use super::handle;

    const BOUNDARY: &str = "X-UPLOAD-BOUNDARY";

    fn app(state: AppState) -> Router {
        Router::new().route("/upload", post(handle)).with_state(state)
    }

    fn test_app() -> TestApp {
        make_test_app(vec![
            admin("a-1", "Ada"),
            distributor("d-1", "Ann"),
            distributor("d-2", "Ben"),
        ])
    }

    fn multipart_body(file: Option<&str>, date: Option<&str>) -> Body {
        let mut body = String::new();
        if let Some(file) = file {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"batch.csv\"\r\nContent-Type: text/csv\r\n\r\n{file}\r\n"
            ));
        }
        if let Some(date) = date {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"date\"\r\n\r\n{date}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        Body::from(body)
    }

    fn upload_request(role: &str, body: Body) -> Request<Body> {
        Request::post("/upload")
            .header(USER_ID_HEADER, if role == "admin" { "a-1" } else { "d-1" })
            .header(USER_ROLE_HEADER, role)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(body)
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn it_should_return_200_with_the_upload_summary() {
        let test_app = test_app();
        let response = app(test_app.state.clone())
            .oneshot(upload_request(
                "admin",
                multipart_body(Some(&batch_csv()), Some("2024-01-15")),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({
                "success": true,
                "recordsProcessed": 3,
                "distributorsAssigned": 2,
                "paymentDate": "2024-01-15"
            })
        );
        assert_eq!(test_app.store.record_summaries().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn it_should_return_401_for_a_distributor() {
        let response = app(test_app().state)
            .oneshot(upload_request(
                "distributor",
                multipart_body(Some(&batch_csv()), Some("2024-01-15")),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn it_should_return_400_when_the_file_is_missing() {
        let response = app(test_app().state)
            .oneshot(upload_request("admin", multipart_body(None, Some("2024-01-15"))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "No file provided");
    }

    #[tokio::test]
    async fn it_should_return_400_when_the_date_is_missing() {
        let response = app(test_app().state)
            .oneshot(upload_request("admin", multipart_body(Some(&batch_csv()), None)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Payment date is required");
    }

    #[tokio::test]
    async fn it_should_return_400_when_the_date_is_not_a_calendar_date() {
        let response = app(test_app().state)
            .oneshot(upload_request(
                "admin",
                multipart_body(Some(&batch_csv()), Some("15/01/2024")),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn it_should_return_400_when_the_csv_has_no_data_rows() {
        let response = app(test_app().state)
            .oneshot(upload_request(
                "admin",
                multipart_body(Some("recipient_name,account_number"), Some("2024-01-15")),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"],
            "CSV file must contain header and data rows"
        );
    }

    #[tokio::test]
    async fn it_should_return_500_when_no_distributors_exist() {
        let response = app(make_test_app(vec![admin("a-1", "Ada")]).state)
            .oneshot(upload_request(
                "admin",
                multipart_body(Some(&batch_csv()), Some("2024-01-15")),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"], "No distributors found");
    }

    #[tokio::test]
    async fn it_should_return_500_without_detail_when_the_store_is_offline() {
        let test_app = TestApp::builder(vec![admin("a-1", "Ada"), distributor("d-1", "Ann")])
            .offline_store()
            .build();
        let response = app(test_app.state)
            .oneshot(upload_request(
                "admin",
                multipart_body(Some(&batch_csv()), Some("2024-01-15")),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"], "Failed to save records");
    }

    #[tokio::test]
    async fn it_should_return_400_when_the_body_is_not_multipart() {
        let response = app(test_app().state)
            .oneshot(
                Request::post("/upload")
                    .header(USER_ID_HEADER, "a-1")
                    .header(USER_ROLE_HEADER, "admin")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
