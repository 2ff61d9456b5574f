use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::modules::accounts::adapters::inbound::session::{USER_ID_HEADER, USER_ROLE_HEADER};
use crate::shell::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::shell::http::router;
use crate::tests::fixtures::records::batch_csv;
use crate::tests::fixtures::state::{TEST_CRON_SECRET, TestApp, make_test_app};
use crate::tests::fixtures::users::{admin, distributor};

const BOUNDARY: &str = "E2E-BOUNDARY";

fn test_app() -> TestApp {
    make_test_app(vec![
        admin("a-1", "Ada"),
        admin("a-2", "Otto"),
        distributor("d-1", "Ann"),
        distributor("d-2", "Ben"),
    ])
}

fn app(test_app: &TestApp) -> Router {
    router(test_app.state.clone(), DEFAULT_MAX_UPLOAD_BYTES)
}

fn role_of(user_id: &str) -> &'static str {
    if user_id.starts_with("a-") { "admin" } else { "distributor" }
}

fn upload(csv: &str, date: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"batch.csv\"\r\nContent-Type: text/csv\r\n\r\n{csv}\r\n\
         --{BOUNDARY}\r\nContent-Disposition: form-data; name=\"date\"\r\n\r\n{date}\r\n--{BOUNDARY}--\r\n"
    );
    Request::post("/upload")
        .header(USER_ID_HEADER, "a-1")
        .header(USER_ROLE_HEADER, "admin")
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

fn get_as(uri: &str, user_id: &str) -> Request<Body> {
    Request::get(uri)
        .header(USER_ID_HEADER, user_id)
        .header(USER_ROLE_HEADER, role_of(user_id))
        .body(Body::empty())
        .unwrap()
}

fn complete_as(record_id: &str, user_id: &str) -> Request<Body> {
    Request::post("/distributor/complete-payment")
        .header(USER_ID_HEADER, user_id)
        .header(USER_ROLE_HEADER, role_of(user_id))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "recordId": record_id }).to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response: Response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn record_ids(app: &Router, user_id: &str) -> Vec<String> {
    let (status, json) = send(app, get_as("/distributor/records", user_id)).await;
    assert_eq!(status, StatusCode::OK);
    json.as_array()
        .unwrap()
        .iter()
        .map(|record| record["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn distributes_a_batch_and_notifies_admins_when_a_distributor_finishes() {
    let test_app = test_app();
    let app = app(&test_app);

    let (status, summary) = send(&app, upload(&batch_csv(), "2024-01-15")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["recordsProcessed"], 3);

    let ann = record_ids(&app, "d-1").await;
    let ben = record_ids(&app, "d-2").await;
    assert_eq!((ann.len(), ben.len()), (2, 1));

    let (_, count) = send(&app, get_as("/notifications/count", "d-1")).await;
    assert_eq!(count, json!({ "count": 1 }));

    let (status, _) = send(&app, complete_as(&ben[0], "d-1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, complete_as(&ann[0], "d-1")).await;
    assert_eq!(status, StatusCode::OK);
    let (_, count) = send(&app, get_as("/notifications/count", "a-1")).await;
    assert_eq!(count["count"], 0);

    let (status, _) = send(&app, complete_as(&ann[1], "d-1")).await;
    assert_eq!(status, StatusCode::OK);
    for admin_id in ["a-1", "a-2"] {
        let (_, notifications) = send(&app, get_as("/notifications", admin_id)).await;
        assert_eq!(notifications[0]["type"], "task_completion");
        assert_eq!(notifications[0]["data"]["completedTasks"], 2);
    }

    let (_, stats) = send(&app, get_as("/stats", "a-1")).await;
    assert_eq!(stats["totalRecords"], 3);
    assert_eq!(stats["completedRecords"], 2);
    assert_eq!(stats["totalAmount"], 225.25);

    let (_, per_distributor) = send(&app, get_as("/distributor-stats", "a-1")).await;
    assert_eq!(per_distributor[0]["id"], "d-1");
    assert_eq!(per_distributor[0]["completionRate"], 100.0);
}

#[tokio::test]
async fn replaces_the_whole_day_on_re_upload() {
    let test_app = test_app();
    let app = app(&test_app);

    send(&app, upload(&batch_csv(), "2024-01-15")).await;
    let ann = record_ids(&app, "d-1").await;
    send(&app, complete_as(&ann[0], "d-1")).await;

    let replacement = "name,account,amount,bank,reference\nDan Brown,999,10.00,BNK009,Invoice 99";
    let (status, _) = send(&app, upload(replacement, "2024-01-15")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, stats) = send(&app, get_as("/stats", "a-1")).await;
    assert_eq!(stats["totalRecords"], 1);
    assert_eq!(stats["completedRecords"], 0);
    assert_eq!(record_ids(&app, "d-1").await.len(), 1);
    assert!(record_ids(&app, "d-2").await.is_empty());
}

#[tokio::test]
async fn reminds_distributors_about_yesterdays_pending_records() {
    let test_app = test_app();
    let app = app(&test_app);
    let yesterday = (Utc::now().date_naive() - Duration::days(1)).to_string();

    send(&app, upload(&batch_csv(), &yesterday)).await;
    let ben = record_ids(&app, "d-2").await;
    send(&app, complete_as(&ben[0], "d-2")).await;

    let sweep = Request::get("/cron/check-incomplete-tasks")
        .header("authorization", format!("Bearer {TEST_CRON_SECRET}"))
        .body(Body::empty())
        .unwrap();
    let (status, report) = send(&app, sweep).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["distributorsNotified"], 1);
    assert_eq!(report["totalIncompleteRecords"], 2);
    let (_, notifications) = send(&app, get_as("/notifications", "d-1")).await;
    assert_eq!(notifications[0]["type"], "task_reminder");
    assert_eq!(test_app.mailer.sent_to("d-2@example.com").await.len(), 1);
}
