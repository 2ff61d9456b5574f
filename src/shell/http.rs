use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Extension, Router,
    extract::DefaultBodyLimit,
    http::HeaderMap,
    response::Html,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::modules::accounts::adapters::inbound::session::principal_from_headers;
use crate::modules::notifications::use_cases::count_unread::inbound::http as count_unread_http;
use crate::modules::notifications::use_cases::list_notifications::inbound::http as list_notifications_http;
use crate::modules::notifications::use_cases::update_read_state::inbound::http as update_read_state_http;
use crate::modules::payments::use_cases::complete_payment::inbound::http as complete_payment_http;
use crate::modules::payments::use_cases::dashboard_stats::inbound::http as dashboard_stats_http;
use crate::modules::payments::use_cases::list_assigned_records::inbound::http as list_assigned_records_http;
use crate::modules::payments::use_cases::sweep_overdue::inbound::http as sweep_overdue_http;
use crate::modules::payments::use_cases::upload_batch::inbound::http as upload_batch_http;
use crate::shell::graphql::{AppSchema, build_schema};
use crate::shell::state::AppState;

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    let schema = build_schema(state.clone());

    Router::new()
        .route(
            "/upload",
            post(upload_batch_http::handle).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/stats", get(dashboard_stats_http::stats))
        .route("/daily-stats", get(dashboard_stats_http::daily))
        .route("/distributor-stats", get(dashboard_stats_http::distributors))
        .route("/distributor/records", get(list_assigned_records_http::handle))
        .route("/distributor/complete-payment", post(complete_payment_http::handle))
        .route(
            "/notifications",
            get(list_notifications_http::handle).patch(update_read_state_http::handle),
        )
        .route("/notifications/count", get(count_unread_http::handle))
        .route("/cron/check-incomplete-tasks", get(sweep_overdue_http::handle))
        .route("/gql", get(graphiql).post(graphql))
        .layer(Extension(schema))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn graphql(
    Extension(schema): Extension<AppSchema>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();
    if let Some(principal) = principal_from_headers(&headers) {
        request = request.data(principal);
    }
    schema.execute(request).await.into()
}

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/gql").finish())
}
