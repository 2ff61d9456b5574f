use async_graphql::{Context, Error, Object, Result as GqlResult, SimpleObject};
use chrono::SecondsFormat;
use tracing::error;

use crate::modules::accounts::adapters::inbound::graphql::session_with_role;
use crate::modules::accounts::core::user::Role;
use crate::modules::payments::use_cases::complete_payment::command::CompletePayment;
use crate::modules::payments::use_cases::complete_payment::handler::CompletionError;
use crate::modules::payments::use_cases::dashboard_stats::projection::{
    DailyStats, DashboardStats, DistributorStats, daily_stats, dashboard_stats, distributor_stats,
};
use crate::modules::payments::use_cases::list_assigned_records::projection::AssignedRecordView;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlDashboardStats {
    pub total_records: usize,
    pub distributed_records: usize,
    pub pending_records: usize,
    pub completed_records: usize,
    pub total_amount: f64,
    pub completion_rate: f64,
    pub last_upload: Option<String>,
}

impl From<DashboardStats> for GqlDashboardStats {
    fn from(v: DashboardStats) -> Self {
        Self {
            total_records: v.total_records,
            distributed_records: v.distributed_records,
            pending_records: v.pending_records,
            completed_records: v.completed_records,
            total_amount: v.total_amount,
            completion_rate: v.completion_rate,
            last_upload: v
                .last_upload
                .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlDailyStats {
    pub date: String,
    pub total_records: usize,
    pub completed_records: usize,
    pub total_amount: f64,
}

impl From<DailyStats> for GqlDailyStats {
    fn from(v: DailyStats) -> Self {
        Self {
            date: v.date,
            total_records: v.total_records,
            completed_records: v.completed_records,
            total_amount: v.total_amount,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlDistributorStats {
    pub id: String,
    pub name: String,
    pub email: String,
    pub assigned_records: usize,
    pub completed_records: usize,
    pub total_amount: f64,
    pub completion_rate: f64,
}

impl From<DistributorStats> for GqlDistributorStats {
    fn from(v: DistributorStats) -> Self {
        Self {
            id: v.id,
            name: v.name,
            email: v.email,
            assigned_records: v.assigned_records,
            completed_records: v.completed_records,
            total_amount: v.total_amount,
            completion_rate: v.completion_rate,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlAssignedRecord {
    pub id: String,
    pub recipient_name: String,
    pub account_number: String,
    pub amount: f64,
    pub bank_code: String,
    pub reference: String,
    pub status: String,
    pub assigned_date: String,
    pub payment_date: String,
}

impl From<AssignedRecordView> for GqlAssignedRecord {
    fn from(v: AssignedRecordView) -> Self {
        Self {
            id: v.id,
            recipient_name: v.recipient_name,
            account_number: v.account_number,
            amount: v.amount,
            bank_code: v.bank_code,
            reference: v.reference,
            status: v.status.to_string(),
            assigned_date: v.assigned_date.to_rfc3339_opts(SecondsFormat::Millis, true),
            payment_date: v.payment_date,
        }
    }
}

fn internal(message: &str, err: impl std::fmt::Display) -> Error {
    error!(error = %err, "{message}");
    Error::new(message)
}

#[derive(Default)]
pub struct PaymentsQuery;

#[Object]
impl PaymentsQuery {
    async fn dashboard_stats(&self, context: &Context<'_>) -> GqlResult<GqlDashboardStats> {
        session_with_role(context, Role::Admin)?;
        let state = context.data_unchecked::<AppState>();
        let summaries = state
            .payment_queries
            .record_summaries()
            .await
            .map_err(|err| internal("Internal server error", err))?;
        Ok(dashboard_stats(&summaries).into())
    }

    async fn daily_stats(&self, context: &Context<'_>) -> GqlResult<Vec<GqlDailyStats>> {
        session_with_role(context, Role::Admin)?;
        let state = context.data_unchecked::<AppState>();
        let summaries = state
            .payment_queries
            .record_summaries()
            .await
            .map_err(|err| internal("Failed to fetch daily stats", err))?;
        Ok(daily_stats(&summaries).into_iter().map(Into::into).collect())
    }

    async fn distributor_stats(&self, context: &Context<'_>) -> GqlResult<Vec<GqlDistributorStats>> {
        session_with_role(context, Role::Admin)?;
        let state = context.data_unchecked::<AppState>();
        let summaries = state
            .payment_queries
            .record_summaries()
            .await
            .map_err(|err| internal("Failed to fetch distributor stats", err))?;
        let roster = state
            .users
            .list_by_role(Role::Distributor)
            .await
            .map_err(|err| internal("Failed to fetch distributor stats", err))?;
        Ok(distributor_stats(&summaries, &roster)
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn assigned_records(&self, context: &Context<'_>) -> GqlResult<Vec<GqlAssignedRecord>> {
        let distributor = session_with_role(context, Role::Distributor)?;
        let state = context.data_unchecked::<AppState>();
        let records = state
            .payment_queries
            .assigned_to(&distributor.user_id)
            .await
            .map_err(|err| internal("Failed to fetch records", err))?;
        Ok(records
            .into_iter()
            .map(|assigned| AssignedRecordView::from(assigned).into())
            .collect())
    }
}

#[derive(Default)]
pub struct PaymentsMutation;

#[Object]
impl PaymentsMutation {
    async fn complete_payment(&self, context: &Context<'_>, record_id: String) -> GqlResult<bool> {
        let distributor = session_with_role(context, Role::Distributor)?;
        if record_id.trim().is_empty() {
            return Err(Error::new("Record ID is required"));
        }
        let state = context.data_unchecked::<AppState>();
        let command = CompletePayment {
            record_id,
            distributor_id: distributor.user_id.clone(),
            distributor_name: distributor.name.clone(),
            distributor_email: distributor.email.clone(),
        };
        match state.complete_handler.handle(command).await {
            Ok(_) => Ok(true),
            Err(CompletionError::Rejected(reason)) => Err(Error::new(reason.to_string())),
            Err(CompletionError::Repository(err)) => Err(internal("Failed to update record", err)),
        }
    }
}
