// Upload flow: parse, load roster, distribute, replace the day's batch, notify.
//
// Responsibilities
// - Reject an empty batch or an empty roster before anything is written, so the
//   previous batch for the date survives a failed upload.
// - Store records and assignments for the date in one atomic replace.
// - Tell each distributor who received records about the new tasks. Delivery is
//   best effort and never fails the upload.

use crate::modules::accounts::core::ports::UserDirectory;
use crate::modules::accounts::core::user::{Role, UserAccount};
use crate::modules::notifications::core::notification::{NewNotification, NotificationType};
use crate::modules::notifications::core::templates::{self, TaskLine};
use crate::modules::notifications::use_cases::dispatch::handler::NotificationDispatcher;
use crate::modules::payments::core::assignment::Assignment;
use crate::modules::payments::core::ports::PaymentBatchRepository;
use crate::modules::payments::core::record::PaymentRecord;
use crate::modules::payments::use_cases::upload_batch::command::UploadBatch;
use crate::modules::payments::use_cases::upload_batch::distribute::{DistributionError, assign};
use crate::modules::payments::use_cases::upload_batch::parse::{IngestError, parse_batch};
use crate::shared::core::repository_error::RepositoryError;
use chrono::{NaiveDate, Utc};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Distribution(#[from] DistributionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    pub records_processed: usize,
    pub distributors_assigned: usize,
    pub payment_date: NaiveDate,
    pub replaced_records: usize,
}

pub struct UploadBatchHandler {
    batches: Arc<dyn PaymentBatchRepository>,
    users: Arc<dyn UserDirectory>,
    dispatcher: Arc<NotificationDispatcher>,
    app_url: String,
}

impl UploadBatchHandler {
    pub fn new(
        batches: Arc<dyn PaymentBatchRepository>,
        users: Arc<dyn UserDirectory>,
        dispatcher: Arc<NotificationDispatcher>,
        app_url: impl Into<String>,
    ) -> Self {
        Self {
            batches,
            users,
            dispatcher,
            app_url: app_url.into(),
        }
    }

    pub async fn handle(&self, command: UploadBatch) -> Result<UploadSummary, UploadError> {
        let drafts = parse_batch(&command.csv_text)?;
        let roster = self.users.list_by_role(Role::Distributor).await?;
        if roster.is_empty() {
            warn!(payment_date = %command.payment_date, "upload rejected, no distributors in roster");
            return Err(DistributionError::NoDistributors.into());
        }

        let uploaded_at = Utc::now();
        let records: Vec<PaymentRecord> = drafts
            .into_iter()
            .map(|draft| {
                PaymentRecord::from_draft(
                    Uuid::now_v7().to_string(),
                    draft,
                    command.payment_date,
                    uploaded_at,
                )
            })
            .collect();
        let assignments = assign(&records, &roster, uploaded_at)?;

        let replaced_records = self
            .batches
            .replace_batch(command.payment_date, records.clone(), assignments.clone())
            .await?;
        info!(
            payment_date = %command.payment_date,
            records = records.len(),
            distributors = roster.len(),
            replaced_records,
            "batch stored"
        );

        self.notify_assignees(command.payment_date, &records, &assignments, &roster)
            .await;

        Ok(UploadSummary {
            records_processed: records.len(),
            distributors_assigned: roster.len(),
            payment_date: command.payment_date,
            replaced_records,
        })
    }

    async fn notify_assignees(
        &self,
        payment_date: NaiveDate,
        records: &[PaymentRecord],
        assignments: &[Assignment],
        roster: &[UserAccount],
    ) {
        let date = payment_date.to_string();
        for distributor in roster {
            let tasks: Vec<TaskLine> = assignments
                .iter()
                .zip(records)
                .filter(|(assignment, _)| assignment.distributor_id == distributor.id)
                .map(|(_, record)| TaskLine::from(record))
                .collect();
            if tasks.is_empty() {
                continue;
            }

            let total_amount = templates::total_amount(&tasks);
            let notification = NewNotification {
                user_id: distributor.id.clone(),
                kind: NotificationType::TaskAssignment,
                title: format!("New Tasks Assigned - {date}"),
                message: format!(
                    "You have been assigned {} new payment tasks for {date}",
                    tasks.len()
                ),
                data: json!({
                    "taskCount": tasks.len(),
                    "paymentDate": date,
                    "totalAmount": total_amount,
                }),
            };
            let email = templates::task_assignment(&distributor.name, &date, &tasks, &self.app_url);
            self.dispatcher.notify(distributor, notification, email).await;
        }
    }
}
