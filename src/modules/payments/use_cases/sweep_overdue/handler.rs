// Overdue sweep: read-only pass over yesterday's pending assignments.
//
// Responsibilities
// - Group the pending records of the overdue date by distributor.
// - Send each distributor one reminder, in-app and by email.
// - Keep going when one distributor cannot be reached; only a failing store
//   query aborts the sweep.

use crate::modules::accounts::core::ports::UserDirectory;
use crate::modules::notifications::core::notification::{NewNotification, NotificationType};
use crate::modules::notifications::core::templates::{self, TaskLine};
use crate::modules::notifications::use_cases::dispatch::handler::NotificationDispatcher;
use crate::modules::payments::core::ports::PaymentQueries;
use crate::modules::payments::use_cases::sweep_overdue::command::SweepOverdue;
use crate::shared::core::repository_error::RepositoryError;
use chrono::NaiveDate;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SweepError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepReport {
    pub payment_date: NaiveDate,
    pub total_incomplete_records: usize,
    pub distributors_with_incomplete: usize,
    pub distributors_notified: usize,
}

impl SweepReport {
    pub fn is_empty(&self) -> bool {
        self.total_incomplete_records == 0
    }
}

pub struct SweepOverdueHandler {
    queries: Arc<dyn PaymentQueries>,
    users: Arc<dyn UserDirectory>,
    dispatcher: Arc<NotificationDispatcher>,
    app_url: String,
}

impl SweepOverdueHandler {
    pub fn new(
        queries: Arc<dyn PaymentQueries>,
        users: Arc<dyn UserDirectory>,
        dispatcher: Arc<NotificationDispatcher>,
        app_url: impl Into<String>,
    ) -> Self {
        Self {
            queries,
            users,
            dispatcher,
            app_url: app_url.into(),
        }
    }

    pub async fn handle(&self, command: SweepOverdue) -> Result<SweepReport, SweepError> {
        let payment_date = command.overdue_date();
        let pending = self.queries.pending_assignments_on(payment_date).await?;

        let mut by_distributor: BTreeMap<String, Vec<TaskLine>> = BTreeMap::new();
        for assigned in &pending {
            by_distributor
                .entry(assigned.distributor_id.clone())
                .or_default()
                .push(TaskLine::from(&assigned.record));
        }

        let mut report = SweepReport {
            payment_date,
            total_incomplete_records: pending.len(),
            distributors_with_incomplete: by_distributor.len(),
            distributors_notified: 0,
        };
        if report.is_empty() {
            info!(%payment_date, "no incomplete tasks");
            return Ok(report);
        }

        let date = payment_date.to_string();
        for (distributor_id, tasks) in &by_distributor {
            let distributor = match self.users.find_by_id(distributor_id).await {
                Ok(Some(account)) => account,
                Ok(None) => {
                    warn!(%distributor_id, "reminder skipped, distributor not in directory");
                    continue;
                }
                Err(err) => {
                    warn!(%distributor_id, error = %err, "reminder skipped, directory lookup failed");
                    continue;
                }
            };

            let total_amount = templates::total_amount(tasks);
            let notification = NewNotification {
                user_id: distributor.id.clone(),
                kind: NotificationType::TaskReminder,
                title: format!("Incomplete Tasks from {date}"),
                message: format!(
                    "You have {} incomplete tasks from {date}. Please complete them immediately.",
                    tasks.len()
                ),
                data: json!({
                    "incompleteCount": tasks.len(),
                    "paymentDate": date,
                    "totalAmount": total_amount,
                    "isOverdue": true,
                }),
            };
            let email = templates::incomplete_reminder(&distributor.name, &date, tasks, &self.app_url);
            if self.dispatcher.notify(&distributor, notification, email).await.any() {
                report.distributors_notified += 1;
            } else {
                warn!(%distributor_id, "reminder reached no channel");
            }
        }

        info!(
            %payment_date,
            incomplete = report.total_incomplete_records,
            notified = report.distributors_notified,
            "overdue sweep finished"
        );
        Ok(report)
    }
}
