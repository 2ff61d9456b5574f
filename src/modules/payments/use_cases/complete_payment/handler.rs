// Completion workflow.
//
// Responsibilities
// - Complete the record only when it is assigned to the acting distributor.
// - When this call finished the distributor's day, tell every admin in-app and
//   by email. Admin fan-out is best effort: failures are logged per admin and the
//   completion stands.

use crate::modules::accounts::core::ports::UserDirectory;
use crate::modules::accounts::core::user::{Role, UserAccount};
use crate::modules::notifications::core::notification::{NewNotification, NotificationType};
use crate::modules::notifications::core::templates;
use crate::modules::notifications::use_cases::dispatch::handler::NotificationDispatcher;
use crate::modules::payments::core::assignment::DayProgress;
use crate::modules::payments::core::ports::CompletionRepository;
use crate::modules::payments::use_cases::complete_payment::command::CompletePayment;
use crate::modules::payments::use_cases::complete_payment::decide::decide_completion;
use crate::modules::payments::use_cases::complete_payment::decision::{DecideError, Decision};
use crate::shared::core::repository_error::RepositoryError;
use chrono::{NaiveDate, Utc};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error(transparent)]
    Rejected(#[from] DecideError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReceipt {
    pub payment_date: NaiveDate,
    pub progress: DayProgress,
    /// Admins who got at least one of the two notification channels.
    pub admins_notified: usize,
}

pub struct CompletePaymentHandler {
    completions: Arc<dyn CompletionRepository>,
    users: Arc<dyn UserDirectory>,
    dispatcher: Arc<NotificationDispatcher>,
    app_url: String,
}

impl CompletePaymentHandler {
    pub fn new(
        completions: Arc<dyn CompletionRepository>,
        users: Arc<dyn UserDirectory>,
        dispatcher: Arc<NotificationDispatcher>,
        app_url: impl Into<String>,
    ) -> Self {
        Self {
            completions,
            users,
            dispatcher,
            app_url: app_url.into(),
        }
    }

    pub async fn handle(&self, command: CompletePayment) -> Result<CompletionReceipt, CompletionError> {
        let outcome = self
            .completions
            .complete_assigned(&command.record_id, &command.distributor_id, Utc::now())
            .await?;

        match decide_completion(outcome) {
            Decision::Rejected { reason } => {
                info!(record_id = %command.record_id, distributor_id = %command.distributor_id, "completion refused, record not assigned to caller");
                Err(reason.into())
            }
            Decision::Accepted {
                payment_date,
                progress,
                notify_admins,
            } => {
                info!(
                    record_id = %command.record_id,
                    distributor_id = %command.distributor_id,
                    %payment_date,
                    completed = progress.completed,
                    total = progress.total,
                    "record completed"
                );
                let admins_notified = if notify_admins {
                    self.notify_admins(&command, payment_date, progress).await
                } else {
                    0
                };
                Ok(CompletionReceipt {
                    payment_date,
                    progress,
                    admins_notified,
                })
            }
        }
    }

    async fn distributor_profile(&self, command: &CompletePayment) -> UserAccount {
        match self.users.find_by_id(&command.distributor_id).await {
            Ok(Some(account)) => return account,
            Ok(None) => {}
            Err(err) => warn!(distributor_id = %command.distributor_id, error = %err, "distributor lookup failed"),
        }
        UserAccount {
            id: command.distributor_id.clone(),
            name: command
                .distributor_name
                .clone()
                .unwrap_or_else(|| command.distributor_id.clone()),
            email: command.distributor_email.clone().unwrap_or_default(),
            role: Role::Distributor,
        }
    }

    async fn notify_admins(
        &self,
        command: &CompletePayment,
        payment_date: NaiveDate,
        progress: DayProgress,
    ) -> usize {
        let admins = match self.users.list_by_role(Role::Admin).await {
            Ok(admins) => admins,
            Err(err) => {
                warn!(error = %err, "admin roster unavailable, completion notice skipped");
                return 0;
            }
        };
        let distributor = self.distributor_profile(command).await;
        let date = payment_date.to_string();

        let mut notified = 0;
        for admin in &admins {
            let notification = NewNotification {
                user_id: admin.id.clone(),
                kind: NotificationType::TaskCompletion,
                title: format!("Tasks Completed - {}", distributor.name),
                message: format!(
                    "{} has completed all {} assigned tasks for {date}",
                    distributor.name, progress.total
                ),
                data: json!({
                    "distributorId": distributor.id,
                    "distributorName": distributor.name,
                    "distributorEmail": distributor.email,
                    "completedTasks": progress.completed,
                    "totalTasks": progress.total,
                    "paymentDate": date,
                }),
            };
            let email = templates::admin_task_completion(
                &distributor.name,
                &distributor.email,
                progress.completed,
                progress.total,
                &date,
                &self.app_url,
            );
            let report = self.dispatcher.notify(admin, notification, email).await;
            if report.any() {
                notified += 1;
            } else {
                warn!(admin_id = %admin.id, "completion notice reached no channel");
            }
        }
        info!(distributor_id = %distributor.id, %payment_date, notified, "distributor finished the day");
        notified
    }
}
