// Best effort delivery of one notification over both channels.
//
// Responsibilities
// - Store the in-app notification.
// - Send the email and append an audit entry for the attempt, sent or failed.
// - Never return an error: every failure is logged here and reported in the
//   DeliveryReport so the caller's primary effect is never undone.

use crate::modules::accounts::core::user::UserAccount;
use crate::modules::notifications::core::email_log::{EmailLogEntry, EmailStatus};
use crate::modules::notifications::core::notification::{NewNotification, Notification};
use crate::modules::notifications::core::ports::{EmailLogRepository, NotificationRepository};
use crate::modules::notifications::core::templates::EmailTemplate;
use crate::shared::infrastructure::mailer::{Mailer, OutgoingEmail};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub in_app: bool,
    pub email: bool,
}

impl DeliveryReport {
    pub fn any(&self) -> bool {
        self.in_app || self.email
    }
}

pub struct NotificationDispatcher {
    notifications: Arc<dyn NotificationRepository>,
    email_log: Arc<dyn EmailLogRepository>,
    mailer: Arc<dyn Mailer>,
}

impl NotificationDispatcher {
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        email_log: Arc<dyn EmailLogRepository>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            notifications,
            email_log,
            mailer,
        }
    }

    pub async fn notify(
        &self,
        recipient: &UserAccount,
        notification: NewNotification,
        email: EmailTemplate,
    ) -> DeliveryReport {
        let kind = notification.kind;
        let mut report = DeliveryReport::default();

        let row = Notification::create(Uuid::now_v7().to_string(), notification, Utc::now());
        match self.notifications.create(row).await {
            Ok(()) => report.in_app = true,
            Err(err) => warn!(user_id = %recipient.id, %kind, error = %err, "in-app notification not stored"),
        }

        let subject = email.subject.clone();
        let attempt = self
            .mailer
            .send(OutgoingEmail {
                to: recipient.email.clone(),
                subject: email.subject,
                text: email.text,
                html: email.html,
            })
            .await;

        let (status, message_id, error_message) = match attempt {
            Ok(sent) => {
                info!(to = %recipient.email, %kind, message_id = %sent.message_id, "email sent");
                report.email = true;
                (EmailStatus::Sent, Some(sent.message_id), None)
            }
            Err(err) => {
                warn!(to = %recipient.email, %kind, error = %err, "email not sent");
                (EmailStatus::Failed, None, Some(err.to_string()))
            }
        };

        let entry = EmailLogEntry {
            id: Uuid::now_v7().to_string(),
            recipient_email: recipient.email.clone(),
            recipient_name: Some(recipient.name.clone()),
            subject,
            kind,
            status,
            message_id,
            error_message,
            created_at: Utc::now(),
        };
        if let Err(err) = self.email_log.append(entry).await {
            warn!(to = %recipient.email, error = %err, "email attempt not logged");
        }

        report
    }
}
