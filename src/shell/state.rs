// Wiring of ports into use case handlers.
//
// Responsibilities
// - Hold one concrete adapter per port, chosen by the binary (in memory or SQLite).
// - Build the handlers once and share them with every request through AppState.

use crate::modules::accounts::adapters::outbound::users_in_memory::InMemoryUserDirectory;
use crate::modules::accounts::adapters::outbound::users_sqlite::SqliteUserDirectory;
use crate::modules::accounts::core::ports::UserDirectory;
use crate::modules::notifications::adapters::outbound::notifications_in_memory::{
    InMemoryEmailLog, InMemoryNotifications,
};
use crate::modules::notifications::adapters::outbound::notifications_sqlite::{
    SqliteEmailLog, SqliteNotifications,
};
use crate::modules::notifications::core::ports::{EmailLogRepository, NotificationRepository};
use crate::modules::notifications::use_cases::dispatch::handler::NotificationDispatcher;
use crate::modules::payments::adapters::outbound::payments_in_memory::InMemoryPaymentStore;
use crate::modules::payments::adapters::outbound::payments_sqlite::SqlitePaymentStore;
use crate::modules::payments::core::ports::{
    CompletionRepository, PaymentBatchRepository, PaymentQueries,
};
use crate::modules::payments::use_cases::complete_payment::handler::CompletePaymentHandler;
use crate::modules::payments::use_cases::sweep_overdue::handler::SweepOverdueHandler;
use crate::modules::payments::use_cases::upload_batch::handler::UploadBatchHandler;
use crate::shared::infrastructure::mailer::Mailer;
use crate::shared::infrastructure::mailer::in_memory::InMemoryMailer;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Ports {
    pub batches: Arc<dyn PaymentBatchRepository>,
    pub completions: Arc<dyn CompletionRepository>,
    pub payment_queries: Arc<dyn PaymentQueries>,
    pub users: Arc<dyn UserDirectory>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub email_log: Arc<dyn EmailLogRepository>,
    pub mailer: Arc<dyn Mailer>,
}

impl Ports {
    pub fn in_memory() -> Self {
        let payments = Arc::new(InMemoryPaymentStore::new());
        Self {
            batches: payments.clone(),
            completions: payments.clone(),
            payment_queries: payments,
            users: Arc::new(InMemoryUserDirectory::new()),
            notifications: Arc::new(InMemoryNotifications::new()),
            email_log: Arc::new(InMemoryEmailLog::new()),
            mailer: Arc::new(InMemoryMailer::new()),
        }
    }

    /// SQLite for every store. Mail stays in memory until the caller swaps in a relay.
    pub fn sqlite(pool: SqlitePool) -> Self {
        let payments = Arc::new(SqlitePaymentStore::new(pool.clone()));
        Self {
            batches: payments.clone(),
            completions: payments.clone(),
            payment_queries: payments,
            users: Arc::new(SqliteUserDirectory::new(pool.clone())),
            notifications: Arc::new(SqliteNotifications::new(pool.clone())),
            email_log: Arc::new(SqliteEmailLog::new(pool)),
            mailer: Arc::new(InMemoryMailer::new()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the dashboard, used for links inside emails.
    pub app_url: String,
    pub cron_secret: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub upload_handler: Arc<UploadBatchHandler>,
    pub complete_handler: Arc<CompletePaymentHandler>,
    pub sweep_handler: Arc<SweepOverdueHandler>,
    pub payment_queries: Arc<dyn PaymentQueries>,
    pub users: Arc<dyn UserDirectory>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub cron_secret: Option<String>,
}

impl AppState {
    pub fn new(ports: Ports, settings: Settings) -> Self {
        let dispatcher = Arc::new(NotificationDispatcher::new(
            ports.notifications.clone(),
            ports.email_log,
            ports.mailer,
        ));
        let upload_handler = Arc::new(UploadBatchHandler::new(
            ports.batches,
            ports.users.clone(),
            dispatcher.clone(),
            settings.app_url.clone(),
        ));
        let complete_handler = Arc::new(CompletePaymentHandler::new(
            ports.completions,
            ports.users.clone(),
            dispatcher.clone(),
            settings.app_url.clone(),
        ));
        let sweep_handler = Arc::new(SweepOverdueHandler::new(
            ports.payment_queries.clone(),
            ports.users.clone(),
            dispatcher,
            settings.app_url,
        ));

        Self {
            upload_handler,
            complete_handler,
            sweep_handler,
            payment_queries: ports.payment_queries,
            users: ports.users,
            notifications: ports.notifications,
            cron_secret: settings.cron_secret.filter(|secret| !secret.is_empty()),
        }
    }
}
