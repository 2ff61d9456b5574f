// Fully wired application over in-memory adapters.
//
// The concrete adapters stay reachable next to the AppState so tests can seed
// them and inspect what a use case left behind.

use crate::modules::accounts::adapters::outbound::users_in_memory::InMemoryUserDirectory;
use crate::modules::accounts::core::user::UserAccount;
use crate::modules::notifications::adapters::outbound::notifications_in_memory::{
    InMemoryEmailLog, InMemoryNotifications,
};
use crate::modules::payments::adapters::outbound::payments_in_memory::InMemoryPaymentStore;
use crate::shared::infrastructure::mailer::in_memory::InMemoryMailer;
use crate::shell::state::{AppState, Ports, Settings};
use std::sync::Arc;

pub const TEST_CRON_SECRET: &str = "test-cron-secret";
pub const TEST_APP_URL: &str = "http://localhost:3000";

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<InMemoryPaymentStore>,
    pub users: Arc<InMemoryUserDirectory>,
    pub notifications: Arc<InMemoryNotifications>,
    pub email_log: Arc<InMemoryEmailLog>,
    pub mailer: Arc<InMemoryMailer>,
}

impl TestApp {
    pub fn builder(users: Vec<UserAccount>) -> TestAppBuilder {
        TestAppBuilder::new(users)
    }
}

pub struct TestAppBuilder {
    store: InMemoryPaymentStore,
    users: InMemoryUserDirectory,
    notifications: InMemoryNotifications,
    email_log: InMemoryEmailLog,
    mailer: InMemoryMailer,
}

impl TestAppBuilder {
    pub fn new(users: Vec<UserAccount>) -> Self {
        Self {
            store: InMemoryPaymentStore::new(),
            users: InMemoryUserDirectory::with_users(users),
            notifications: InMemoryNotifications::new(),
            email_log: InMemoryEmailLog::new(),
            mailer: InMemoryMailer::new(),
        }
    }

    pub fn offline_store(mut self) -> Self {
        self.store.toggle_offline();
        self
    }

    pub fn offline_users(mut self) -> Self {
        self.users.toggle_offline();
        self
    }

    pub fn offline_notifications(mut self) -> Self {
        self.notifications.toggle_offline();
        self
    }

    pub fn offline_email_log(mut self) -> Self {
        self.email_log.toggle_offline();
        self
    }

    pub fn offline_mailer(mut self) -> Self {
        self.mailer.toggle_offline();
        self
    }

    pub fn build(self) -> TestApp {
        let store = Arc::new(self.store);
        let users = Arc::new(self.users);
        let notifications = Arc::new(self.notifications);
        let email_log = Arc::new(self.email_log);
        let mailer = Arc::new(self.mailer);

        let ports = Ports {
            batches: store.clone(),
            completions: store.clone(),
            payment_queries: store.clone(),
            users: users.clone(),
            notifications: notifications.clone(),
            email_log: email_log.clone(),
            mailer: mailer.clone(),
        };
        let settings = Settings {
            app_url: TEST_APP_URL.to_string(),
            cron_secret: Some(TEST_CRON_SECRET.to_string()),
        };

        TestApp {
            state: AppState::new(ports, settings),
            store,
            users,
            notifications,
            email_log,
            mailer,
        }
    }
}

pub fn make_test_app(users: Vec<UserAccount>) -> TestApp {
    TestAppBuilder::new(users).build()
}
