// Runtime configuration.
//
// Responsibilities
// - Parse flags with environment fallbacks (a .env file is loaded first by the binary).
// - Pick the adapters: SQLite when DATABASE_URL is set, in memory otherwise; the
//   HTTP mail relay when MAIL_RELAY_URL is set, an in-memory outbox otherwise.
// - Load the optional USERS_FILE roster.

use crate::modules::accounts::core::user::UserAccount;
use crate::shared::infrastructure::database;
use crate::shared::infrastructure::mailer::MailerError;
use crate::shared::infrastructure::mailer::http_relay::HttpMailRelay;
use crate::shell::state::{Ports, Settings};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read users file {}: {source}", path.display())]
    UsersFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("users file {} is not a JSON list of accounts: {source}", path.display())]
    UsersJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("mail relay: {0}")]
    Mailer(#[from] MailerError),
}

#[derive(Debug, Parser)]
#[command(name = "payment_distribution")]
#[command(about = "Splits daily payment batches across distributors and tracks their completion")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Send reminders for the records left pending the day before `--today`, then exit.
    SweepOverdue {
        /// Defaults to the current UTC date.
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct Config {
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,

    /// e.g. `sqlite://payments.db`. Without it every store lives in memory.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Base URL of a Mailpit compatible relay.
    #[arg(long, env = "MAIL_RELAY_URL")]
    pub mail_relay_url: Option<String>,

    #[arg(long, env = "MAIL_FROM", default_value = "PaySplitr System <noreply@paysplitr.local>")]
    pub mail_from: String,

    #[arg(long, env = "APP_URL", default_value = "http://localhost:3000")]
    pub app_url: String,

    #[arg(long, env = "CRON_SECRET", hide_env_values = true)]
    pub cron_secret: Option<String>,

    #[arg(long, env = "USERS_FILE")]
    pub users_file: Option<PathBuf>,

    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn settings(&self) -> Settings {
        Settings {
            app_url: self.app_url.trim_end_matches('/').to_string(),
            cron_secret: self.cron_secret.clone(),
        }
    }

    pub async fn build_ports(&self) -> Result<Ports, ConfigError> {
        let mut ports = match &self.database_url {
            Some(url) => Ports::sqlite(database::connect(url).await?),
            None => {
                warn!("DATABASE_URL not set, data is kept in memory and lost on exit");
                Ports::in_memory()
            }
        };
        match &self.mail_relay_url {
            Some(url) => {
                ports.mailer = Arc::new(HttpMailRelay::new(url, &self.mail_from)?);
                info!(relay = %url, "mail goes through the HTTP relay");
            }
            None => warn!("MAIL_RELAY_URL not set, mail is kept in an in-memory outbox"),
        }
        if self.cron_secret.as_deref().is_none_or(str::is_empty) {
            warn!("CRON_SECRET not set, /cron/check-incomplete-tasks refuses every call");
        }
        Ok(ports)
    }
}

pub fn load_users(path: &Path) -> Result<Vec<UserAccount>, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::UsersFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::UsersJson {
        path: path.to_path_buf(),
        source,
    })
}
