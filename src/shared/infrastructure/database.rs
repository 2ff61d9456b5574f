// SQLite pool construction and schema bootstrap.
//
// Responsibilities
// - Open (or create) the database named by DATABASE_URL.
// - Enable foreign keys, WAL journaling, and a busy timeout so concurrent
//   completions queue behind one another instead of failing.
// - Create every table and index idempotently.

use crate::shared::core::repository_error::RepositoryError;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = database_url.contains(":memory:");
    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    // Every connection to `sqlite::memory:` opens its own database, so keep exactly one alive.
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(8)
    };
    let pool = pool_options.connect_with(options).await?;

    migrate(&pool).await?;
    info!(database_url, "database ready");
    Ok(pool)
}

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        role TEXT NOT NULL CHECK (role IN ('admin', 'distributor'))
    )",
    "CREATE INDEX IF NOT EXISTS idx_users_role ON users (role)",
    "CREATE TABLE IF NOT EXISTS payment_records (
        id TEXT PRIMARY KEY,
        recipient_name TEXT NOT NULL,
        account_number TEXT NOT NULL,
        amount REAL NOT NULL,
        bank_code TEXT NOT NULL,
        reference TEXT NOT NULL,
        payment_date TEXT NOT NULL,
        upload_date TEXT NOT NULL,
        status TEXT NOT NULL CHECK (status IN ('pending', 'completed')),
        completed_date TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_payment_records_payment_date ON payment_records (payment_date)",
    "CREATE TABLE IF NOT EXISTS record_assignments (
        record_id TEXT PRIMARY KEY REFERENCES payment_records (id) ON DELETE CASCADE,
        distributor_id TEXT NOT NULL,
        payment_date TEXT NOT NULL,
        assigned_date TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_record_assignments_distributor
        ON record_assignments (distributor_id, payment_date)",
    "CREATE INDEX IF NOT EXISTS idx_record_assignments_payment_date
        ON record_assignments (payment_date)",
    "CREATE TABLE IF NOT EXISTS notifications (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        type TEXT NOT NULL,
        title TEXT NOT NULL,
        message TEXT NOT NULL,
        data TEXT NOT NULL,
        read INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_notifications_user_read ON notifications (user_id, read)",
    "CREATE TABLE IF NOT EXISTS email_logs (
        id TEXT PRIMARY KEY,
        recipient_email TEXT NOT NULL,
        recipient_name TEXT,
        subject TEXT NOT NULL,
        type TEXT NOT NULL,
        status TEXT NOT NULL CHECK (status IN ('sent', 'failed', 'pending')),
        message_id TEXT,
        error_message TEXT,
        created_at TEXT NOT NULL
    )",
];

pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

// Dates and timestamps are stored as TEXT so they sort lexically in SQL.

pub fn encode_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn decode_date(value: &str) -> Result<NaiveDate, RepositoryError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| RepositoryError::Corrupt(format!("date {value:?}: {err}")))
}

pub fn encode_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_timestamp(value: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|err| RepositoryError::Corrupt(format!("timestamp {value:?}: {err}")))
}
