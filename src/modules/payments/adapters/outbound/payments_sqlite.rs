// SQLite implementation of the payment ports.
//
// Responsibilities
// - Replace a day's batch inside one transaction.
// - Complete a record with a single conditional UPDATE so exactly one caller
//   observes the pending to completed transition, then count the day's progress
//   inside the same transaction.

use crate::modules::payments::core::assignment::{
    AssignedRecord, Assignment, CompletionOutcome, DayProgress, RecordSummary,
};
use crate::modules::payments::core::ports::{
    CompletionRepository, PaymentBatchRepository, PaymentQueries,
};
use crate::modules::payments::core::record::PaymentRecord;
use crate::shared::core::repository_error::RepositoryError;
use crate::shared::infrastructure::database::{
    decode_date, decode_timestamp, encode_date, encode_timestamp,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

const ASSIGNED_RECORD_COLUMNS: &str = "r.id, r.recipient_name, r.account_number, r.amount, r.bank_code, r.reference,
     r.payment_date, r.upload_date, r.status, r.completed_date, a.distributor_id, a.assigned_date";

#[derive(sqlx::FromRow)]
struct AssignedRecordRow {
    id: String,
    recipient_name: String,
    account_number: String,
    amount: f64,
    bank_code: String,
    reference: String,
    payment_date: String,
    upload_date: String,
    status: String,
    completed_date: Option<String>,
    distributor_id: String,
    assigned_date: String,
}

impl TryFrom<AssignedRecordRow> for AssignedRecord {
    type Error = RepositoryError;

    fn try_from(row: AssignedRecordRow) -> Result<Self, Self::Error> {
        Ok(AssignedRecord {
            record: PaymentRecord {
                payment_date: decode_date(&row.payment_date)?,
                upload_date: decode_timestamp(&row.upload_date)?,
                status: row.status.parse().map_err(RepositoryError::Corrupt)?,
                completed_date: row
                    .completed_date
                    .as_deref()
                    .map(decode_timestamp)
                    .transpose()?,
                id: row.id,
                recipient_name: row.recipient_name,
                account_number: row.account_number,
                amount: row.amount,
                bank_code: row.bank_code,
                reference: row.reference,
            },
            assigned_date: decode_timestamp(&row.assigned_date)?,
            distributor_id: row.distributor_id,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    amount: f64,
    status: String,
    payment_date: String,
    upload_date: String,
    distributor_id: Option<String>,
}

impl TryFrom<SummaryRow> for RecordSummary {
    type Error = RepositoryError;

    fn try_from(row: SummaryRow) -> Result<Self, Self::Error> {
        Ok(RecordSummary {
            amount: row.amount,
            status: row.status.parse().map_err(RepositoryError::Corrupt)?,
            payment_date: decode_date(&row.payment_date)?,
            upload_date: decode_timestamp(&row.upload_date)?,
            distributor_id: row.distributor_id,
        })
    }
}

pub struct SqlitePaymentStore {
    pool: SqlitePool,
}

impl SqlitePaymentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentBatchRepository for SqlitePaymentStore {
    async fn replace_batch(
        &self,
        payment_date: NaiveDate,
        records: Vec<PaymentRecord>,
        assignments: Vec<Assignment>,
    ) -> Result<usize, RepositoryError> {
        let date = encode_date(payment_date);
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM record_assignments WHERE payment_date = ?")
            .bind(&date)
            .execute(&mut *tx)
            .await?;
        let removed = sqlx::query("DELETE FROM payment_records WHERE payment_date = ?")
            .bind(&date)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        for record in &records {
            sqlx::query(
                "INSERT INTO payment_records
                    (id, recipient_name, account_number, amount, bank_code, reference,
                     payment_date, upload_date, status, completed_date)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&record.id)
            .bind(&record.recipient_name)
            .bind(&record.account_number)
            .bind(record.amount)
            .bind(&record.bank_code)
            .bind(&record.reference)
            .bind(encode_date(record.payment_date))
            .bind(encode_timestamp(record.upload_date))
            .bind(record.status.as_str())
            .bind(record.completed_date.map(encode_timestamp))
            .execute(&mut *tx)
            .await?;
        }

        for assignment in &assignments {
            sqlx::query(
                "INSERT INTO record_assignments (record_id, distributor_id, payment_date, assigned_date)
                 VALUES (?, ?, ?, ?)",
            )
            .bind(&assignment.record_id)
            .bind(&assignment.distributor_id)
            .bind(encode_date(assignment.payment_date))
            .bind(encode_timestamp(assignment.assigned_date))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(removed as usize)
    }
}

#[async_trait]
impl CompletionRepository for SqlitePaymentStore {
    async fn complete_assigned(
        &self,
        record_id: &str,
        distributor_id: &str,
        completed_at: DateTime<Utc>,
    ) -> Result<CompletionOutcome, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // The write comes first so the transaction holds the write lock while counting.
        let transitioned = sqlx::query(
            "UPDATE payment_records SET status = 'completed', completed_date = ?
             WHERE id = ? AND status = 'pending'
               AND EXISTS (SELECT 1 FROM record_assignments
                           WHERE record_id = ? AND distributor_id = ?)",
        )
        .bind(encode_timestamp(completed_at))
        .bind(record_id)
        .bind(record_id)
        .bind(distributor_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        let assigned: Option<(String,)> = sqlx::query_as(
            "SELECT payment_date FROM record_assignments WHERE record_id = ? AND distributor_id = ?",
        )
        .bind(record_id)
        .bind(distributor_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((payment_date,)) = assigned else {
            tx.rollback().await?;
            return Ok(CompletionOutcome::NotAssigned);
        };

        let (total, completed): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(CASE WHEN r.status = 'completed' THEN 1 ELSE 0 END), 0)
             FROM record_assignments a JOIN payment_records r ON r.id = a.record_id
             WHERE a.distributor_id = ? AND a.payment_date = ?",
        )
        .bind(distributor_id)
        .bind(&payment_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(CompletionOutcome::Completed {
            payment_date: decode_date(&payment_date)?,
            transitioned,
            progress: DayProgress {
                total: total.max(0) as usize,
                completed: completed.max(0) as usize,
            },
        })
    }
}

#[async_trait]
impl PaymentQueries for SqlitePaymentStore {
    async fn assigned_to(&self, distributor_id: &str) -> Result<Vec<AssignedRecord>, RepositoryError> {
        let rows: Vec<AssignedRecordRow> = sqlx::query_as(&format!(
            "SELECT {ASSIGNED_RECORD_COLUMNS}
             FROM record_assignments a JOIN payment_records r ON r.id = a.record_id
             WHERE a.distributor_id = ?
             ORDER BY a.assigned_date DESC, a.payment_date DESC, a.rowid"
        ))
        .bind(distributor_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(AssignedRecord::try_from).collect()
    }

    async fn pending_assignments_on(
        &self,
        payment_date: NaiveDate,
    ) -> Result<Vec<AssignedRecord>, RepositoryError> {
        let rows: Vec<AssignedRecordRow> = sqlx::query_as(&format!(
            "SELECT {ASSIGNED_RECORD_COLUMNS}
             FROM record_assignments a JOIN payment_records r ON r.id = a.record_id
             WHERE a.payment_date = ? AND r.status = 'pending'
             ORDER BY a.distributor_id, a.rowid"
        ))
        .bind(encode_date(payment_date))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(AssignedRecord::try_from).collect()
    }

    async fn record_summaries(&self) -> Result<Vec<RecordSummary>, RepositoryError> {
        let rows: Vec<SummaryRow> = sqlx::query_as(
            "SELECT r.amount, r.status, r.payment_date, r.upload_date, a.distributor_id
             FROM payment_records r LEFT JOIN record_assignments a ON a.record_id = r.id
             ORDER BY r.rowid",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(RecordSummary::try_from).collect()
    }
}
