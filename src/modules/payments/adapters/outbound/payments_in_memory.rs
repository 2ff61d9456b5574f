// In memory implementation of the payment ports.
//
// Purpose
// - Back tests and local runs without a database.
//
// Responsibilities
// - Hold records and assignments under one lock so a batch replace and a
//   completion are each atomic, like their SQLite counterparts.
// - Simulate an unavailable backend with toggle_offline.

use crate::modules::payments::core::assignment::{
    AssignedRecord, Assignment, CompletionOutcome, DayProgress, RecordSummary,
};
use crate::modules::payments::core::ports::{
    CompletionRepository, PaymentBatchRepository, PaymentQueries,
};
use crate::modules::payments::core::record::{PaymentRecord, PaymentStatus};
use crate::shared::core::repository_error::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;

#[derive(Default)]
struct PaymentTables {
    // Insertion order doubles as the row order of a batch.
    records: Vec<PaymentRecord>,
    assignments: Vec<Assignment>,
}

impl PaymentTables {
    fn record(&self, record_id: &str) -> Option<&PaymentRecord> {
        self.records.iter().find(|record| record.id == record_id)
    }

    fn joined<'a>(
        &'a self,
        assignments: impl Iterator<Item = &'a Assignment>,
    ) -> Result<Vec<AssignedRecord>, RepositoryError> {
        assignments
            .map(|assignment| {
                let record = self.record(&assignment.record_id).ok_or_else(|| {
                    RepositoryError::Corrupt(format!(
                        "assignment without record {}",
                        assignment.record_id
                    ))
                })?;
                Ok(AssignedRecord {
                    record: record.clone(),
                    distributor_id: assignment.distributor_id.clone(),
                    assigned_date: assignment.assigned_date,
                })
            })
            .collect()
    }
}

#[derive(Default)]
pub struct InMemoryPaymentStore {
    tables: RwLock<PaymentTables>,
    is_offline: bool,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn ensure_online(&self) -> Result<(), RepositoryError> {
        if self.is_offline {
            return Err(RepositoryError::Backend("Payment store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentBatchRepository for InMemoryPaymentStore {
    async fn replace_batch(
        &self,
        payment_date: NaiveDate,
        records: Vec<PaymentRecord>,
        assignments: Vec<Assignment>,
    ) -> Result<usize, RepositoryError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let before = tables.records.len();
        tables.records.retain(|record| record.payment_date != payment_date);
        let removed = before - tables.records.len();
        tables
            .assignments
            .retain(|assignment| assignment.payment_date != payment_date);
        tables.records.extend(records);
        tables.assignments.extend(assignments);
        Ok(removed)
    }
}

#[async_trait]
impl CompletionRepository for InMemoryPaymentStore {
    async fn complete_assigned(
        &self,
        record_id: &str,
        distributor_id: &str,
        completed_at: DateTime<Utc>,
    ) -> Result<CompletionOutcome, RepositoryError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;

        let Some(payment_date) = tables
            .assignments
            .iter()
            .find(|a| a.record_id == record_id && a.distributor_id == distributor_id)
            .map(|a| a.payment_date)
        else {
            return Ok(CompletionOutcome::NotAssigned);
        };

        let mut transitioned = false;
        if let Some(record) = tables
            .records
            .iter_mut()
            .find(|record| record.id == record_id && record.status == PaymentStatus::Pending)
        {
            record.status = PaymentStatus::Completed;
            record.completed_date = Some(completed_at);
            transitioned = true;
        }

        let mut progress = DayProgress {
            total: 0,
            completed: 0,
        };
        for assignment in tables
            .assignments
            .iter()
            .filter(|a| a.distributor_id == distributor_id && a.payment_date == payment_date)
        {
            progress.total += 1;
            if tables
                .record(&assignment.record_id)
                .is_some_and(|record| record.status.is_completed())
            {
                progress.completed += 1;
            }
        }

        Ok(CompletionOutcome::Completed {
            payment_date,
            transitioned,
            progress,
        })
    }
}

#[async_trait]
impl PaymentQueries for InMemoryPaymentStore {
    async fn assigned_to(&self, distributor_id: &str) -> Result<Vec<AssignedRecord>, RepositoryError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        let mut assigned = tables.joined(
            tables
                .assignments
                .iter()
                .filter(|a| a.distributor_id == distributor_id),
        )?;
        assigned.sort_by(|a, b| {
            b.assigned_date
                .cmp(&a.assigned_date)
                .then_with(|| b.record.payment_date.cmp(&a.record.payment_date))
        });
        Ok(assigned)
    }

    async fn pending_assignments_on(
        &self,
        payment_date: NaiveDate,
    ) -> Result<Vec<AssignedRecord>, RepositoryError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        let mut pending: Vec<AssignedRecord> = tables
            .joined(
                tables
                    .assignments
                    .iter()
                    .filter(|a| a.payment_date == payment_date),
            )?
            .into_iter()
            .filter(|assigned| assigned.record.status == PaymentStatus::Pending)
            .collect();
        pending.sort_by(|a, b| a.distributor_id.cmp(&b.distributor_id));
        Ok(pending)
    }

    async fn record_summaries(&self) -> Result<Vec<RecordSummary>, RepositoryError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .records
            .iter()
            .map(|record| RecordSummary {
                amount: record.amount,
                status: record.status,
                payment_date: record.payment_date,
                upload_date: record.upload_date,
                distributor_id: tables
                    .assignments
                    .iter()
                    .find(|a| a.record_id == record.id)
                    .map(|a| a.distributor_id.clone()),
            })
            .collect())
    }
}
