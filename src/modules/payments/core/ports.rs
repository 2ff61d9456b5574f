use crate::modules::payments::core::assignment::{
    AssignedRecord, Assignment, CompletionOutcome, RecordSummary,
};
use crate::modules::payments::core::record::PaymentRecord;
use crate::shared::core::repository_error::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

/// Writes a whole batch for one payment date.
#[async_trait]
pub trait PaymentBatchRepository: Send + Sync {
    /// Removes every record and assignment stored for `payment_date`, then stores the new
    /// ones. Either all of it happens or none of it does. Returns how many records were removed.
    async fn replace_batch(
        &self,
        payment_date: NaiveDate,
        records: Vec<PaymentRecord>,
        assignments: Vec<Assignment>,
    ) -> Result<usize, RepositoryError>;
}

#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// Marks the record completed if it is assigned to `distributor_id`, and reports the
    /// distributor's progress for the record's payment date as seen right after the update.
    async fn complete_assigned(
        &self,
        record_id: &str,
        distributor_id: &str,
        completed_at: DateTime<Utc>,
    ) -> Result<CompletionOutcome, RepositoryError>;
}

#[async_trait]
pub trait PaymentQueries: Send + Sync {
    /// Records assigned to the distributor, newest assignment first.
    async fn assigned_to(&self, distributor_id: &str) -> Result<Vec<AssignedRecord>, RepositoryError>;

    /// Still pending records of `payment_date`, grouped by distributor.
    async fn pending_assignments_on(
        &self,
        payment_date: NaiveDate,
    ) -> Result<Vec<AssignedRecord>, RepositoryError>;

    async fn record_summaries(&self) -> Result<Vec<RecordSummary>, RepositoryError>;
}
