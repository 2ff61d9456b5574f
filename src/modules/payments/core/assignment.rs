// Assignments link each record of a batch to the one distributor who owns it.

use crate::modules::payments::core::record::{PaymentRecord, PaymentStatus};
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub record_id: String,
    pub distributor_id: String,
    pub payment_date: NaiveDate,
    pub assigned_date: DateTime<Utc>,
}

/// A record together with the assignment that hands it to a distributor.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedRecord {
    pub record: PaymentRecord,
    pub distributor_id: String,
    pub assigned_date: DateTime<Utc>,
}

/// How far one distributor is through the records of one payment date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayProgress {
    pub total: usize,
    pub completed: usize,
}

impl DayProgress {
    pub fn is_finished(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Result of trying to complete a record on behalf of a distributor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// No assignment links the record to the distributor.
    NotAssigned,
    Completed {
        payment_date: NaiveDate,
        /// True only for the call that moved the record from pending to completed.
        transitioned: bool,
        progress: DayProgress,
    },
}

/// The slice of a record the dashboard rollups need.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSummary {
    pub amount: f64,
    pub status: PaymentStatus,
    pub payment_date: NaiveDate,
    pub upload_date: DateTime<Utc>,
    pub distributor_id: Option<String>,
}
