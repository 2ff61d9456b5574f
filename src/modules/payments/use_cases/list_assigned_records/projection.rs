use crate::modules::payments::core::assignment::AssignedRecord;
use crate::modules::payments::core::record::PaymentStatus;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A distributor's task: the payment record flattened onto its assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignedRecordView {
    pub id: String,
    pub recipient_name: String,
    pub account_number: String,
    pub amount: f64,
    pub bank_code: String,
    pub reference: String,
    pub status: PaymentStatus,
    pub assigned_date: DateTime<Utc>,
    pub payment_date: String,
}

impl From<AssignedRecord> for AssignedRecordView {
    fn from(assigned: AssignedRecord) -> Self {
        let record = assigned.record;
        Self {
            id: record.id,
            recipient_name: record.recipient_name,
            account_number: record.account_number,
            amount: record.amount,
            bank_code: record.bank_code,
            reference: record.reference,
            status: record.status,
            assigned_date: assigned.assigned_date,
            payment_date: record.payment_date.to_string(),
        }
    }
}
