// Payment records: one row per recipient payment inside a daily batch.
//
// Lifecycle
// - Created in bulk by an upload for one payment date, always pending.
// - Moves to completed exactly once; there is no way back.
// - Removed only when a new batch replaces its payment date.

use crate::modules::notifications::core::templates::TaskLine;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, PaymentStatus::Completed)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(PaymentStatus::Pending),
            "completed" => Ok(PaymentStatus::Completed),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

/// A parsed CSV row before it is given an identity and a batch date.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecordDraft {
    pub recipient_name: String,
    pub account_number: String,
    pub amount: f64,
    pub bank_code: String,
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    pub id: String,
    pub recipient_name: String,
    pub account_number: String,
    pub amount: f64,
    pub bank_code: String,
    pub reference: String,
    pub payment_date: NaiveDate,
    pub upload_date: DateTime<Utc>,
    pub status: PaymentStatus,
    pub completed_date: Option<DateTime<Utc>>,
}

impl PaymentRecord {
    pub fn from_draft(
        id: impl Into<String>,
        draft: PaymentRecordDraft,
        payment_date: NaiveDate,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            recipient_name: draft.recipient_name,
            account_number: draft.account_number,
            amount: draft.amount,
            bank_code: draft.bank_code,
            reference: draft.reference,
            payment_date,
            upload_date: uploaded_at,
            status: PaymentStatus::Pending,
            completed_date: None,
        }
    }
}

impl From<&PaymentRecord> for TaskLine {
    fn from(record: &PaymentRecord) -> Self {
        TaskLine {
            recipient_name: record.recipient_name.clone(),
            account_number: record.account_number.clone(),
            bank_code: record.bank_code.clone(),
            amount: record.amount,
        }
    }
}

#[cfg(test)]
mod payment_record_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_start_every_record_as_pending() {
        let draft = PaymentRecordDraft {
            recipient_name: "Alice".into(),
            account_number: "001".into(),
            amount: 10.0,
            bank_code: "BNK".into(),
            reference: "ref".into(),
        };
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let record = PaymentRecord::from_draft("r-1", draft, date, Utc::now());
        assert_eq!(record.status, PaymentStatus::Pending);
        assert_eq!(record.completed_date, None);
        assert_eq!(record.payment_date, date);
    }

    #[rstest]
    #[case("pending", PaymentStatus::Pending)]
    #[case("completed", PaymentStatus::Completed)]
    fn it_should_parse_stored_statuses(#[case] input: &str, #[case] expected: PaymentStatus) {
        assert_eq!(input.parse::<PaymentStatus>(), Ok(expected));
        assert_eq!(expected.to_string(), input);
    }

    #[rstest]
    fn it_should_reject_unknown_statuses() {
        assert!("done".parse::<PaymentStatus>().is_err());
    }
}
