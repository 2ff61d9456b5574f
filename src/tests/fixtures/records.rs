// Shared payment record fixtures.

use crate::modules::payments::core::assignment::Assignment;
use crate::modules::payments::core::record::{PaymentRecord, PaymentStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::fs;

pub const BATCH_CSV_PATH: &str = "./src/tests/fixtures/csv/batch_2024_01_15.csv";

pub fn batch_csv() -> String {
    fs::read_to_string(BATCH_CSV_PATH).unwrap()
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRecordDto {
    pub id: String,
    pub recipient_name: String,
    pub account_number: String,
    pub amount: f64,
    pub bank_code: String,
    pub reference: String,
    pub payment_date: NaiveDate,
    pub upload_date: DateTime<Utc>,
}

pub struct PaymentRecordBuilder {
    inner: PaymentRecord,
}

impl Default for PaymentRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl PaymentRecordBuilder {
    pub fn new() -> Self {
        let json_str = fs::read_to_string("./src/tests/fixtures/json/payment_record.json").unwrap();
        let dto: PaymentRecordDto = serde_json::from_str(&json_str).unwrap();
        Self {
            inner: PaymentRecord {
                id: dto.id,
                recipient_name: dto.recipient_name,
                account_number: dto.account_number,
                amount: dto.amount,
                bank_code: dto.bank_code,
                reference: dto.reference,
                payment_date: dto.payment_date,
                upload_date: dto.upload_date,
                status: PaymentStatus::Pending,
                completed_date: None,
            },
        }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
        self
    }

    pub fn recipient_name(mut self, v: impl Into<String>) -> Self {
        self.inner.recipient_name = v.into();
        self
    }

    pub fn amount(mut self, v: f64) -> Self {
        self.inner.amount = v;
        self
    }

    pub fn payment_date(mut self, v: NaiveDate) -> Self {
        self.inner.payment_date = v;
        self
    }

    pub fn upload_date(mut self, v: DateTime<Utc>) -> Self {
        self.inner.upload_date = v;
        self
    }

    pub fn completed_at(mut self, v: DateTime<Utc>) -> Self {
        self.inner.status = PaymentStatus::Completed;
        self.inner.completed_date = Some(v);
        self
    }

    pub fn build(self) -> PaymentRecord {
        self.inner
    }
}

/// Assigns `record` to `distributor_id` at the record's upload time.
pub fn assignment_for(record: &PaymentRecord, distributor_id: &str) -> Assignment {
    Assignment {
        record_id: record.id.clone(),
        distributor_id: distributor_id.to_string(),
        payment_date: record.payment_date,
        assigned_date: record.upload_date,
    }
}

/// `count` pending records for `payment_date`, ids `<prefix>-1..=count`.
pub fn records_on(prefix: &str, payment_date: NaiveDate, count: usize) -> Vec<PaymentRecord> {
    (1..=count)
        .map(|i| {
            PaymentRecordBuilder::new()
                .id(format!("{prefix}-{i}"))
                .recipient_name(format!("Recipient {i}"))
                .amount(100.0)
                .payment_date(payment_date)
                .build()
        })
        .collect()
}

#[cfg(test)]
mod payment_record_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = PaymentRecordBuilder::default().build();
        assert_eq!(built.id, "rec-fixed-0001");
        assert_eq!(built.amount, 150.25);
        assert_eq!(built.payment_date, date("2024-01-15"));
        assert_eq!(built.status, PaymentStatus::Pending);
    }

    #[rstest]
    fn it_should_read_the_batch_csv() {
        assert_eq!(batch_csv().lines().count(), 4);
    }
}
