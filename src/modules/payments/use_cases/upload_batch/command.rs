use chrono::NaiveDate;

/// A raw CSV batch for one payment date, as received from an admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBatch {
    pub payment_date: NaiveDate,
    pub csv_text: String,
}
