use crate::modules::payments::core::assignment::DayProgress;
use chrono::NaiveDate;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("Record not found or not assigned to you")]
    NotAssigned,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Decision {
    Accepted {
        payment_date: NaiveDate,
        progress: DayProgress,
        notify_admins: bool,
    },
    Rejected {
        reason: DecideError,
    },
}
