use chrono::NaiveDate;

/// Remind distributors about the records they left pending on the day before `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepOverdue {
    pub today: NaiveDate,
}

impl SweepOverdue {
    pub fn overdue_date(&self) -> NaiveDate {
        self.today.pred_opt().unwrap_or(self.today)
    }
}
