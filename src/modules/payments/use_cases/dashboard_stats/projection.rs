// Admin dashboard rollups, computed from record summaries on every request.

use crate::modules::accounts::core::user::UserAccount;
use crate::modules::payments::core::assignment::RecordSummary;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_records: usize,
    pub distributed_records: usize,
    pub pending_records: usize,
    pub completed_records: usize,
    pub total_amount: f64,
    pub completion_rate: f64,
    pub last_upload: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: String,
    pub total_records: usize,
    pub completed_records: usize,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributorStats {
    pub id: String,
    pub name: String,
    pub email: String,
    pub assigned_records: usize,
    pub completed_records: usize,
    pub total_amount: f64,
    pub completion_rate: f64,
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

pub fn dashboard_stats(summaries: &[RecordSummary]) -> DashboardStats {
    let completed_records = summaries.iter().filter(|s| s.status.is_completed()).count();
    DashboardStats {
        total_records: summaries.len(),
        distributed_records: summaries.iter().filter(|s| s.distributor_id.is_some()).count(),
        pending_records: summaries.len() - completed_records,
        completed_records,
        total_amount: summaries.iter().map(|s| s.amount).sum(),
        completion_rate: percent(completed_records, summaries.len()),
        last_upload: summaries.iter().map(|s| s.upload_date).max(),
    }
}

/// One row per payment date, newest date first.
pub fn daily_stats(summaries: &[RecordSummary]) -> Vec<DailyStats> {
    let mut by_date: BTreeMap<NaiveDate, DailyStats> = BTreeMap::new();
    for summary in summaries {
        let day = by_date.entry(summary.payment_date).or_insert_with(|| DailyStats {
            date: summary.payment_date.to_string(),
            total_records: 0,
            completed_records: 0,
            total_amount: 0.0,
        });
        day.total_records += 1;
        day.total_amount += summary.amount;
        if summary.status.is_completed() {
            day.completed_records += 1;
        }
    }
    by_date.into_values().rev().collect()
}

/// One row per distributor holding at least one assignment, best completion rate
/// first. Assignments of accounts missing from `distributors` are left out.
pub fn distributor_stats(
    summaries: &[RecordSummary],
    distributors: &[UserAccount],
) -> Vec<DistributorStats> {
    let known: HashMap<&str, &UserAccount> = distributors
        .iter()
        .map(|account| (account.id.as_str(), account))
        .collect();

    let mut by_distributor: HashMap<&str, DistributorStats> = HashMap::new();
    for summary in summaries {
        let Some(account) = summary
            .distributor_id
            .as_deref()
            .and_then(|id| known.get(id))
        else {
            continue;
        };
        let row = by_distributor
            .entry(account.id.as_str())
            .or_insert_with(|| DistributorStats {
                id: account.id.clone(),
                name: account.name.clone(),
                email: account.email.clone(),
                assigned_records: 0,
                completed_records: 0,
                total_amount: 0.0,
                completion_rate: 0.0,
            });
        row.assigned_records += 1;
        row.total_amount += summary.amount;
        if summary.status.is_completed() {
            row.completed_records += 1;
        }
    }

    let mut rows: Vec<DistributorStats> = by_distributor
        .into_values()
        .map(|mut row| {
            row.completion_rate = percent(row.completed_records, row.assigned_records);
            row
        })
        .collect();
    rows.sort_by(|a, b| {
        b.completion_rate
            .partial_cmp(&a.completion_rate)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
    rows
}
