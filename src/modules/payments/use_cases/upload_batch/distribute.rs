// Even split of a batch across the distributor roster.
//
// Each distributor, in roster order, takes the next contiguous slice of
// ceil(M / K) records. The walk stops once the records run out, so when
// K * ceil(M / K) > M the last distributors in the roster get nothing.

use crate::modules::accounts::core::user::UserAccount;
use crate::modules::payments::core::assignment::Assignment;
use crate::modules::payments::core::record::PaymentRecord;
use chrono::{DateTime, Utc};
use std::ops::Range;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DistributionError {
    #[error("No distributors found")]
    NoDistributors,
}

/// Slices of `0..record_count` per distributor index. Distributors past the last
/// returned slice receive no records.
pub fn partition(
    record_count: usize,
    distributor_count: usize,
) -> Result<Vec<Range<usize>>, DistributionError> {
    if distributor_count == 0 {
        return Err(DistributionError::NoDistributors);
    }

    let per_distributor = record_count.div_ceil(distributor_count);
    Ok((0..distributor_count)
        .map(|index| index * per_distributor)
        .take_while(|start| *start < record_count)
        .map(|start| start..(start + per_distributor).min(record_count))
        .collect())
}

pub fn assign(
    records: &[PaymentRecord],
    roster: &[UserAccount],
    assigned_at: DateTime<Utc>,
) -> Result<Vec<Assignment>, DistributionError> {
    let slices = partition(records.len(), roster.len())?;
    Ok(slices
        .into_iter()
        .zip(roster)
        .flat_map(|(slice, distributor)| {
            records[slice].iter().map(move |record| Assignment {
                record_id: record.id.clone(),
                distributor_id: distributor.id.clone(),
                payment_date: record.payment_date,
                assigned_date: assigned_at,
            })
        })
        .collect())
}
