// CSV ingest.
//
// Format
// - First non-blank line is a header and is skipped without inspection.
// - Columns are positional: recipient_name, account_number, amount, bank_code, reference.
// - Fields are split on commas and trimmed; quoting is not supported.
// - Missing trailing columns become empty strings.
// - An amount that does not parse as a finite, non-negative number becomes 0.

use crate::modules::payments::core::record::PaymentRecordDraft;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("CSV file must contain header and data rows")]
    EmptyBatch,
}

pub fn parse_amount(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => amount,
        _ => 0.0,
    }
}

pub fn parse_batch(csv_text: &str) -> Result<Vec<PaymentRecordDraft>, IngestError> {
    let lines: Vec<&str> = csv_text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();
    if lines.len() < 2 {
        return Err(IngestError::EmptyBatch);
    }

    Ok(lines[1..].iter().map(|line| parse_row(line)).collect())
}

fn parse_row(line: &str) -> PaymentRecordDraft {
    let mut fields = line.split(',').map(str::trim);
    let mut next = || fields.next().unwrap_or_default().to_string();
    let recipient_name = next();
    let account_number = next();
    let amount = parse_amount(&next());
    let bank_code = next();
    let reference = next();
    PaymentRecordDraft {
        recipient_name,
        account_number,
        amount,
        bank_code,
        reference,
    }
}
