//! Ledger assembly: lenient date resolution plus a stable chronological
//! sort. The single point where all parsers converge to one representation.

use chrono::NaiveDate;
use tracing::warn;

use crate::record::{Ledger, RawTransaction, TransactionRecord};

/// Date shapes observed across the supported statement formats.
const DATE_FORMATS: &[&str] = &[
    "%d %b %y",
    "%d %b %Y",
    "%d-%b-%y",
    "%d-%b-%Y",
    "%Y-%m-%d",
    "%d/%m/%Y",
];

/// Resolve a printed date token, trying each known shape in turn.
/// Unrecognized tokens resolve to None (dateless), not an error.
pub fn parse_booking_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok());
    if parsed.is_none() {
        warn!("unrecognized booking date token: {raw:?}");
    }
    parsed
}

/// Resolve every record's booking date and order the ledger.
///
/// Dateless records sort before all dated ones. The sort is stable, so
/// emission order is preserved among equal keys.
pub fn assemble(records: Vec<RawTransaction>) -> Ledger {
    let mut resolved: Vec<TransactionRecord> = records
        .into_iter()
        .map(|raw| TransactionRecord {
            booking_date: raw.booking_date.as_deref().and_then(parse_booking_date),
            description: raw.description,
            extracted_notes: raw.extracted_notes,
            debit: raw.debit,
            credit: raw.credit,
            balance: raw.balance,
            reference: raw.reference,
        })
        .collect();
    resolved.sort_by_key(|record| record.booking_date);
    Ledger { records: resolved }
}
