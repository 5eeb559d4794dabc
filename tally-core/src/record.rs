use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Normalized output of statement parsers (format-agnostic).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Absent for the synthetic "Balance at Period Start" record and for
    /// rows whose printed date token could not be recognized.
    pub booking_date: Option<NaiveDate>,
    pub description: String,
    /// Continuation-row fragments, deduplicated and pipe-joined (" | ").
    /// Empty when the source had no continuation rows.
    pub extracted_notes: String,
    pub debit: f64,
    pub credit: f64,
    /// Running balance as printed in the source. Never reconciled against
    /// the debit/credit deltas of neighboring records.
    pub balance: f64,
    /// Statement reference; only the PDF table layout carries one.
    pub reference: Option<String>,
}

/// Parser output before date resolution: the booking date is still the raw
/// token as printed in the source. `assemble` turns these into final records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTransaction {
    pub booking_date: Option<String>,
    pub description: String,
    pub extracted_notes: String,
    pub debit: f64,
    pub credit: f64,
    pub balance: f64,
    pub reference: Option<String>,
}

/// Ordered sequence of normalized records: dateless records first, then
/// ascending by booking date, stable within equal keys.
///
/// An empty ledger is a valid result ("no transactions could be
/// extracted"), distinct from a caller error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub records: Vec<TransactionRecord>,
}

impl Ledger {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransactionRecord> {
        self.records.iter()
    }
}
