//! Format-specific statement parsers.
//!
//! Each parser reduces one source format to a `RawTransaction` stream and
//! hands it to `tally_core::assemble` for date resolution and ordering.

pub mod delimited;
pub mod docx_tables;
pub mod pdf_tables;

pub use delimited::parse_delimited_text;
pub use docx_tables::{CellRow, CellTable, parse_docx_tables};
pub use pdf_tables::{PdfPage, PdfRow, PdfTable, parse_pdf_extraction, parse_pdf_tables};

use std::sync::OnceLock;

use regex::Regex;
use tally_core::{Ledger, RawTransaction};

/// Marker for a statement's opening-balance line.
pub(crate) const PERIOD_START_MARKER: &str = "Balance at";

/// Synthetic dateless record for the opening balance. Not a transaction.
pub(crate) fn period_start_record(balance: f64) -> RawTransaction {
    RawTransaction {
        booking_date: None,
        description: "Balance at Period Start".to_string(),
        balance,
        ..RawTransaction::default()
    }
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"));
    re.replace_all(text, " ").trim().to_string()
}

/// One uploaded statement, already reduced to the shape its parser
/// consumes. Table formats carry pre-extracted cells; only the delimited
/// format is parsed from raw bytes.
#[derive(Debug, Clone)]
pub enum StatementSource {
    DelimitedText(Vec<u8>),
    DocxTables(Vec<CellTable>),
    PdfTables(Vec<PdfPage>),
}

/// Single entry point: dispatch on the declared source format.
pub fn parse_statement(source: StatementSource) -> Ledger {
    match source {
        StatementSource::DelimitedText(bytes) => parse_delimited_text(&bytes),
        StatementSource::DocxTables(tables) => parse_docx_tables(&tables),
        StatementSource::PdfTables(pages) => parse_pdf_tables(&pages),
    }
}
