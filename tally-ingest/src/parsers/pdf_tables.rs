//! PDF table statement parser.
//!
//! Consumes tables already extracted from the PDF: pages of tables of rows
//! of nullable cells, in document order. Transaction rows follow a fixed
//! 9-column layout (date, reference, account number, account name,
//! description, value date, debit, credit, balance); each transaction is
//! usually its own small table, with continuation rows carrying note text
//! in the description column.

use std::sync::OnceLock;

use anyhow::Result;
use regex::Regex;
use tracing::error;

use tally_core::{Ledger, RawTransaction, assemble, normalize_money};

use crate::accumulator::Accumulator;
use crate::parsers::{PERIOD_START_MARKER, collapse_whitespace, period_start_record};

/// Cell extracted from a PDF table; None where extraction found nothing.
pub type PdfRow = Vec<Option<String>>;
/// One extracted table: rows of nullable cells.
pub type PdfTable = Vec<PdfRow>;
/// One page: its tables in document order.
pub type PdfPage = Vec<PdfTable>;

/// Boilerplate rows recognized by their first cell. The truncated forms
/// are what extraction yields for wrapped footer cells.
const FOOTER_MARKERS: &[&str] = &[
    "Total Debits",
    "Total Credits",
    "Closing Balan",
    "Available Bala",
    "Uncleared",
    "Booking Date",
];

const CHEQUE_MARKER: &str = ": Chq No";
const DEBIT_CHEQUE_MARKER: &str = "Debit Cheque";

fn main_row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}\s[A-Z]{3}\s\d{2}$").expect("main row regex"))
}

fn pure_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\d,]+\.\d{2}$").expect("pure amount regex"))
}

/// Run the extraction collaborator and parse its output. Total extraction
/// failure is contained here: the error is logged and the caller gets an
/// empty ledger instead of a propagated failure.
pub fn parse_pdf_extraction<F>(extract: F) -> Ledger
where
    F: FnOnce() -> Result<Vec<PdfPage>>,
{
    match extract() {
        Ok(pages) => parse_pdf_tables(&pages),
        Err(err) => {
            error!("PDF extraction failed: {err:#}");
            Ledger::default()
        }
    }
}

/// Parse pre-extracted PDF tables. The accumulator carries across tables
/// and pages: a transaction's continuation rows may land in the next table.
pub fn parse_pdf_tables(pages: &[PdfPage]) -> Ledger {
    let mut rows_out: Vec<RawTransaction> = Vec::new();
    let mut acc = Accumulator::new();

    for page in pages {
        for table in page {
            for row in table {
                let cells: Vec<String> = row
                    .iter()
                    .map(|cell| match cell {
                        Some(text) => text.replace('\n', " ").trim().to_string(),
                        None => String::new(),
                    })
                    .collect();
                if cells.iter().all(|c| c.is_empty()) {
                    continue;
                }

                let first = cells[0].as_str();

                if FOOTER_MARKERS.iter().any(|marker| first.contains(marker)) {
                    continue;
                }

                if cells.iter().any(|c| c.contains(PERIOD_START_MARKER)) {
                    acc.flush_into(&mut rows_out);
                    let balance = cells.last().map(|c| normalize_money(c)).unwrap_or(0.0);
                    rows_out.push(period_start_record(balance));
                    continue;
                }

                if main_row_re().is_match(first) {
                    acc.begin(main_row(&cells), &mut rows_out);
                    continue;
                }

                if first.is_empty() && acc.is_building() && cells.len() > 4 {
                    let note = collapse_whitespace(&cells[4]);
                    if keep_note(&note, acc.description().unwrap_or("")) {
                        acc.push_note(note);
                    }
                }
            }
        }
    }

    acc.flush_into(&mut rows_out);
    assemble(rows_out)
}

/// Fixed layout: 0=date 1=ref 2=acct# 3=acct name 4=desc 5=value date
/// 6=debit 7=credit 8=balance. Short rows degrade missing fields to
/// empty/zero.
fn main_row(cells: &[String]) -> RawTransaction {
    let cell = |i: usize| cells.get(i).map(String::as_str).unwrap_or("");
    RawTransaction {
        booking_date: Some(cells[0].clone()),
        reference: Some(collapse_whitespace(cell(1))),
        description: collapse_whitespace(cell(4)),
        debit: normalize_money(cell(6)),
        credit: normalize_money(cell(7)),
        balance: normalize_money(cell(8)),
        ..RawTransaction::default()
    }
}

/// Continuation-note filter: drop empties, echoes of the description,
/// cheque references, and bare amount strings (a repeated balance must not
/// be misfiled as a note).
fn keep_note(note: &str, description: &str) -> bool {
    !(note.is_empty()
        || note == description
        || note.contains(CHEQUE_MARKER)
        || note.contains(DEBIT_CHEQUE_MARKER)
        || pure_amount_re().is_match(note))
}
