//! Word-processor table statement parser.
//!
//! Rows arrive as already-extracted cell text, in document order. Column
//! layouts vary by vendor (merged cells shift everything), so main rows are
//! mapped to fields by cell count, and the single-amount 6-cell layout
//! infers debit vs credit from description keywords.

use std::sync::OnceLock;

use regex::Regex;
use tally_core::{Ledger, RawTransaction, assemble, normalize_money};

use crate::accumulator::Accumulator;
use crate::parsers::{PERIOD_START_MARKER, period_start_record};

/// One table row: already-extracted cell text.
pub type CellRow = Vec<String>;
/// One table: rows in document order.
pub type CellTable = Vec<CellRow>;

/// Rows whose first cell contains one of these are boilerplate, not data.
const SKIP_MARKERS: &[&str] = &["CURRENCY :", "Booking Date"];

/// Description keywords that route the 6-cell layout's amount to credit.
const CREDIT_KEYWORDS: &[&str] = &["deposit", "transfer in", "swift"];

/// Cheque-reference fragments are layout noise, not notes.
const CHEQUE_MARKER: &str = ": Chq No -";

fn main_row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}\s[A-Z]{3}\s\d{2}$").expect("main row regex"))
}

/// Parse word-processor tables. The accumulator carries across table
/// boundaries: continuation rows of one transaction may span tables.
pub fn parse_docx_tables(tables: &[CellTable]) -> Ledger {
    let mut rows: Vec<RawTransaction> = Vec::new();
    let mut acc = Accumulator::new();

    for table in tables {
        for row in table {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| cell.replace('\n', " ").trim().to_string())
                .collect();
            let Some(first) = cells.first() else {
                continue;
            };

            if SKIP_MARKERS.iter().any(|marker| first.contains(marker)) {
                continue;
            }

            let second = cells.get(1).map(String::as_str).unwrap_or("");
            if second.contains(PERIOD_START_MARKER) {
                acc.flush_into(&mut rows);
                let balance = cells.last().map(|c| normalize_money(c)).unwrap_or(0.0);
                rows.push(period_start_record(balance));
                continue;
            }

            if main_row_re().is_match(first) {
                acc.begin(main_row(&cells), &mut rows);
                continue;
            }

            if first.is_empty() && acc.is_building() {
                let note = continuation_note(&cells);
                if !note.is_empty() && !note.contains(CHEQUE_MARKER) {
                    acc.push_note(note);
                }
            }
        }
    }

    acc.flush_into(&mut rows);
    assemble(rows)
}

/// Map a main row to fields by cell count. Unknown layouts degrade to a
/// description-and-balance record with zero amounts.
fn main_row(cells: &[String]) -> RawTransaction {
    let date = Some(cells[0].clone());
    match cells.len() {
        9 => RawTransaction {
            booking_date: date,
            description: cells[4].clone(),
            debit: normalize_money(&cells[6]),
            credit: normalize_money(&cells[7]),
            balance: normalize_money(&cells[8]),
            ..RawTransaction::default()
        },
        7 => RawTransaction {
            booking_date: date,
            description: cells[2].clone(),
            debit: normalize_money(&cells[4]),
            credit: normalize_money(&cells[5]),
            balance: normalize_money(&cells[6]),
            ..RawTransaction::default()
        },
        6 => {
            let description = cells[2].clone();
            let amount = normalize_money(&cells[4]);
            let balance = normalize_money(&cells[5]);
            let lowered = description.to_lowercase();
            let to_credit = CREDIT_KEYWORDS.iter().any(|kw| lowered.contains(kw));
            let (debit, credit) = if to_credit { (0.0, amount) } else { (amount, 0.0) };
            RawTransaction {
                booking_date: date,
                description,
                debit,
                credit,
                balance,
                ..RawTransaction::default()
            }
        }
        _ => RawTransaction {
            booking_date: date,
            description: cells.get(2).cloned().unwrap_or_default(),
            balance: cells.last().map(|c| normalize_money(c)).unwrap_or(0.0),
            ..RawTransaction::default()
        },
    }
}

/// Description-position cell for a continuation row: the 9-cell layout
/// keeps it in cell 4, narrower layouts in cell 2.
fn continuation_note(cells: &[String]) -> String {
    if cells.len() == 9 {
        cells[4].clone()
    } else if cells.len() >= 3 {
        cells[2].clone()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(cells: &[&str]) -> CellRow {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_nine_cell_layout() {
        let tables = vec![vec![row(&[
            "02 JAN 24", "FT2400212345", "0012345678", "ACME LTD", "Supplier payment", "02 JAN 24",
            "1,500.00", "", "8,500.00",
        ])]];
        let ledger = parse_docx_tables(&tables);

        assert_eq!(ledger.len(), 1);
        let record = &ledger.records[0];
        assert_eq!(record.booking_date, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(record.description, "Supplier payment");
        assert_eq!(record.debit, 1500.00);
        assert_eq!(record.credit, 0.00);
        assert_eq!(record.balance, 8500.00);
    }

    #[test]
    fn test_seven_cell_layout() {
        let tables = vec![vec![row(&[
            "03 JAN 24", "FT2400311111", "Utility bill", "03 JAN 24", "200.00", "", "8,300.00",
        ])]];
        let ledger = parse_docx_tables(&tables);

        let record = &ledger.records[0];
        assert_eq!(record.description, "Utility bill");
        assert_eq!(record.debit, 200.00);
        assert_eq!(record.balance, 8300.00);
    }

    #[test]
    fn test_six_cell_layout_keyword_sign_inference() {
        let tables = vec![vec![
            row(&["04 JAN 24", "REF1", "Deposit via transfer", "04 JAN 24", "200.00", "8,500.00"]),
            row(&["05 JAN 24", "REF2", "POS Purchase", "05 JAN 24", "50.00", "8,450.00"]),
        ]];
        let ledger = parse_docx_tables(&tables);

        let deposit = &ledger.records[0];
        assert_eq!(deposit.credit, 200.00);
        assert_eq!(deposit.debit, 0.00);

        let purchase = &ledger.records[1];
        assert_eq!(purchase.debit, 50.00);
        assert_eq!(purchase.credit, 0.00);
    }

    #[test]
    fn test_unknown_layout_degrades_to_balance_only() {
        let tables = vec![vec![row(&["06 JAN 24", "REF3", "Charges", "8,440.00"])]];
        let ledger = parse_docx_tables(&tables);

        let record = &ledger.records[0];
        assert_eq!(record.description, "Charges");
        assert_eq!(record.debit, 0.00);
        assert_eq!(record.credit, 0.00);
        assert_eq!(record.balance, 8440.00);
    }

    #[test]
    fn test_skip_and_period_start_rows() {
        let tables = vec![vec![
            row(&["CURRENCY : GHS", "", ""]),
            row(&["Booking Date", "Reference", "Description"]),
            row(&["", "Balance at 01 JAN 24", "", "", "10,000.00"]),
            row(&["02 JAN 24", "REF", "Rent", "02 JAN 24", "1,000.00", "9,000.00"]),
        ]];
        let ledger = parse_docx_tables(&tables);

        assert_eq!(ledger.len(), 2);
        let opening = &ledger.records[0];
        assert_eq!(opening.booking_date, None);
        assert_eq!(opening.description, "Balance at Period Start");
        assert_eq!(opening.balance, 10000.00);
        assert_eq!(ledger.records[1].description, "Rent");
    }

    #[test]
    fn test_continuation_rows_collect_notes() {
        let tables = vec![vec![
            row(&[
                "07 JAN 24", "FT2400712222", "0012345678", "ACME LTD", "Cheque payment",
                "07 JAN 24", "300.00", "", "8,140.00",
            ]),
            row(&["", "", "", "", "Being payment for invoice 88", "", "", "", ""]),
            row(&["", "", "", "", ": Chq No -000123", "", "", "", ""]),
            row(&["", "", "", "", "Cheque payment", "", "", "", ""]),
            row(&["", "", "", "", "Being payment for invoice 88", "", "", "", ""]),
        ]];
        let ledger = parse_docx_tables(&tables);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.records[0].extracted_notes, "Being payment for invoice 88");
    }

    #[test]
    fn test_accumulator_flushed_at_input_end() {
        let tables = vec![vec![
            row(&["08 JAN 24", "REF", "Final entry", "08 JAN 24", "10.00", "8,130.00"]),
            row(&["", "", "Branch memo"]),
        ]];
        let ledger = parse_docx_tables(&tables);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.records[0].extracted_notes, "Branch memo");
    }

    #[test]
    fn test_empty_input_yields_empty_ledger() {
        assert!(parse_docx_tables(&[]).is_empty());
        assert!(parse_docx_tables(&[vec![]]).is_empty());
    }
}
