//! Delimited-text statement parser.
//!
//! Line-oriented CSV-like exports with no fixed schema. A date token near
//! the start of a line opens a transaction block; following lines are
//! wrapped description text belonging to that block. The trailing fields of
//! the opening line are debit, credit, balance in that order — read from
//! the end because leading column counts vary between exports.

use std::sync::OnceLock;

use regex::Regex;
use tally_core::{Ledger, RawTransaction, assemble, normalize_money};

use crate::parsers::collapse_whitespace;

/// Maximum description length for this format.
const DESCRIPTION_LIMIT: usize = 200;

/// A date anchor only opens a block when it starts within this many bytes
/// of the line start. Later matches are reference-number noise, e.g. a
/// date-like token embedded in a transaction id.
const ANCHOR_WINDOW: usize = 5;

fn date_anchor_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b\d{1,2}[\s-](?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[\s-]\d{2,4}\b",
        )
        .expect("date anchor regex")
    })
}

fn comma_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",+").expect("comma run regex"))
}

/// Parse a delimited-text export. Bytes are decoded leniently; invalid
/// sequences never abort the parse. Lines before the first date-anchored
/// line are discarded.
pub fn parse_delimited_text(raw: &[u8]) -> Ledger {
    let content = String::from_utf8_lossy(raw);
    let mut rows: Vec<RawTransaction> = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in content.lines() {
        let opens = date_anchor_re()
            .find(line)
            .is_some_and(|m| m.start() < ANCHOR_WINDOW);
        if opens {
            if !block.is_empty() {
                rows.push(reduce_block(&block));
            }
            block = vec![line];
        } else if !block.is_empty() {
            block.push(line);
        }
    }
    if !block.is_empty() {
        rows.push(reduce_block(&block));
    }

    assemble(rows)
}

/// Collapse one date-anchored block into a single transaction. A block
/// whose opening line yields no fields still produces a zero-amount record.
fn reduce_block(lines: &[&str]) -> RawTransaction {
    let first = lines[0];

    let mut fields = split_fields(first);
    while fields.last().is_some_and(|f| f.trim().is_empty()) {
        fields.pop();
    }

    let mut debit = 0.0;
    let mut credit = 0.0;
    let mut balance = 0.0;
    let n = fields.len();
    if n >= 1 {
        balance = normalize_money(&fields[n - 1]);
    }
    if n >= 2 {
        credit = normalize_money(&fields[n - 2]);
    }
    if n >= 3 {
        debit = normalize_money(&fields[n - 3]);
    }

    let date_token = date_anchor_re().find(first).map(|m| m.as_str().to_string());

    let full_text = lines.join(" ");
    let without_date = match &date_token {
        Some(token) => full_text.replacen(token.as_str(), "", 1),
        None => full_text,
    };
    let decommaed = comma_run_re().replace_all(&without_date, " ");
    let mut description = collapse_whitespace(&decommaed);
    if description.chars().count() > DESCRIPTION_LIMIT {
        description = description.chars().take(DESCRIPTION_LIMIT).collect();
    }

    RawTransaction {
        booking_date: date_token,
        description,
        debit,
        credit,
        balance,
        ..RawTransaction::default()
    }
}

/// Tokenize the opening line as one flexible CSV record. Malformed quoting
/// degrades to "no fields" rather than failing the parse.
fn split_fields(line: &str) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(line.as_bytes());
    match reader.records().next() {
        Some(Ok(record)) => record.iter().map(str::to_string).collect(),
        _ => Vec::new(),
    }
}
