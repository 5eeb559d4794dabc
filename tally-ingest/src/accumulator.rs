//! Per-parse accumulator for the table-row parsers: the transaction being
//! built plus its pending continuation notes, with explicit flush points.

use tally_core::RawTransaction;

pub(crate) enum Accumulator {
    Idle,
    Building {
        record: RawTransaction,
        pending_notes: Vec<String>,
    },
}

impl Accumulator {
    pub fn new() -> Self {
        Accumulator::Idle
    }

    pub fn is_building(&self) -> bool {
        matches!(self, Accumulator::Building { .. })
    }

    /// Description of the in-progress transaction, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            Accumulator::Building { record, .. } => Some(&record.description),
            Accumulator::Idle => None,
        }
    }

    /// Start a new transaction, flushing the previous one first.
    pub fn begin(&mut self, record: RawTransaction, out: &mut Vec<RawTransaction>) {
        self.flush_into(out);
        *self = Accumulator::Building {
            record,
            pending_notes: Vec::new(),
        };
    }

    pub fn push_note(&mut self, note: String) {
        if let Accumulator::Building { pending_notes, .. } = self {
            pending_notes.push(note);
        }
    }

    /// Emit the in-progress transaction with its merged notes and reset to
    /// Idle. No-op when nothing is being built.
    pub fn flush_into(&mut self, out: &mut Vec<RawTransaction>) {
        if let Accumulator::Building {
            mut record,
            pending_notes,
        } = std::mem::replace(self, Accumulator::Idle)
        {
            record.extracted_notes = join_notes(&record.description, &pending_notes);
            out.push(record);
        }
    }
}

/// Deduplicate note fragments, drop empties and echoes of the description,
/// and pipe-join the survivors.
fn join_notes(description: &str, pending: &[String]) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for note in pending {
        if !note.is_empty() && note.as_str() != description && !kept.contains(&note.as_str()) {
            kept.push(note);
        }
    }
    kept.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(desc: &str) -> RawTransaction {
        RawTransaction {
            booking_date: Some("01 JAN 24".to_string()),
            description: desc.to_string(),
            ..RawTransaction::default()
        }
    }

    #[test]
    fn test_flush_merges_and_dedups_notes() {
        let mut out = Vec::new();
        let mut acc = Accumulator::new();
        acc.begin(record("POS Purchase"), &mut out);
        acc.push_note("Merchant ref 1".to_string());
        acc.push_note("POS Purchase".to_string()); // echo of the description
        acc.push_note("Merchant ref 1".to_string()); // duplicate
        acc.push_note(String::new());
        acc.push_note("Terminal 442".to_string());
        acc.flush_into(&mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].extracted_notes, "Merchant ref 1 | Terminal 442");
    }

    #[test]
    fn test_begin_flushes_previous_transaction() {
        let mut out = Vec::new();
        let mut acc = Accumulator::new();
        acc.begin(record("first"), &mut out);
        acc.begin(record("second"), &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].description, "first");
        acc.flush_into(&mut out);
        assert_eq!(out[1].description, "second");
    }

    #[test]
    fn test_flush_when_idle_is_a_noop() {
        let mut out = Vec::new();
        let mut acc = Accumulator::new();
        acc.flush_into(&mut out);
        assert!(out.is_empty());
        assert!(!acc.is_building());
    }
}
