//! tally-core: canonical transaction records, monetary normalization, and
//! ledger assembly shared by every statement parser.

pub mod assemble;
pub mod money;
pub mod record;

pub use assemble::{assemble, parse_booking_date};
pub use money::normalize_money;
pub use record::{Ledger, RawTransaction, TransactionRecord};
