//! Monetary value normalization shared by all statement parsers.

use tracing::warn;

/// Currency tokens stripped before numeric parsing.
pub const CURRENCY_SYMBOLS: &[&str] = &["GH₵"];

/// Parse a raw textual amount into a signed value.
///
/// Handles quoted fields, thousands separators, a currency prefix, and the
/// accounting parenthesis convention for negatives. Never fails: anything
/// unparsable logs a warning and normalizes to 0.0.
pub fn normalize_money(raw: &str) -> f64 {
    if raw.trim().is_empty() {
        return 0.0;
    }

    let mut clean = raw.replace('"', "").replace(',', "");
    for symbol in CURRENCY_SYMBOLS {
        clean = clean.replace(symbol, "");
    }
    let clean = clean.trim();

    let signed = match clean.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => format!("-{inner}"),
        None => clean.to_string(),
    };

    match signed.parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            warn!("could not parse monetary value: {raw:?}");
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parenthesized_negative() {
        assert_eq!(normalize_money("(1,234.56)"), -1234.56);
    }

    #[test]
    fn test_currency_prefix() {
        assert_eq!(normalize_money("GH₵500.00"), 500.0);
        assert_eq!(normalize_money("GH₵ 500.00"), 500.0);
    }

    #[test]
    fn test_empty_and_garbage_default_to_zero() {
        assert_eq!(normalize_money(""), 0.0);
        assert_eq!(normalize_money("   "), 0.0);
        assert_eq!(normalize_money("abc"), 0.0);
    }

    #[test]
    fn test_quoted_thousands() {
        assert_eq!(normalize_money("\"12,500.75\""), 12500.75);
    }

    #[test]
    fn test_plain_values() {
        assert_eq!(normalize_money("42.10"), 42.10);
        assert_eq!(normalize_money("-42.10"), -42.10);
        assert_eq!(normalize_money("  0.00 "), 0.0);
    }
}
