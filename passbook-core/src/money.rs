//! Monetary token scanning.
//!
//! Statement rows carry 1-3 amount-looking tokens (withdrawal, deposit,
//! closing balance) mixed into free text. `scan_amounts` finds them in
//! textual order with their byte offsets so interpreters can split the
//! narration from the numeric columns.

use std::sync::OnceLock;

use regex::Regex;

/// A monetary token found in a text span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAmount {
    /// The matched text, separators and parentheses included.
    pub text: String,
    /// Signed value in minor units. Parenthesized (accounting) notation is
    /// normalized to a negative value.
    pub minor_units: i64,
    /// Byte offset of the match within the scanned span.
    pub offset: usize,
}

// Optional accounting parentheses, digits with optional comma groups of 2 or
// 3 (Indian statements mix lakh and western grouping), exactly two decimals.
static AMOUNT_RE: OnceLock<Regex> = OnceLock::new();

fn amount_re() -> &'static Regex {
    AMOUNT_RE.get_or_init(|| {
        Regex::new(r"\(?\d+(?:,\d{2,3})*\.\d{2}\)?").expect("amount pattern compiles")
    })
}

/// Find every monetary token in `span`, left to right.
///
/// An empty result means "no amounts found"; a token whose value is `0.00`
/// is a valid zero, not a miss.
pub fn scan_amounts(span: &str) -> Vec<RawAmount> {
    let mut out = Vec::new();
    for m in amount_re().find_iter(span) {
        // A digit right after the match means a longer decimal run, e.g.
        // "123.456" - not a two-decimal money token.
        if span[m.end()..].starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }
        if let Some(minor_units) = to_minor_units(m.as_str()) {
            out.push(RawAmount {
                text: m.as_str().to_string(),
                minor_units,
                offset: m.start(),
            });
        }
    }
    out
}

/// Convert a matched token to signed minor units with integer math only.
fn to_minor_units(text: &str) -> Option<i64> {
    let negative = text.starts_with('(') && text.ends_with(')');
    let bare = text
        .trim_matches(|c| c == '(' || c == ')')
        .replace(',', "");
    let (major, minor) = bare.split_once('.')?;
    let major: i64 = major.parse().ok()?;
    let minor: i64 = minor.parse().ok()?;
    let value = major.checked_mul(100)?.checked_add(minor)?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_amounts_in_order_with_offsets() {
        let span = "NEFT PAYMENT TO JOHN DOE XYZ123 250.00 10,000.00";
        let amounts = scan_amounts(span);
        assert_eq!(amounts.len(), 2);
        assert_eq!(amounts[0].minor_units, 25000);
        assert_eq!(amounts[0].offset, span.find("250.00").unwrap());
        assert_eq!(amounts[1].minor_units, 1_000_000);
        assert_eq!(amounts[1].text, "10,000.00");
    }

    #[test]
    fn test_lakh_grouping() {
        let amounts = scan_amounts("1,42,451.80");
        assert_eq!(amounts.len(), 1);
        assert_eq!(amounts[0].minor_units, 14_245_180);
    }

    #[test]
    fn test_parenthesized_is_negative() {
        let amounts = scan_amounts("reversal (1,234.56) 500.00");
        assert_eq!(amounts.len(), 2);
        assert_eq!(amounts[0].minor_units, -123_456);
        assert_eq!(amounts[1].minor_units, 50_000);
    }

    #[test]
    fn test_zero_token_is_a_valid_zero() {
        let amounts = scan_amounts("0.00");
        assert_eq!(amounts.len(), 1);
        assert_eq!(amounts[0].minor_units, 0);
    }

    #[test]
    fn test_ignores_non_monetary_digit_runs() {
        // Reference numbers and dates never carry a two-decimal tail.
        assert!(scan_amounts("000000000000000 31/12/23").is_empty());
        assert!(scan_amounts("no amounts here").is_empty());
    }

    #[test]
    fn test_rejects_longer_decimal_runs() {
        assert!(scan_amounts("rate 0.0825").is_empty());
    }
}
