//! Narration heuristics: transaction mode and counterparty extraction.
//!
//! Deterministic keyword cascades over lower-cased narration text. Wrong
//! guesses are cheap (the fields are advisory hints for enrichment), missing
//! a channel marker is not, so short markers match on token boundaries to
//! keep "deposit" from reading as POS and "draft" as DR.

use crate::types::TxnMode;

const POS_MERCHANT_MAX_CHARS: usize = 30;

/// Narration substrings that indicate money coming in.
const CREDIT_HINTS: &[&str] = &[
    "refund",
    "reversal",
    "cashback",
    "reward",
    "interest",
    "salary",
    "by transfer",
];

/// Classify a narration into a coarse mode and a best-effort counterparty.
///
/// Either half can be `None`: the mode when no channel marker is present,
/// the merchant when extraction yields nothing better than digits.
pub fn classify_narration(narration: &str) -> (Option<TxnMode>, Option<String>) {
    let lower = narration.to_lowercase();
    let mode = detect_mode(&lower);
    (mode, extract_merchant(mode, narration))
}

/// First matching channel marker wins; specific rails before catch-alls.
fn detect_mode(lower: &str) -> Option<TxnMode> {
    let tokens = alnum_tokens(lower);
    let has = |t: &str| tokens.iter().any(|&tok| tok == t);

    if has("upi") {
        return Some(TxnMode::Upi);
    }
    if has("imps") {
        return Some(TxnMode::Imps);
    }
    if has("neft") {
        return Some(TxnMode::Neft);
    }
    if has("rtgs") {
        return Some(TxnMode::Rtgs);
    }
    if has("pos") {
        return Some(TxnMode::Pos);
    }
    if has("atm") || has("atw") {
        return Some(TxnMode::Atm);
    }
    if lower.contains("salary") {
        return Some(TxnMode::Salary);
    }
    if has("chq") || lower.contains("cheque") {
        return Some(TxnMode::Cheque);
    }
    if lower.contains("charge") || has("chg") || has("chrg") || has("fee") || has("fees") {
        return Some(TxnMode::Charge);
    }
    if lower.contains("cashback")
        || lower.contains("reward")
        || lower.contains("reversal")
        || lower.contains("refund")
    {
        return Some(TxnMode::Refund);
    }
    if lower.contains("interest") || has("int") {
        return Some(TxnMode::Interest);
    }
    None
}

fn extract_merchant(mode: Option<TxnMode>, narration: &str) -> Option<String> {
    let words: Vec<&str> = narration.split_whitespace().collect();

    let candidate = match mode {
        Some(TxnMode::Pos) => pos_merchant(&words)?,
        Some(TxnMode::Upi | TxnMode::Imps | TxnMode::Neft | TxnMode::Rtgs) => {
            // Counterparty usually trails the narration; routing separators
            // carry no information.
            let tail = &words[words.len().saturating_sub(2)..];
            tail.iter()
                .map(|w| strip_separators(w))
                .filter(|w| !w.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        }
        Some(TxnMode::Atm) => return Some("ATM".to_string()),
        _ => words[words.len().saturating_sub(3)..].join(" "),
    };

    let candidate = candidate.trim().to_string();
    if candidate.is_empty() || is_purely_numeric(&candidate) {
        None
    } else {
        Some(candidate)
    }
}

/// Tokens after the literal "POS" marker, minus terminal ids and date
/// columns (anything without a letter in it).
fn pos_merchant(words: &[&str]) -> Option<String> {
    let marker = words.iter().position(|w| w.eq_ignore_ascii_case("pos"))?;
    let label = words[marker + 1..]
        .iter()
        .filter(|w| w.chars().any(|c| c.is_ascii_alphabetic()))
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let capped: String = label.chars().take(POS_MERCHANT_MAX_CHARS).collect();
    Some(capped.trim_end().to_string())
}

/// Keyword guess at direction, used when a row exposes a single amount and
/// no debit/credit columns.
///
/// Credit hints win outright; then any debit channel marker forces debit;
/// no signal at all defaults to credit.
pub fn is_likely_debit(narration: &str) -> bool {
    let lower = narration.to_lowercase();
    if CREDIT_HINTS.iter().any(|hint| lower.contains(hint)) {
        return false;
    }

    let tokens = alnum_tokens(&lower);
    let has = |t: &str| tokens.iter().any(|&tok| tok == t);
    has("atm")
        || has("atw")
        || has("upi")
        || has("imps")
        || has("neft")
        || has("rtgs")
        || has("pos")
        || has("billpay")
        || lower.contains("bill pay")
        || has("chq")
        || lower.contains("cheque")
        || has("debit")
        || has("dr")
        || lower.contains("to transfer")
}

fn strip_separators(word: &str) -> String {
    word.chars()
        .filter(|c| !matches!(c, '*' | '/' | '-'))
        .collect()
}

fn alnum_tokens(s: &str) -> Vec<&str> {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

fn is_purely_numeric(s: &str) -> bool {
    let mut saw_digit = false;
    for c in s.chars() {
        if c.is_ascii_digit() {
            saw_digit = true;
        } else if !c.is_whitespace() {
            return false;
        }
    }
    saw_digit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_resolution_order() {
        // UPI outranks POS when both markers appear.
        let (mode, _) = classify_narration("UPI POS 402914 SWIGGY");
        assert_eq!(mode, Some(TxnMode::Upi));
    }

    #[test]
    fn test_pos_does_not_fire_inside_deposit() {
        let (mode, _) = classify_narration("CASH DEPOSIT BRANCH");
        assert_eq!(mode, None);
    }

    #[test]
    fn test_pos_merchant_drops_terminal_ids() {
        let (mode, merchant) = classify_narration("POS 402914 BIG BAZAAR MUMBAI");
        assert_eq!(mode, Some(TxnMode::Pos));
        assert_eq!(merchant.as_deref(), Some("BIG BAZAAR MUMBAI"));
    }

    #[test]
    fn test_pos_merchant_is_capped() {
        let (_, merchant) =
            classify_narration("POS SOME EXTREMELY LONG MERCHANT TRADING NAME PVT LTD MUMBAI");
        assert!(merchant.unwrap().chars().count() <= 30);
    }

    #[test]
    fn test_transfer_merchant_takes_stripped_tail() {
        let (mode, merchant) = classify_narration("NEFT PAYMENT TO JOHN *DOE/");
        assert_eq!(mode, Some(TxnMode::Neft));
        assert_eq!(merchant.as_deref(), Some("JOHN DOE"));
    }

    #[test]
    fn test_transfer_merchant_rejects_pure_digits() {
        let (_, merchant) = classify_narration("IMPS 509912345678 12345");
        assert_eq!(merchant, None);
    }

    #[test]
    fn test_atm_merchant_is_fixed_label() {
        let (mode, merchant) = classify_narration("ATM WDL 402914");
        assert_eq!(mode, Some(TxnMode::Atm));
        assert_eq!(merchant.as_deref(), Some("ATM"));
    }

    #[test]
    fn test_fallback_merchant_last_three_words() {
        let (mode, merchant) = classify_narration("PAID TO LOCAL KIRANA STORE");
        assert_eq!(mode, None);
        assert_eq!(merchant.as_deref(), Some("LOCAL KIRANA STORE"));
    }

    #[test]
    fn test_interest_classifies() {
        let (mode, _) = classify_narration("CREDIT INTEREST CAPITALISED");
        assert_eq!(mode, Some(TxnMode::Interest));
    }

    #[test]
    fn test_salary_outranks_refund_keywords() {
        let (mode, _) = classify_narration("SALARY REFUND ADJUSTMENT");
        assert_eq!(mode, Some(TxnMode::Salary));
    }

    #[test]
    fn test_likely_debit_channels() {
        assert!(is_likely_debit("ATM WDL"));
        assert!(is_likely_debit("UPI-SWIGGY-BANGALORE"));
        assert!(is_likely_debit("CHQ PAID 112233"));
        assert!(is_likely_debit("TO TRANSFER-INB"));
    }

    #[test]
    fn test_credit_hints_win_over_channels() {
        // Channel marker present, but the refund hint decides.
        assert!(!is_likely_debit("UPI REFUND SWIGGY"));
        assert!(!is_likely_debit("BY TRANSFER-NEFT*SBIN0001*PAYOUT"));
        assert!(!is_likely_debit("CREDIT INTEREST CAPITALISED"));
    }

    #[test]
    fn test_no_signal_defaults_to_credit() {
        assert!(!is_likely_debit("MISC NARRATION"));
    }
}
