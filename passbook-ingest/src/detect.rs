//! Bank detection by document fingerprint.
//!
//! Deliberately trivial: the surrounding pipeline supplies the bank code,
//! and this match exists so callers without one (the CLI, tests) can get a
//! best guess. Unknown documents return `None`; callers decide whether to
//! fall back to the generic parser.

/// Keyword-match a document's text to a supported bank code.
pub fn detect_bank(document_text: &str) -> Option<&'static str> {
    let upper = document_text.to_uppercase();
    if upper.contains("HDFC BANK") || upper.contains("HDFC") {
        return Some("HDFC");
    }
    if upper.contains("STATE BANK OF INDIA")
        || upper.contains("SBI.CO.IN")
        || upper.contains("SBIN0")
    {
        return Some("SBI");
    }
    None
}
