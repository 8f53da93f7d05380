//! Per-bank statement parsers and the strategy registry.

use anyhow::Result;
use passbook_core::StatementTransaction;

pub mod generic;
pub mod hdfc;
pub mod sbi;

pub use generic::GenericParser;
pub use hdfc::HdfcParser;
pub use sbi::SbiParser;

/// Bank codes with a registered strategy.
pub const SUPPORTED_BANKS: &[&str] = &["GENERIC", "HDFC", "SBI"];

/// One statement-parsing strategy per bank layout family.
///
/// Implementations are stateless and re-entrant: `parse` holds no state
/// between invocations, so one strategy value can serve concurrent callers.
pub trait StatementParser: Send + Sync {
    /// Bank code this strategy handles (e.g. "HDFC").
    fn bank_code(&self) -> &'static str;

    /// Whether `parse` wants the whole document in one call rather than one
    /// page per call.
    fn requires_whole_document_text(&self) -> bool {
        false
    }

    /// Best-effort opening balance in minor units, scanned from the
    /// document preamble.
    fn extract_opening_balance(&self, _document_text: &str) -> Option<i64> {
        None
    }

    /// Reconstruct transactions from extracted statement text.
    ///
    /// Rows that cannot be interpreted are silently skipped; a document
    /// yielding no transactions is an empty `Vec`, not an error. `Err` is
    /// reserved for contract faults (an invalid strategy pattern), never
    /// for statement-format quirks.
    fn parse(
        &self,
        text: &str,
        opening_balance_minor_units: Option<i64>,
    ) -> Result<Vec<StatementTransaction>>;
}

/// Look up the strategy for a bank code, case-insensitively.
pub fn parser_for(bank_code: &str) -> Option<Box<dyn StatementParser>> {
    match bank_code.to_uppercase().as_str() {
        "GENERIC" => Some(Box::new(GenericParser)),
        "HDFC" => Some(Box::new(HdfcParser)),
        "SBI" => Some(Box::new(SbiParser)),
        _ => None,
    }
}
