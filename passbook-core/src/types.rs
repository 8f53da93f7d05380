use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether money left or entered the account.
///
/// Always explicit on a record; downstream consumers must never re-derive
/// the sign from the amount itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Debit,
    Credit,
}

/// Coarse transaction mode inferred from narration text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TxnMode {
    Upi,
    Imps,
    Neft,
    Rtgs,
    Pos,
    Atm,
    Salary,
    Cheque,
    Charge,
    Refund,
    Interest,
}

/// Normalized output of statement parsers (bank-agnostic).
///
/// One reconstructed statement line. Amounts are in the currency's minor
/// units (paisa for INR): `amount_minor_units` is always the absolute value,
/// `direction` carries the sign semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementTransaction {
    /// Transaction date; `None` if the printed date did not parse.
    pub txn_date: Option<NaiveDate>,
    /// Settlement date, when the statement prints one distinct from `txn_date`.
    pub value_date: Option<NaiveDate>,
    /// Narration with the trailing numeric columns stripped.
    pub description: String,
    pub amount_minor_units: i64,
    pub direction: Direction,
    /// Closing balance after this transaction, in minor units.
    pub balance_minor_units: i64,
    pub currency: String,
    pub txn_type: Option<TxnMode>,
    /// Best-effort counterparty label; `None` when genuinely unknown.
    pub merchant: Option<String>,
    /// The assembled logical row as it appeared in the statement text.
    pub raw_text: String,
}
