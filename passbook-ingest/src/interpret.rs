//! Shared row interpretation.
//!
//! Every layout family ends a transaction row with its numeric columns:
//! 1-3 amounts where the last is the closing balance. The steps here are
//! common to all banks; per-bank variance comes in through `RowRules`.

use chrono::NaiveDate;
use passbook_core::{
    classify_narration, is_likely_debit, scan_amounts, Direction, StatementTransaction,
};

/// Rows carrying these are balance carry-overs, not transactions.
const NON_TXN_MARKERS: &[&str] = &[
    "opening balance",
    "balance brought forward",
    "brought forward",
    "b/f",
    "balance carried forward",
    "c/f",
];

/// Per-bank interpretation knobs.
pub(crate) struct RowRules {
    pub currency: &'static str,
    /// The bank never prints a literal zero closing balance on a
    /// transaction row; a zero there means the columns were misread.
    pub reject_zero_balance: bool,
    /// Resolve direction from the prior-balance delta before falling back
    /// to narration keywords.
    pub use_balance_delta: bool,
    /// Admit rows with a single amount and no balance column, carrying the
    /// balance forward from the prior row.
    pub allow_missing_balance: bool,
}

/// Interpret one assembled row.
///
/// `rest` is the row text after the leading date token(s); `raw` the full
/// assembled row. Returns `None` for every per-row failure mode: marker
/// rows, too few amounts, rejected zero balance.
pub(crate) fn interpret_rest(
    txn_date: Option<NaiveDate>,
    value_date: Option<NaiveDate>,
    rest: &str,
    raw: &str,
    prior_balance: Option<i64>,
    rules: &RowRules,
) -> Option<StatementTransaction> {
    let lower = rest.to_lowercase();
    if NON_TXN_MARKERS.iter().any(|m| lower.contains(m)) {
        return None;
    }

    let amounts = scan_amounts(rest);
    if amounts.is_empty() || (amounts.len() < 2 && !rules.allow_missing_balance) {
        return None;
    }

    let (description, amount, direction, balance) = if amounts.len() == 1 {
        let token = &amounts[0];
        let description = rest[..token.offset].trim().to_string();
        let direction = keyword_direction(&description, token.minor_units);
        let amount = token.minor_units.abs();
        // No printed balance: carry a relative one from the prior row.
        let anchor = prior_balance.unwrap_or(0);
        let balance = match direction {
            Direction::Debit => anchor - amount,
            Direction::Credit => anchor + amount,
        };
        (description, amount, direction, balance)
    } else {
        let balance = amounts.last()?.minor_units;
        if balance == 0 && rules.reject_zero_balance {
            return None;
        }

        let n = amounts.len();
        // Narration ends where the transaction-amount columns begin.
        let columns_start = if n >= 3 {
            amounts[n - 3].offset
        } else {
            amounts[0].offset
        };
        let description = rest[..columns_start].trim().to_string();

        let (amount, direction) = if n >= 3 {
            let withdrawal = &amounts[n - 3];
            let deposit = &amounts[n - 2];
            match (withdrawal.minor_units != 0, deposit.minor_units != 0) {
                (true, false) => (withdrawal.minor_units, Direction::Debit),
                (false, true) => (deposit.minor_units, Direction::Credit),
                (false, false) => (0, Direction::Debit),
                // Both columns populated: ambiguous layout, read as a credit.
                (true, true) => (deposit.minor_units, Direction::Credit),
            }
        } else {
            let token = &amounts[0];
            let by_delta = rules
                .use_balance_delta
                .then_some(prior_balance)
                .flatten()
                .and_then(|prior| delta_direction(balance - prior, token.minor_units));
            let direction =
                by_delta.unwrap_or_else(|| keyword_direction(&description, token.minor_units));
            (token.minor_units, direction)
        };

        (description, amount.abs(), direction, balance)
    };

    let (txn_type, merchant) = classify_narration(&description);
    Some(StatementTransaction {
        txn_date,
        value_date,
        description,
        amount_minor_units: amount,
        direction,
        balance_minor_units: balance,
        currency: rules.currency.to_string(),
        txn_type,
        merchant,
        raw_text: raw.trim().to_string(),
    })
}

/// A balance delta decides direction only when it matches the transaction
/// amount exactly; anything else means intervening rows were dropped.
fn delta_direction(delta: i64, amount_minor: i64) -> Option<Direction> {
    if delta != 0 && delta.abs() == amount_minor.abs() {
        Some(if delta < 0 {
            Direction::Debit
        } else {
            Direction::Credit
        })
    } else {
        None
    }
}

fn keyword_direction(description: &str, amount_minor: i64) -> Direction {
    // Accounting-parenthesized tokens are explicit debits.
    if amount_minor < 0 || is_likely_debit(description) {
        Direction::Debit
    } else {
        Direction::Credit
    }
}
