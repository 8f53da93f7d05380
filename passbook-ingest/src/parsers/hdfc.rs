//! HDFC fixed-column statement parser.
//!
//! Expected text rows after PDF-to-text:
//!   Date     Narration                       Chq./Ref.No.     Value Dt  Withdrawal Amt.  Deposit Amt.  Closing Balance
//!   01/01/24 CREDIT INTEREST CAPITALISED     000000000000000  31/12/23            407.00       1,42,451.80
//!   02/01/24 POS 402914 BIG BAZAAR           0004029144021234 02/01/24  1,250.00          1,41,201.80
//!
//! Both amount columns are printed on well-extracted rows; narrow extracts
//! collapse them into a single transaction amount, in which case direction
//! comes from the running-balance delta (HDFC prints a closing balance on
//! every row, so the delta is trustworthy) with narration keywords as the
//! fallback.

use anyhow::Result;
use chrono::NaiveDate;
use regex::Regex;

use passbook_core::{parse_statement_date, scan_amounts, StatementTransaction};

use crate::interpret::{interpret_rest, RowRules};
use crate::parsers::StatementParser;
use crate::rows::RowAssembler;

const HEADER_PREFIXES: &[&str] = &[
    "date",
    "hdfc bank",
    "page no",
    "statement of account",
    "statement from",
    "account branch",
    "nomination",
];

const RULES: RowRules = RowRules {
    currency: "INR",
    // HDFC never prints a 0.00 closing balance on a transaction row.
    reject_zero_balance: true,
    use_balance_delta: true,
    allow_missing_balance: false,
};

pub struct HdfcParser;

impl StatementParser for HdfcParser {
    fn bank_code(&self) -> &'static str {
        "HDFC"
    }

    /// The balance-delta reconstruction needs the prior closing balance to
    /// survive page boundaries.
    fn requires_whole_document_text(&self) -> bool {
        true
    }

    fn extract_opening_balance(&self, document_text: &str) -> Option<i64> {
        document_text.lines().find_map(|line| {
            if line.to_lowercase().contains("opening balance") {
                scan_amounts(line).last().map(|a| a.minor_units)
            } else {
                None
            }
        })
    }

    fn parse(
        &self,
        text: &str,
        opening_balance_minor_units: Option<i64>,
    ) -> Result<Vec<StatementTransaction>> {
        let row_start = Regex::new(r"^\d{1,2}/\d{1,2}/\d{2,4}\s+\S")?;
        let date_split = Regex::new(r"^(?P<date>\d{1,2}/\d{1,2}/\d{2,4})\s+(?P<rest>.*)$")?;
        let mid_date = Regex::new(r"\d{1,2}/\d{1,2}/\d{2,4}")?;

        let assembler = RowAssembler::new(row_start, HEADER_PREFIXES);
        let mut prior_balance = opening_balance_minor_units;
        let mut out = Vec::new();

        for row in assembler.assemble(text) {
            let Some(caps) = date_split.captures(&row) else {
                continue;
            };
            let txn_date = parse_statement_date(&caps["date"]);
            let rest = &caps["rest"];
            let value_date = value_date_in(rest, &mid_date);
            if let Some(txn) = interpret_rest(txn_date, value_date, rest, &row, prior_balance, &RULES)
            {
                prior_balance = Some(txn.balance_minor_units);
                out.push(txn);
            }
        }
        Ok(out)
    }
}

/// The value-date column sits between the narration and the amounts: take
/// the last date token printed before the numeric columns begin.
fn value_date_in(rest: &str, date_re: &Regex) -> Option<NaiveDate> {
    let columns_start = scan_amounts(rest)
        .first()
        .map(|a| a.offset)
        .unwrap_or(rest.len());
    date_re
        .find_iter(&rest[..columns_start])
        .last()
        .and_then(|m| parse_statement_date(m.as_str()))
}
