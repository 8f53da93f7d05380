//! SBI fixed-column statement parser.
//!
//! Expected text rows after PDF-to-text (netbanking account statement):
//!   Txn Date     Value Date   Description                  Ref No./Cheque No.   Debit      Credit     Balance
//!   8 Oct 2011   8 Oct 2011   BY TRANSFER-NEFT*SBIN0011111*PAYOUT               50,000.00  55,274.00
//!   10 Oct 2011  10 Oct 2011  TO TRANSFER-INB IMPS/P2A/129xxx                   5,274.00   50,000.00
//!
//! Only one of the Debit/Credit columns is populated per row, so extraction
//! usually leaves a single transaction amount plus the balance; direction
//! comes from narration keywords (SBI's BY TRANSFER / TO TRANSFER phrasing
//! included).

use anyhow::Result;
use regex::Regex;

use passbook_core::{parse_statement_date, StatementTransaction};

use crate::interpret::{interpret_rest, RowRules};
use crate::parsers::StatementParser;
use crate::rows::RowAssembler;

const HEADER_PREFIXES: &[&str] = &[
    "txn date",
    "date",
    "account",
    "address",
    "branch",
    "ifs code",
    "balance as on",
    "drawing power",
];

const RULES: RowRules = RowRules {
    currency: "INR",
    // SBI never prints a 0.00 closing balance on a transaction row.
    reject_zero_balance: true,
    use_balance_delta: false,
    allow_missing_balance: false,
};

pub struct SbiParser;

impl StatementParser for SbiParser {
    fn bank_code(&self) -> &'static str {
        "SBI"
    }

    fn parse(
        &self,
        text: &str,
        opening_balance_minor_units: Option<i64>,
    ) -> Result<Vec<StatementTransaction>> {
        let row_start = Regex::new(r"^\d{1,2}\s+[A-Za-z]{3,9}\s+\d{4}\s+\S")?;
        let date_split = Regex::new(concat!(
            r"^(?P<txn>\d{1,2}\s+[A-Za-z]{3,9}\s+\d{4})\s+",
            r"(?:(?P<value>\d{1,2}\s+[A-Za-z]{3,9}\s+\d{4})\s+)?",
            r"(?P<rest>.*)$"
        ))?;

        let assembler = RowAssembler::new(row_start, HEADER_PREFIXES);
        let prior_balance = opening_balance_minor_units;
        let mut out = Vec::new();

        for row in assembler.assemble(text) {
            let Some(caps) = date_split.captures(&row) else {
                continue;
            };
            let txn_date = parse_statement_date(&caps["txn"]);
            let value_date = caps
                .name("value")
                .and_then(|m| parse_statement_date(m.as_str()));
            if let Some(txn) =
                interpret_rest(txn_date, value_date, &caps["rest"], &row, prior_balance, &RULES)
            {
                out.push(txn);
            }
        }
        Ok(out)
    }
}
