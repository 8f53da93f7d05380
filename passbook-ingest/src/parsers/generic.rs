//! Generic delimited-statement parser.
//!
//! Fallback for banks without a dedicated layout. Expected rows after text
//! extraction:
//!   02/01/24 NEFT PAYMENT TO JOHN DOE XYZ123       250.00    10,000.00
//!   05-03-24 ATM WDL                               500.00
//!
//! One transaction amount per row; the closing balance column is frequently
//! missing from delimited exports, so single-amount rows are admitted and
//! the balance is carried forward from the prior row (or anchored at the
//! opening balance / zero).

use anyhow::Result;
use regex::Regex;

use passbook_core::{parse_statement_date, StatementTransaction};

use crate::interpret::{interpret_rest, RowRules};
use crate::parsers::StatementParser;
use crate::rows::RowAssembler;

const HEADER_PREFIXES: &[&str] = &["date", "txn date", "transaction date", "particulars"];

const RULES: RowRules = RowRules {
    currency: "INR",
    // Unknown layout: a zero closing balance may be legitimate.
    reject_zero_balance: false,
    use_balance_delta: false,
    allow_missing_balance: true,
};

pub struct GenericParser;

impl StatementParser for GenericParser {
    fn bank_code(&self) -> &'static str {
        "GENERIC"
    }

    fn parse(
        &self,
        text: &str,
        opening_balance_minor_units: Option<i64>,
    ) -> Result<Vec<StatementTransaction>> {
        let row_start = Regex::new(r"^\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\s+\S")?;
        let date_split =
            Regex::new(r"^(?P<date>\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\s+(?P<rest>.*)$")?;

        let assembler = RowAssembler::new(row_start, HEADER_PREFIXES);
        let mut prior_balance = opening_balance_minor_units;
        let mut out = Vec::new();

        for row in assembler.assemble(text) {
            let Some(caps) = date_split.captures(&row) else {
                continue;
            };
            let txn_date = parse_statement_date(&caps["date"]);
            if let Some(txn) =
                interpret_rest(txn_date, None, &caps["rest"], &row, prior_balance, &RULES)
            {
                prior_balance = Some(txn.balance_minor_units);
                out.push(txn);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use passbook_core::{Direction, TxnMode};

    #[test]
    fn test_single_amount_atm_row() {
        let txns = GenericParser.parse("05-03-24 ATM WDL 500.00", None).unwrap();
        assert_eq!(txns.len(), 1);
        let txn = &txns[0];
        assert_eq!(txn.txn_date, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(txn.direction, Direction::Debit);
        assert_eq!(txn.amount_minor_units, 50_000);
        assert_eq!(txn.balance_minor_units, -50_000); // relative, no anchor
        assert_eq!(txn.txn_type, Some(TxnMode::Atm));
        assert_eq!(txn.merchant.as_deref(), Some("ATM"));
        assert_eq!(txn.description, "ATM WDL");
    }

    #[test]
    fn test_wrapped_narration_merges_before_interpretation() {
        let text = "02/01/24 NEFT PAYMENT TO\nJOHN DOE XYZ123 250.00 10,000.00";
        let txns = GenericParser.parse(text, None).unwrap();
        assert_eq!(txns.len(), 1);
        let txn = &txns[0];
        assert_eq!(txn.description, "NEFT PAYMENT TO JOHN DOE XYZ123");
        assert_eq!(txn.direction, Direction::Debit);
        assert_eq!(txn.amount_minor_units, 25_000);
        assert_eq!(txn.balance_minor_units, 1_000_000);
        assert_eq!(
            txn.raw_text,
            "02/01/24 NEFT PAYMENT TO JOHN DOE XYZ123 250.00 10,000.00"
        );
    }

    #[test]
    fn test_opening_balance_anchors_single_amount_rows() {
        let txns = GenericParser
            .parse("01/01/24 SALARY CREDIT ACME 10,000.00", Some(50_000))
            .unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].direction, Direction::Credit);
        assert_eq!(txns[0].balance_minor_units, 1_050_000);
        assert_eq!(txns[0].txn_type, Some(TxnMode::Salary));
    }

    #[test]
    fn test_printed_balance_reanchors_carry_forward() {
        let text = "01/01/24 UPI PAY GROCER 100.00 9,900.00\n02/01/24 ATM WDL 500.00";
        let txns = GenericParser.parse(text, None).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].balance_minor_units, 990_000);
        // Second row has no printed balance; carried from the first.
        assert_eq!(txns[1].balance_minor_units, 940_000);
    }

    #[test]
    fn test_unparsable_date_still_emits_row() {
        let txns = GenericParser
            .parse("31/02/24 UPI PAY GROCER 100.00 900.00", None)
            .unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].txn_date, None);
        assert_eq!(txns[0].amount_minor_units, 10_000);
    }

    #[test]
    fn test_dateless_lines_before_first_row_are_ignored() {
        let text = "Acme Bank e-statement\nCustomer copy\n01/01/24 UPI PAY GROCER 100.00 900.00";
        let txns = GenericParser.parse(text, None).unwrap();
        assert_eq!(txns.len(), 1);
    }

    #[test]
    fn test_no_transactions_is_empty_not_error() {
        let txns = GenericParser.parse("nothing statement-like here", None).unwrap();
        assert!(txns.is_empty());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "01/01/24 UPI PAY GROCER 100.00 900.00\n02/01/24 ATM WDL 500.00 400.00";
        let first = GenericParser.parse(text, None).unwrap();
        let second = GenericParser.parse(text, None).unwrap();
        assert_eq!(first, second);
    }
}
