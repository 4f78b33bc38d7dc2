//! YNAB CSV export (`Date,Payee,Memo,Amount`).

use std::io::Write;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::{StatementParseError, StatementResult};
use crate::types::Transaction;

pub const YNAB_DATE_FORMAT: &str = "%Y-%m-%d";
const YNAB_HEADER: [&str; 4] = ["Date", "Payee", "Memo", "Amount"];

/// One output row; field order matches `YNAB_HEADER`.
#[derive(Debug, Serialize)]
struct YnabRecord<'a> {
    date: String,
    payee: &'a str,
    memo: &'a str,
    amount: String,
}

impl<'a> From<&'a Transaction> for YnabRecord<'a> {
    fn from(t: &'a Transaction) -> Self {
        YnabRecord {
            date: t.value_date.format(YNAB_DATE_FORMAT).to_string(),
            payee: &t.payee,
            memo: &t.memo,
            amount: format_amount(t.amount),
        }
    }
}

/// Signed, two decimals, explicit `+` for inflows: `-37.90`, `+200.00`.
pub fn format_amount(mut amount: Decimal) -> String {
    amount.rescale(2);
    if amount.is_sign_negative() && !amount.is_zero() {
        amount.to_string()
    } else {
        format!("+{}", amount.abs())
    }
}

/// Writes transactions in the layout YNAB's file import expects. The
/// value date is used as the transaction date.
pub fn write_ynab_csv<W: Write>(writer: W, transactions: &[Transaction]) -> StatementResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(YNAB_HEADER)?;
    for transaction in transactions {
        writer.serialize(YnabRecord::from(transaction))?;
    }
    writer.flush().map_err(StatementParseError::WriteFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Currency, TransactionCategory};
    use chrono::TimeZone;
    use chrono_tz::Europe::Berlin;
    use rstest::rstest;
    use std::str::FromStr;

    fn create_test_transaction(amount: &str, payee: &str, memo: &str) -> Transaction {
        Transaction {
            booking_date: Berlin.with_ymd_and_hms(2024, 8, 5, 0, 0, 0).unwrap(),
            value_date: Berlin.with_ymd_and_hms(2024, 8, 6, 0, 0, 0).unwrap(),
            category: TransactionCategory::Charge,
            memo: memo.to_string(),
            amount: Decimal::from_str(amount).unwrap(),
            currency: Currency::Eur,
            iban: "DE11100400410211111111".to_string(),
            payee: payee.to_string(),
        }
    }

    #[rstest]
    #[case("-37.9", "-37.90")]
    #[case("200", "+200.00")]
    #[case("0", "+0.00")]
    #[case("-0.00", "+0.00")]
    #[case("1234.5", "+1234.50")]
    fn test_format_amount(#[case] amount: &str, #[case] expected: &str) {
        assert_eq!(format_amount(Decimal::from_str(amount).unwrap()), expected);
    }

    #[test]
    fn test_write_ynab_csv() {
        let transactions = vec![
            create_test_transaction("-37.9", "ACME Corporation", "RE. 0031055169"),
            create_test_transaction("200", "Max Mustermann", "Miete Zimmer 1, Max Mustermann"),
        ];

        let mut out = Vec::new();
        write_ynab_csv(&mut out, &transactions).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Date,Payee,Memo,Amount\n\
             2024-08-06,ACME Corporation,RE. 0031055169,-37.90\n\
             2024-08-06,Max Mustermann,\"Miete Zimmer 1, Max Mustermann\",+200.00\n"
        );
    }

    #[test]
    fn test_write_ynab_csv_empty() {
        let mut out = Vec::new();
        write_ynab_csv(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Date,Payee,Memo,Amount\n");
    }
}
