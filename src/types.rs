use crate::{
    errors::{StatementParseError, StatementResult},
    parsers::prelude::*,
    payee::PayeeExtractor,
};
use chrono::DateTime;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of booking, as reported by the bank. Drives payee extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionCategory {
    Fee,
    Transfer,
    Charge,
    StandingOrder,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "USD")]
    Usd,
}

/// A fully parsed statement row, ready for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub booking_date: DateTime<Tz>,
    pub value_date: DateTime<Tz>,
    pub category: TransactionCategory,
    pub memo: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub iban: String,
    pub payee: String,
}

impl Transaction {
    /// Parse one raw statement row (exactly [`RECORD_LEN`] fields).
    ///
    /// A wrong field count fails with `MalformedRecord`; any field-level
    /// failures are collected into a single `RecordRejected`.
    pub fn parse<S: AsRef<str>>(
        fields: &[S],
        extractor: &PayeeExtractor,
        timezone: Tz,
    ) -> StatementResult<Self> {
        let raw = CommerzbankRecord::from_fields(fields)?;
        CommerzbankTransaction::from_raw(raw, extractor, timezone).try_into()
    }
}

impl TryFrom<CommerzbankTransaction> for Transaction {
    type Error = StatementParseError;

    fn try_from(mut parsed: CommerzbankTransaction) -> Result<Self, Self::Error> {
        if parsed.errors.is_empty() {
            if let (Some(booking_date), Some(value_date), Some(category), Some(amount), Some(currency)) = (
                parsed.booking_date,
                parsed.value_date,
                parsed.category,
                parsed.amount,
                parsed.currency,
            ) {
                return Ok(Transaction {
                    booking_date,
                    value_date,
                    category,
                    memo: parsed.memo,
                    amount,
                    currency,
                    iban: parsed.iban,
                    payee: parsed.payee,
                });
            }
        }

        Err(StatementParseError::RecordRejected {
            errors: std::mem::take(&mut parsed.errors),
            partial: Box::new(parsed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payee::PayeeRegistry;
    use chrono::{Datelike, TimeZone};
    use chrono_tz::Europe::Berlin;
    use rstest::rstest;
    use std::str::FromStr;

    fn create_test_parsed_transaction() -> CommerzbankTransaction {
        let date = Berlin.with_ymd_and_hms(2024, 8, 5, 0, 0, 0).unwrap();
        CommerzbankTransaction {
            booking_date: Some(date),
            value_date: Some(date),
            category: Some(TransactionCategory::Charge),
            payee: "ACME Corporation".to_string(),
            memo: "RE. 0031055169".to_string(),
            payee_matched: true,
            amount: Some(Decimal::from_str("-37.9").unwrap()),
            currency: Some(Currency::Eur),
            iban: "DE11100400410211111111".to_string(),
            errors: Vec::new(),
        }
    }

    #[test]
    fn test_transaction_from_complete_record() {
        let result: Result<Transaction, _> = create_test_parsed_transaction().try_into();

        assert!(result.is_ok());
        let transaction = result.unwrap();
        assert_eq!(transaction.payee, "ACME Corporation");
        assert_eq!(transaction.memo, "RE. 0031055169");
        assert_eq!(transaction.category, TransactionCategory::Charge);
        assert_eq!(transaction.currency, Currency::Eur);
        assert_eq!(transaction.amount, Decimal::from_str("-37.9").unwrap());
        assert_eq!(transaction.value_date.day(), 5);
    }

    #[test]
    fn test_transaction_rejected_keeps_partial_record() {
        let mut parsed = create_test_parsed_transaction();
        parsed.currency = None;
        parsed.errors.push(StatementParseError::UnknownCurrency("GBP".to_string()));

        let result: Result<Transaction, _> = parsed.try_into();

        match result.unwrap_err() {
            StatementParseError::RecordRejected { errors, partial } => {
                assert_eq!(errors.len(), 1);
                assert!(partial.errors.is_empty());
                assert_eq!(partial.payee, "ACME Corporation");
                assert_eq!(partial.iban, "DE11100400410211111111");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    fn testdata_extractor() -> PayeeExtractor {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/known_payees.json");
        PayeeExtractor::new(PayeeRegistry::load(path).unwrap(), "Commerzbank")
    }

    #[test]
    fn test_parse_statement_row() {
        let fields = [
            "05.08.2024",
            "05.08.2024",
            "Lastschrift",
            "ACME Inc. RE. 0031055169          37,90 1 Stk 240 ltr. Behaelter End-to-End-Ref.: Zahl.Beleg 0000039102 Mandatsref: 000560-1004082357",
            "-37,9",
            "EUR",
            "DE11100400410211111111",
            "",
        ];

        let transaction = Transaction::parse(&fields, &testdata_extractor(), Berlin).unwrap();

        let want = Transaction {
            booking_date: Berlin.with_ymd_and_hms(2024, 8, 5, 0, 0, 0).unwrap(),
            value_date: Berlin.with_ymd_and_hms(2024, 8, 5, 0, 0, 0).unwrap(),
            category: TransactionCategory::Charge,
            memo: "RE. 0031055169 37,90 1 Stk 240 ltr. Behaelter".to_string(),
            amount: Decimal::from_str("-37.9").unwrap(),
            currency: Currency::Eur,
            iban: "DE11100400410211111111".to_string(),
            payee: "ACME Corporation".to_string(),
        };
        assert_eq!(transaction, want);
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        let fields = ["05.08.2024", "05.08.2024", "Lastschrift"];
        let result = Transaction::parse(&fields, &testdata_extractor(), Berlin);
        assert!(matches!(
            result,
            Err(StatementParseError::MalformedRecord { expected: 8, found: 3 })
        ));
    }

    #[rstest]
    #[case("-37,9", "05.08.2024", "-37.90", "2024-08-05")]
    #[case("200", "02.08.2024", "+200.00", "2024-08-02")]
    #[case("0,5", "31.03.2024", "+0.50", "2024-03-31")]
    #[case("-1234,56", "27.10.2024", "-1234.56", "2024-10-27")]
    fn test_parse_then_export_keeps_sign_precision_and_date(
        #[case] amount: &str,
        #[case] date: &str,
        #[case] exported_amount: &str,
        #[case] exported_date: &str,
    ) {
        let fields = [date, date, "Sonstige", "Bargeld", amount, "EUR", "DE11", ""];

        let transaction = Transaction::parse(&fields, &testdata_extractor(), Berlin).unwrap();

        assert_eq!(crate::export::format_amount(transaction.amount), exported_amount);
        assert_eq!(
            transaction.value_date.format(crate::export::YNAB_DATE_FORMAT).to_string(),
            exported_date
        );
    }

    #[test]
    fn test_transaction_serialization() {
        let transaction: Transaction = create_test_parsed_transaction().try_into().unwrap();

        let json = serde_json::to_string(&transaction).unwrap();
        assert!(json.contains("ACME Corporation"));
        assert!(json.contains("\"EUR\""));
        assert!(json.contains("\"Charge\""));
        assert!(json.contains("2024-08-05T00:00:00+02:00"));
    }
}
