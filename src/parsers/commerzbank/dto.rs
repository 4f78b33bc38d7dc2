use chrono::DateTime;
use chrono_tz::Tz;
use rust_decimal::Decimal;

use super::types::{StatementAmount, StatementDate};
use crate::errors::{StatementParseError, StatementResult};
use crate::payee::PayeeExtractor;
use crate::types::{Currency, TransactionCategory};

pub const RECORD_LEN: usize = 8;

/// One statement row, untyped. Column order is fixed by the export.
#[derive(Debug, Clone)]
pub struct CommerzbankRecord {
    pub booking_date: StatementDate,
    pub value_date: StatementDate,
    pub category: String,
    pub narration: String,
    pub amount: StatementAmount,
    pub currency: String,
    pub iban: String,
}

impl CommerzbankRecord {
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> StatementResult<Self> {
        if fields.len() != RECORD_LEN {
            return Err(StatementParseError::MalformedRecord {
                expected: RECORD_LEN,
                found: fields.len(),
            });
        }

        let field = |i: usize| fields[i].as_ref().to_string();
        Ok(CommerzbankRecord {
            booking_date: field(0).into(),
            value_date: field(1).into(),
            category: field(2),
            narration: field(3),
            amount: field(4).into(),
            currency: field(5),
            iban: field(6),
        })
    }
}

impl TryFrom<&csv::StringRecord> for CommerzbankRecord {
    type Error = StatementParseError;

    fn try_from(record: &csv::StringRecord) -> Result<Self, Self::Error> {
        Self::from_fields(&record.iter().collect::<Vec<_>>())
    }
}

/// A raw row together with its line in the source file.
#[derive(Debug)]
pub struct CommerzbankRow {
    pub line: u64,
    pub record: StatementResult<CommerzbankRecord>,
}

/// A row after field parsing and payee extraction.
///
/// Fields that failed to parse are `None` and their errors are kept in
/// `errors`, so a rejected row can still be inspected.
#[derive(Debug, Default)]
pub struct CommerzbankTransaction {
    pub booking_date: Option<DateTime<Tz>>,
    pub value_date: Option<DateTime<Tz>>,
    pub category: Option<TransactionCategory>,
    pub payee: String,
    pub memo: String,
    pub payee_matched: bool,
    pub amount: Option<Decimal>,
    pub currency: Option<Currency>,
    pub iban: String,
    pub errors: Vec<StatementParseError>,
}

impl CommerzbankTransaction {
    pub fn from_raw(raw: CommerzbankRecord, extractor: &PayeeExtractor, timezone: Tz) -> Self {
        let mut errors = Vec::new();

        let booking_date = collect(raw.booking_date.parse_in(timezone), &mut errors);
        let value_date = collect(raw.value_date.parse_in(timezone), &mut errors);
        let category = collect(raw.category.parse::<TransactionCategory>(), &mut errors);
        let amount = collect(raw.amount.parse(), &mut errors);
        let currency = collect(raw.currency.parse::<Currency>(), &mut errors);

        let extraction = match category {
            Some(category) => extractor.extract(&raw.narration, category),
            None => extractor.extract_counterparty(&raw.narration),
        };

        CommerzbankTransaction {
            booking_date,
            value_date,
            category,
            payee: extraction.payee,
            memo: extraction.memo,
            payee_matched: extraction.matched,
            amount,
            currency,
            iban: raw.iban,
            errors,
        }
    }
}

fn collect<T>(result: StatementResult<T>, errors: &mut Vec<StatementParseError>) -> Option<T> {
    result.map_err(|e| errors.push(e)).ok()
}
