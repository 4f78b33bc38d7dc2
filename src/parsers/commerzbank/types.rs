use std::str::FromStr;

use crate::errors::{StatementParseError, StatementResult};
use crate::types::{Currency, TransactionCategory};
use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::Tz;
use rust_decimal::Decimal;

pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Data de lançamento/valorização no formato alemão `DD.MM.AAAA`.
///
/// O extrato não traz fuso horário; a data é ancorada à meia-noite do fuso
/// civil configurado (por padrão Europe/Berlin, com horário de verão).
#[derive(Debug, Clone)]
pub struct StatementDate(String);

impl StatementDate {
    pub fn parse(&self) -> StatementResult<NaiveDate> {
        let date = self.0.trim();
        if !has_date_shape(date) {
            return Err(StatementParseError::InvalidDate(self.0.clone()));
        }
        NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| StatementParseError::InvalidDate(self.0.clone()))
    }

    pub fn parse_in(&self, timezone: Tz) -> StatementResult<DateTime<Tz>> {
        self.parse()?
            .and_hms_opt(0, 0, 0)
            .and_then(|midnight| timezone.from_local_datetime(&midnight).earliest())
            .ok_or_else(|| StatementParseError::InvalidDate(self.0.clone()))
    }
}

/// `DD.MM.YYYY` with exactly two, two and four digits; `%d.%m.%Y` alone
/// also takes single digits, short years and signs.
fn has_date_shape(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'.',
            _ => b.is_ascii_digit(),
        })
}

impl From<String> for StatementDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for StatementDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<StatementDate> for NaiveDate {
    type Error = StatementParseError;

    fn try_from(date: StatementDate) -> Result<Self, Self::Error> {
        date.parse()
    }
}

/// Valor com vírgula como separador decimal, p.ex. `-37,9`.
#[derive(Debug, Clone)]
pub struct StatementAmount(String);

impl StatementAmount {
    pub fn parse(&self) -> StatementResult<Decimal> {
        let amount = self.0.trim();
        if !has_amount_shape(amount) {
            return Err(StatementParseError::InvalidAmount(self.0.clone()));
        }
        Decimal::from_str(&amount.replace(',', "."))
            .map_err(|_| StatementParseError::InvalidAmount(self.0.clone()))
    }
}

/// Optional sign, digits, then at most one `,` followed by digits.
fn has_amount_shape(amount: &str) -> bool {
    let unsigned = amount.strip_prefix(['+', '-']).unwrap_or(amount);
    let (integer, fraction) = match unsigned.split_once(',') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    all_digits(integer) && fraction.is_none_or(all_digits)
}

impl From<String> for StatementAmount {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for StatementAmount {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<StatementAmount> for Decimal {
    type Error = StatementParseError;

    fn try_from(amount: StatementAmount) -> Result<Self, Self::Error> {
        amount.parse()
    }
}

impl FromStr for TransactionCategory {
    type Err = StatementParseError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "Zinsen/Entgelte" => Ok(TransactionCategory::Fee),
            "Überweisung" => Ok(TransactionCategory::Transfer),
            "Lastschrift" => Ok(TransactionCategory::Charge),
            "Dauerauftrag" => Ok(TransactionCategory::StandingOrder),
            "Sonstige" => Ok(TransactionCategory::Other),
            other => Err(StatementParseError::UnknownCategory(other.to_string())),
        }
    }
}

impl FromStr for Currency {
    type Err = StatementParseError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            other => Err(StatementParseError::UnknownCurrency(other.to_string())),
        }
    }
}

// -----------------------------------------------------------------------------
// Testes
// -----------------------------------------------------------------------------
