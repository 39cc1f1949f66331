//! Date and amount parsing shared by the statement matchers

use bigdecimal::BigDecimal;
use chrono::{Month, NaiveDate};
use std::str::FromStr;

use crate::types::*;

/// Parse a statement date written as "March 3, 2024"
///
/// Month names may be full or abbreviated and are matched case-insensitively.
/// Dates that do not exist on the calendar (e.g. "February 30, 2024") are errors.
pub fn parse_statement_date(text: &str) -> ReconcileResult<NaiveDate> {
    let invalid = || StatementError::InvalidDate(text.trim().to_string());

    let mut parts = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty());

    let (month, day, year) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(month), Some(day), Some(year), None) => (month, day, year),
        _ => return Err(invalid()),
    };

    let month = Month::from_str(month).map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;
    let year: i32 = year.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month.number_from_month(), day).ok_or_else(invalid)
}

/// Parse a currency figure such as "$1,234.56" or "-$20.00" into an exact decimal
///
/// The currency symbol is required. Thousands separators are dropped, the sign
/// is kept and the result always carries two fractional digits.
pub fn parse_currency_amount(text: &str, currency_symbol: &str) -> ReconcileResult<BigDecimal> {
    let invalid = || StatementError::InvalidAmount(text.trim().to_string());

    let trimmed = text.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let rest = rest.strip_prefix(currency_symbol).ok_or_else(invalid)?;
    let (negative, rest) = match rest.strip_prefix('-') {
        Some(inner) if !negative => (true, inner),
        Some(_) => return Err(invalid()),
        None => (negative, rest),
    };

    let (whole, cents) = rest.split_once('.').ok_or_else(invalid)?;
    if cents.len() != 2 || !cents.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if !valid_grouping(whole) {
        return Err(invalid());
    }

    let digits: String = whole.chars().filter(|c| *c != ',').collect();
    let sign = if negative { "-" } else { "" };
    let amount = BigDecimal::from_str(&format!("{}{}.{}", sign, digits, cents))
        .map_err(|_| invalid())?;

    Ok(amount.with_scale(2))
}

// Either plain digits or 1-3 digits followed by comma-separated groups of three.
fn valid_grouping(whole: &str) -> bool {
    let mut groups = whole.split(',');
    let first = match groups.next() {
        Some(first) => first,
        None => return false,
    };
    if first.is_empty() || !first.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let rest: Vec<&str> = groups.collect();
    if rest.is_empty() {
        return true;
    }

    first.len() <= 3
        && rest
            .iter()
            .all(|group| group.len() == 3 && group.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_statement_date() {
        assert_eq!(
            parse_statement_date("March 3, 2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 3).unwrap()
        );
        assert_eq!(
            parse_statement_date("december 31,  2023").unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
        assert_eq!(
            parse_statement_date("Feb 29, 2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_parse_statement_date_rejects_impossible_dates() {
        assert!(matches!(
            parse_statement_date("February 30, 2024"),
            Err(StatementError::InvalidDate(_))
        ));
        assert!(parse_statement_date("February 29, 2023").is_err());
        assert!(parse_statement_date("Smarch 1, 2024").is_err());
        assert!(parse_statement_date("March 2024").is_err());
    }

    #[test]
    fn test_parse_currency_amount() {
        assert_eq!(
            parse_currency_amount("$1,234.56", "$").unwrap(),
            BigDecimal::from_str("1234.56").unwrap()
        );
        assert_eq!(
            parse_currency_amount("$500.00", "$").unwrap(),
            BigDecimal::from(500)
        );
        assert_eq!(
            parse_currency_amount("$1,000,000.01", "$").unwrap(),
            BigDecimal::from_str("1000000.01").unwrap()
        );
    }

    #[test]
    fn test_parse_currency_amount_keeps_sign() {
        let expected = BigDecimal::from_str("-20.05").unwrap();
        assert_eq!(parse_currency_amount("-$20.05", "$").unwrap(), expected);
        assert_eq!(parse_currency_amount("$-20.05", "$").unwrap(), expected);
        assert!(parse_currency_amount("-$-20.05", "$").is_err());
    }

    #[test]
    fn test_parse_currency_amount_format_errors() {
        assert!(parse_currency_amount("1,234.56", "$").is_err());
        assert!(parse_currency_amount("$1,234.5", "$").is_err());
        assert!(parse_currency_amount("$12,34.56", "$").is_err());
        assert!(parse_currency_amount("$1234", "$").is_err());
        assert!(matches!(
            parse_currency_amount("$.99", "$"),
            Err(StatementError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_parse_currency_amount_other_symbol() {
        assert_eq!(
            parse_currency_amount("€2,500.10", "€").unwrap(),
            BigDecimal::from_str("2500.10").unwrap()
        );
    }
}
