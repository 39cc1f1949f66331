//! Presentation helpers for report sinks

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

/// Format an amount as currency with thousands separators and two decimals
///
/// Negative amounts put the sign before the symbol: `-$1,234.56`.
pub fn format_currency(amount: &BigDecimal, currency_symbol: &str) -> String {
    let rounded = amount.round(2).with_scale(2);
    let negative = rounded < BigDecimal::from(0);
    let digits = rounded.abs().to_string();

    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!(
        "{}{}{}.{}",
        if negative { "-" } else { "" },
        currency_symbol,
        group_thousands(whole),
        cents
    )
}

/// Format a date the way statements print it, e.g. "January 5, 2024"
pub fn format_statement_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_currency() {
        let amount = BigDecimal::from_str("1234567.8").unwrap();
        assert_eq!(format_currency(&amount, "$"), "$1,234,567.80");

        assert_eq!(format_currency(&BigDecimal::from(0), "$"), "$0.00");
        assert_eq!(format_currency(&BigDecimal::from(999), "$"), "$999.00");
        assert_eq!(format_currency(&BigDecimal::from(1000), "$"), "$1,000.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let amount = BigDecimal::from_str("-1500.25").unwrap();
        assert_eq!(format_currency(&amount, "$"), "-$1,500.25");
    }

    #[test]
    fn test_format_currency_rounds_to_cents() {
        let amount = BigDecimal::from_str("10.006").unwrap();
        assert_eq!(format_currency(&amount, "€"), "€10.01");
    }

    #[test]
    fn test_format_statement_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_statement_date(date), "January 5, 2024");
    }
}
