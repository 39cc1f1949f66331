//! Core types and data structures for statement reconciliation

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::format::format_statement_date;

/// Date range covered by a single statement
///
/// Construction guarantees `start <= end` in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawStatementPeriod")]
pub struct StatementPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

/// Unchecked wire form of [`StatementPeriod`]
#[derive(Deserialize)]
struct RawStatementPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawStatementPeriod> for StatementPeriod {
    type Error = StatementError;

    fn try_from(raw: RawStatementPeriod) -> ReconcileResult<Self> {
        StatementPeriod::new(raw.start, raw.end)
    }
}

impl StatementPeriod {
    /// Create a new period, rejecting ranges that end before they start
    pub fn new(start: NaiveDate, end: NaiveDate) -> ReconcileResult<Self> {
        if start > end {
            return Err(StatementError::InvertedPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// First day covered by the statement
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day covered by the statement (the closing date)
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Smallest period covering both `self` and `other`
    pub fn span(&self, other: &StatementPeriod) -> StatementPeriod {
        StatementPeriod {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for StatementPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            format_statement_date(self.start),
            format_statement_date(self.end)
        )
    }
}

/// Result of extracting period and closing balance from one statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParseOutcome {
    /// Period found and a balance line dated to the period end was found
    Success {
        period: StatementPeriod,
        balance: BigDecimal,
    },
    /// The text has no usable "for <date> to <date>" phrase
    PeriodNotFound,
    /// Period found, but the text has no "balance on" lines at all
    NoBalanceLines { period: StatementPeriod },
    /// Period and balance lines found, but none is dated to the period end
    NoBalanceMatchesEndDate { period: StatementPeriod },
}

impl ParseOutcome {
    /// Whether the statement can be folded into the aggregate
    pub fn is_success(&self) -> bool {
        matches!(self, ParseOutcome::Success { .. })
    }

    /// Period recovered from the text, if any
    pub fn period(&self) -> Option<&StatementPeriod> {
        match self {
            ParseOutcome::Success { period, .. }
            | ParseOutcome::NoBalanceLines { period }
            | ParseOutcome::NoBalanceMatchesEndDate { period } => Some(period),
            ParseOutcome::PeriodNotFound => None,
        }
    }

    /// Closing balance, only present on success
    pub fn balance(&self) -> Option<&BigDecimal> {
        match self {
            ParseOutcome::Success { balance, .. } => Some(balance),
            _ => None,
        }
    }

    /// Short human-readable explanation of the outcome
    pub fn reason(&self) -> &'static str {
        match self {
            ParseOutcome::Success { .. } => "closing balance found",
            ParseOutcome::PeriodNotFound => "could not find statement period",
            ParseOutcome::NoBalanceLines { .. } => "no 'balance on' lines found",
            ParseOutcome::NoBalanceMatchesEndDate { .. } => {
                "no 'balance on' date matches the end of the statement period"
            }
        }
    }
}

impl fmt::Display for ParseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.period() {
            Some(period) => write!(f, "{} ({})", self.reason(), period),
            None => f.write_str(self.reason()),
        }
    }
}

/// A statement excluded from the aggregate, kept for audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedStatement {
    /// Caller-supplied identifier (usually the file name)
    pub identifier: String,
    /// Why the statement was skipped
    pub outcome: ParseOutcome,
}

/// Combined result of reconciling a sequence of statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Earliest start to latest end over all successful statements;
    /// `None` when nothing could be reconciled
    pub overall_period: Option<StatementPeriod>,
    /// Sum of the closing balances of all successful statements
    pub total_balance: BigDecimal,
    /// Every non-successful statement, in input order
    pub skipped: Vec<SkippedStatement>,
    /// Number of statements folded into the total
    pub succeeded: usize,
}

impl AggregateResult {
    /// Whether at least one statement was reconciled
    pub fn is_reconciled(&self) -> bool {
        self.overall_period.is_some()
    }

    /// Total number of statements seen, successful or not
    pub fn processed(&self) -> usize {
        self.succeeded + self.skipped.len()
    }
}

impl Default for AggregateResult {
    fn default() -> Self {
        Self {
            overall_period: None,
            total_balance: BigDecimal::from(0),
            skipped: Vec::new(),
            succeeded: 0,
        }
    }
}

/// Raw extracted text of one statement as delivered by a document source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementDocument {
    /// Identifier of the document (file name, object key, ...)
    pub identifier: String,
    /// Plain text already extracted from the underlying document
    pub text: String,
}

impl StatementDocument {
    /// Create a new statement document
    pub fn new(identifier: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            text: text.into(),
        }
    }
}

/// Errors that can occur outside of per-statement extraction
#[derive(Debug, thiserror::Error)]
pub enum StatementError {
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Statement period ends before it starts: {start} to {end}")]
    InvertedPeriod { start: NaiveDate, end: NaiveDate },
    #[error("Document source error: {0}")]
    Source(String),
    #[error("Report sink error: {0}")]
    Sink(String),
    #[error("No statement could be reconciled ({skipped} skipped)")]
    NothingReconciled { skipped: usize },
}

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, StatementError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_rejects_inverted_range() {
        let result = StatementPeriod::new(date(2024, 2, 1), date(2024, 1, 31));
        assert!(matches!(result, Err(StatementError::InvertedPeriod { .. })));
    }

    #[test]
    fn test_period_single_day_is_valid() {
        let period = StatementPeriod::new(date(2024, 3, 1), date(2024, 3, 1)).unwrap();
        assert_eq!(period.start(), period.end());
    }

    #[test]
    fn test_period_deserialize_rejects_inverted_range() {
        let json = r#"{"start":"2024-03-31","end":"2024-01-01"}"#;
        let result = serde_json::from_str::<StatementPeriod>(json);
        assert!(result.is_err());

        let err = result.unwrap_err().to_string();
        assert!(err.contains("ends before it starts"), "unexpected error: {}", err);
    }

    #[test]
    fn test_period_deserialize_valid_range() {
        let json = r#"{"start":"2024-01-01","end":"2024-01-31"}"#;
        let period: StatementPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period.start(), date(2024, 1, 1));
        assert_eq!(period.end(), date(2024, 1, 31));
    }

    #[test]
    fn test_outcome_deserialize_rejects_inverted_period() {
        let json = r#"{"NoBalanceLines":{"period":{"start":"2024-02-01","end":"2024-01-01"}}}"#;
        assert!(serde_json::from_str::<ParseOutcome>(json).is_err());
    }

    #[test]
    fn test_period_span_uses_calendar_order() {
        let march = StatementPeriod::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        let february = StatementPeriod::new(date(2024, 2, 1), date(2024, 2, 29)).unwrap();

        let span = march.span(&february);
        assert_eq!(span.start(), date(2024, 2, 1));
        assert_eq!(span.end(), date(2024, 3, 31));
    }

    #[test]
    fn test_period_display() {
        let period = StatementPeriod::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert_eq!(period.to_string(), "January 1, 2024 to January 31, 2024");
    }

    #[test]
    fn test_outcome_accessors() {
        let period = StatementPeriod::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();

        let success = ParseOutcome::Success {
            period,
            balance: BigDecimal::from(10),
        };
        assert!(success.is_success());
        assert_eq!(success.balance(), Some(&BigDecimal::from(10)));

        let no_lines = ParseOutcome::NoBalanceLines { period };
        assert!(!no_lines.is_success());
        assert_eq!(no_lines.period(), Some(&period));
        assert_eq!(no_lines.balance(), None);

        assert_eq!(ParseOutcome::PeriodNotFound.period(), None);
        assert_eq!(
            ParseOutcome::PeriodNotFound.to_string(),
            "could not find statement period"
        );
    }

    #[test]
    fn test_empty_aggregate_default() {
        let aggregate = AggregateResult::default();
        assert!(!aggregate.is_reconciled());
        assert_eq!(aggregate.total_balance, BigDecimal::from(0));
        assert_eq!(aggregate.processed(), 0);
    }
}
