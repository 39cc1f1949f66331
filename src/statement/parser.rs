//! Extraction of the statement period and closing balance from statement text

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::*;
use crate::utils::parsing::{parse_currency_amount, parse_statement_date};

/// "March 3, 2024", with any whitespace between tokens
const DATE_PATTERN: &str = r"[A-Za-z]+\s+\d{1,2},\s*\d{4}";

/// Parser settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Symbol that must prefix every balance amount
    pub currency_symbol: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
        }
    }
}

/// A "balance on <date> <amount>" line found in a statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceLine {
    pub date: NaiveDate,
    pub amount: BigDecimal,
}

/// Recovers `(period, closing balance)` from the extracted text of one statement
///
/// The closing balance is the first "balance on" line dated to the period end;
/// interim balance lines are ignored. Parsing never fails: every problem is
/// reported as a [`ParseOutcome`] variant.
#[derive(Debug, Clone)]
pub struct StatementParser {
    config: ParserConfig,
    period_pattern: Regex,
    balance_pattern: Regex,
}

impl StatementParser {
    /// Create a parser for dollar-denominated statements
    pub fn new() -> ReconcileResult<Self> {
        Self::with_config(ParserConfig::default())
    }

    /// Create a parser with custom settings
    pub fn with_config(config: ParserConfig) -> ReconcileResult<Self> {
        let period_pattern = Regex::new(&format!(
            r"\bfor\s+({date})\s+to\s+({date})",
            date = DATE_PATTERN
        ))?;

        let balance_pattern = Regex::new(&format!(
            r"\bbalance\s+on\s+({date})\s+(-?{symbol}-?(?:\d{{1,3}}(?:,\d{{3}})+|\d+)\.\d{{2}})\b",
            date = DATE_PATTERN,
            symbol = regex::escape(&config.currency_symbol)
        ))?;

        Ok(Self {
            config,
            period_pattern,
            balance_pattern,
        })
    }

    /// Parser settings in use
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Extract period and closing balance from one statement
    pub fn parse(&self, text: &str) -> ParseOutcome {
        let period = match self.find_period(text) {
            Some(period) => period,
            None => {
                warn!("could not find statement period");
                return ParseOutcome::PeriodNotFound;
            }
        };
        debug!(%period, "statement period found");

        let lines = self.balance_lines(text);
        if lines.is_empty() {
            warn!(%period, "no 'balance on' lines found");
            return ParseOutcome::NoBalanceLines { period };
        }

        match lines.into_iter().find(|line| line.date == period.end()) {
            Some(line) => {
                debug!(%period, balance = %line.amount, "closing balance found");
                ParseOutcome::Success {
                    period,
                    balance: line.amount,
                }
            }
            None => {
                warn!(%period, "no 'balance on' date matches the end of the statement period");
                ParseOutcome::NoBalanceMatchesEndDate { period }
            }
        }
    }

    /// Period given by the first "for <date> to <date>" phrase
    ///
    /// Only the first phrase is considered. If its dates are not on the
    /// calendar or end before they start, the statement has no period.
    pub fn find_period(&self, text: &str) -> Option<StatementPeriod> {
        let caps = self.period_pattern.captures(text)?;
        match period_from_captures(&caps) {
            Ok(period) => Some(period),
            Err(err) => {
                warn!(%err, phrase = whole_match(&caps), "unusable statement period");
                None
            }
        }
    }

    /// Every well-formed "balance on <date> <amount>" line, in document order
    pub fn balance_lines(&self, text: &str) -> Vec<BalanceLine> {
        self.balance_pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let phrase = whole_match(&caps);
                match self.balance_from_captures(&caps) {
                    Ok(line) => Some(line),
                    Err(err) => {
                        warn!(%err, phrase, "ignoring malformed balance line");
                        None
                    }
                }
            })
            .collect()
    }

    fn balance_from_captures(&self, caps: &Captures<'_>) -> ReconcileResult<BalanceLine> {
        let date = parse_statement_date(&caps[1])?;
        let amount = parse_currency_amount(&caps[2], &self.config.currency_symbol)?;
        Ok(BalanceLine { date, amount })
    }
}

fn period_from_captures(caps: &Captures<'_>) -> ReconcileResult<StatementPeriod> {
    let start = parse_statement_date(&caps[1])?;
    let end = parse_statement_date(&caps[2])?;
    StatementPeriod::new(start, end)
}

fn whole_match<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(0).map_or("", |m| m.as_str())
}
