//! Folding per-statement outcomes into one aggregate

use bigdecimal::BigDecimal;
use tracing::{debug, info};

use crate::types::*;

/// Accumulates parse outcomes into a global period and total
///
/// Successful statements extend the overall period (calendar min/max) and add
/// to the total; all other outcomes are recorded as skipped, in the order they
/// were pushed. The accumulator is consumed by [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct ReconciliationAggregator {
    overall_period: Option<StatementPeriod>,
    total_balance: BigDecimal,
    skipped: Vec<SkippedStatement>,
    succeeded: usize,
}

impl ReconciliationAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate a full ordered sequence of outcomes in one pass
    pub fn aggregate<I, S>(items: I) -> AggregateResult
    where
        I: IntoIterator<Item = (S, ParseOutcome)>,
        S: Into<String>,
    {
        let mut aggregator = Self::new();
        for (identifier, outcome) in items {
            aggregator.push(identifier, outcome);
        }
        aggregator.finish()
    }

    /// Fold one statement outcome into the running aggregate
    pub fn push(&mut self, identifier: impl Into<String>, outcome: ParseOutcome) {
        let identifier = identifier.into();

        match outcome {
            ParseOutcome::Success { period, balance } => {
                debug!(%identifier, %period, %balance, "statement reconciled");
                self.total_balance += balance;
                self.overall_period = Some(match self.overall_period {
                    Some(current) => current.span(&period),
                    None => period,
                });
                self.succeeded += 1;
            }
            outcome => {
                info!(%identifier, reason = outcome.reason(), "statement skipped");
                self.skipped.push(SkippedStatement {
                    identifier,
                    outcome,
                });
            }
        }
    }

    /// Combine with an aggregator that consumed a later part of the input
    ///
    /// Period and total are order independent; skipped entries of `other`
    /// are appended after those of `self`.
    pub fn merge(mut self, other: ReconciliationAggregator) -> Self {
        self.total_balance += other.total_balance;
        self.overall_period = match (self.overall_period, other.overall_period) {
            (Some(a), Some(b)) => Some(a.span(&b)),
            (a, b) => a.or(b),
        };
        self.skipped.extend(other.skipped);
        self.succeeded += other.succeeded;
        self
    }

    /// Number of statements folded in so far, successful or not
    pub fn len(&self) -> usize {
        self.succeeded + self.skipped.len()
    }

    /// Whether nothing has been pushed yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finalize the aggregate, rounding the total half-even to cents
    pub fn finish(self) -> AggregateResult {
        AggregateResult {
            overall_period: self.overall_period,
            total_balance: self.total_balance.round(2).with_scale(2),
            skipped: self.skipped,
            succeeded: self.succeeded,
        }
    }
}
