//! Reconciliation report handed to report sinks

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::reconciliation::EngineConfig;
use crate::types::*;
use crate::utils::format::format_currency;

/// Final report of one reconciliation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Unique identifier of the run
    pub id: String,
    /// Report name, e.g. the spreadsheet title
    pub title: String,
    /// When the report was generated
    pub generated_at: NaiveDateTime,
    /// Label of the combined period row
    pub period_label: String,
    /// Label of the total balance row
    pub balance_label: String,
    /// Symbol used when rendering the total
    pub currency_symbol: String,
    /// Aggregated figures and skipped statements
    pub aggregate: AggregateResult,
}

impl ReconciliationReport {
    /// Create a report for an aggregate using the engine's labels
    pub fn new(config: &EngineConfig, aggregate: AggregateResult) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: config.report_title.clone(),
            generated_at: chrono::Utc::now().naive_utc(),
            period_label: config.period_label.clone(),
            balance_label: config.balance_label.clone(),
            currency_symbol: config.parser.currency_symbol.clone(),
            aggregate,
        }
    }

    /// Combined period as text, e.g. "January 1, 2024 to February 29, 2024"
    pub fn period_text(&self) -> String {
        match &self.aggregate.overall_period {
            Some(period) => period.to_string(),
            None => "No statements reconciled".to_string(),
        }
    }

    /// Total balance formatted as currency, e.g. "$1,500.00"
    pub fn total_text(&self) -> String {
        format_currency(&self.aggregate.total_balance, &self.currency_symbol)
    }

    /// Summary table: combined period row followed by total balance row
    pub fn rows(&self) -> Vec<[String; 2]> {
        vec![
            [self.period_label.clone(), self.period_text()],
            [self.balance_label.clone(), self.total_text()],
        ]
    }

    /// Audit table: one `(identifier, reason)` row per skipped statement
    pub fn skipped_rows(&self) -> Vec<[String; 2]> {
        self.aggregate
            .skipped
            .iter()
            .map(|skipped| [skipped.identifier.clone(), skipped.outcome.to_string()])
            .collect()
    }
}
