//! Reconciliation run orchestrator: source -> parser -> aggregator -> sink

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::reconciliation::{ReconciliationAggregator, ReconciliationReport};
use crate::statement::{ParserConfig, StatementParser};
use crate::traits::*;
use crate::types::*;

/// Settings for a reconciliation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Statement parser settings
    pub parser: ParserConfig,
    /// Title given to the generated report
    pub report_title: String,
    /// Label of the combined period row
    pub period_label: String,
    /// Label of the total balance row
    pub balance_label: String,
    /// Process documents in ascending identifier order
    pub sort_by_identifier: bool,
    /// Refuse to write a report when no statement could be reconciled
    pub require_reconciled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            report_title: "Global_Balance_Report".to_string(),
            period_label: "Entire Period Analyzed".to_string(),
            balance_label: "Global Final Balance".to_string(),
            sort_by_identifier: true,
            require_reconciled: true,
        }
    }
}

/// Runs a full reconciliation against a document source and a report sink
pub struct ReconciliationEngine<D: DocumentSource, R: ReportSink> {
    source: D,
    sink: R,
    parser: StatementParser,
    config: EngineConfig,
}

impl<D: DocumentSource, R: ReportSink> ReconciliationEngine<D, R> {
    /// Create an engine with default settings
    pub fn new(source: D, sink: R) -> ReconcileResult<Self> {
        Self::with_config(source, sink, EngineConfig::default())
    }

    /// Create an engine with custom settings
    pub fn with_config(source: D, sink: R, config: EngineConfig) -> ReconcileResult<Self> {
        let parser = StatementParser::with_config(config.parser.clone())?;
        Ok(Self {
            source,
            sink,
            parser,
            config,
        })
    }

    /// Settings in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Report sink the engine writes to
    pub fn sink(&self) -> &R {
        &self.sink
    }

    /// Parse and aggregate every document without writing a report
    pub async fn reconcile(&self) -> ReconcileResult<AggregateResult> {
        let mut documents = self.source.list_documents().await?;

        if self.config.sort_by_identifier {
            documents.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        }

        let mut aggregator = ReconciliationAggregator::new();
        for document in documents {
            let outcome = self.parser.parse(&document.text);
            aggregator.push(document.identifier, outcome);
        }

        if aggregator.is_empty() {
            warn!("document source returned no statements");
        }
        let processed = aggregator.len();

        let aggregate = aggregator.finish();
        info!(
            processed,
            succeeded = aggregate.succeeded,
            skipped = aggregate.skipped.len(),
            total = %aggregate.total_balance,
            "reconciliation finished"
        );
        Ok(aggregate)
    }

    /// Reconcile every document and hand the report to the sink
    pub async fn run(&mut self) -> ReconcileResult<ReconciliationReport> {
        let aggregate = self.reconcile().await?;

        if self.config.require_reconciled && !aggregate.is_reconciled() {
            warn!(
                skipped = aggregate.skipped.len(),
                "no statement could be reconciled, report not written"
            );
            return Err(StatementError::NothingReconciled {
                skipped: aggregate.skipped.len(),
            });
        }

        let report = ReconciliationReport::new(&self.config, aggregate);
        self.sink.write_report(&report).await?;
        info!(report_id = %report.id, title = %report.title, "report written");

        Ok(report)
    }
}
