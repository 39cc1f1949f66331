//! In-memory document source and report sink for testing

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::reconciliation::ReconciliationReport;
use crate::traits::*;
use crate::types::*;

/// Document source backed by a list of texts held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentSource {
    documents: Vec<StatementDocument>,
}

impl MemoryDocumentSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document and return the source (builder style)
    pub fn with_document(mut self, identifier: impl Into<String>, text: impl Into<String>) -> Self {
        self.push(identifier, text);
        self
    }

    /// Add a document
    pub fn push(&mut self, identifier: impl Into<String>, text: impl Into<String>) {
        self.documents.push(StatementDocument::new(identifier, text));
    }
}

#[async_trait]
impl DocumentSource for MemoryDocumentSource {
    async fn list_documents(&self) -> ReconcileResult<Vec<StatementDocument>> {
        Ok(self.documents.clone())
    }
}

/// Report sink that keeps every written report in memory
///
/// Clones share the same storage, so a test can keep one handle while the
/// engine owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryReportSink {
    reports: Arc<RwLock<Vec<ReconciliationReport>>>,
}

impl MemoryReportSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports written so far, oldest first
    pub fn reports(&self) -> Vec<ReconciliationReport> {
        self.reports
            .read()
            .expect("report sink lock poisoned")
            .clone()
    }

    /// Clear all reports (useful for testing)
    pub fn clear(&self) {
        self.reports
            .write()
            .expect("report sink lock poisoned")
            .clear();
    }
}

#[async_trait]
impl ReportSink for MemoryReportSink {
    async fn write_report(&mut self, report: &ReconciliationReport) -> ReconcileResult<()> {
        self.reports
            .write()
            .map_err(|e| StatementError::Sink(e.to_string()))?
            .push(report.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconciliation::EngineConfig;

    fn poison(sink: &MemoryReportSink) {
        let shared = sink.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.reports.write().unwrap();
            panic!("writer failed while holding the lock");
        })
        .join();
    }

    #[tokio::test]
    async fn test_sink_stores_and_clears_reports() {
        let mut sink = MemoryReportSink::new();
        let report = ReconciliationReport::new(&EngineConfig::default(), AggregateResult::default());

        sink.write_report(&report).await.unwrap();
        assert_eq!(sink.reports(), vec![report]);

        sink.clear();
        assert!(sink.reports().is_empty());
    }

    #[test]
    #[should_panic(expected = "report sink lock poisoned")]
    fn test_reports_panics_on_poisoned_lock() {
        let sink = MemoryReportSink::new();
        poison(&sink);
        sink.reports();
    }

    #[test]
    #[should_panic(expected = "report sink lock poisoned")]
    fn test_clear_panics_on_poisoned_lock() {
        let sink = MemoryReportSink::new();
        poison(&sink);
        sink.clear();
    }

    #[tokio::test]
    async fn test_write_report_fails_on_poisoned_lock() {
        let mut sink = MemoryReportSink::new();
        poison(&sink);

        let report = ReconciliationReport::new(&EngineConfig::default(), AggregateResult::default());
        let result = sink.write_report(&report).await;
        assert!(matches!(result, Err(StatementError::Sink(_))));
    }
}
