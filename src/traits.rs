//! Traits for the collaborators around the reconciliation core

use async_trait::async_trait;

use crate::reconciliation::ReconciliationReport;
use crate::types::*;

/// Source of statement texts
///
/// Implementations fetch documents from wherever they live (a shared drive,
/// an object store, a local folder) and hand back their already-extracted
/// plain text. The core never reads binary document formats itself.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// List every statement document with its extracted text
    async fn list_documents(&self) -> ReconcileResult<Vec<StatementDocument>>;
}

/// Destination for finished reconciliation reports
///
/// Implementations render or persist the report, e.g. as a spreadsheet with
/// one row for the combined period and one for the formatted total.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Render or persist a report
    async fn write_report(&mut self, report: &ReconciliationReport) -> ReconcileResult<()>;
}
