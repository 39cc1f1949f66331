//! Reconcile a handful of statements held in memory and print the report

use statement_reconcile::utils::{MemoryDocumentSource, MemoryReportSink};
use statement_reconcile::ReconciliationEngine;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let source = MemoryDocumentSource::new()
        .with_document(
            "2024-01_statement.pdf",
            "Checking account statement for January 1, 2024 to January 31, 2024\n\
             Beginning balance on January 1, 2024 $4,120.00\n\
             Ending balance on January 31, 2024 $3,875.42\n",
        )
        .with_document(
            "2024-02_statement.pdf",
            "Checking account statement for February 1, 2024 to February 29, 2024\n\
             Beginning balance on February 1, 2024 $3,875.42\n\
             Ending balance on February 29, 2024 $5,010.18\n",
        )
        .with_document(
            "2024-03_statement.pdf",
            "Checking account statement for March 1, 2024 to March 31, 2024\n\
             Daily balance on March 14, 2024 $4,200.00\n",
        );
    let sink = MemoryReportSink::new();

    let mut engine = ReconciliationEngine::new(source, sink)?;
    let report = engine.run().await?;

    println!("{}\n", report.title);
    for [label, value] in report.rows() {
        println!("  {:<24} {}", label, value);
    }

    let skipped = report.skipped_rows();
    if !skipped.is_empty() {
        println!("\nSkipped statements:");
        for [identifier, reason] in skipped {
            println!("  {:<24} {}", identifier, reason);
        }
    }

    Ok(())
}
