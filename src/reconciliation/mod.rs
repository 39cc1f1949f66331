//! Reconciliation of many statements into one aggregate report

pub mod aggregator;
pub mod engine;
pub mod report;

pub use aggregator::*;
pub use engine::*;
pub use report::*;
