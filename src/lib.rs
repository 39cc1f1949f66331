//! # Statement Reconcile
//!
//! Reconciles a set of periodic financial statements into one aggregate
//! report: a single combined date range and a single summed closing balance.
//!
//! ## Features
//!
//! - **Statement parsing**: Recovers the statement period and the balance dated to its end from extracted text
//! - **Typed outcomes**: Every extraction failure is a [`ParseOutcome`] variant, never a panic or error
//! - **Exact arithmetic**: Balances are `BigDecimal`, dates are `NaiveDate` compared in calendar order
//! - **Aggregation**: Earliest start, latest end and total balance, with an audit list of skipped statements
//! - **Collaborator abstraction**: Trait-based document sources and report sinks
//!
//! ## Quick Start
//!
//! ```rust
//! use statement_reconcile::{ParseOutcome, ReconciliationAggregator, StatementParser};
//!
//! let parser = StatementParser::new().unwrap();
//! let outcome = parser.parse(
//!     "Statement for January 1, 2024 to January 31, 2024\n\
//!      Ending balance on January 31, 2024 $1,234.56",
//! );
//! assert!(outcome.is_success());
//!
//! let result = ReconciliationAggregator::aggregate(vec![
//!     ("january.pdf", outcome),
//!     ("unreadable.pdf", ParseOutcome::PeriodNotFound),
//! ]);
//! assert_eq!(result.total_balance.to_string(), "1234.56");
//! assert_eq!(result.skipped.len(), 1);
//! ```

pub mod reconciliation;
pub mod statement;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use reconciliation::*;
pub use statement::*;
pub use traits::*;
pub use types::*;

// Re-export formatting helpers for report sinks
pub use utils::format::{format_currency, format_statement_date};
