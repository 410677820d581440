//! family-finance - household income and expense tracking
//!
//! This library provides the core of a local-first family finance tracker:
//! movements tagged to household members, a financial summary with a
//! next-month forecast, and fixed expenses split between members in
//! proportion to their income.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (members, movements, fixed expenses, reminders)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer and the income-proportional allocator
//! - `reports`: Summary aggregation and forecasting
//! - `audit`: Audit logging system
//! - `export`: JSON/YAML/CSV export and JSON import
//! - `cli`: Command handlers for the `finance` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use family_finance::models::{MemberFilter, Money};
//! use family_finance::reports::aggregate;
//!
//! let summary = aggregate(&movements, MemberFilter::All);
//! println!("next month: {}", summary.forecast());
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
