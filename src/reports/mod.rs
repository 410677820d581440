//! Reports module for family-finance
//!
//! Pure aggregation over movement snapshots: the financial summary (totals,
//! category breakdown, monthly series) and the next-month forecast.

pub mod forecast;
pub mod summary;

pub use forecast::{average_net, forecast};
pub use summary::{aggregate, aggregate_with_window, MonthBucket, Summary};

/// Number of most recent months kept in the monthly series by default
pub const DEFAULT_MONTH_WINDOW: usize = 6;
