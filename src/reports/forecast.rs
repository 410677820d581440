//! Next-month balance projection
//!
//! The projection is the current balance plus the average monthly net of the
//! months in the summary window. An empty window averages to zero.

use crate::models::Money;

use super::summary::MonthBucket;

/// Arithmetic mean of `income - expense` over `series`, rounded to the cent
pub fn average_net(series: &[MonthBucket]) -> Money {
    let total: Money = series.iter().map(MonthBucket::net).sum();
    total.div_round(series.len()).unwrap_or_default()
}

/// Projected balance for the next period; may be negative
pub fn forecast(balance: Money, series: &[MonthBucket]) -> Money {
    balance + average_net(series)
}
