//! Fixed shared expenses and their per-member contributions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{FixedExpenseId, MemberId};
use super::money::Money;

/// One member's share of a fixed expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub member_id: MemberId,
    /// Income the member declared for this split
    pub income: Money,
    /// Computed share of the total
    pub amount: Money,
}

impl Contribution {
    /// Share of the member's own income this contribution represents, in percent
    pub fn percent_of_income(&self) -> f64 {
        if self.income.is_zero() {
            return 0.0;
        }
        self.amount.cents() as f64 / self.income.cents() as f64 * 100.0
    }
}

/// A recurring cost split across members in proportion to their income
///
/// The contribution list is produced in full by the allocator when the expense
/// is created; afterwards the record is only ever deleted as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedExpense {
    pub id: FixedExpenseId,
    pub name: String,
    pub total: Money,
    pub contributions: Vec<Contribution>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl FixedExpense {
    pub fn new(name: impl Into<String>, total: Money, contributions: Vec<Contribution>) -> Self {
        Self {
            id: FixedExpenseId::new(),
            name: name.into(),
            total,
            contributions,
            created_at: Utc::now(),
        }
    }

    /// Sum of the rounded contributions, which may differ from `total` by a
    /// cent per member
    pub fn allocated(&self) -> Money {
        self.contributions.iter().map(|c| c.amount).sum()
    }

    /// `allocated() - total`
    pub fn rounding_drift(&self) -> Money {
        self.allocated() - self.total
    }

    pub fn contribution_for(&self, member_id: MemberId) -> Option<&Contribution> {
        self.contributions.iter().find(|c| c.member_id == member_id)
    }
}
