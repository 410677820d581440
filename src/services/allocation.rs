//! Income-proportional expense splitting
//!
//! A shared cost is divided so that every member pays the same fraction of
//! their own income: `share_i = income_i * total / sum(incomes)`, rounded to
//! the cent independently per member. Rounded shares are not reconciled
//! against the total, so their sum may be off by up to one cent per member.

use std::collections::HashSet;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Contribution, MemberId, Money};

/// A member's declared income for one split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomeShare {
    pub member_id: MemberId,
    pub income: Money,
}

impl IncomeShare {
    pub fn new(member_id: MemberId, income: Money) -> Self {
        Self { member_id, income }
    }

    /// Build a share from user-entered text; non-numeric input is rejected as
    /// invalid allocation input
    pub fn parse(member_id: MemberId, raw_income: &str) -> FinanceResult<Self> {
        let income = Money::parse(raw_income).map_err(|e| {
            FinanceError::InvalidAllocationInput(format!("income for {}: {}", member_id, e))
        })?;
        Ok(Self::new(member_id, income))
    }
}

/// Split `total` across `incomes` in proportion to each income
///
/// # Errors
///
/// [`FinanceError::InvalidAllocationInput`] when `total` is not positive, the
/// list is empty, any income is not positive, or a member appears twice.
/// Nothing is produced on error.
pub fn allocate(total: Money, incomes: &[IncomeShare]) -> FinanceResult<Vec<Contribution>> {
    if !total.is_positive() {
        return Err(FinanceError::InvalidAllocationInput(format!(
            "total must be greater than zero, got {}",
            total
        )));
    }
    if incomes.is_empty() {
        return Err(FinanceError::InvalidAllocationInput(
            "at least one member income is required".into(),
        ));
    }

    let mut seen = HashSet::with_capacity(incomes.len());
    let mut sum_incomes: i64 = 0;
    for share in incomes {
        if !share.income.is_positive() {
            return Err(FinanceError::InvalidAllocationInput(format!(
                "income for {} must be greater than zero, got {}",
                share.member_id, share.income
            )));
        }
        if !seen.insert(share.member_id) {
            return Err(FinanceError::InvalidAllocationInput(format!(
                "member {} listed more than once",
                share.member_id
            )));
        }
        sum_incomes = sum_incomes.checked_add(share.income.cents()).ok_or_else(|| {
            FinanceError::InvalidAllocationInput("sum of incomes is too large".into())
        })?;
    }

    incomes
        .iter()
        .map(|share| {
            let amount = share
                .income
                .mul_ratio(total.cents(), sum_incomes)
                .ok_or_else(|| {
                    FinanceError::InvalidAllocationInput("contribution out of range".into())
                })?;
            Ok(Contribution {
                member_id: share.member_id,
                income: share.income,
                amount,
            })
        })
        .collect()
}
