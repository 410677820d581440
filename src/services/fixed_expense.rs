//! Fixed expense service
//!
//! Creates income-proportional splits of shared costs and stores them. A
//! stored split is never edited; to change it, remove it and create it again.

use crate::audit::EntityType;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{FixedExpense, FixedExpenseId, Money};
use crate::storage::Storage;

use super::allocation::{allocate, IncomeShare};

/// Service for fixed expense management
pub struct FixedExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> FixedExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Split `total` across `incomes` and store the result
    ///
    /// Every member in `incomes` must exist. Allocation errors are returned
    /// unchanged and nothing is stored.
    pub fn create(
        &self,
        name: &str,
        total: Money,
        incomes: &[IncomeShare],
    ) -> FinanceResult<FixedExpense> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FinanceError::Validation(
                "Fixed expense name cannot be empty".into(),
            ));
        }

        for share in incomes {
            if share.member_id.is_all() {
                return Err(FinanceError::InvalidAllocationInput(
                    "the shared member cannot take a share".into(),
                ));
            }
            if !self.storage.members.exists(share.member_id)? {
                return Err(FinanceError::member_not_found(share.member_id.to_string()));
            }
        }

        let contributions = allocate(total, incomes)?;
        let expense = FixedExpense::new(name, total, contributions);

        if !expense.rounding_drift().is_zero() {
            tracing::debug!(
                expense = %expense.id,
                drift = %expense.rounding_drift(),
                "rounded contributions differ from total"
            );
        }

        self.storage.fixed_expenses.insert(expense.clone())?;
        self.storage.fixed_expenses.save()?;

        self.storage.log_create(
            EntityType::FixedExpense,
            expense.id.to_string(),
            Some(expense.name.clone()),
            &expense,
        )?;
        tracing::info!(expense = %expense.id, members = expense.contributions.len(), "fixed expense created");

        Ok(expense)
    }

    /// All fixed expenses, oldest first
    pub fn list(&self) -> FinanceResult<Vec<FixedExpense>> {
        self.storage.fixed_expenses.get_all()
    }

    pub fn find(&self, identifier: &str) -> FinanceResult<Option<FixedExpense>> {
        self.storage.fixed_expenses.find(identifier)
    }

    /// Remove a fixed expense together with all of its contributions
    pub fn remove(&self, id: FixedExpenseId) -> FinanceResult<FixedExpense> {
        let expense = self
            .storage
            .fixed_expenses
            .delete(id)?
            .ok_or_else(|| FinanceError::fixed_expense_not_found(id.to_string()))?;
        self.storage.fixed_expenses.save()?;

        self.storage.log_delete(
            EntityType::FixedExpense,
            expense.id.to_string(),
            Some(expense.name.clone()),
            &expense,
        )?;
        tracing::info!(expense = %expense.id, "fixed expense removed");

        Ok(expense)
    }
}
