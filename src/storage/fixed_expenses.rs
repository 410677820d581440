//! Fixed expense repository for JSON storage
//!
//! Fixed expenses are stored whole; there is no partial update, only insert
//! and delete.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::{FixedExpense, FixedExpenseId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct FixedExpenseData {
    #[serde(default)]
    fixed_expenses: Vec<FixedExpense>,
}

pub struct FixedExpenseRepository {
    path: PathBuf,
    data: RwLock<Vec<FixedExpense>>,
}

impl FixedExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: FixedExpenseData = read_json(&self.path)?;
        let mut data = write_lock(&self.data)?;
        *data = file_data.fixed_expenses;
        data.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(())
    }

    pub fn save(&self) -> Result<(), FinanceError> {
        let data = read_lock(&self.data)?;
        write_json_atomic(
            &self.path,
            &FixedExpenseData {
                fixed_expenses: data.clone(),
            },
        )
    }

    /// All fixed expenses, oldest first
    pub fn get_all(&self) -> Result<Vec<FixedExpense>, FinanceError> {
        Ok(read_lock(&self.data)?.clone())
    }

    /// Find by full ID or short listing form
    pub fn find(&self, identifier: &str) -> Result<Option<FixedExpense>, FinanceError> {
        let data = read_lock(&self.data)?;
        let mut matches = data.iter().filter(|f| f.id.matches(identifier));
        match (matches.next(), matches.next()) {
            (Some(found), None) => Ok(Some(found.clone())),
            _ => Ok(None),
        }
    }

    pub fn insert(&self, expense: FixedExpense) -> Result<(), FinanceError> {
        let mut data = write_lock(&self.data)?;
        data.retain(|f| f.id != expense.id);
        data.push(expense);
        Ok(())
    }

    pub fn delete(&self, id: FixedExpenseId) -> Result<Option<FixedExpense>, FinanceError> {
        let mut data = write_lock(&self.data)?;
        Ok(data
            .iter()
            .position(|f| f.id == id)
            .map(|index| data.remove(index)))
    }

    pub fn replace_all(&self, expenses: Vec<FixedExpense>) -> Result<(), FinanceError> {
        *write_lock(&self.data)? = expenses;
        Ok(())
    }
}
