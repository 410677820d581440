//! Storage layer for family-finance
//!
//! JSON file storage with atomic writes. Each collection lives in its own file
//! under the data directory and is held in memory behind an `RwLock`; callers
//! get cloned snapshots.

pub mod file_io;
pub mod fixed_expenses;
pub mod init;
pub mod members;
pub mod movements;
pub mod reminders;

pub use file_io::{read_json, write_json_atomic};
pub use fixed_expenses::FixedExpenseRepository;
pub use members::MemberRepository;
pub use movements::MovementRepository;
pub use reminders::ReminderRepository;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::FinancePaths;
use crate::error::FinanceError;

pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, FinanceError> {
    lock.read()
        .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, FinanceError> {
    lock.write()
        .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FinancePaths,
    audit: AuditLogger,
    pub movements: MovementRepository,
    pub members: MemberRepository,
    pub fixed_expenses: FixedExpenseRepository,
    pub reminders: ReminderRepository,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: FinancePaths) -> Result<Self, FinanceError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            movements: MovementRepository::new(paths.movements_file()),
            members: MemberRepository::new(paths.members_file()),
            fixed_expenses: FixedExpenseRepository::new(paths.fixed_expenses_file()),
            reminders: ReminderRepository::new(paths.reminders_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &FinancePaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), FinanceError> {
        self.movements.load()?;
        self.members.load()?;
        self.fixed_expenses.load()?;
        self.reminders.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), FinanceError> {
        self.movements.save()?;
        self.members.save()?;
        self.fixed_expenses.save()?;
        self.reminders.save()?;
        Ok(())
    }

    /// Record a create in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), FinanceError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), FinanceError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        ))
    }

    /// Record a delete in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), FinanceError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
