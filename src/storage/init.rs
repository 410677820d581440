//! Storage initialization
//!
//! First-run setup: creates the directory layout and writes an empty file for
//! every collection that does not exist yet.

use crate::config::paths::FinancePaths;
use crate::error::FinanceError;

use super::Storage;

/// Initialize storage for a fresh installation
///
/// Existing files are left alone. Returns the number of files created.
pub fn initialize_storage(paths: &FinancePaths) -> Result<usize, FinanceError> {
    let storage = Storage::new(paths.clone())?;
    let mut created = 0;

    if !paths.members_file().exists() {
        storage.members.save()?;
        created += 1;
    }
    if !paths.movements_file().exists() {
        storage.movements.save()?;
        created += 1;
    }
    if !paths.fixed_expenses_file().exists() {
        storage.fixed_expenses.save()?;
        created += 1;
    }
    if !paths.reminders_file().exists() {
        storage.reminders.save()?;
        created += 1;
    }

    tracing::debug!(created, "storage initialized");
    Ok(created)
}
