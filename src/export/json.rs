//! JSON export and import
//!
//! Exports every collection with schema versioning. Import reads the same
//! document; any collection may be omitted, and each one that is present
//! replaces the stored one.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::{AuditEntry, EntityType};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{FixedExpense, Member, Money, Movement, Reminder};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Application version that created the export
    pub app_version: String,
    pub members: Vec<Member>,
    pub movements: Vec<Movement>,
    pub fixed_expenses: Vec<FixedExpense>,
    pub reminders: Vec<Reminder>,
}

impl FullExport {
    pub fn from_storage(storage: &Storage) -> FinanceResult<Self> {
        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            members: storage.members.get_all()?,
            movements: storage.movements.get_all()?,
            fixed_expenses: storage.fixed_expenses.get_all()?,
            reminders: storage.reminders.get_all()?,
        })
    }
}

/// An export document in which every collection is optional
#[derive(Debug, Default, Deserialize)]
struct ImportDocument {
    #[serde(default)]
    schema_version: Option<String>,
    #[serde(default)]
    members: Option<Vec<Member>>,
    #[serde(default)]
    movements: Option<Vec<Movement>>,
    #[serde(default)]
    fixed_expenses: Option<Vec<FixedExpense>>,
    #[serde(default)]
    reminders: Option<Vec<Reminder>>,
}

impl ImportDocument {
    /// Reject amounts the summary could not add up safely
    fn check_amounts(&self) -> FinanceResult<()> {
        let too_large = |what: &str, id: String| {
            FinanceError::Import(format!("{} {} has an amount above {}", what, id, Money::MAX))
        };

        for movement in self.movements.iter().flatten() {
            if !movement.amount.is_within_limit() {
                return Err(too_large("Movement", movement.id.to_string()));
            }
        }
        for reminder in self.reminders.iter().flatten() {
            if !reminder.amount.is_within_limit() {
                return Err(too_large("Reminder", reminder.id.to_string()));
            }
        }
        for expense in self.fixed_expenses.iter().flatten() {
            let mut amounts = std::iter::once(expense.total)
                .chain(expense.contributions.iter().flat_map(|c| [c.income, c.amount]));
            if amounts.any(|m| !m.is_within_limit()) {
                return Err(too_large("Fixed expense", expense.id.to_string()));
            }
        }
        Ok(())
    }
}

/// What an import replaced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub members: Option<usize>,
    pub movements: Option<usize>,
    pub fixed_expenses: Option<usize>,
    pub reminders: Option<usize>,
}

impl ImportSummary {
    pub fn is_empty(&self) -> bool {
        self.members.is_none()
            && self.movements.is_none()
            && self.fixed_expenses.is_none()
            && self.reminders.is_none()
    }
}

/// Export the full database to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> FinanceResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FinanceError::Export(e.to_string()))?;

    Ok(())
}

/// Replace stored collections with those found in `json_str`
///
/// Nothing is written unless the whole document parses.
pub fn import_json(storage: &Storage, json_str: &str, source: &str) -> FinanceResult<ImportSummary> {
    let document: ImportDocument =
        serde_json::from_str(json_str).map_err(|e| FinanceError::Import(e.to_string()))?;

    if let Some(version) = &document.schema_version {
        if version != EXPORT_SCHEMA_VERSION {
            return Err(FinanceError::Import(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, version
            )));
        }
    }

    document.check_amounts()?;

    let mut summary = ImportSummary::default();

    if let Some(members) = document.members {
        let count = members.len();
        storage.members.replace_all(members)?;
        storage.members.save()?;
        storage
            .audit()
            .log(&AuditEntry::import(EntityType::Member, source, count))?;
        summary.members = Some(count);
    }

    if let Some(movements) = document.movements {
        let undated = movements.iter().filter(|m| !m.date.is_valid()).count();
        if undated > 0 {
            tracing::warn!(count = undated, "imported movements with unreadable dates");
        }
        let count = movements.len();
        storage.movements.replace_all(movements)?;
        storage.movements.save()?;
        storage.audit().log(&AuditEntry::import(
            EntityType::Movement,
            source,
            count,
        ))?;
        summary.movements = Some(count);
    }

    if let Some(expenses) = document.fixed_expenses {
        let count = expenses.len();
        storage.fixed_expenses.replace_all(expenses)?;
        storage.fixed_expenses.save()?;
        storage.audit().log(&AuditEntry::import(
            EntityType::FixedExpense,
            source,
            count,
        ))?;
        summary.fixed_expenses = Some(count);
    }

    if let Some(reminders) = document.reminders {
        let count = reminders.len();
        storage.reminders.replace_all(reminders)?;
        storage.reminders.save()?;
        storage.audit().log(&AuditEntry::import(
            EntityType::Reminder,
            source,
            count,
        ))?;
        summary.reminders = Some(count);
    }

    tracing::info!(?summary, source, "import finished");
    Ok(summary)
}
