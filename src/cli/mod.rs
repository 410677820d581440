//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Each handler prints
//! its own output and returns errors for `main` to report.

pub mod audit;
pub mod export;
pub mod fixed;
pub mod member;
pub mod movement;
pub mod reminder;
pub mod summary;

pub use audit::handle_audit_command;
pub use export::{handle_export_command, handle_import_command, ExportCommands, ExportFormat};
pub use fixed::{handle_fixed_command, FixedCommands};
pub use member::{handle_member_command, MemberCommands};
pub use movement::{handle_movement_command, MovementCommands};
pub use reminder::{handle_reminder_command, ReminderCommands};
pub use summary::handle_summary_command;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{MemberFilter, Money};
use crate::services::MemberService;
use crate::storage::Storage;

/// Parse an amount typed on the command line
pub(crate) fn parse_amount(raw: &str) -> FinanceResult<Money> {
    Money::parse(raw).map_err(|e| FinanceError::Validation(e.to_string()))
}

/// Resolve an optional `--member` argument into a filter
pub(crate) fn member_filter(storage: &Storage, member: Option<&str>) -> FinanceResult<MemberFilter> {
    match member {
        Some(identifier) => Ok(MemberService::new(storage).resolve(identifier)?.id.into()),
        None => Ok(MemberFilter::All),
    }
}

pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
