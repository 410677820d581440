//! Reminder CLI commands

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::models::ReminderKind;
use crate::services::ReminderService;
use crate::storage::Storage;

use super::{parse_amount, truncate};

/// Reminder subcommands
#[derive(Subcommand, Debug)]
pub enum ReminderCommands {
    /// Add a bill to pay or an amount to receive
    Add {
        description: String,
        amount: String,
        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: String,
        /// "pay" or "receive"
        #[arg(short, long, default_value = "pay")]
        kind: String,
    },
    /// List reminders by due date
    List {
        /// Only reminders due within this many days (overdue included)
        #[arg(short, long)]
        days: Option<i64>,
    },
    /// Remove a reminder
    #[command(alias = "delete")]
    Remove {
        /// Reminder ID
        id: String,
    },
}

/// Handle a reminder command
pub fn handle_reminder_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReminderCommands,
) -> FinanceResult<()> {
    let service = ReminderService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReminderCommands::Add {
            description,
            amount,
            due,
            kind,
        } => {
            let due = NaiveDate::parse_from_str(due.trim(), "%Y-%m-%d").map_err(|_| {
                FinanceError::Validation(format!("Invalid due date '{}', expected YYYY-MM-DD", due))
            })?;
            let kind = ReminderKind::parse(&kind).ok_or_else(|| {
                FinanceError::Validation(format!(
                    "Unknown reminder kind '{}', expected pay or receive",
                    kind
                ))
            })?;

            let reminder = service.add(&description, due, parse_amount(&amount)?, kind)?;
            println!(
                "Added reminder: {} {} due {} ({})",
                reminder.description,
                reminder.amount.format_with_symbol(symbol),
                reminder.due.format(&settings.date_format),
                reminder.id
            );
        }

        ReminderCommands::List { days } => {
            let today = Local::now().date_naive();
            let reminders = match days {
                Some(days) => service.upcoming(today, days)?,
                None => service.list()?,
            };

            if reminders.is_empty() {
                println!("No reminders.");
                return Ok(());
            }

            println!(
                "{:14} {:12} {:8} {:28} {:>12}",
                "ID", "Due", "Kind", "Description", "Amount"
            );
            println!("{}", "-".repeat(78));
            for reminder in &reminders {
                let marker = if reminder.is_overdue(today) { " !" } else { "" };
                println!(
                    "{:14} {:12} {:8} {:28} {:>12}{}",
                    reminder.id.to_string(),
                    reminder.due.format(&settings.date_format).to_string(),
                    reminder.kind.to_string(),
                    truncate(&reminder.description, 28),
                    reminder.amount.format_with_symbol(symbol),
                    marker
                );
            }
        }

        ReminderCommands::Remove { id } => {
            let existing = service
                .find(&id)?
                .ok_or_else(|| FinanceError::reminder_not_found(&id))?;
            let removed = service.remove(existing.id)?;
            println!("Removed reminder: {}", removed.description);
        }
    }

    Ok(())
}
