//! Movement CLI commands

use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Attachment, EntryDate, MemberId, Movement, MovementKind};
use crate::services::{MemberService, MovementInput, MovementService};
use crate::storage::Storage;

use super::{member_filter, parse_amount, truncate};

/// Movement subcommands
#[derive(Subcommand, Debug)]
pub enum MovementCommands {
    /// Record an income or expense
    Add {
        /// "income" or "expense"
        kind: String,
        /// Amount, e.g. 125.50
        amount: String,
        /// Member name or ID (defaults to everyone)
        #[arg(short, long)]
        member: Option<String>,
        /// Category (required for expenses)
        #[arg(short, long)]
        category: Option<String>,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(long)]
        description: Option<String>,
        /// File to keep with the movement (receipt, payslip)
        #[arg(long, value_name = "PATH")]
        attach: Option<PathBuf>,
    },
    /// List movements, newest first
    List {
        /// Only movements of this member
        #[arg(short, long)]
        member: Option<String>,
        /// Number of movements to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Change a movement; omitted fields keep their value
    Edit {
        /// Movement ID
        id: String,
        #[arg(short, long)]
        kind: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        member: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Replace the attached file
        #[arg(long, value_name = "PATH")]
        attach: Option<PathBuf>,
    },
    /// Remove a movement
    #[command(alias = "delete")]
    Remove {
        /// Movement ID
        id: String,
    },
}

fn parse_kind(raw: &str) -> FinanceResult<MovementKind> {
    MovementKind::parse(raw).ok_or_else(|| {
        FinanceError::Validation(format!(
            "Unknown movement kind '{}', expected income or expense",
            raw
        ))
    })
}

fn read_attachment(path: &Path) -> FinanceResult<Attachment> {
    let bytes = std::fs::read(path)
        .map_err(|e| FinanceError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Attachment::from_bytes(name, &bytes))
}

fn resolve_member(storage: &Storage, member: Option<&str>) -> FinanceResult<Option<MemberId>> {
    member
        .map(|identifier| MemberService::new(storage).resolve(identifier).map(|m| m.id))
        .transpose()
}

/// Handle a movement command
pub fn handle_movement_command(
    storage: &Storage,
    settings: &Settings,
    cmd: MovementCommands,
) -> FinanceResult<()> {
    let service = MovementService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        MovementCommands::Add {
            kind,
            amount,
            member,
            category,
            date,
            description,
            attach,
        } => {
            let date = date
                .map(EntryDate::new)
                .unwrap_or_else(|| Local::now().date_naive().into());
            let mut input = MovementInput::new(parse_kind(&kind)?, parse_amount(&amount)?, date)
                .category(category.unwrap_or_default())
                .description(description.unwrap_or_default());
            if let Some(member_id) = resolve_member(storage, member.as_deref())? {
                input = input.member(member_id);
            }
            if let Some(path) = attach {
                input = input.attachment(read_attachment(&path)?);
            }

            let movement = service.add(input)?;
            println!(
                "Recorded {} of {} on {} ({})",
                movement.kind.to_string().to_lowercase(),
                movement.amount.format_with_symbol(symbol),
                movement.date,
                movement.id
            );
            if let Some(attachment) = &movement.attachment {
                println!("Attached {}", attachment.name);
            }
        }

        MovementCommands::List { member, limit } => {
            let filter = member_filter(storage, member.as_deref())?;
            let movements = service.list(filter)?;

            if movements.is_empty() {
                println!("No movements found.");
                return Ok(());
            }

            let names = storage.members.get_all()?;
            let member_name = |movement: &Movement| {
                names
                    .iter()
                    .find(|m| m.id == movement.member_id)
                    .map(|m| m.name.clone())
                    .unwrap_or_else(|| "(removed)".to_string())
            };

            println!(
                "{:14} {:12} {:8} {:14} {:16} {:>12} {:4}",
                "ID", "Date", "Kind", "Member", "Category", "Amount", "Att"
            );
            println!("{}", "-".repeat(86));
            for movement in movements.iter().take(limit) {
                println!(
                    "{:14} {:12} {:8} {:14} {:16} {:>12} {:4}",
                    movement.id.to_string(),
                    truncate(movement.date.as_str(), 12),
                    movement.kind.to_string(),
                    truncate(&member_name(movement), 14),
                    truncate(&movement.category, 16),
                    movement.amount.format_with_symbol(symbol),
                    if movement.attachment.is_some() { "yes" } else { "" }
                );
            }

            if movements.len() > limit {
                println!("\nShowing {} of {} movements", limit, movements.len());
            }
        }

        MovementCommands::Edit {
            id,
            kind,
            amount,
            member,
            category,
            date,
            description,
            attach,
        } => {
            let existing = service
                .find(&id)?
                .ok_or_else(|| FinanceError::movement_not_found(&id))?;

            let mut input = MovementInput {
                kind: existing.kind,
                amount: existing.amount,
                date: existing.date.clone(),
                member_id: existing.member_id,
                category: existing.category.clone(),
                description: existing.description.clone(),
                attachment: existing.attachment.clone(),
            };
            if let Some(kind) = kind {
                input.kind = parse_kind(&kind)?;
            }
            if let Some(amount) = amount {
                input.amount = parse_amount(&amount)?;
            }
            if let Some(member_id) = resolve_member(storage, member.as_deref())? {
                input.member_id = member_id;
            }
            if let Some(category) = category {
                input.category = category;
            }
            if let Some(date) = date {
                input.date = EntryDate::new(date);
            }
            if let Some(description) = description {
                input.description = description;
            }
            if let Some(path) = attach {
                input.attachment = Some(read_attachment(&path)?);
            }

            let movement = service.update(existing.id, input)?;
            println!("Updated movement {}: {}", movement.id, movement);
        }

        MovementCommands::Remove { id } => {
            let existing = service
                .find(&id)?
                .ok_or_else(|| FinanceError::movement_not_found(&id))?;
            let removed = service.remove(existing.id)?;
            println!("Removed movement {}", removed.id);
        }
    }

    Ok(())
}
