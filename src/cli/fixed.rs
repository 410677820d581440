//! Fixed expense CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::models::Money;
use crate::services::{FixedExpenseService, IncomeShare, MemberService};
use crate::storage::Storage;

use super::truncate;

/// Fixed expense subcommands
#[derive(Subcommand, Debug)]
pub enum FixedCommands {
    /// Split a shared cost between members by income
    Add {
        /// Expense name, e.g. "Rent"
        name: String,
        /// Total amount to split
        total: String,
        /// Member income as MEMBER=INCOME; repeat for each member
        #[arg(short, long = "share", required = true)]
        shares: Vec<String>,
    },
    /// List fixed expenses with each member's contribution
    List,
    /// Remove a fixed expense and all of its contributions
    #[command(alias = "delete")]
    Remove {
        /// Fixed expense ID
        id: String,
    },
}

fn parse_share(members: &MemberService<'_>, raw: &str) -> FinanceResult<IncomeShare> {
    let (member, income) = raw.split_once('=').ok_or_else(|| {
        FinanceError::InvalidAllocationInput(format!(
            "expected MEMBER=INCOME, got '{}'",
            raw
        ))
    })?;
    let member = members.resolve(member.trim())?;
    if member.id.is_all() {
        return Err(FinanceError::InvalidAllocationInput(format!(
            "{} cannot take a share; list each member instead",
            member.name
        )));
    }
    IncomeShare::parse(member.id, income)
}

/// Handle a fixed expense command
pub fn handle_fixed_command(
    storage: &Storage,
    settings: &Settings,
    cmd: FixedCommands,
) -> FinanceResult<()> {
    let service = FixedExpenseService::new(storage);
    let members = MemberService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        FixedCommands::Add {
            name,
            total,
            shares,
        } => {
            let total = Money::parse(&total)
                .map_err(|e| FinanceError::InvalidAllocationInput(format!("total: {}", e)))?;
            let incomes = shares
                .iter()
                .map(|raw| parse_share(&members, raw))
                .collect::<FinanceResult<Vec<_>>>()?;

            let expense = service.create(&name, total, &incomes)?;

            println!(
                "Created fixed expense {} ({}): {}",
                expense.name,
                expense.id,
                expense.total.format_with_symbol(symbol)
            );
            for contribution in &expense.contributions {
                let name = members
                    .get(contribution.member_id)?
                    .map(|m| m.name)
                    .unwrap_or_default();
                println!(
                    "  {:20} {:>12}  ({:.1}% of income)",
                    truncate(&name, 20),
                    contribution.amount.format_with_symbol(symbol),
                    contribution.percent_of_income()
                );
            }
            if !expense.rounding_drift().is_zero() {
                println!(
                    "  Rounded shares add up to {}",
                    expense.allocated().format_with_symbol(symbol)
                );
            }
        }

        FixedCommands::List => {
            let expenses = service.list()?;
            if expenses.is_empty() {
                println!("No fixed expenses.");
                return Ok(());
            }

            for expense in &expenses {
                println!(
                    "{} {} {}",
                    expense.id,
                    expense.name,
                    expense.total.format_with_symbol(symbol)
                );
                for contribution in &expense.contributions {
                    let name = members
                        .get(contribution.member_id)?
                        .map(|m| m.name)
                        .unwrap_or_else(|| "(removed)".to_string());
                    println!(
                        "    {:20} income {:>12}  pays {:>12}  ({:.1}%)",
                        truncate(&name, 20),
                        contribution.income.format_with_symbol(symbol),
                        contribution.amount.format_with_symbol(symbol),
                        contribution.percent_of_income()
                    );
                }
            }
        }

        FixedCommands::Remove { id } => {
            let existing = service
                .find(&id)?
                .ok_or_else(|| FinanceError::fixed_expense_not_found(&id))?;
            let removed = service.remove(existing.id)?;
            println!("Removed fixed expense: {}", removed.name);
        }
    }

    Ok(())
}
