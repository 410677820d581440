//! Member CLI commands

use clap::Subcommand;

use crate::error::FinanceResult;
use crate::services::MemberService;
use crate::storage::Storage;

use super::truncate;

/// Member subcommands
#[derive(Subcommand, Debug)]
pub enum MemberCommands {
    /// List household members
    List,
    /// Add a member
    Add {
        /// Member name
        name: String,
        /// Free-form notes (role, relationship, ...)
        #[arg(short, long)]
        details: Option<String>,
    },
    /// Remove a member
    #[command(alias = "delete")]
    Remove {
        /// Member name or ID
        member: String,
    },
}

/// Handle a member command
pub fn handle_member_command(storage: &Storage, cmd: MemberCommands) -> FinanceResult<()> {
    let service = MemberService::new(storage);

    match cmd {
        MemberCommands::List => {
            let members = service.list()?;

            println!("{:14} {:24} {}", "ID", "Name", "Details");
            println!("{}", "-".repeat(60));
            for member in &members {
                println!(
                    "{:14} {:24} {}",
                    member.id.to_string(),
                    truncate(&member.name, 24),
                    member.details.as_deref().unwrap_or("")
                );
            }
            println!("\nTotal: {} members", members.len());
        }

        MemberCommands::Add { name, details } => {
            let member = service.add(&name, details.as_deref())?;
            println!("Added member: {} ({})", member.name, member.id);
        }

        MemberCommands::Remove { member } => {
            let found = service.resolve(&member)?;
            let removed = service.remove(found.id)?;
            println!("Removed member: {}", removed.name);
        }
    }

    Ok(())
}
