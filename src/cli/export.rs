//! CLI commands for export and import

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::error::{FinanceError, FinanceResult};
use crate::export::{export_full_json, export_full_yaml, export_movements_csv, import_json};
use crate::storage::Storage;

use super::member_filter;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON format (full database, re-importable)
    Json,
    /// YAML format (full database, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all data to a file
    All {
        /// Output file path
        output: PathBuf,

        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export movements to CSV
    Movements {
        /// Output file path
        output: PathBuf,

        /// Only movements of this member
        #[arg(short, long)]
        member: Option<String>,
    },
}

fn create_output(path: &PathBuf) -> FinanceResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        FinanceError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> FinanceResult<()> {
    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => {
            let mut writer = create_output(&output)?;
            match format {
                ExportFormat::Json => export_full_json(storage, &mut writer, pretty)?,
                ExportFormat::Yaml => export_full_yaml(storage, &mut writer)?,
            }
            writer
                .flush()
                .map_err(|e| FinanceError::Export(e.to_string()))?;

            println!("Exported all data to {}", output.display());
        }

        ExportCommands::Movements { output, member } => {
            let filter = member_filter(storage, member.as_deref())?;
            export_movements_csv(storage, create_output(&output)?, filter)?;
            println!("Exported movements to {}", output.display());
        }
    }

    Ok(())
}

/// Replace stored data with the collections found in a JSON file
pub fn handle_import_command(storage: &Storage, file: PathBuf) -> FinanceResult<()> {
    let contents = fs::read_to_string(&file).map_err(|e| {
        FinanceError::Import(format!("Failed to read {}: {}", file.display(), e))
    })?;

    let summary = import_json(storage, &contents, &file.display().to_string())?;

    if summary.is_empty() {
        println!("Nothing to import from {}", file.display());
        return Ok(());
    }

    println!("Imported from {}:", file.display());
    let counts = [
        ("members", summary.members),
        ("movements", summary.movements),
        ("fixed expenses", summary.fixed_expenses),
        ("reminders", summary.reminders),
    ];
    for (label, count) in counts {
        if let Some(count) = count {
            println!("  {:16} {}", label, count);
        }
    }

    Ok(())
}
