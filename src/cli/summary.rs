//! Summary CLI command

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::services::SummaryService;
use crate::storage::Storage;

use super::member_filter;

/// Print the financial summary, optionally writing the monthly series as CSV
pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    member: Option<String>,
    months: Option<usize>,
    csv: Option<PathBuf>,
) -> FinanceResult<()> {
    let months = months.unwrap_or(settings.forecast_months);
    if months == 0 {
        return Err(FinanceError::Validation(
            "--months must be at least 1".into(),
        ));
    }

    let filter = member_filter(storage, member.as_deref())?;
    let summary = SummaryService::new(storage).summarize(filter, months)?;

    print!("{}", summary.format_terminal(&settings.currency_symbol));

    if let Some(path) = csv {
        let file = File::create(&path).map_err(|e| {
            FinanceError::Export(format!("Failed to create {}: {}", path.display(), e))
        })?;
        summary.export_monthly_csv(BufWriter::new(file))?;
        println!("\nMonthly series written to {}", path.display());
    }

    Ok(())
}
