use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use family_finance::cli::{
    handle_audit_command, handle_export_command, handle_fixed_command, handle_import_command,
    handle_member_command, handle_movement_command, handle_reminder_command,
    handle_summary_command,
};
use family_finance::config::{
    paths::{FinancePaths, DATA_DIR_ENV},
    settings::Settings,
};
use family_finance::storage::{init::initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "finance",
    version,
    about = "Household income and expense tracker",
    long_about = "Track the income and expenses of every household member, see \
                  where the money goes each month, forecast next month's balance \
                  and split shared bills in proportion to each member's income."
)]
struct Cli {
    /// Directory holding settings, data and the audit log
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,

    /// Household member management
    #[command(subcommand)]
    Member(family_finance::cli::MemberCommands),

    /// Income and expense records
    #[command(subcommand, alias = "mov")]
    Movement(family_finance::cli::MovementCommands),

    /// Totals, category breakdown, monthly series and forecast
    Summary {
        /// Only movements of this member
        #[arg(short, long)]
        member: Option<String>,

        /// Number of recent months in the monthly series
        #[arg(long)]
        months: Option<usize>,

        /// Also write the monthly series to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Shared costs split by income
    #[command(subcommand)]
    Fixed(family_finance::cli::FixedCommands),

    /// Bills agenda
    #[command(subcommand)]
    Reminder(family_finance::cli::ReminderCommands),

    /// Export data
    #[command(subcommand)]
    Export(family_finance::cli::ExportCommands),

    /// Import a JSON export, replacing the collections it contains
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => FinancePaths::with_base_dir(dir),
        None => FinancePaths::new()?,
    };
    let mut settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing family-finance at: {}", paths.base_dir().display());
            let created = initialize_storage(&paths)?;
            settings.setup_completed = true;
            settings.save(&paths)?;
            println!("Initialization complete ({} data file(s) created).", created);
            println!();
            println!("Run 'finance member add <name>' to add household members.");
        }
        Some(Commands::Config) => {
            println!("family-finance Configuration");
            println!("============================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Forecast months: {}", settings.forecast_months);
            println!("  Initialized:     {}", settings.setup_completed);
        }
        Some(Commands::Member(cmd)) => handle_member_command(&storage, cmd)?,
        Some(Commands::Movement(cmd)) => handle_movement_command(&storage, &settings, cmd)?,
        Some(Commands::Summary {
            member,
            months,
            csv,
        }) => handle_summary_command(&storage, &settings, member, months, csv)?,
        Some(Commands::Fixed(cmd)) => handle_fixed_command(&storage, &settings, cmd)?,
        Some(Commands::Reminder(cmd)) => handle_reminder_command(&storage, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, cmd)?,
        Some(Commands::Import { file }) => handle_import_command(&storage, file)?,
        Some(Commands::Audit { limit }) => handle_audit_command(&storage, limit)?,
        None => {
            println!("family-finance - household income and expense tracker");
            println!();
            println!("Run 'finance --help' for usage information.");
        }
    }

    Ok(())
}
