use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use spendwise::cli::{handle_report_command, ReportCommands};
use spendwise::config::{DataSource, Session, SessionOverrides, Settings, SpendwisePaths};
use spendwise::data::load_snapshot;
use spendwise::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "spendwise",
    version,
    about = "Budget-vs-spending reports for your finance backend",
    long_about = "Spendwise loads transactions and budgets from a personal finance \
                  REST backend (or a directory of JSON files) and reports how \
                  spending compares with what was budgeted."
)]
struct Cli {
    /// Read JSON files from this directory instead of the API
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Backend API base URL
    #[arg(long, global = true, env = "SPENDWISE_API_URL")]
    api_url: Option<String>,

    /// API access token
    #[arg(long, global = true, env = "SPENDWISE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Report(ReportCommands),

    /// Create the settings file and data directory
    Init,

    /// Show current configuration and paths
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(if cli.verbose { "debug" } else { "warn" });

    let paths = SpendwisePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let overrides = SessionOverrides {
        data_dir: cli.data_dir,
        api_url: cli.api_url,
        token: cli.token,
    };

    match cli.command {
        Some(Commands::Report(cmd)) => {
            let session = Session::resolve(&settings, &paths, overrides)?;
            let snapshot = load_snapshot(&session).await?;
            let today = chrono::Local::now().date_naive();
            handle_report_command(&snapshot, &session, cmd, today)?;
        }
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!(
                    "Spendwise is already initialized at: {}",
                    paths.base_dir().display()
                );
                return Ok(());
            }
            println!("Initializing Spendwise at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!(
                "Put transactions.json and budgets.json in {}",
                paths.data_dir().display()
            );
            println!("or set api_base_url in {}", paths.settings_file().display());
        }
        Some(Commands::Config) => {
            println!("Spendwise Configuration");
            println!("=======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Default period:  {}", settings.default_period);
            println!("  Request timeout: {}s", settings.request_timeout_secs);
            println!();

            let session = Session::resolve(&settings, &paths, overrides)?;
            match &session.source {
                DataSource::Api { base_url, token, .. } => {
                    println!("Source: API at {}", base_url);
                    let token = if token.is_some() { "set" } else { "not set" };
                    println!("  Token: {}", token);
                }
                DataSource::Files { dir } => {
                    println!("Source: files in {}", dir.display());
                }
            }
        }
        None => {
            println!("Spendwise - budget-vs-spending reports");
            println!();
            println!("Run 'spendwise --help' for usage information.");
            println!("Run 'spendwise progress' to see how your budgets are doing.");
        }
    }

    Ok(())
}
