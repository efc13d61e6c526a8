mod cmd;
mod output;
mod root;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, release::ReleaseSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "shipboard",
    about = "Release board: classify releases as past due, next, ready, pending and friends",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .shipboard/ or .git/)
    #[arg(long, global = true, env = "SHIPBOARD_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Evaluate as of this date (YYYY-MM-DD) instead of the wall clock
    #[arg(long, global = true, value_name = "DATE")]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .shipboard/ with a default config and an empty snapshot
    Init,

    /// List releases with their classified state
    Releases {
        /// Only releases of this project
        #[arg(long)]
        project: Option<String>,
        /// Include archived releases
        #[arg(long)]
        archived: bool,
    },

    /// Inspect or update a single release
    Release {
        #[command(subcommand)]
        subcommand: ReleaseSubcommand,
    },

    /// Summary counts and the upcoming releases
    Dashboard {
        #[arg(long)]
        project: Option<String>,
    },

    /// Who still owes action on the next release
    Nag {
        #[arg(long)]
        project: Option<String>,
    },

    /// A member's outstanding items on upcoming releases
    Milestones {
        /// Member id
        #[arg(long)]
        member: String,
        #[arg(long)]
        project: Option<String>,
    },

    /// Show or validate the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Print the state presentation table
    States,
}

/// `RUST_LOG` when set and valid, otherwise warnings only.
fn log_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let today = cli.today;

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root, cli.json),
        Commands::Releases { project, archived } => {
            cmd::releases::run(&root, project.as_deref(), archived, today, cli.json)
        }
        Commands::Release { subcommand } => cmd::release::run(&root, subcommand, today, cli.json),
        Commands::Dashboard { project } => {
            cmd::dashboard::run(&root, project.as_deref(), today, cli.json)
        }
        Commands::Nag { project } => cmd::nag::run(&root, project.as_deref(), today, cli.json),
        Commands::Milestones { member, project } => {
            cmd::milestones::run(&root, &member, project.as_deref(), today, cli.json)
        }
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::States => cmd::states::run(cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
