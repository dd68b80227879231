//! marks - exam marks entry
//!
//! CLI binary for entering and submitting a class section's exam marks.

use anyhow::Result;
use clap::{Parser, Subcommand};
use marks_entry::backend::create_backend;
use marks_entry::config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "marks")]
#[command(about = "Enter and submit exam marks for a class section")]
#[command(version)]
struct Cli {
    /// Use the built-in demo backend
    #[arg(long, global = true)]
    demo: bool,

    /// Show debug logs and every submission phase
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $MARKS_CONFIG or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Teacher id (defaults to $MARKS_TEACHER_ID)
    #[arg(short, long, global = true)]
    teacher: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Enter marks interactively (default)
    Enter,

    /// List assigned classes, sections and subjects
    Assignments,

    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Test credentials against the backend
    Test,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "marks_entry=debug,marks=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.demo {
        config.backend.demo = true;
    }
    let backend = create_backend(&config)?;
    let teacher_id = cli.teacher.as_deref();

    match cli.command.unwrap_or(Commands::Enter) {
        Commands::Enter => {
            cli::run_entry(
                backend.as_ref(),
                cli::EntryOptions {
                    teacher_id,
                    reset_delay: config.reset_delay(),
                    verbose: cli.verbose,
                },
            )
            .await?;
        }
        Commands::Assignments => cli::run_assignments(backend.as_ref(), teacher_id).await?,
        Commands::Auth { action } => match action {
            AuthAction::Test => cli::run_auth_test(backend.as_ref(), teacher_id).await?,
        },
    }

    Ok(())
}
