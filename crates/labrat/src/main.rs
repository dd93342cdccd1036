//! labrat command-line entry point.
//!
//! Logging goes to a daily-rolling file under `~/.labrat/logs` and to the
//! console. Commands that emit JSON on stdout get their console logs
//! routed to stderr so the output stays machine-readable.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use labrat::config;

mod cli;

#[derive(Parser, Debug)]
#[command(name = "labrat", about = "Lab project lifecycle and file organization", version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage projects (create, list, delete)
    Project {
        #[command(subcommand)]
        action: cli::project::ProjectAction,
    },

    /// Archive a directory into a timestamped zip
    Archive(cli::archive::ArchiveArgs),

    /// Sort loose files into category subdirectories
    Organize(cli::organize::OrganizeArgs),

    /// Show current configuration and paths
    Config(cli::config::ConfigArgs),

    /// Dilution calculations
    Calc {
        #[command(subcommand)]
        action: cli::calc::CalcAction,
    },

    /// DNA sequence utilities
    Seq {
        #[command(subcommand)]
        action: cli::seq::SeqAction,
    },
}

fn command_wants_json(command: &Commands) -> bool {
    match command {
        Commands::Archive(args) => args.json,
        Commands::Organize(args) => args.json,
        Commands::Config(args) => args.json,
        Commands::Project { action } => match action {
            cli::project::ProjectAction::List { json, .. } => *json,
            _ => false,
        },
        Commands::Seq { action } => cli::seq::wants_json(action),
        Commands::Calc { .. } => false,
    }
}

fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Project { action } => cli::project::run(action),
        Commands::Archive(args) => cli::archive::run(args),
        Commands::Organize(args) => cli::organize::run(args),
        Commands::Config(args) => cli::config::run(args),
        Commands::Calc { action } => cli::calc::run(action),
        Commands::Seq { action } => cli::seq::run(action),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let json_mode = command_wants_json(&cli.command);
    let default_filter = if cli.verbose { "labrat=debug" } else { "labrat=info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let mut _log_guard: Option<tracing_appender::non_blocking::WorkerGuard> = None;
    let file_layer = match config::ensure_logs_dir() {
        Ok(log_dir) => {
            let file_appender = tracing_appender::rolling::daily(log_dir, "labrat.log");
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            _log_guard = Some(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(file_writer)
                    .with_ansi(false)
                    .with_filter(env_filter.clone()),
            )
        }
        Err(err) => {
            eprintln!("Warning: failed to create logs directory: {}", err);
            None
        }
    };

    let console_writer = if json_mode {
        tracing_subscriber::fmt::writer::BoxMakeWriter::new(std::io::stderr)
    } else {
        tracing_subscriber::fmt::writer::BoxMakeWriter::new(std::io::stdout)
    };
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(console_writer)
        .with_target(false)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if json_mode {
                cli::output::print_json_error(&err);
            } else {
                eprintln!("Error: {:#}", err);
            }
            ExitCode::from(1)
        }
    }
}
