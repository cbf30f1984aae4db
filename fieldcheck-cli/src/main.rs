//! fieldcheck CLI - validate records against declarative rule files.
//!
//! # Commands
//!
//! - `fieldcheck check --rules <file> --record <file>` - Validate a record
//! - `fieldcheck rules --rules <file>` - List the rules of a rule file
//!
//! Exit codes: `0` valid, `1` validation failed, `2` the files could not be
//! loaded.

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use fieldcheck_config::{OutputFormat, Settings};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

mod commands;
mod error;

use commands::{check, rules};
use error::CliResult;

/// fieldcheck - declarative field validation
#[derive(Parser)]
#[command(name = "fieldcheck")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "Validate JSON records against declarative rule files")]
#[command(propagate_version = true)]
#[command(after_help = format!(
    "{}\n  {} fieldcheck check --rules rules.json --record signup.json\n  {} fieldcheck rules --rules rules.toml",
    "Examples:".bright_cyan().bold(),
    "$".dimmed(),
    "$".dimmed(),
))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a record against a rule file
    #[command(alias = "c")]
    Check(CheckArgs),

    /// List the rules declared in a rule file
    #[command(alias = "r")]
    Rules(RulesArgs),
}

#[derive(Args)]
struct CheckArgs {
    /// Rule file (.json or .toml)
    #[arg(long)]
    rules: PathBuf,

    /// Record file (.json or .toml)
    #[arg(long)]
    record: PathBuf,

    /// Report format (defaults to FIELDCHECK_OUTPUT, then pretty)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,
}

#[derive(Args)]
struct RulesArgs {
    /// Rule file (.json or .toml)
    #[arg(long)]
    rules: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Pretty,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Pretty => OutputFormat::Pretty,
        }
    }
}

fn init_tracing(level: Level, color: bool) {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(color))
        .init();
}

fn run(command: Commands, settings: &Settings) -> CliResult<bool> {
    match command {
        Commands::Check(args) => check::execute(&args.rules, &args.record, settings.output),
        Commands::Rules(args) => rules::execute(&args.rules).map(|()| true),
    }
}

fn fail(message: impl std::fmt::Display) -> ExitCode {
    eprintln!("\n  {} {}\n", "Error:".red().bold(), message);
    ExitCode::from(2)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle color preferences
    if cli.no_color {
        colored::control::set_override(false);
    }

    let format = match &cli.command {
        Commands::Check(args) => args.format.map(OutputFormat::from),
        Commands::Rules(_) => None,
    };
    let settings = match Settings::load(None, format) {
        Ok(settings) => settings,
        Err(e) => return fail(e),
    };

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        settings.log_level
    };
    init_tracing(level, !cli.no_color);

    match run(cli.command, &settings) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => fail(e),
    }
}
