pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Debug, Parser)]
#[command(
    name = "fincoach",
    about = "Fincoach recommendation engine CLI",
    long_about = "Query the insurance, asset-growth, and pension rule tables, and run \
                  readiness checks over the loaded configuration and data.",
    after_help = "Examples:\n  fincoach insurance --age 25 --family 1인가구 --income 2500000\n  fincoach growth --age 22 --family 1인가구 --income 2500000 --json\n  fincoach doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Path to fincoach.toml (defaults to ./fincoach.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Match the best-fit insurance coverage rule for a profile")]
    Insurance(QueryArgs),
    #[command(about = "Produce primary/secondary/tertiary asset-growth strategies for a profile")]
    Growth(QueryArgs),
    #[command(about = "Match the best-fit pension product rule for a profile")]
    Pension(QueryArgs),
    #[command(about = "Validate config and rule tables, reporting per-check status")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Inspect effective configuration values")]
    Config,
}

#[derive(Clone, Debug, Args)]
pub struct QueryArgs {
    /// Age in years
    #[arg(long)]
    pub age: u32,
    /// Free-text family composition, e.g. "부부+자녀2명"
    #[arg(long)]
    pub family: String,
    /// Monthly income in won
    #[arg(long)]
    pub income: Decimal,
    #[arg(long, help = "Emit machine-readable JSON output")]
    pub json: bool,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Command::Insurance(args) => {
            commands::query::run(config_path, commands::query::Domain::Insurance, &args)
        }
        Command::Growth(args) => {
            commands::query::run(config_path, commands::query::Domain::Growth, &args)
        }
        Command::Pension(args) => {
            commands::query::run(config_path, commands::query::Domain::Pension, &args)
        }
        Command::Doctor { json } => commands::doctor::run(config_path, json),
        Command::Config => commands::config::run(config_path),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
