//! alertbot CLI binary entrypoint.
//!
//! This is the main entry point for the `alertbot` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use alertbot_cli::cli::{Cli, Commands};
use alertbot_cli::commands::{
    MaintenanceCommand, MatchCommand, ParseCommand, StateCommand, TargetCommand,
};
use alertbot_cli::output::OutputFormat;
use alertbot_cli::{resolve_config, CliError};

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Commands::Parse { expr } => {
            ParseCommand::new().execute(&mut stdout, &format, expr)?;
        }
        Commands::Match(args) => {
            let matched = MatchCommand::new().execute(&mut stdout, &format, args)?;
            if !matched {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::State(args) => {
            StateCommand::new().execute(&mut stdout, &format, args)?;
        }
        Commands::Maintenance { hours } => {
            let config = resolve_config(cli)?;
            MaintenanceCommand::new(&config).execute(&mut stdout, &format, *hours)?;
        }
        Commands::Target(args) => {
            let config = resolve_config(cli)?;
            TargetCommand::new(&config).execute(&mut stdout, &format, args)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
