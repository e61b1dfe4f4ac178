//! CLI entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the state database.
//! - Dispatch subcommands to `izin_core` use-cases.
//!
//! # Invariants
//! - Business rules live in `izin_core`; this crate only formats output.
//! - Logging failures never prevent a command from running.

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use izin_core::db::open_db;
use izin_core::{init_logging_from_config, CoreConfig, SqliteStateRepository, StateContainer};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let data_dir = cli.data_dir.map(absolutize).transpose()?;
    let config = CoreConfig::resolve(data_dir, cli.log_level);
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("warning: logging disabled: {err}");
    }

    let conn = open_db(config.state_db_path())
        .map_err(|err| format!("failed to open state database: {err}"))?;
    let mut container = StateContainer::load(SqliteStateRepository::new(&conn));
    commands::execute(&mut container, cli.command)
}

fn absolutize(path: PathBuf) -> Result<PathBuf, String> {
    if path.is_absolute() {
        return Ok(path);
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|err| format!("cannot resolve current directory: {err}"))
}
