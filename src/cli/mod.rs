//! The command line front-end.
//!
//! It parses the arguments, sets up logging and configuration and hands the
//! command to [`commands::CommandExecutor`]. All table work happens in
//! [`crate::persistence`]; this module only loads, saves and prints.

use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use crate::cli::{
    commands::CommandExecutor,
    config::Config,
    messages::{error_message, system_message},
    parsers::CliParser,
};

mod colors;
pub mod commands;
pub mod config;
mod messages;
pub mod parsers;

pub fn run() -> ExitCode {
    let cli = CliParser::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = Config::from_env().with_database(cli.database);
    let executor = CommandExecutor::new(cli.command, config);

    match executor.execute() {
        Ok(result) => {
            print!("{}", system_message("ferrum", result.to_string()));
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}", error_message(error));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    //! Set up `env_logger`.
    //!
    //! `RUST_LOG` is read first; `--quiet` and `--verbose` override it.

    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn);
    builder.parse_default_env();

    if quiet {
        builder.filter_level(LevelFilter::Error);
    } else if verbose > 0 {
        builder.filter_level(match verbose {
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        });
    }

    builder.init();
}
