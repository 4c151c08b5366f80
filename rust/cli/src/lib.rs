//! # tablestakes CLI
//!
//! Command-line front end for `tablestakes-engine`. The entry point is
//! [`run`], which takes the arguments and output streams explicitly and
//! returns the process exit code.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["tablestakes", "sim", "--hands", "10", "--seed", "42"];
//! let code = tablestakes_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Subcommands
//!
//! - `sim`: bot-only session, optionally written to a JSONL hand log
//! - `play`: interactive session on stdin against bots
//! - `replay`: audit a hand log by replaying every hand from its events
//! - `cfg`: show the resolved configuration with value sources

use std::io::Write;

use clap::Parser;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, TableOverrides, TablestakesCli};
use commands::{
    PlayArgs, SimArgs, handle_cfg_command, handle_play_command, handle_replay_command,
    handle_sim_command,
};
use config::Config;
pub use error::{BatchValidationError, CliError};

const COMMANDS: &[&str] = &["sim", "play", "replay", "cfg"];

/// Parses `args` and runs the chosen subcommand.
///
/// Returns [`exit_code::SUCCESS`], or [`exit_code::ERROR`] for usage errors
/// and failed commands. Help and version go to `out` with a zero exit.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match TablestakesCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    let command = cli.cmd.name();
    match dispatch(cli.cmd, out, err) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(command, error = %e, "command failed");
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn dispatch(cmd: Commands, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    match cmd {
        Commands::Cfg => handle_cfg_command(&config::load_with_sources()?, out),
        Commands::Sim {
            hands,
            policy,
            output,
            table,
        } => {
            let config = apply_overrides(config::load_with_sources()?.config, &table)?;
            let args = SimArgs {
                hands,
                policy,
                output,
            };
            handle_sim_command(&args, &config, out, err)
        }
        Commands::Play {
            hands,
            opponents,
            table,
        } => {
            let config = apply_overrides(config::load_with_sources()?.config, &table)?;
            let args = PlayArgs { hands, opponents };
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(&args, &config, out, err, &mut stdin_lock)
        }
        Commands::Replay { input, verbose } => handle_replay_command(&input, verbose, out, err),
    }
}

fn apply_overrides(mut config: Config, table: &TableOverrides) -> Result<Config, CliError> {
    if let Some(seats) = table.seats {
        config.seats = seats;
    }
    if let Some(stack) = table.stack {
        config.starting_stack = stack;
    }
    if let Some(seed) = table.seed {
        config.seed = Some(seed);
    }
    config::validate(&config)?;
    Ok(config)
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }
    let mut report = || -> std::io::Result<()> {
        writeln!(err, "{}", e)?;
        writeln!(err)?;
        writeln!(err, "Usage: tablestakes <command> [options]\n")?;
        writeln!(err, "Commands:")?;
        for c in COMMANDS {
            writeln!(err, "  {}", c)?;
        }
        writeln!(err, "\nFor full help, run: tablestakes --help")
    };
    let _ = report();
    exit_code::ERROR
}
