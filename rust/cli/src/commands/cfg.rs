//! `cfg`: prints the resolved table configuration and where each value
//! came from (`default`, `file` or `env`).

use std::io::Write;

use crate::config::ConfigResolved;
use crate::error::CliError;

pub fn handle_cfg_command(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seats": { "value": config.seats, "source": sources.seats },
        "starting_stack": { "value": config.starting_stack, "source": sources.starting_stack },
        "small_blind": { "value": config.small_blind, "source": sources.small_blind },
        "big_blind": { "value": config.big_blind, "source": sources.big_blind },
        "ante": { "value": config.ante, "source": sources.ante },
        "seed": { "value": config.seed, "source": sources.seed },
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
