//! Command-line grammar.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::Policy;

#[derive(Parser, Debug)]
#[command(
    name = "tablestakes",
    version,
    about = "No-Limit Hold'em table engine: simulate, play and audit hands"
)]
pub struct TablestakesCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Table settings a subcommand may override on top of `cfg`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TableOverrides {
    #[arg(long)]
    pub seats: Option<usize>,
    #[arg(long)]
    pub stack: Option<u32>,
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a bot-only session, optionally logging every hand as JSONL
    Sim {
        #[arg(long, default_value_t = 100)]
        hands: usize,
        #[arg(long, value_enum, default_value_t = Policy::Passive)]
        policy: Policy,
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        table: TableOverrides,
    },
    /// Play interactively from seat 0 against bots
    Play {
        #[arg(long, default_value_t = 1)]
        hands: usize,
        #[arg(long, value_enum, default_value_t = Policy::Passive)]
        opponents: Policy,
        #[command(flatten)]
        table: TableOverrides,
    },
    /// Re-derive every hand in a JSONL (or .jsonl.zst) log and report mismatches
    Replay {
        #[arg(long)]
        input: String,
        /// Print a line per verified hand
        #[arg(long)]
        verbose: bool,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Sim { .. } => "sim",
            Commands::Play { .. } => "play",
            Commands::Replay { .. } => "replay",
            Commands::Cfg => "cfg",
        }
    }
}
