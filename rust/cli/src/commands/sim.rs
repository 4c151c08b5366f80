//! `sim`: plays a session between bots and optionally writes every hand to
//! a JSONL log.
//!
//! Stacks carry over from hand to hand and the button rotates; the session
//! stops early once only one player has chips left. Each hand is checked
//! for chip conservation before it is logged.

use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use tablestakes_engine::engine::Engine;
use tablestakes_engine::game::GameState;
use tablestakes_engine::logger::{HandLogger, HandRecord};
use tablestakes_engine::player::Player;
use tablestakes_engine::provider::{DecisionProvider, PassiveProvider, RandomProvider};

use crate::config::Config;
use crate::error::{BatchValidationError, CliError};
use crate::io_utils::ensure_parent_dir;
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Policy {
    /// Check or call everything
    Passive,
    /// Uniformly random legal actions
    Random,
}

#[derive(Debug, Clone)]
pub struct SimArgs {
    pub hands: usize,
    pub policy: Policy,
    pub output: Option<PathBuf>,
}

pub fn handle_sim_command(
    args: &SimArgs,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if args.hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }

    let seed = match config.seed {
        Some(seed) => seed,
        None => {
            let seed = rand::random();
            ui::display_warning(err, &format!("no seed configured; using {seed}"))?;
            seed
        }
    };
    let table = config.table_config().seed(seed);
    let players: Vec<Player> = (0..config.seats)
        .map(|i| Player::new(i, format!("bot{i}"), config.starting_stack))
        .collect();
    let providers: Vec<Box<dyn DecisionProvider>> = (0..config.seats)
        .map(|i| match args.policy {
            Policy::Passive => Box::new(PassiveProvider) as Box<dyn DecisionProvider>,
            Policy::Random => Box::new(RandomProvider::new(seed.wrapping_add(i as u64 + 1))),
        })
        .collect();
    let mut engine = Engine::new(GameState::new(players, table)?, providers)?;

    let mut logger = match &args.output {
        Some(path) => {
            ensure_parent_dir(path)?;
            Some(HandLogger::create(path)?)
        }
        None => None,
    };

    let expected_chips = engine.state().total_chips();
    let mut played = 0usize;
    while played < args.hands {
        let funded = engine
            .state()
            .players()
            .iter()
            .filter(|p| p.stack() > 0)
            .count();
        if funded < 2 {
            writeln!(
                out,
                "Session ended after {} hands: one player holds every chip",
                played
            )?;
            break;
        }

        let history = engine.play_hand()?;
        played += 1;

        let total = engine.state().total_chips();
        if total != expected_chips {
            let failure = BatchValidationError {
                item_context: format!("hand {}", engine.state().hand_number()),
                message: format!("chip total {total}, expected {expected_chips}"),
            };
            return Err(CliError::Engine(failure.to_string()));
        }

        if let Some(logger) = logger.as_mut() {
            let hand_id = logger.next_id();
            let mut record = HandRecord::from_history(hand_id, Some(seed), &history);
            record.meta = Some(serde_json::json!({
                "hand_number": engine.state().hand_number(),
                "policy": format!("{:?}", args.policy).to_lowercase(),
            }));
            logger.write(&record)?;
        }
        debug!(hand = played, "simulated");
    }

    writeln!(out, "Simulated: {} hands (seed {})", played, seed)?;
    for p in engine.state().players() {
        writeln!(out, "  {}: {}", p.name(), p.stack())?;
    }
    if let Some(path) = &args.output {
        writeln!(out, "Hand log: {}", path.display())?;
    }
    Ok(())
}
