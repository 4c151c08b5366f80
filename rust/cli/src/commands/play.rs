//! `play`: an interactive session with a human at seat 0 and bots in the
//! remaining seats.
//!
//! The human types actions on stdin. A rejected action is reported and the
//! prompt repeats; the table is unchanged by it. `q` or end of input stops
//! the session after the current decision.

use std::io::{BufRead, Write};

use tablestakes_engine::config::TableConfig;
use tablestakes_engine::game::GameState;
use tablestakes_engine::history::{EndReason, HandEvent};
use tablestakes_engine::player::{Player, PlayerId};
use tablestakes_engine::provider::{DecisionProvider, PassiveProvider, RandomProvider};

use crate::commands::sim::Policy;
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_action, format_board, format_card, format_options};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_player_action};

const HUMAN: PlayerId = 0;

#[derive(Debug, Clone)]
pub struct PlayArgs {
    pub hands: usize,
    pub opponents: Policy,
}

pub fn handle_play_command(
    args: &PlayArgs,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    if args.hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    let table: TableConfig = config.table_config().seed(seed);
    let players: Vec<Player> = (0..config.seats)
        .map(|i| {
            let name = if i == HUMAN {
                "you".to_string()
            } else {
                format!("bot{i}")
            };
            Player::new(i, name, config.starting_stack)
        })
        .collect();
    let mut bots: Vec<Box<dyn DecisionProvider>> = (1..config.seats)
        .map(|i| match args.opponents {
            Policy::Passive => Box::new(PassiveProvider) as Box<dyn DecisionProvider>,
            Policy::Random => Box::new(RandomProvider::new(seed.wrapping_add(i as u64))),
        })
        .collect();
    let mut game = GameState::new(players, table)?;

    writeln!(
        out,
        "play: seats={} hands={} seed={}",
        config.seats, args.hands, seed
    )?;
    writeln!(
        out,
        "Blinds: SB={} BB={} ante={}",
        config.small_blind, config.big_blind, config.ante
    )?;

    let mut played = 0usize;
    'session: while played < args.hands {
        if game.player(HUMAN).is_none_or(|p| p.stack() == 0) {
            writeln!(out, "You are out of chips.")?;
            break;
        }
        if game.players().iter().filter(|p| p.stack() > 0).count() < 2 {
            writeln!(out, "Nobody left to play against.")?;
            break;
        }

        game.start_new_hand()?;
        played += 1;
        writeln!(out, "Hand {}", game.hand_number())?;
        if let Some(cards) = game.player(HUMAN).and_then(|p| p.hole_cards()) {
            writeln!(out, "Your cards: {}", format_board(&cards))?;
        }

        let mut shown_board = 0usize;
        while !game.is_hand_over() {
            if game.community_cards().len() != shown_board {
                shown_board = game.community_cards().len();
                writeln!(
                    out,
                    "{}: {}",
                    game.betting_round().as_str(),
                    format_board(game.community_cards())
                )?;
            }

            let action = {
                let ctx = game
                    .decision_context()
                    .ok_or_else(|| CliError::Engine("no player to act".to_string()))?;
                let id = ctx.player.id();
                if id == HUMAN {
                    writeln!(
                        out,
                        "Pot: {} | Stack: {} | To call: {}",
                        ctx.pot,
                        ctx.player.stack(),
                        ctx.to_call()
                    )?;
                    writeln!(out, "Options: {}", format_options(&ctx))?;
                    write!(out, "Enter action: ")?;
                    out.flush()?;
                    match read_stdin_line(stdin) {
                        None => break 'session,
                        Some(input) => match parse_player_action(&input, HUMAN) {
                            ParseResult::Action(action) => action,
                            ParseResult::Quit => break 'session,
                            ParseResult::Invalid(msg) => {
                                ui::write_error(err, &msg)?;
                                continue;
                            }
                        },
                    }
                } else {
                    // bots occupy seats 1.. in order
                    let seat = ctx.player.seat();
                    bots[seat - 1].decide(&ctx)
                }
            };

            let who = action.player_id;
            match game.apply_action(action.clone()) {
                Ok(()) => writeln!(out, "{}: {}", name_of(&game, who), format_action(&action))?,
                Err(e) if who == HUMAN => ui::write_error(err, &format!("Invalid action: {}", e))?,
                Err(e) => return Err(e.into()),
            }
        }

        write_result(&game, out)?;
    }

    writeln!(out, "Session over after {} hands.", played)?;
    for p in game.players() {
        writeln!(out, "  {}: {}", p.name(), p.stack())?;
    }
    Ok(())
}

fn name_of(game: &GameState, id: PlayerId) -> String {
    game.player(id)
        .map(|p| p.name().to_string())
        .unwrap_or_else(|| format!("player {id}"))
}

fn write_result(game: &GameState, out: &mut dyn Write) -> Result<(), CliError> {
    for entry in game.history() {
        match &entry.event {
            HandEvent::Showdown { hands, .. } => {
                for hand in hands {
                    writeln!(
                        out,
                        "  {} shows {} {} ({})",
                        name_of(game, hand.player_id),
                        format_card(&hand.hole_cards[0]),
                        format_card(&hand.hole_cards[1]),
                        hand.category
                    )?;
                }
            }
            HandEvent::HandEnd {
                winners,
                amount,
                reason,
            } => {
                let names: Vec<String> = winners.iter().map(|id| name_of(game, *id)).collect();
                let how = match reason {
                    EndReason::AllOthersFolded => "uncontested",
                    EndReason::Showdown => "at showdown",
                };
                writeln!(out, "{} won {} {}", names.join(", "), amount, how)?;
            }
            _ => {}
        }
    }
    Ok(())
}
