//! `replay`: re-derives every hand in a JSONL log from its events alone and
//! reports any hand whose log does not add up.
//!
//! Per hand: the events must replay without a pot mismatch or overdrawn
//! stack, reach `hand_end`, and agree with the record's summary `board` and
//! `winners`. Consecutive hands must chain: each hand starts from the
//! stacks the previous one ended with. Reads `.jsonl.zst` transparently.

use std::collections::BTreeMap;
use std::io::Write;

use tablestakes_engine::history::HandEvent;
use tablestakes_engine::logger::HandRecord;
use tablestakes_engine::player::PlayerId;
use tablestakes_engine::replay::replay;

use crate::error::{BatchValidationError, CliError};
use crate::formatters::format_board;
use crate::io_utils::read_text_auto;
use crate::ui;

pub fn handle_replay_command(
    input: &str,
    verbose: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content = read_text_auto(input)
        .map_err(|e| CliError::InvalidInput(format!("Failed to read {}", e)))?;

    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .collect();
    if lines.is_empty() {
        writeln!(out, "No hands found in file.")?;
        return Ok(());
    }

    let mut failures: Vec<BatchValidationError<String>> = Vec::new();
    let mut previous: Option<BTreeMap<PlayerId, u32>> = None;
    let mut verified = 0usize;

    for (idx, line) in lines {
        let record: HandRecord = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                failures.push(BatchValidationError {
                    item_context: format!("line {}", idx + 1),
                    message: format!("unparseable record: {e}"),
                });
                previous = None;
                continue;
            }
        };

        match check_record(&record, previous.as_ref()) {
            Ok(stacks) => {
                verified += 1;
                if verbose {
                    writeln!(
                        out,
                        "{}: board {} winners {:?}",
                        record.hand_id,
                        format_board(&record.board),
                        record.winners
                    )?;
                }
                previous = Some(stacks);
            }
            Err(message) => {
                failures.push(BatchValidationError {
                    item_context: record.hand_id.clone(),
                    message,
                });
                previous = None;
            }
        }
    }

    for failure in &failures {
        ui::write_error(err, &failure.to_string())?;
    }
    writeln!(
        out,
        "Replay complete. {} hands verified, {} failed.",
        verified,
        failures.len()
    )?;
    if failures.is_empty() {
        Ok(())
    } else {
        Err(CliError::InvalidInput(format!(
            "{} hand(s) failed verification",
            failures.len()
        )))
    }
}

/// Replays one record; returns the closing stacks.
fn check_record(
    record: &HandRecord,
    previous: Option<&BTreeMap<PlayerId, u32>>,
) -> Result<BTreeMap<PlayerId, u32>, String> {
    let outcome = replay(&record.events).map_err(|e| e.to_string())?;
    if !outcome.complete {
        return Err("history ends before hand_end".to_string());
    }
    if outcome.board != record.board {
        return Err("board does not match the dealt community cards".to_string());
    }
    if outcome.winners != record.winners {
        return Err(format!(
            "winners {:?} do not match hand_end {:?}",
            record.winners, outcome.winners
        ));
    }

    if let (Some(prev), Some(first)) = (previous, record.events.first()) {
        if let HandEvent::HandStart { players, .. } = &first.event {
            for seat in players {
                let carried = prev.get(&seat.player_id).copied();
                if carried.is_some_and(|stack| stack != seat.stack) {
                    return Err(format!(
                        "player {} starts with {} but the previous hand left {}",
                        seat.player_id,
                        seat.stack,
                        carried.unwrap_or_default()
                    ));
                }
            }
        }
    }
    Ok(outcome.stacks)
}
