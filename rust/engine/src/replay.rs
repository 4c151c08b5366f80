//! Rebuilds a hand from its history alone.
//!
//! Starting from nothing but the `hand_start` snapshot, every chip movement
//! in the log is re-applied and the running pot is checked against the pot
//! recorded on each entry. Showdown payouts are re-derived from the replayed
//! commitments and the snapshot's hole cards, and a finished hand must leave
//! the pot empty. A log that replays cleanly is a complete audit of the hand.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use thiserror::Error;

use crate::action::ActionKind;
use crate::cards::Card;
use crate::hand::{HandEvaluator, StandardEvaluator};
use crate::history::{EndReason, HandEvent, HistoryEntry, RevealedHand, SeatSnapshot};
use crate::player::PlayerId;
use crate::pot::{Contribution, PotAward, PotManager};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplayError {
    #[error("History does not begin with hand_start")]
    MissingHandStart,
    #[error("Entry {seq}: unknown player {id}")]
    UnknownPlayer { seq: u32, id: PlayerId },
    #[error("Entry {seq}: recorded pot {expected}, replayed pot {actual}")]
    PotMismatch { seq: u32, expected: u32, actual: u32 },
    #[error("Entry {seq}: player {id} commits {amount} with only {stack} behind")]
    NegativeStack {
        seq: u32,
        id: PlayerId,
        amount: u32,
        stack: u32,
    },
    #[error("Entry {seq}: pot tier {tier} does not pay out as the hands rank")]
    AwardMismatch { seq: u32, tier: usize },
    #[error("Entry {seq}: winners {recorded:?}, replayed winners {expected:?}")]
    WinnerMismatch {
        seq: u32,
        recorded: Vec<PlayerId>,
        expected: Vec<PlayerId>,
    },
    #[error("Entry {seq}: hand ends with {pot} chips left in the pot")]
    UnpaidPot { seq: u32, pot: u32 },
}

/// The table as the history leaves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayOutcome {
    pub hand_number: u64,
    pub stacks: BTreeMap<PlayerId, u32>,
    pub board: Vec<Card>,
    /// Chips still undistributed; zero for a finished hand
    pub pot: u32,
    pub winners: Vec<PlayerId>,
    /// A hand_end entry was reached
    pub complete: bool,
}

impl ReplayOutcome {
    pub fn total_chips(&self) -> u32 {
        self.stacks.values().sum::<u32>() + self.pot
    }
}

pub fn replay(entries: &[HistoryEntry]) -> Result<ReplayOutcome, ReplayError> {
    let Some((first, rest)) = entries.split_first() else {
        return Err(ReplayError::MissingHandStart);
    };
    let HandEvent::HandStart {
        hand_number,
        button,
        players,
    } = &first.event
    else {
        return Err(ReplayError::MissingHandStart);
    };

    let mut out = ReplayOutcome {
        hand_number: *hand_number,
        stacks: players.iter().map(|s| (s.player_id, s.stack)).collect(),
        board: Vec::new(),
        pot: 0,
        winners: Vec::new(),
        complete: false,
    };
    check_pot(first, out.pot)?;

    let mut committed: BTreeMap<PlayerId, u32> = BTreeMap::new();
    let mut folded: BTreeSet<PlayerId> = BTreeSet::new();

    for entry in rest {
        let seq = entry.seq;
        match &entry.event {
            HandEvent::HandStart { .. } => return Err(ReplayError::MissingHandStart),
            HandEvent::PostBlind {
                player_id, amount, ..
            }
            | HandEvent::PlayerAction {
                player_id, amount, ..
            } => {
                if let HandEvent::PlayerAction {
                    action: ActionKind::Fold,
                    ..
                } = &entry.event
                {
                    folded.insert(*player_id);
                }
                let stack = out
                    .stacks
                    .get_mut(player_id)
                    .ok_or(ReplayError::UnknownPlayer { seq, id: *player_id })?;
                if *amount > *stack {
                    return Err(ReplayError::NegativeStack {
                        seq,
                        id: *player_id,
                        amount: *amount,
                        stack: *stack,
                    });
                }
                *stack -= amount;
                out.pot += amount;
                *committed.entry(*player_id).or_default() += amount;
            }
            HandEvent::DealCommunity { cards } => out.board.extend_from_slice(cards),
            HandEvent::Showdown { hands, pots, .. } => {
                let expected =
                    expected_awards(players, *button, &committed, &folded, hands, &out.board);
                if let Some(tier) = first_difference(pots, &expected) {
                    return Err(ReplayError::AwardMismatch { seq, tier });
                }
                for &(id, chips) in pots.iter().flat_map(|p| &p.shares) {
                    award(&mut out, seq, id, chips)?;
                }
                out.winners = paid_players(pots);
            }
            HandEvent::HandEnd {
                winners,
                amount,
                reason,
            } => {
                // showdown winnings were already paid out by the showdown entry
                if *reason == EndReason::AllOthersFolded {
                    out.winners = players
                        .iter()
                        .filter(|s| s.stack > 0 && !folded.contains(&s.player_id))
                        .map(|s| s.player_id)
                        .collect();
                    for &id in winners {
                        award(&mut out, seq, id, *amount)?;
                    }
                }
                if *winners != out.winners {
                    return Err(ReplayError::WinnerMismatch {
                        seq,
                        recorded: winners.clone(),
                        expected: out.winners.clone(),
                    });
                }
                if out.pot != 0 {
                    return Err(ReplayError::UnpaidPot { seq, pot: out.pot });
                }
                out.complete = true;
            }
        }
        check_pot(entry, out.pot)?;
    }
    Ok(out)
}

/// What the showdown should have paid, tier by tier.
///
/// Hole cards come from the `hand_start` snapshot, falling back to the
/// showdown's revealed hands for logs that hide them.
fn expected_awards(
    seats: &[SeatSnapshot],
    button: usize,
    committed: &BTreeMap<PlayerId, u32>,
    folded: &BTreeSet<PlayerId>,
    revealed: &[RevealedHand],
    board: &[Card],
) -> Vec<PotAward> {
    let contributions: Vec<Contribution> = seats
        .iter()
        .filter_map(|s| {
            let chips = committed.get(&s.player_id).copied().filter(|&c| c > 0)?;
            Some(if folded.contains(&s.player_id) {
                Contribution::folded(s.player_id, chips)
            } else {
                Contribution::live(s.player_id, chips)
            })
        })
        .collect();

    // every funded seat that never folded is ranked, committed or not
    let evaluator = StandardEvaluator;
    let mut rankings = HashMap::new();
    for seat in seats
        .iter()
        .filter(|s| s.stack > 0 && !folded.contains(&s.player_id))
    {
        let hole = seat.hole_cards.or_else(|| {
            revealed
                .iter()
                .find(|h| h.player_id == seat.player_id)
                .map(|h| h.hole_cards)
        });
        if let Some(hole) = hole {
            rankings.insert(seat.player_id, evaluator.evaluate(&hole, board));
        }
    }

    let n = seats.len();
    let payout_order: Vec<PlayerId> = (1..=n)
        .map(|offset| seats[(button + offset) % n].player_id)
        .collect();
    PotManager::from_contributions(&contributions).distribute(&rankings, &payout_order)
}

fn first_difference(recorded: &[PotAward], expected: &[PotAward]) -> Option<usize> {
    match recorded.iter().zip(expected).position(|(r, e)| r != e) {
        Some(tier) => Some(tier),
        None if recorded.len() != expected.len() => Some(recorded.len().min(expected.len())),
        None => None,
    }
}

/// Players paid at least one chip, in payout order of first appearance.
fn paid_players(pots: &[PotAward]) -> Vec<PlayerId> {
    let mut paid = Vec::new();
    for &(id, chips) in pots.iter().flat_map(|p| &p.shares) {
        if chips > 0 && !paid.contains(&id) {
            paid.push(id);
        }
    }
    paid
}

fn award(out: &mut ReplayOutcome, seq: u32, id: PlayerId, chips: u32) -> Result<(), ReplayError> {
    let stack = out
        .stacks
        .get_mut(&id)
        .ok_or(ReplayError::UnknownPlayer { seq, id })?;
    if chips > out.pot {
        return Err(ReplayError::PotMismatch {
            seq,
            expected: chips,
            actual: out.pot,
        });
    }
    *stack += chips;
    out.pot -= chips;
    Ok(())
}

fn check_pot(entry: &HistoryEntry, pot: u32) -> Result<(), ReplayError> {
    if entry.pot != pot {
        return Err(ReplayError::PotMismatch {
            seq: entry.seq,
            expected: entry.pot,
            actual: pot,
        });
    }
    Ok(())
}
