use std::fmt;

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// The closed set of things a player can do when it is their turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    /// Forfeit the hand
    Fold,
    /// Pass without committing chips (only when nothing is owed)
    Check,
    /// Match the street's current bet
    Call,
    /// Open the betting on a street
    Bet,
    /// Increase an existing bet
    Raise,
    /// Commit the entire remaining stack
    AllIn,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::Fold,
        ActionKind::Check,
        ActionKind::Call,
        ActionKind::Bet,
        ActionKind::Raise,
        ActionKind::AllIn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Fold => "FOLD",
            ActionKind::Check => "CHECK",
            ActionKind::Call => "CALL",
            ActionKind::Bet => "BET",
            ActionKind::Raise => "RAISE",
            ActionKind::AllIn => "ALL_IN",
        }
    }

    /// Whether this kind moves chips into the pot.
    pub fn moves_chips(self) -> bool {
        !matches!(self, ActionKind::Fold | ActionKind::Check)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decision submitted by (or on behalf of) a seated player.
///
/// For BET and RAISE, `amount` is the number of chips the player puts in
/// with this action, including any part that calls the existing bet.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    #[serde(default)]
    pub amount: u32,
    pub player_id: PlayerId,
}

impl Action {
    pub fn new(kind: ActionKind, amount: u32, player_id: PlayerId) -> Self {
        Self {
            kind,
            amount,
            player_id,
        }
    }

    pub fn fold(player_id: PlayerId) -> Self {
        Self::new(ActionKind::Fold, 0, player_id)
    }

    pub fn check(player_id: PlayerId) -> Self {
        Self::new(ActionKind::Check, 0, player_id)
    }

    pub fn call(player_id: PlayerId) -> Self {
        Self::new(ActionKind::Call, 0, player_id)
    }

    pub fn bet(player_id: PlayerId, amount: u32) -> Self {
        Self::new(ActionKind::Bet, amount, player_id)
    }

    pub fn raise(player_id: PlayerId, amount: u32) -> Self {
        Self::new(ActionKind::Raise, amount, player_id)
    }

    pub fn all_in(player_id: PlayerId) -> Self {
        Self::new(ActionKind::AllIn, 0, player_id)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.moves_chips() && self.amount > 0 {
            write!(f, "{} {}", self.kind, self.amount)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

/// Phases of a hand, in order. SHOWDOWN is terminal and never bet on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BettingRound {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
    /// Hands are compared; no further betting
    Showdown,
}

impl BettingRound {
    /// The next betting street. `None` after RIVER means "go to showdown".
    pub fn successor(self) -> Option<BettingRound> {
        match self {
            BettingRound::Preflop => Some(BettingRound::Flop),
            BettingRound::Flop => Some(BettingRound::Turn),
            BettingRound::Turn => Some(BettingRound::River),
            BettingRound::River | BettingRound::Showdown => None,
        }
    }

    /// Community cards dealt when this street begins.
    pub fn cards_dealt_on_entry(self) -> usize {
        match self {
            BettingRound::Flop => 3,
            BettingRound::Turn | BettingRound::River => 1,
            BettingRound::Preflop | BettingRound::Showdown => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BettingRound::Preflop => "PREFLOP",
            BettingRound::Flop => "FLOP",
            BettingRound::Turn => "TURN",
            BettingRound::River => "RIVER",
            BettingRound::Showdown => "SHOWDOWN",
        }
    }
}

impl fmt::Display for BettingRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
