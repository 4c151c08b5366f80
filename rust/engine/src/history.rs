use serde::{Deserialize, Serialize};

use crate::action::{ActionKind, BettingRound};
use crate::cards::Card;
use crate::hand::Category;
use crate::player::PlayerId;
use crate::pot::PotAward;

/// A seat as it stood when the hand began, before any forced bets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSnapshot {
    pub player_id: PlayerId,
    pub seat: usize,
    pub stack: u32,
    #[serde(default)]
    pub hole_cards: Option<[Card; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlindKind {
    Ante,
    SmallBlind,
    BigBlind,
    /// Short stack pushed all-in at hand start
    ForcedAllIn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedHand {
    pub player_id: PlayerId,
    pub hole_cards: [Card; 2],
    pub category: Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    AllOthersFolded,
    Showdown,
}

/// Everything that can happen during a hand, in the order it happens.
/// Chip amounts are the chips actually moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HandEvent {
    HandStart {
        hand_number: u64,
        button: usize,
        players: Vec<SeatSnapshot>,
    },
    PostBlind {
        player_id: PlayerId,
        kind: BlindKind,
        amount: u32,
    },
    PlayerAction {
        player_id: PlayerId,
        action: ActionKind,
        amount: u32,
    },
    DealCommunity {
        cards: Vec<Card>,
    },
    Showdown {
        community_cards: Vec<Card>,
        hands: Vec<RevealedHand>,
        pots: Vec<PotAward>,
    },
    HandEnd {
        winners: Vec<PlayerId>,
        amount: u32,
        reason: EndReason,
    },
}

impl HandEvent {
    pub fn name(&self) -> &'static str {
        match self {
            HandEvent::HandStart { .. } => "hand_start",
            HandEvent::PostBlind { .. } => "post_blind",
            HandEvent::PlayerAction { .. } => "player_action",
            HandEvent::DealCommunity { .. } => "deal_community",
            HandEvent::Showdown { .. } => "showdown",
            HandEvent::HandEnd { .. } => "hand_end",
        }
    }
}

/// One hand-history line: the event plus the street it happened on and the
/// pot (all undistributed chips) right after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub seq: u32,
    pub street: BettingRound,
    pub pot: u32,
    #[serde(flatten)]
    pub event: HandEvent,
}
