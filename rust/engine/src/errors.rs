use thiserror::Error;

use crate::action::ActionKind;
use crate::player::PlayerId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    // setup
    #[error("At least 2 players are required, got {count}")]
    NotEnoughPlayers { count: usize },
    #[error("At most {max} players fit one deck, got {count}")]
    TooManyPlayers { count: usize, max: usize },
    #[error("Player id {id} is seated more than once")]
    DuplicatePlayer { id: PlayerId },
    #[error("Invalid blinds: small blind {small}, big blind {big}")]
    InvalidBlinds { small: u32, big: u32 },
    #[error("Invalid ante {ante}: must be below the big blind {big}")]
    InvalidAnte { ante: u32, big: u32 },
    #[error("{providers} decision providers for {seats} seats")]
    ProviderCountMismatch { seats: usize, providers: usize },

    // resources
    #[error("Cannot deal {requested} cards, only {remaining} remaining")]
    EmptyDeck { requested: usize, remaining: usize },
    #[error("Player {id} already holds hole cards")]
    HoleCardsAlreadyDealt { id: PlayerId },

    // session
    #[error("Only {funded} player(s) have chips; a hand needs at least 2")]
    NotEnoughFundedPlayers { funded: usize },

    // protocol
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("A hand is already in progress")]
    HandInProgress,
    #[error("Unknown player {id}")]
    UnknownPlayer { id: PlayerId },
    #[error("Player {id} already folded")]
    PlayerAlreadyFolded { id: PlayerId },
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: PlayerId, actual: PlayerId },
    #[error("{kind} is not a legal action for player {id} (legal: {valid:?})")]
    IllegalAction {
        id: PlayerId,
        kind: ActionKind,
        valid: Vec<ActionKind>,
    },
}
