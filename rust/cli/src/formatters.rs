//! Card, board and action formatting for terminal display.
//!
//! Suits render as ♥ ♦ ♣ ♠ where the terminal is known to cope, and as
//! h d c s otherwise.
//!
//! ```rust
//! use tablestakes_engine::cards::{Card, Rank, Suit};
//! use tablestakes_cli::formatters::{format_board, format_card};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_board(&[ace_spades]).starts_with("[A"));
//! ```

use tablestakes_engine::action::{Action, ActionKind};
use tablestakes_engine::cards::{Card, Rank, Suit};
use tablestakes_engine::provider::DecisionContext;

/// On Windows only modern terminals (Windows Terminal, VS Code, anything
/// setting TERM_PROGRAM) are trusted with Unicode suits.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> &'static str {
    match (supports_unicode(), suit) {
        (true, Suit::Hearts) => "♥",
        (true, Suit::Diamonds) => "♦",
        (true, Suit::Clubs) => "♣",
        (true, Suit::Spades) => "♠",
        (false, Suit::Hearts) => "h",
        (false, Suit::Diamonds) => "d",
        (false, Suit::Clubs) => "c",
        (false, Suit::Spades) => "s",
    }
}

pub fn format_rank(rank: &Rank) -> &'static str {
    match rank {
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "T",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
        Rank::Ace => "A",
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

/// `[A♠ K♥ Q♦]`, or `[]` for an empty board.
pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// `fold`, `call`, `bet 100`, `all-in`...
pub fn format_action(action: &Action) -> String {
    match action.kind {
        ActionKind::Fold => "fold".to_string(),
        ActionKind::Check => "check".to_string(),
        ActionKind::Call => "call".to_string(),
        ActionKind::Bet => format!("bet {}", action.amount),
        ActionKind::Raise => format!("raise {}", action.amount),
        ActionKind::AllIn => "all-in".to_string(),
    }
}

/// The prompt line listing what the acting player may do, with the chip
/// ranges for sized actions.
pub fn format_options(ctx: &DecisionContext<'_>) -> String {
    let stack = ctx.player.stack();
    let floor = ctx.to_call() + ctx.min_raise;
    let parts: Vec<String> = ctx
        .valid_actions
        .iter()
        .map(|kind| match kind {
            ActionKind::Fold => "fold".to_string(),
            ActionKind::Check => "check".to_string(),
            ActionKind::Call => format!("call {}", ctx.to_call().min(stack)),
            ActionKind::Bet => format!("bet {}-{}", floor.min(stack), stack),
            ActionKind::Raise => format!("raise {}-{}", floor.min(stack), stack),
            ActionKind::AllIn => format!("all-in {}", stack),
        })
        .collect();
    parts.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablestakes_engine::action::BettingRound;
    use tablestakes_engine::player::Player;

    #[test]
    fn ranks_use_single_characters() {
        assert_eq!(format_rank(&Rank::Two), "2");
        assert_eq!(format_rank(&Rank::Ten), "T");
        assert_eq!(format_rank(&Rank::Ace), "A");
    }

    #[test]
    fn suits_unicode_or_ascii() {
        let hearts = format_suit(&Suit::Hearts);
        assert!(hearts == "♥" || hearts == "h");
        let spades = format_suit(&Suit::Spades);
        assert!(spades == "♠" || spades == "s");
    }

    #[test]
    fn boards() {
        assert_eq!(format_board(&[]), "[]");
        let board = [
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::King, Suit::Hearts),
        ];
        let formatted = format_board(&board);
        assert!(formatted.starts_with("[A"));
        assert!(formatted.contains(" K"));
        assert!(formatted.ends_with(']'));
    }

    #[test]
    fn actions() {
        assert_eq!(format_action(&Action::fold(0)), "fold");
        assert_eq!(format_action(&Action::bet(0, 100)), "bet 100");
        assert_eq!(format_action(&Action::raise(1, 50)), "raise 50");
        assert_eq!(format_action(&Action::all_in(1)), "all-in");
    }

    #[test]
    fn options_show_ranges() {
        let player = Player::new(0, "hero", 500);
        let ctx = DecisionContext {
            player: &player,
            valid_actions: vec![ActionKind::Fold, ActionKind::Call, ActionKind::Raise],
            min_raise: 10,
            current_bet: 10,
            pot: 15,
            community: &[],
            round: BettingRound::Preflop,
        };
        assert_eq!(format_options(&ctx), "fold | call 10 | raise 20-500");
    }
}
