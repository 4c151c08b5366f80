//! Parsing of the human player's typed commands in `play`.

use tablestakes_engine::action::Action;
use tablestakes_engine::player::PlayerId;

#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Action(Action),
    /// `q` or `quit`
    Quit,
    Invalid(String),
}

/// Parses one line of input into an action for `player_id`.
///
/// Case-insensitive: `f`/`fold`, `c`/`check`, `call`, `allin`/`all-in`,
/// `bet N`, `raise N`, `q`/`quit`. Whether the action is legal right now is
/// the engine's call, not the parser's.
///
/// ```rust
/// use tablestakes_cli::validation::{parse_player_action, ParseResult};
/// use tablestakes_engine::action::Action;
///
/// assert_eq!(parse_player_action("fold", 0), ParseResult::Action(Action::fold(0)));
/// assert_eq!(parse_player_action("BET 100", 2), ParseResult::Action(Action::bet(2, 100)));
/// assert_eq!(parse_player_action("q", 0), ParseResult::Quit);
/// assert!(matches!(parse_player_action("dance", 0), ParseResult::Invalid(_)));
/// ```
pub fn parse_player_action(input: &str, player_id: PlayerId) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&verb) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    match verb {
        "q" | "quit" => ParseResult::Quit,
        "fold" | "f" => ParseResult::Action(Action::fold(player_id)),
        "check" | "c" => ParseResult::Action(Action::check(player_id)),
        "call" => ParseResult::Action(Action::call(player_id)),
        "allin" | "all-in" => ParseResult::Action(Action::all_in(player_id)),
        "bet" | "raise" => {
            let Some(raw) = parts.get(1) else {
                return ParseResult::Invalid(format!(
                    "{verb} requires an amount (e.g., '{verb} 100')"
                ));
            };
            match raw.parse::<u32>() {
                Ok(0) => ParseResult::Invalid(format!("{verb} amount must be positive")),
                Ok(amount) if verb == "bet" => ParseResult::Action(Action::bet(player_id, amount)),
                Ok(amount) => ParseResult::Action(Action::raise(player_id, amount)),
                Err(_) => ParseResult::Invalid(format!("Invalid {verb} amount '{raw}'")),
            }
        }
        other => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: fold, check, call, bet <amount>, raise <amount>, allin, q",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_forms() {
        assert_eq!(parse_player_action("f", 3), ParseResult::Action(Action::fold(3)));
        assert_eq!(parse_player_action("c", 3), ParseResult::Action(Action::check(3)));
        assert_eq!(parse_player_action("  CALL ", 3), ParseResult::Action(Action::call(3)));
        assert_eq!(
            parse_player_action("all-in", 3),
            ParseResult::Action(Action::all_in(3))
        );
        assert_eq!(parse_player_action("quit", 3), ParseResult::Quit);
    }

    #[test]
    fn sized_actions() {
        assert_eq!(
            parse_player_action("raise 60", 1),
            ParseResult::Action(Action::raise(1, 60))
        );
        match parse_player_action("bet", 1) {
            ParseResult::Invalid(msg) => assert!(msg.contains("requires an amount")),
            other => panic!("expected Invalid, got {other:?}"),
        }
        match parse_player_action("raise 0", 1) {
            ParseResult::Invalid(msg) => assert!(msg.contains("positive")),
            other => panic!("expected Invalid, got {other:?}"),
        }
        match parse_player_action("bet lots", 1) {
            ParseResult::Invalid(msg) => assert!(msg.contains("'lots'")),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn empty_and_unknown() {
        assert_eq!(
            parse_player_action("   ", 0),
            ParseResult::Invalid("Empty input".to_string())
        );
        match parse_player_action("shove", 0) {
            ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized action 'shove'")),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }
}
