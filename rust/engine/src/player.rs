use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Caller-assigned identifier, unique within a table.
pub type PlayerId = usize;

/// Role a seat plays in the current hand.
/// In heads-up play the button posts the small blind and keeps the `Button` label.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Button,
    SmallBlind,
    BigBlind,
    /// Any other funded seat
    Field,
    /// No chips; not dealt into the hand
    SittingOut,
}

/// Mutable per-seat state. Stacks persist across hands; everything else is
/// hand-scoped (`committed`, hole cards, flags) or street-scoped
/// (`current_bet`, `has_acted`).
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    stack: u32,
    hole: Option<[Card; 2]>,
    /// Chips committed on the current street
    current_bet: u32,
    /// Chips committed over the whole hand, antes included
    committed: u32,
    is_active: bool,
    is_all_in: bool,
    has_acted: bool,
    seat: usize,
    position: Position,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, stack: u32) -> Self {
        Self {
            id,
            name: name.into(),
            stack,
            hole: None,
            current_bet: 0,
            committed: 0,
            is_active: false,
            is_all_in: false,
            has_acted: false,
            seat: 0,
            position: Position::SittingOut,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.hole
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn committed(&self) -> u32 {
        self.committed
    }
    pub fn is_active(&self) -> bool {
        self.is_active
    }
    pub fn is_all_in(&self) -> bool {
        self.is_all_in
    }
    pub fn has_acted(&self) -> bool {
        self.has_acted
    }
    pub fn seat(&self) -> usize {
        self.seat
    }
    pub fn position(&self) -> Position {
        self.position
    }

    /// Still in the hand and holding chips to bet with.
    pub fn can_act(&self) -> bool {
        self.is_active && !self.is_all_in
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.stack >= amount
    }

    pub fn give_hole_cards(&mut self, cards: [Card; 2]) -> Result<(), GameError> {
        if self.hole.is_some() {
            return Err(GameError::HoleCardsAlreadyDealt { id: self.id });
        }
        self.hole = Some(cards);
        Ok(())
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    /// Moves up to `amount` chips from the stack into the street bet.
    /// Returns the chips actually moved; an emptied stack marks the player all-in.
    pub fn commit(&mut self, amount: u32) -> u32 {
        let moved = self.commit_dead(amount);
        self.current_bet += moved;
        moved
    }

    /// Like [`Player::commit`] but leaves the street bet untouched (antes).
    pub fn commit_dead(&mut self, amount: u32) -> u32 {
        let moved = amount.min(self.stack);
        self.stack -= moved;
        self.committed += moved;
        if self.stack == 0 && self.is_active {
            self.is_all_in = true;
        }
        moved
    }

    pub fn fold(&mut self) {
        self.is_active = false;
        self.has_acted = true;
    }

    pub fn mark_acted(&mut self) {
        self.has_acted = true;
    }

    /// Clears hand-scoped state. Only funded players are dealt back in.
    pub fn reset_for_new_hand(&mut self) {
        self.hole = None;
        self.current_bet = 0;
        self.committed = 0;
        self.is_active = self.stack > 0;
        self.is_all_in = false;
        self.has_acted = false;
        self.position = if self.is_active {
            Position::Field
        } else {
            Position::SittingOut
        };
    }

    pub fn reset_for_street(&mut self) {
        self.current_bet = 0;
        self.has_acted = false;
    }

    pub(crate) fn set_seat(&mut self, seat: usize) {
        self.seat = seat;
    }

    pub(crate) fn set_position(&mut self, pos: Position) {
        self.position = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seated(stack: u32) -> Player {
        let mut p = Player::new(7, "p7", stack);
        p.reset_for_new_hand();
        p
    }

    #[test]
    fn commit_clamps_to_stack_and_sets_all_in() {
        let mut p = seated(30);
        assert_eq!(p.commit(50), 30);
        assert_eq!(p.stack(), 0);
        assert_eq!(p.current_bet(), 30);
        assert_eq!(p.committed(), 30);
        assert!(p.is_all_in());
    }

    #[test]
    fn dead_money_counts_toward_hand_but_not_street() {
        let mut p = seated(100);
        p.commit_dead(5);
        assert_eq!(p.current_bet(), 0);
        assert_eq!(p.committed(), 5);
        assert_eq!(p.stack(), 95);
    }

    #[test]
    fn zero_stack_sits_out() {
        let p = seated(0);
        assert!(!p.is_active());
        assert_eq!(p.position(), Position::SittingOut);
    }

    #[test]
    fn second_deal_is_rejected() {
        use crate::cards::{Card, Rank, Suit};
        let mut p = seated(10);
        let cards = [
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::King, Suit::Spades),
        ];
        p.give_hole_cards(cards).unwrap();
        assert_eq!(
            p.give_hole_cards(cards),
            Err(GameError::HoleCardsAlreadyDealt { id: 7 })
        );
    }
}
