use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// A 52-card deck split into a dealt prefix and an undealt remainder.
///
/// The dealt cards and the remaining cards always partition the full
/// 52-card universe: dealing only moves the boundary between them.
///
/// # Examples
///
/// ```
/// use tablestakes_engine::deck::Deck;
///
/// let mut deck = Deck::new_with_seed(42);
/// deck.reset(true);
/// let flop = deck.deal(3).expect("fresh deck has 52 cards");
/// assert_eq!(flop.len(), 3);
/// assert_eq!(deck.remaining(), 49);
/// assert_eq!(deck.dealt(), &flop[..]);
/// ```
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    /// Creates an unshuffled deck whose shuffles are driven by `seed`.
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    /// Creates a deck seeded from the thread-local RNG.
    pub fn new() -> Self {
        Self::new_with_seed(rand::random())
    }

    /// Shuffles the undealt cards in place. Cards already dealt stay dealt.
    pub fn shuffle(&mut self) {
        let position = self.position;
        self.cards[position..].shuffle(&mut self.rng);
    }

    /// Reinitializes to the full 52-card universe, optionally shuffled.
    pub fn reset(&mut self, shuffled: bool) {
        self.cards = full_deck();
        self.position = 0;
        if shuffled {
            self.shuffle();
        }
    }

    /// Removes `n` cards from the front of the remaining sequence.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(GameError::EmptyDeck {
                requested: n,
                remaining,
            });
        }
        let dealt = self.cards[self.position..self.position + n].to_vec();
        self.position += n;
        Ok(dealt)
    }

    pub fn deal_card(&mut self) -> Result<Card, GameError> {
        let mut one = self.deal(1)?;
        Ok(one.remove(0))
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    /// Cards dealt since the last reset, in dealing order.
    pub fn dealt(&self) -> &[Card] {
        &self.cards[..self.position]
    }

    /// Cards not yet dealt, in the order they will come off the deck.
    pub fn undealt(&self) -> &[Card] {
        &self.cards[self.position..]
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
