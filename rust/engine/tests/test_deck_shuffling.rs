use std::collections::HashSet;

use tablestakes_engine::cards::{full_deck, Card};
use tablestakes_engine::deck::Deck;
use tablestakes_engine::errors::GameError;

#[test]
fn deck_reset_has_52_unique_cards() {
    let mut deck = Deck::new_with_seed(42);
    deck.reset(true);
    let mut set = HashSet::new();
    for i in 0..52 {
        let c = deck.deal_card().expect("should have 52 cards");
        assert!(set.insert(c), "card {} duplicated at position {}", c, i);
    }
    assert_eq!(
        deck.deal_card(),
        Err(GameError::EmptyDeck {
            requested: 1,
            remaining: 0
        })
    );
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    d1.reset(true);
    d2.reset(true);
    assert_eq!(d1.deal(10).unwrap(), d2.deal(10).unwrap());
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    d1.reset(true);
    d2.reset(true);
    assert_ne!(
        d1.deal(10).unwrap(),
        d2.deal(10).unwrap(),
        "different seeds should produce different orders"
    );
}

#[test]
fn overdraw_fails_without_dealing() {
    let mut deck = Deck::new_with_seed(9);
    deck.reset(true);
    deck.deal(50).unwrap();
    assert_eq!(
        deck.deal(3),
        Err(GameError::EmptyDeck {
            requested: 3,
            remaining: 2
        })
    );
    assert_eq!(deck.remaining(), 2);
    assert_eq!(deck.dealt().len(), 50);
}

#[test]
fn dealt_and_undealt_partition_the_universe() {
    let mut deck = Deck::new_with_seed(77);
    deck.reset(true);
    deck.deal(17).unwrap();
    let mut seen: Vec<Card> = deck.dealt().iter().chain(deck.undealt()).copied().collect();
    seen.sort();
    let mut universe = full_deck();
    universe.sort();
    assert_eq!(seen, universe);
}

#[test]
fn reset_restores_full_deck() {
    let mut deck = Deck::new_with_seed(3);
    deck.reset(true);
    deck.deal(30).unwrap();
    deck.reset(false);
    assert_eq!(deck.remaining(), 52);
    assert!(deck.dealt().is_empty());
    assert_eq!(deck.undealt(), &full_deck()[..]);
}
