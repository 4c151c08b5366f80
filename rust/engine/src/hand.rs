use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::HighCard => "High Card",
            Category::OnePair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        };
        f.write_str(s)
    }
}

/// Ordinal hand value. Greater is stronger; equal values split the pot.
/// Field order matters: the derived `Ord` compares category first.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

/// Ranks a player's best hand from their hole cards and whatever community
/// cards have been dealt.
///
/// Implementations must impose a total order consistent across calls and must
/// accept 0..=5 community cards, using only the cards given.
pub trait HandEvaluator: fmt::Debug + Send + Sync {
    fn evaluate(&self, hole: &[Card; 2], community: &[Card]) -> HandStrength;
}

/// Count-based evaluator over up to seven cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEvaluator;

impl HandEvaluator for StandardEvaluator {
    fn evaluate(&self, hole: &[Card; 2], community: &[Card]) -> HandStrength {
        let mut cards = Vec::with_capacity(2 + community.len());
        cards.extend_from_slice(hole);
        cards.extend_from_slice(community);
        evaluate_hand(&cards)
    }
}

/// Evaluates the best five-card hand contained in `cards` (any length).
/// With fewer than five cards, straights and flushes are impossible and
/// missing kickers are zero.
pub fn evaluate_hand(cards: &[Card]) -> HandStrength {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut rank_mask: u16 = 0;
    let mut suit_counts = [0u8; 4];
    let mut by_suit_mask = [0u16; 4];
    for c in cards {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        rank_mask |= 1 << r;
        let s = suit_index(c.suit);
        suit_counts[s] += 1;
        by_suit_mask[s] |= 1 << r;
    }

    let flush_suit = suit_counts.iter().position(|&n| n >= 5);

    if let Some(s) = flush_suit {
        if let Some(high) = straight_high_from_mask(by_suit_mask[s]) {
            return strength(Category::StraightFlush, &[high]);
        }
    }

    let (quads, trips, pairs, singles) = group_ranks(&rank_counts);

    if let Some(&quad) = quads.first() {
        let kicker = highest_excluding(&rank_counts, &[quad]);
        return strength(Category::FourOfAKind, &[quad, kicker]);
    }

    if let Some(&trip) = trips.first() {
        // a second set of trips can fill the pair slot
        let pair = trips.get(1).copied().into_iter().chain(pairs.first().copied()).max();
        if let Some(pair) = pair {
            return strength(Category::FullHouse, &[trip, pair]);
        }
    }

    if let Some(s) = flush_suit {
        let ranks = ranks_desc_from_mask(by_suit_mask[s]);
        return strength(Category::Flush, &ranks[..5]);
    }

    if let Some(high) = straight_high_from_mask(rank_mask) {
        return strength(Category::Straight, &[high]);
    }

    if let Some(&trip) = trips.first() {
        let ranks = leading(&[trip], kickers_excluding(&rank_counts, &[trip], 2));
        return strength(Category::ThreeOfAKind, &ranks);
    }

    if pairs.len() >= 2 {
        let (high, low) = (pairs[0], pairs[1]);
        let ranks = leading(&[high, low], kickers_excluding(&rank_counts, &[high, low], 1));
        return strength(Category::TwoPair, &ranks);
    }

    if let Some(&pair) = pairs.first() {
        let ranks = leading(&[pair], kickers_excluding(&rank_counts, &[pair], 3));
        return strength(Category::OnePair, &ranks);
    }

    let highs: Vec<u8> = singles.into_iter().take(5).collect();
    strength(Category::HighCard, &highs)
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    a.cmp(b)
}

fn strength(category: Category, ranks: &[u8]) -> HandStrength {
    let mut kickers = [0u8; 5];
    for (slot, &r) in kickers.iter_mut().zip(ranks) {
        *slot = r;
    }
    HandStrength { category, kickers }
}

fn leading(made: &[u8], kickers: Vec<u8>) -> Vec<u8> {
    let mut ranks = made.to_vec();
    ranks.extend(kickers);
    ranks
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

/// Ranks grouped by multiplicity, each list high -> low.
fn group_ranks(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut quads = vec![];
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            4 => quads.push(r),
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    (quads, trips, pairs, singles)
}

fn highest_excluding(rank_counts: &[u8; 15], used: &[u8]) -> u8 {
    kickers_excluding(rank_counts, used, 1)
        .first()
        .copied()
        .unwrap_or(0)
}

/// Up to `n` highest ranks present, skipping the ranks already used.
fn kickers_excluding(rank_counts: &[u8; 15], used: &[u8], n: usize) -> Vec<u8> {
    (2..=14u8)
        .rev()
        .filter(|r| rank_counts[*r as usize] > 0 && !used.contains(r))
        .take(n)
        .collect()
}

fn ranks_desc_from_mask(mask: u16) -> Vec<u8> {
    (2..=14u8).rev().filter(|r| mask & (1 << *r) != 0).collect()
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    // Treat Ace as 14 and optionally as 1
    let mut m = mask;
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    // Sliding 5-bit window from Ace(14) down to 5
    for high in (5..=14u16).rev() {
        let window = 0b11111u16 << (high - 4);
        if (m & window) == window {
            return Some(high as u8);
        }
    }
    None
}
