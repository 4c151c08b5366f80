//! Side-pot construction and showdown distribution.
//!
//! Pots are built from each player's total commitment for the hand. Live
//! (non-folded) commitments define the tier levels; every player's chips,
//! folded ones included, are sliced into the tiers they reached. Only live
//! players committed at or above a tier's level are eligible to win it.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::hand::HandStrength;
use crate::player::PlayerId;

/// One player's stake in the hand, as seen at showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub player: PlayerId,
    /// Total chips committed this hand
    pub committed: u32,
    /// Still contesting the pot (not folded)
    pub live: bool,
}

impl Contribution {
    pub fn live(player: PlayerId, committed: u32) -> Self {
        Self {
            player,
            committed,
            live: true,
        }
    }

    pub fn folded(player: PlayerId, committed: u32) -> Self {
        Self {
            player,
            committed,
            live: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidePot {
    pub amount: u32,
    pub eligible: BTreeSet<PlayerId>,
}

/// What one pot tier paid and to whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotAward {
    pub amount: u32,
    pub eligible: BTreeSet<PlayerId>,
    /// (player, chips) in payout order; odd chips go to the earliest entries
    pub shares: Vec<(PlayerId, u32)>,
}

/// The main pot followed by side pots, in ascending commitment level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PotManager {
    pots: Vec<SidePot>,
}

impl PotManager {
    /// Builds tiered pots from per-player hand commitments.
    ///
    /// The tiers always sum to the total committed.
    ///
    /// ```
    /// use tablestakes_engine::pot::{Contribution, PotManager};
    ///
    /// let pm = PotManager::from_contributions(&[
    ///     Contribution::live(0, 100),
    ///     Contribution::live(1, 50),
    ///     Contribution::live(2, 1000),
    /// ]);
    /// let amounts: Vec<u32> = pm.pots().iter().map(|p| p.amount).collect();
    /// assert_eq!(amounts, vec![150, 100, 900]);
    /// assert_eq!(pm.total(), 1150);
    /// ```
    pub fn from_contributions(contributions: &[Contribution]) -> Self {
        let mut levels: Vec<u32> = contributions
            .iter()
            .filter(|c| c.live && c.committed > 0)
            .map(|c| c.committed)
            .collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots: Vec<SidePot> = Vec::with_capacity(levels.len());
        let mut prev = 0u32;
        for &level in &levels {
            let amount: u32 = contributions
                .iter()
                .map(|c| c.committed.min(level) - c.committed.min(prev))
                .sum();
            let eligible = contributions
                .iter()
                .filter(|c| c.live && c.committed >= level)
                .map(|c| c.player)
                .collect();
            pots.push(SidePot { amount, eligible });
            prev = level;
        }

        // dead money above the highest live level joins the top tier
        let overflow: u32 = contributions
            .iter()
            .map(|c| c.committed.saturating_sub(prev))
            .sum();
        if overflow > 0 {
            match pots.last_mut() {
                Some(top) => top.amount += overflow,
                None => pots.push(SidePot {
                    amount: overflow,
                    eligible: BTreeSet::new(),
                }),
            }
        }

        Self { pots }
    }

    pub fn pots(&self) -> &[SidePot] {
        &self.pots
    }

    pub fn main_pot(&self) -> u32 {
        self.pots.first().map(|p| p.amount).unwrap_or(0)
    }

    pub fn side_pots(&self) -> &[SidePot] {
        self.pots.get(1..).unwrap_or(&[])
    }

    pub fn total(&self) -> u32 {
        self.pots.iter().map(|p| p.amount).sum()
    }

    /// Awards every tier independently to its best-ranked eligible players.
    ///
    /// `payout_order` lists player ids starting from the first seat left of
    /// the button; ties split evenly and the remainder is handed out one chip
    /// at a time in that order. Eligible players missing from `rankings`
    /// cannot win. A tier nobody can win goes to the best live hand overall.
    pub fn distribute(
        &self,
        rankings: &HashMap<PlayerId, HandStrength>,
        payout_order: &[PlayerId],
    ) -> Vec<PotAward> {
        let order_of = |id: &PlayerId| {
            payout_order
                .iter()
                .position(|p| p == id)
                .unwrap_or(usize::MAX)
        };

        self.pots
            .iter()
            .map(|pot| {
                let mut contenders: Vec<PlayerId> = pot
                    .eligible
                    .iter()
                    .copied()
                    .filter(|id| rankings.contains_key(id))
                    .collect();
                if contenders.is_empty() {
                    contenders = rankings.keys().copied().collect();
                }
                let best = contenders.iter().filter_map(|id| rankings.get(id)).max();
                let mut winners: Vec<PlayerId> = contenders
                    .iter()
                    .copied()
                    .filter(|id| rankings.get(id) == best)
                    .collect();
                winners.sort_by_key(|id| order_of(id));

                PotAward {
                    amount: pot.amount,
                    eligible: pot.eligible.clone(),
                    shares: split_evenly(pot.amount, &winners),
                }
            })
            .collect()
    }
}

/// Splits `amount` across `winners`; the first `amount % n` winners get one extra chip.
pub fn split_evenly(amount: u32, winners: &[PlayerId]) -> Vec<(PlayerId, u32)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let n = winners.len() as u32;
    let share = amount / n;
    let remainder = (amount % n) as usize;
    winners
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, share + u32::from(i < remainder)))
        .collect()
}
