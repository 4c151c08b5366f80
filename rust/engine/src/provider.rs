//! Decision providers: whoever, or whatever, chooses a seat's next action.
//!
//! The engine only ever talks to [`DecisionProvider`]. A provider must
//! answer with a kind from `valid_actions`. Its amount is only a request:
//! a BET or RAISE below the minimum is lifted to the minimum, and any
//! amount that reaches the stack is played as an all-in.

use std::collections::VecDeque;

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::action::{Action, ActionKind, BettingRound};
use crate::cards::Card;
use crate::player::Player;

/// Everything a provider is shown when asked to act.
#[derive(Debug, Clone)]
pub struct DecisionContext<'a> {
    pub player: &'a Player,
    pub valid_actions: Vec<ActionKind>,
    pub min_raise: u32,
    pub current_bet: u32,
    pub pot: u32,
    pub community: &'a [Card],
    pub round: BettingRound,
}

impl DecisionContext<'_> {
    pub fn to_call(&self) -> u32 {
        self.current_bet.saturating_sub(self.player.current_bet())
    }

    pub fn allows(&self, kind: ActionKind) -> bool {
        self.valid_actions.contains(&kind)
    }
}

pub trait DecisionProvider: Send {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> Action;

    fn name(&self) -> &str;
}

/// Never folds when it can check, never raises: check, else call, else shove.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassiveProvider;

impl DecisionProvider for PassiveProvider {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> Action {
        let id = ctx.player.id();
        [ActionKind::Check, ActionKind::Call, ActionKind::AllIn]
            .into_iter()
            .find(|k| ctx.allows(*k))
            .map(|k| Action::new(k, 0, id))
            .unwrap_or_else(|| Action::fold(id))
    }

    fn name(&self) -> &str {
        "passive"
    }
}

/// Plays queued actions in order, then falls back to [`PassiveProvider`].
///
/// Queued actions are replayed verbatim; the player id is rewritten to the
/// seat being asked.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider {
    script: VecDeque<Action>,
    fallback: PassiveProvider,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = Action>) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback: PassiveProvider,
        }
    }

    pub fn push(&mut self, action: Action) {
        self.script.push_back(action);
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl DecisionProvider for ScriptedProvider {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> Action {
        match self.script.pop_front() {
            Some(mut action) => {
                action.player_id = ctx.player.id();
                action
            }
            None => self.fallback.decide(ctx),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Uniform over the offered kinds, with a random size for BET and RAISE.
#[derive(Debug, Clone)]
pub struct RandomProvider {
    rng: ChaCha20Rng,
}

impl RandomProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl DecisionProvider for RandomProvider {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> Action {
        let id = ctx.player.id();
        let Some(&kind) = ctx.valid_actions.choose(&mut self.rng) else {
            return Action::fold(id);
        };
        let amount = match kind {
            ActionKind::Bet | ActionKind::Raise => {
                let floor = ctx.to_call() + ctx.min_raise;
                // anything at or past the stack becomes an all-in
                let ceiling = ctx.player.stack().max(floor);
                self.rng.random_range(floor..=ceiling)
            }
            _ => 0,
        };
        Action::new(kind, amount, id)
    }

    fn name(&self) -> &str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(player: &'a Player, valid: Vec<ActionKind>) -> DecisionContext<'a> {
        DecisionContext {
            player,
            valid_actions: valid,
            min_raise: 10,
            current_bet: 10,
            pot: 15,
            community: &[],
            round: BettingRound::Preflop,
        }
    }

    #[test]
    fn passive_prefers_check_then_call() {
        let p = Player::new(3, "p3", 100);
        let mut prov = PassiveProvider;
        let a = prov.decide(&ctx(&p, vec![ActionKind::Check, ActionKind::Raise]));
        assert_eq!(a, Action::check(3));
        let a = prov.decide(&ctx(&p, vec![ActionKind::Fold, ActionKind::Call, ActionKind::Raise]));
        assert_eq!(a, Action::call(3));
        let a = prov.decide(&ctx(&p, vec![ActionKind::Fold, ActionKind::AllIn]));
        assert_eq!(a, Action::all_in(3));
    }

    #[test]
    fn scripted_replays_then_falls_back() {
        let p = Player::new(1, "p1", 100);
        let mut prov = ScriptedProvider::new([Action::raise(99, 40)]);
        let valid = vec![ActionKind::Fold, ActionKind::Call, ActionKind::Raise];
        assert_eq!(prov.decide(&ctx(&p, valid.clone())), Action::raise(1, 40));
        assert_eq!(prov.remaining(), 0);
        assert_eq!(prov.decide(&ctx(&p, valid)), Action::call(1));
    }

    #[test]
    fn random_only_picks_offered_kinds() {
        let p = Player::new(2, "p2", 500);
        let valid = vec![ActionKind::Fold, ActionKind::Call, ActionKind::Raise];
        let mut prov = RandomProvider::new(7);
        for _ in 0..200 {
            let a = prov.decide(&ctx(&p, valid.clone()));
            assert!(valid.contains(&a.kind));
            if a.kind == ActionKind::Raise {
                assert!(a.amount >= 20 && a.amount <= 500);
            }
        }
    }
}
