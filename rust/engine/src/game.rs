//! The per-table hand state machine.
//!
//! A [`GameState`] exclusively owns its players for the life of the table.
//! Pots and history refer to players by id only. Every transition is a pure
//! function of the current state: the next actor is found by a single scan
//! over the seats, and a street closes as soon as that scan finds nobody.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::action::{Action, ActionKind, BettingRound};
use crate::cards::Card;
use crate::config::TableConfig;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::{HandEvaluator, StandardEvaluator};
use crate::history::{BlindKind, EndReason, HandEvent, HistoryEntry, RevealedHand, SeatSnapshot};
use crate::player::{Player, PlayerId, Position};
use crate::pot::{Contribution, PotManager, SidePot};
use crate::provider::DecisionContext;
use crate::rules::{self, BettingContext, ValidatedAction};

/// Two hole cards per seat plus a five-card board must fit in one deck.
pub const MAX_SEATS: usize = 23;

#[derive(Debug)]
pub struct GameState {
    config: TableConfig,
    deck: Deck,
    /// Seating order; a player's seat is its index here
    players: Vec<Player>,
    community: Vec<Card>,
    /// Every chip committed this hand and not yet awarded
    pot: u32,
    current_bet: u32,
    min_raise: u32,
    button: usize,
    /// Seat to act; `None` between hands and once the hand is over
    current: Option<usize>,
    round: BettingRound,
    hand_over: bool,
    hand_number: u64,
    history: Vec<HistoryEntry>,
    evaluator: Box<dyn HandEvaluator>,
}

impl GameState {
    pub fn new(players: Vec<Player>, config: TableConfig) -> Result<Self, GameError> {
        Self::with_evaluator(players, config, Box::new(StandardEvaluator))
    }

    /// Seats `players` in the given order.
    ///
    /// # Errors
    ///
    /// Setup errors: fewer than 2 or more than [`MAX_SEATS`] players, a
    /// repeated id, or blinds/ante rejected by [`TableConfig::validate`].
    pub fn with_evaluator(
        mut players: Vec<Player>,
        config: TableConfig,
        evaluator: Box<dyn HandEvaluator>,
    ) -> Result<Self, GameError> {
        let count = players.len();
        if count < 2 {
            return Err(GameError::NotEnoughPlayers { count });
        }
        if count > MAX_SEATS {
            return Err(GameError::TooManyPlayers {
                count,
                max: MAX_SEATS,
            });
        }
        let mut seen = HashSet::with_capacity(count);
        for p in &players {
            if !seen.insert(p.id()) {
                return Err(GameError::DuplicatePlayer { id: p.id() });
            }
        }
        config.validate()?;

        for (seat, p) in players.iter_mut().enumerate() {
            p.set_seat(seat);
        }
        let deck = match config.seed {
            Some(seed) => Deck::new_with_seed(seed),
            None => Deck::new(),
        };

        Ok(Self {
            config,
            deck,
            players,
            community: Vec::with_capacity(5),
            pot: 0,
            current_bet: 0,
            min_raise: config.big_blind,
            button: 0,
            current: None,
            round: BettingRound::Preflop,
            hand_over: false,
            hand_number: 0,
            history: Vec::new(),
            evaluator,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }
    pub fn community_cards(&self) -> &[Card] {
        &self.community
    }
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn min_raise(&self) -> u32 {
        self.min_raise
    }
    /// Seat index of the dealer button.
    pub fn button(&self) -> usize {
        self.button
    }
    pub fn betting_round(&self) -> BettingRound {
        self.round
    }
    pub fn is_hand_over(&self) -> bool {
        self.hand_over
    }
    /// Hands started at this table, including the current one.
    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.current.map(|seat| &self.players[seat])
    }

    /// A started hand that has not reached its end.
    pub fn hand_in_progress(&self) -> bool {
        self.hand_number > 0 && !self.hand_over
    }

    /// Chips on the table: every stack plus the undistributed pot.
    pub fn total_chips(&self) -> u32 {
        self.players.iter().map(Player::stack).sum::<u32>() + self.pot
    }

    /// Main and side pots implied by the commitments so far. Always a
    /// partition of [`GameState::pot`].
    pub fn side_pots(&self) -> Vec<SidePot> {
        PotManager::from_contributions(&self.contributions())
            .pots()
            .to_vec()
    }

    pub fn betting_context(&self, player: &Player) -> BettingContext {
        BettingContext {
            current_bet: self.current_bet,
            player_bet: player.current_bet(),
            stack: player.stack(),
            min_raise: self.min_raise,
        }
    }

    /// Legal kinds for `player`; empty for anyone folded or all-in.
    pub fn get_valid_actions(&self, player: &Player) -> Vec<ActionKind> {
        if !player.can_act() {
            return Vec::new();
        }
        self.betting_context(player).valid_actions()
    }

    /// What the player to act is shown, or `None` when nobody is to act.
    pub fn decision_context(&self) -> Option<DecisionContext<'_>> {
        let player = self.current_player()?;
        Some(DecisionContext {
            player,
            valid_actions: self.get_valid_actions(player),
            min_raise: self.min_raise,
            current_bet: self.current_bet,
            pot: self.pot,
            community: &self.community,
            round: self.round,
        })
    }

    /// Shuffles, moves the button, deals hole cards and posts forced bets.
    ///
    /// Players with an empty stack sit the hand out. Anyone who started the
    /// hand with less than the big blind is put all-in while forced bets
    /// are posted. If no one is left to act after that, the board is run
    /// out and the hand is settled before this returns.
    ///
    /// # Errors
    ///
    /// [`GameError::HandInProgress`] or [`GameError::NotEnoughFundedPlayers`],
    /// both raised before anything changes.
    pub fn start_new_hand(&mut self) -> Result<(), GameError> {
        if self.hand_in_progress() {
            return Err(GameError::HandInProgress);
        }
        let funded = self.players.iter().filter(|p| p.stack() > 0).count();
        if funded < 2 {
            return Err(GameError::NotEnoughFundedPlayers { funded });
        }

        self.hand_number += 1;
        self.deck.reset(true);
        self.community.clear();
        self.pot = 0;
        self.current_bet = 0;
        self.min_raise = self.config.big_blind;
        self.current = None;
        self.round = BettingRound::Preflop;
        self.hand_over = false;
        self.history.clear();
        for p in &mut self.players {
            p.reset_for_new_hand();
        }

        self.button = if self.hand_number == 1 && self.players[0].is_active() {
            0
        } else if self.hand_number == 1 {
            self.next_funded(0)
        } else {
            self.next_funded(self.button)
        };
        // heads-up the button posts the small blind
        let (sb, bb) = if funded == 2 {
            (self.button, self.next_funded(self.button))
        } else {
            let sb = self.next_funded(self.button);
            (sb, self.next_funded(sb))
        };
        self.players[self.button].set_position(Position::Button);
        if sb != self.button {
            self.players[sb].set_position(Position::SmallBlind);
        }
        self.players[bb].set_position(Position::BigBlind);

        let n = self.players.len();
        for seat in seats_after(self.button, n) {
            if !self.players[seat].is_active() {
                continue;
            }
            let cards = self.deck.deal(2)?;
            self.players[seat].give_hole_cards([cards[0], cards[1]])?;
        }

        let start_stacks: Vec<u32> = self.players.iter().map(Player::stack).collect();
        let seats = self
            .players
            .iter()
            .map(|p| SeatSnapshot {
                player_id: p.id(),
                seat: p.seat(),
                stack: p.stack(),
                hole_cards: p.hole_cards(),
            })
            .collect();
        info!(
            hand = self.hand_number,
            button = self.button,
            players = funded,
            "hand started"
        );
        self.record(HandEvent::HandStart {
            hand_number: self.hand_number,
            button: self.button,
            players: seats,
        });

        if self.config.ante > 0 {
            for seat in seats_after(self.button, n) {
                if self.players[seat].is_active() {
                    let moved = self.players[seat].commit_dead(self.config.ante);
                    self.post(seat, BlindKind::Ante, moved);
                }
            }
        }
        let moved = self.players[sb].commit(self.config.small_blind);
        self.post(sb, BlindKind::SmallBlind, moved);
        let moved = self.players[bb].commit(self.config.big_blind);
        self.post(bb, BlindKind::BigBlind, moved);

        for seat in seats_after(self.button, n) {
            let p = &self.players[seat];
            if p.can_act() && start_stacks[seat] < self.config.big_blind {
                let stack = p.stack();
                warn!(
                    hand = self.hand_number,
                    player = p.id(),
                    stack,
                    "short stack forced all-in"
                );
                let moved = self.players[seat].commit(stack);
                self.post(seat, BlindKind::ForcedAllIn, moved);
            }
        }

        self.current_bet = self
            .players
            .iter()
            .map(Player::current_bet)
            .max()
            .unwrap_or(0);
        self.current = self.next_actor_from(bb);
        if self.current.is_none() {
            return self.close_street();
        }
        Ok(())
    }

    /// Applies one decision from the player to act.
    ///
    /// Every check runs before any state changes, so a rejected action
    /// leaves the table exactly as it was.
    ///
    /// # Errors
    ///
    /// [`GameError::NoHandInProgress`], [`GameError::HandAlreadyComplete`],
    /// [`GameError::UnknownPlayer`], [`GameError::PlayerAlreadyFolded`],
    /// [`GameError::NotPlayersTurn`] or [`GameError::IllegalAction`].
    pub fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        if self.hand_number == 0 {
            return Err(GameError::NoHandInProgress);
        }
        if self.hand_over {
            return Err(GameError::HandAlreadyComplete);
        }
        let id = action.player_id;
        let seat = self.seat_of(id).ok_or(GameError::UnknownPlayer { id })?;
        if !self.players[seat].is_active() {
            return Err(GameError::PlayerAlreadyFolded { id });
        }
        let expected = self.current.ok_or(GameError::HandAlreadyComplete)?;
        if seat != expected {
            return Err(GameError::NotPlayersTurn {
                expected: self.players[expected].id(),
                actual: id,
            });
        }
        let resolved = rules::validate_action(&self.betting_context(&self.players[seat]), &action)?;

        let moved = match resolved {
            ValidatedAction::Fold => {
                self.players[seat].fold();
                0
            }
            ValidatedAction::Check => {
                self.players[seat].mark_acted();
                0
            }
            _ => {
                let player = &mut self.players[seat];
                let moved = player.commit(resolved.chips());
                player.mark_acted();
                let bet = player.current_bet();
                self.pot += moved;
                if bet > self.current_bet {
                    self.min_raise = self.min_raise.max(bet - self.current_bet);
                    self.current_bet = bet;
                }
                moved
            }
        };
        debug!(
            hand = self.hand_number,
            player = id,
            kind = %resolved.kind(),
            amount = moved,
            pot = self.pot,
            street = %self.round,
            "action applied"
        );
        self.record(HandEvent::PlayerAction {
            player_id: id,
            action: resolved.kind(),
            amount: moved,
        });

        if resolved == ValidatedAction::Fold && self.active_count() == 1 {
            self.finish_uncontested();
            return Ok(());
        }
        match self.next_actor_from(seat) {
            Some(next) => {
                self.current = Some(next);
                Ok(())
            }
            None => self.close_street(),
        }
    }

    fn finish_uncontested(&mut self) {
        let Some(seat) = self.players.iter().position(Player::is_active) else {
            return;
        };
        let amount = self.pot;
        self.pot = 0;
        self.players[seat].add_chips(amount);
        self.current = None;
        self.hand_over = true;
        let winner = self.players[seat].id();
        info!(
            hand = self.hand_number,
            winner,
            amount,
            "hand won uncontested"
        );
        self.record(HandEvent::HandEnd {
            winners: vec![winner],
            amount,
            reason: EndReason::AllOthersFolded,
        });
    }

    /// Ends the street and deals the next one. With fewer than two players
    /// able to bet, keeps dealing until the river and settles at showdown.
    fn close_street(&mut self) -> Result<(), GameError> {
        loop {
            for p in &mut self.players {
                p.reset_for_street();
            }
            self.current_bet = 0;
            self.current = None;

            let Some(next) = self.round.successor() else {
                return self.showdown();
            };
            self.round = next;
            let cards = self.deck.deal(next.cards_dealt_on_entry())?;
            self.community.extend_from_slice(&cards);
            debug!(
                hand = self.hand_number,
                street = %next,
                cards = ?cards,
                "street dealt"
            );
            self.record(HandEvent::DealCommunity { cards });

            if self.able_count() >= 2 {
                self.current = self.next_actor_from(self.button);
                if self.current.is_some() {
                    return Ok(());
                }
            }
        }
    }

    fn showdown(&mut self) -> Result<(), GameError> {
        self.round = BettingRound::Showdown;
        self.current = None;

        let pots = PotManager::from_contributions(&self.contributions());
        let mut rankings = HashMap::new();
        let mut hands = Vec::new();
        for p in self.players.iter().filter(|p| p.is_active()) {
            if let Some(hole) = p.hole_cards() {
                let strength = self.evaluator.evaluate(&hole, &self.community);
                rankings.insert(p.id(), strength);
                hands.push(RevealedHand {
                    player_id: p.id(),
                    hole_cards: hole,
                    category: strength.category,
                });
            }
        }
        let payout_order: Vec<PlayerId> = seats_after(self.button, self.players.len())
            .map(|seat| self.players[seat].id())
            .collect();
        let awards = pots.distribute(&rankings, &payout_order);

        let mut winners = Vec::new();
        let mut total = 0u32;
        for award in &awards {
            for &(id, chips) in &award.shares {
                if let Some(seat) = self.seat_of(id) {
                    self.players[seat].add_chips(chips);
                }
                total += chips;
                if chips > 0 && !winners.contains(&id) {
                    winners.push(id);
                }
            }
            debug!(
                hand = self.hand_number,
                amount = award.amount,
                shares = ?award.shares,
                "pot awarded"
            );
        }
        self.pot = self.pot.saturating_sub(total);
        self.hand_over = true;

        self.record(HandEvent::Showdown {
            community_cards: self.community.clone(),
            hands,
            pots: awards,
        });
        info!(
            hand = self.hand_number,
            winners = ?winners,
            amount = total,
            "hand settled at showdown"
        );
        self.record(HandEvent::HandEnd {
            winners,
            amount: total,
            reason: EndReason::Showdown,
        });
        Ok(())
    }

    /// First seat after `from` that still has to act this street: able to
    /// bet and either owing chips or yet to act while someone else can
    /// still respond.
    fn next_actor_from(&self, from: usize) -> Option<usize> {
        let able = self.able_count();
        seats_after(from, self.players.len()).find(|&seat| {
            let p = &self.players[seat];
            p.can_act() && (p.current_bet() < self.current_bet || (!p.has_acted() && able >= 2))
        })
    }

    fn next_funded(&self, from: usize) -> usize {
        seats_after(from, self.players.len())
            .find(|&seat| self.players[seat].is_active())
            .unwrap_or(from)
    }

    fn post(&mut self, seat: usize, kind: BlindKind, amount: u32) {
        if amount == 0 {
            return;
        }
        self.pot += amount;
        let player_id = self.players[seat].id();
        debug!(hand = self.hand_number, player = player_id, ?kind, amount, "forced bet posted");
        self.record(HandEvent::PostBlind {
            player_id,
            kind,
            amount,
        });
    }

    fn record(&mut self, event: HandEvent) {
        let entry = HistoryEntry {
            seq: self.history.len() as u32,
            street: self.round,
            pot: self.pot,
            event,
        };
        self.history.push(entry);
    }

    fn contributions(&self) -> Vec<Contribution> {
        self.players
            .iter()
            .filter(|p| p.committed() > 0)
            .map(|p| Contribution {
                player: p.id(),
                committed: p.committed(),
                live: p.is_active(),
            })
            .collect()
    }

    fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }

    fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    fn able_count(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }
}

/// Seats in table order starting just after `from`, ending with `from`.
fn seats_after(from: usize, n: usize) -> impl Iterator<Item = usize> {
    (1..=n).map(move |offset| (from + offset) % n)
}
