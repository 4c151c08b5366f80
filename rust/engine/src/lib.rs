//! # tablestakes-engine: No-Limit Hold'em Table Engine
//!
//! A multi-seat Texas Hold'em hand engine: legal-action derivation, turn
//! order, street transitions, side pots and showdown, with an append-only
//! hand history that replays to the same chip counts.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and text notation
//! - [`deck`] - Seedable 52-card deck with ChaCha20 shuffling
//! - [`action`] - Action kinds, actions and betting rounds
//! - [`player`] - Per-seat stack and hand state
//! - [`rules`] - Legal-action table and action resolution
//! - [`hand`] - Hand evaluation behind the [`hand::HandEvaluator`] trait
//! - [`pot`] - Side-pot construction and award distribution
//! - [`game`] - The [`game::GameState`] hand state machine
//! - [`provider`] - Decision providers (passive, scripted, random)
//! - [`engine`] - Hand and session driver over providers
//! - [`history`] - Structured hand-history events
//! - [`replay`] - Rebuilding and auditing a hand from its history
//! - [`logger`] - JSONL hand records
//! - [`config`] - Blinds, ante and seed
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use tablestakes_engine::action::{Action, BettingRound};
//! use tablestakes_engine::config::TableConfig;
//! use tablestakes_engine::game::GameState;
//! use tablestakes_engine::player::Player;
//!
//! let players = vec![Player::new(0, "alice", 500), Player::new(1, "bob", 500)];
//! let mut game = GameState::new(players, TableConfig::with_blinds(5, 10).seed(7)).unwrap();
//! game.start_new_hand().unwrap();
//!
//! // heads-up: the button posted the small blind and acts first
//! game.apply_action(Action::fold(0)).unwrap();
//! assert!(game.is_hand_over());
//! assert_eq!(game.player(1).unwrap().stack(), 505);
//! assert_eq!(game.betting_round(), BettingRound::Preflop);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! Seeded tables deal identical cards:
//!
//! ```rust
//! use tablestakes_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! a.reset(true);
//! b.reset(true);
//! assert_eq!(a.deal(5).unwrap(), b.deal(5).unwrap());
//! ```

pub mod action;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod history;
pub mod logger;
pub mod player;
pub mod pot;
pub mod provider;
pub mod replay;
pub mod rules;
