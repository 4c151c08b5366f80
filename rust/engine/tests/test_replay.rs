use std::collections::BTreeMap;

use tablestakes_engine::action::Action;
use tablestakes_engine::config::TableConfig;
use tablestakes_engine::engine::Engine;
use tablestakes_engine::game::GameState;
use tablestakes_engine::history::{EndReason, HandEvent, HistoryEntry};
use tablestakes_engine::player::{Player, PlayerId};
use tablestakes_engine::provider::{DecisionProvider, PassiveProvider, RandomProvider, ScriptedProvider};
use tablestakes_engine::replay::{replay, ReplayError};

fn engine(seed: u64, stacks: &[u32]) -> Engine {
    let players = stacks
        .iter()
        .enumerate()
        .map(|(i, &s)| Player::new(i, format!("p{i}"), s))
        .collect();
    let gs = GameState::new(players, TableConfig::with_blinds(5, 10).ante(1).seed(seed)).unwrap();
    let providers: Vec<Box<dyn DecisionProvider>> = (0..stacks.len())
        .map(|i| Box::new(RandomProvider::new(seed + i as u64)) as Box<dyn DecisionProvider>)
        .collect();
    Engine::new(gs, providers).unwrap()
}

/// Heads-up, no ante, both players check the hand down to showdown.
fn check_down(seed: u64) -> Vec<HistoryEntry> {
    let players = vec![Player::new(0, "p0", 500), Player::new(1, "p1", 500)];
    let gs = GameState::new(players, TableConfig::with_blinds(5, 10).seed(seed)).unwrap();
    let providers: Vec<Box<dyn DecisionProvider>> = vec![Box::new(PassiveProvider), Box::new(PassiveProvider)];
    Engine::new(gs, providers).unwrap().play_hand().unwrap()
}

fn showdown_index(history: &[HistoryEntry]) -> usize {
    history
        .iter()
        .position(|e| matches!(e.event, HandEvent::Showdown { .. }))
        .unwrap()
}

fn stacks_of(gs: &GameState) -> BTreeMap<PlayerId, u32> {
    gs.players().iter().map(|p| (p.id(), p.stack())).collect()
}

#[test]
fn replay_reproduces_final_stacks() {
    for seed in 0..100u64 {
        let mut eng = engine(seed, &[150, 300, 80, 500]);
        let history = eng.play_hand().unwrap();
        let out = replay(&history).unwrap();
        assert!(out.complete);
        assert_eq!(out.pot, 0);
        assert_eq!(out.stacks, stacks_of(eng.state()), "seed {seed}");
        assert_eq!(out.board, eng.state().community_cards());
        assert_eq!(out.total_chips(), 1030);
    }
}

#[test]
fn replay_chains_across_a_session() {
    let mut eng = engine(7, &[200, 200, 200]);
    let hands = eng.play_session(10).unwrap();
    let mut carried: Option<BTreeMap<PlayerId, u32>> = None;
    for history in &hands {
        if let (Some(prev), HandEvent::HandStart { players, .. }) = (&carried, &history[0].event) {
            let start: BTreeMap<PlayerId, u32> = players.iter().map(|s| (s.player_id, s.stack)).collect();
            assert_eq!(&start, prev);
        }
        carried = Some(replay(history).unwrap().stacks);
    }
    assert_eq!(carried, Some(stacks_of(eng.state())));
}

#[test]
fn replay_survives_json_round_trip() {
    let mut eng = engine(3, &[100, 100]);
    let history = eng.play_hand().unwrap();
    let json = serde_json::to_string(&history).unwrap();
    let back: Vec<HistoryEntry> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, history);
    assert_eq!(replay(&back).unwrap(), replay(&history).unwrap());
}

#[test]
fn tampered_pot_is_detected() {
    let mut eng = engine(5, &[100, 100, 100]);
    let mut history = eng.play_hand().unwrap();
    history[2].pot += 1;
    assert_eq!(
        replay(&history),
        Err(ReplayError::PotMismatch {
            seq: 2,
            expected: history[2].pot,
            actual: history[2].pot - 1,
        })
    );
}

#[test]
fn history_must_open_with_hand_start() {
    let mut eng = engine(5, &[100, 100]);
    let history = eng.play_hand().unwrap();
    assert_eq!(replay(&history[1..]), Err(ReplayError::MissingHandStart));
    assert_eq!(replay(&[]), Err(ReplayError::MissingHandStart));
}

#[test]
fn unknown_player_is_detected() {
    let mut eng = engine(9, &[100, 100]);
    let mut history = eng.play_hand().unwrap();
    if let HandEvent::PostBlind { player_id, .. } = &mut history[1].event {
        *player_id = 77;
    }
    assert_eq!(
        replay(&history),
        Err(ReplayError::UnknownPlayer { seq: 1, id: 77 })
    );
}

#[test]
fn redirected_showdown_award_is_rejected() {
    let mut history = check_down(0);
    let at = showdown_index(&history);
    let HandEvent::Showdown { pots, .. } = &mut history[at].event else {
        unreachable!()
    };
    assert_eq!(pots.len(), 1);
    let winner = pots[0].shares[0].0;
    let loser = 1 - winner;
    pots[0].shares = vec![(loser, pots[0].amount)];
    if let HandEvent::HandEnd { winners, .. } = &mut history[at + 1].event {
        *winners = vec![loser];
    }
    assert_eq!(
        replay(&history),
        Err(ReplayError::AwardMismatch {
            seq: history[at].seq,
            tier: 0,
        })
    );
}

#[test]
fn showdown_that_pays_nobody_is_rejected() {
    let mut history = check_down(0);
    let at = showdown_index(&history);
    if let HandEvent::Showdown { pots, .. } = &mut history[at].event {
        for pot in pots.iter_mut() {
            pot.shares.clear();
        }
    }
    history[at].pot = 20;
    history[at + 1].pot = 20;
    assert!(matches!(
        replay(&history),
        Err(ReplayError::AwardMismatch { tier: 0, .. })
    ));
}

/// Everyone folds at their first turn, so the big blind takes the blinds.
fn fold_around(stacks: &[u32]) -> Vec<HistoryEntry> {
    let players = stacks
        .iter()
        .enumerate()
        .map(|(i, &s)| Player::new(i, format!("p{i}"), s))
        .collect();
    let gs = GameState::new(players, TableConfig::with_blinds(5, 10).seed(4)).unwrap();
    let providers: Vec<Box<dyn DecisionProvider>> = (0..stacks.len())
        .map(|i| Box::new(ScriptedProvider::new([Action::fold(i)])) as Box<dyn DecisionProvider>)
        .collect();
    Engine::new(gs, providers).unwrap().play_hand().unwrap()
}

#[test]
fn uncontested_hand_must_empty_the_pot() {
    let mut history = fold_around(&[500, 500]);
    let last = history.len() - 1;
    let HandEvent::HandEnd { amount, reason, .. } = &mut history[last].event else {
        unreachable!()
    };
    assert_eq!(*reason, EndReason::AllOthersFolded);
    assert_eq!(*amount, 15);
    *amount = 10;
    assert_eq!(
        replay(&history),
        Err(ReplayError::UnpaidPot {
            seq: history[last].seq,
            pot: 5,
        })
    );
}

#[test]
fn uncontested_winner_must_be_the_last_player_in() {
    let mut history = fold_around(&[100, 100, 100]);
    let last = history.len() - 1;
    let HandEvent::HandEnd { winners, .. } = &mut history[last].event else {
        unreachable!()
    };
    let real = winners[0];
    let other = (real + 1) % 3;
    *winners = vec![other];
    assert_eq!(
        replay(&history),
        Err(ReplayError::WinnerMismatch {
            seq: history[last].seq,
            recorded: vec![other],
            expected: vec![real],
        })
    );
}
