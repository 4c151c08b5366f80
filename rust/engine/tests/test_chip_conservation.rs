use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use tablestakes_engine::action::{ActionKind, BettingRound};
use tablestakes_engine::config::TableConfig;
use tablestakes_engine::engine::Engine;
use tablestakes_engine::game::GameState;
use tablestakes_engine::history::HandEvent;
use tablestakes_engine::player::Player;
use tablestakes_engine::provider::{DecisionProvider, RandomProvider};

fn random_table(seed: u64) -> (GameState, Vec<RandomProvider>) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let seats = rng.random_range(2..=6);
    let players = (0..seats)
        .map(|i| Player::new(i, format!("p{i}"), rng.random_range(1..=400)))
        .collect();
    let ante = if rng.random_bool(0.3) { 2 } else { 0 };
    let config = TableConfig::with_blinds(5, 10).ante(ante).seed(seed);
    let providers = (0..seats).map(|i| RandomProvider::new(seed * 31 + i as u64)).collect();
    (GameState::new(players, config).unwrap(), providers)
}

#[test]
fn chips_are_conserved_after_every_action() {
    for seed in 0..200u64 {
        let (mut gs, mut providers) = random_table(seed);
        let total = gs.total_chips();
        for _ in 0..5 {
            if gs.players().iter().filter(|p| p.stack() > 0).count() < 2 {
                break;
            }
            gs.start_new_hand().unwrap();
            assert_eq!(gs.total_chips(), total, "seed {seed} after blinds");
            while !gs.is_hand_over() {
                let action = {
                    let ctx = gs.decision_context().unwrap();
                    providers[ctx.player.seat()].decide(&ctx)
                };
                gs.apply_action(action).unwrap();
                assert_eq!(gs.total_chips(), total, "seed {seed}");
                let committed: u32 = gs.players().iter().map(|p| p.committed()).sum();
                if !gs.is_hand_over() {
                    assert_eq!(gs.pot(), committed, "seed {seed}");
                }
            }
            assert_eq!(gs.pot(), 0);
        }
    }
}

#[test]
fn every_street_terminates_within_seat_bound() {
    for seed in 0..200u64 {
        let (gs, providers) = random_table(seed);
        let seats = gs.players().len();
        let boxed: Vec<Box<dyn DecisionProvider>> = providers
            .into_iter()
            .map(|p| Box::new(p) as Box<dyn DecisionProvider>)
            .collect();
        let mut engine = Engine::new(gs, boxed).unwrap();
        for history in engine.play_session(5).unwrap() {
            for street in [
                BettingRound::Preflop,
                BettingRound::Flop,
                BettingRound::Turn,
                BettingRound::River,
            ] {
                let mut actions = 0;
                let mut aggressive = 0;
                for e in history.iter().filter(|e| e.street == street) {
                    if let HandEvent::PlayerAction { action, .. } = e.event {
                        actions += 1;
                        if matches!(action, ActionKind::Bet | ActionKind::Raise | ActionKind::AllIn) {
                            aggressive += 1;
                        }
                    }
                }
                // each bet or raise can reopen the action at most once per seat
                assert!(
                    actions <= seats * (aggressive + 1),
                    "seed {seed}: {actions} actions on {street} with {aggressive} raises"
                );
            }
            assert!(matches!(
                history.last().map(|e| &e.event),
                Some(HandEvent::HandEnd { .. })
            ));
        }
    }
}

#[test]
fn session_stops_when_one_player_has_everything() {
    let players = vec![Player::new(0, "a", 20), Player::new(1, "b", 20)];
    let gs = GameState::new(players, TableConfig::with_blinds(5, 10).seed(99)).unwrap();
    let providers: Vec<Box<dyn DecisionProvider>> = vec![
        Box::new(RandomProvider::new(1)),
        Box::new(RandomProvider::new(2)),
    ];
    let mut engine = Engine::new(gs, providers).unwrap();
    let hands = engine.play_session(1000).unwrap();
    assert!(!hands.is_empty());
    let state = engine.state();
    assert_eq!(state.total_chips(), 40);
    assert!(hands.len() < 1000);
    assert!(state.players().iter().any(|p| p.stack() == 40));
}
