use tracing::info;

use crate::errors::GameError;
use crate::game::GameState;
use crate::history::HistoryEntry;
use crate::provider::DecisionProvider;

/// Drives a [`GameState`] by asking one [`DecisionProvider`] per seat for
/// every decision.
///
/// # Examples
///
/// ```
/// use tablestakes_engine::config::TableConfig;
/// use tablestakes_engine::engine::Engine;
/// use tablestakes_engine::game::GameState;
/// use tablestakes_engine::player::Player;
/// use tablestakes_engine::provider::{DecisionProvider, PassiveProvider};
///
/// let players = (0..3).map(|i| Player::new(i, format!("p{i}"), 1000)).collect();
/// let state = GameState::new(players, TableConfig::with_blinds(5, 10).seed(42)).unwrap();
/// let providers: Vec<Box<dyn DecisionProvider>> =
///     (0..3).map(|_| Box::new(PassiveProvider) as Box<dyn DecisionProvider>).collect();
///
/// let mut engine = Engine::new(state, providers).unwrap();
/// engine.play_hand().unwrap();
/// assert!(engine.state().is_hand_over());
/// assert_eq!(engine.state().community_cards().len(), 5);
/// assert_eq!(engine.state().total_chips(), 3000);
/// ```
pub struct Engine {
    state: GameState,
    /// Indexed by seat
    providers: Vec<Box<dyn DecisionProvider>>,
}

impl Engine {
    /// # Errors
    ///
    /// [`GameError::ProviderCountMismatch`] unless there is exactly one provider per seat.
    pub fn new(state: GameState, providers: Vec<Box<dyn DecisionProvider>>) -> Result<Self, GameError> {
        if providers.len() != state.players().len() {
            return Err(GameError::ProviderCountMismatch {
                seats: state.players().len(),
                providers: providers.len(),
            });
        }
        Ok(Self { state, providers })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Plays one full hand and returns its history.
    ///
    /// A provider that answers with an illegal action aborts the hand with
    /// the protocol error; the state is left as it was before that action.
    pub fn play_hand(&mut self) -> Result<Vec<HistoryEntry>, GameError> {
        self.state.start_new_hand()?;
        while !self.state.is_hand_over() {
            let action = {
                let ctx = self
                    .state
                    .decision_context()
                    .ok_or(GameError::HandAlreadyComplete)?;
                let seat = ctx.player.seat();
                self.providers[seat].decide(&ctx)
            };
            self.state.apply_action(action)?;
        }
        Ok(self.state.history().to_vec())
    }

    /// Plays up to `max_hands` hands, stopping early once fewer than two
    /// players have chips. Returns every hand's history in order.
    pub fn play_session(&mut self, max_hands: usize) -> Result<Vec<Vec<HistoryEntry>>, GameError> {
        let mut hands = Vec::with_capacity(max_hands);
        for _ in 0..max_hands {
            let funded = self.state.players().iter().filter(|p| p.stack() > 0).count();
            if funded < 2 {
                break;
            }
            hands.push(self.play_hand()?);
        }
        info!(
            hands = hands.len(),
            total_chips = self.state.total_chips(),
            "session finished"
        );
        Ok(hands)
    }
}
