use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Forced-bet structure and RNG seed for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    #[serde(default)]
    pub ante: u32,
    /// Deck seed; `None` draws one from the thread RNG
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 5,
            big_blind: 10,
            ante: 0,
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn with_blinds(small_blind: u32, big_blind: u32) -> Self {
        Self {
            small_blind,
            big_blind,
            ..Self::default()
        }
    }

    pub fn ante(mut self, ante: u32) -> Self {
        self.ante = ante;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.small_blind == 0 || self.big_blind == 0 || self.small_blind > self.big_blind {
            return Err(GameError::InvalidBlinds {
                small: self.small_blind,
                big: self.big_blind,
            });
        }
        if self.ante >= self.big_blind {
            return Err(GameError::InvalidAnte {
                ante: self.ante,
                big: self.big_blind,
            });
        }
        Ok(())
    }
}
