//! Rules configuration.
//!
//! Starting resources, limits and the handful of card names the mechanics
//! refer to live here rather than in the engine, so content can rebalance
//! without touching code.
//!
//! ```
//! use ideology_ccg::core::RulesConfig;
//!
//! let config = RulesConfig::default()
//!     .with_initial_consciousness(30)
//!     .with_step_limit(200);
//! assert_eq!(config.initial_consciousness, 30);
//! assert_eq!(config.initial_scale, 20);
//! ```

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Card names that carry mechanics of their own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentNames {
    /// The money card: merges on placement, adds its durability to the
    /// effective scale and is the target of `self_money_on_field`.
    pub money: String,
    /// Generated by the money card's turn-start conversion.
    pub capitalism: String,
    /// While this is a player's ideology, that player cannot play wealth.
    pub primitive_communism: String,
}

impl Default for ContentNames {
    fn default() -> Self {
        Self {
            money: "マネー".to_string(),
            capitalism: "資本主義".to_string(),
            primitive_communism: "原始共産制".to_string(),
        }
    }
}

/// Engine-wide rules configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub initial_consciousness: i64,
    pub initial_scale: i64,
    pub field_limit: i64,
    pub hand_capacity: usize,
    pub initial_hand_size: usize,
    /// Consciousness change applied to whoever moves first.
    pub first_player_consciousness: i64,
    /// Effects processed per drain before the safety break ends the game.
    pub step_limit: u32,
    /// Seat whose victory `GAME_RESULT` reports as `is_victory`.
    pub viewpoint: PlayerId,
    pub names: ContentNames,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            initial_consciousness: 50,
            initial_scale: 20,
            field_limit: 5,
            hand_capacity: 7,
            initial_hand_size: 5,
            first_player_consciousness: -3,
            step_limit: 500,
            viewpoint: PlayerId::new(0),
            names: ContentNames::default(),
        }
    }
}

impl RulesConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, crate::core::EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_initial_consciousness(mut self, value: i64) -> Self {
        self.initial_consciousness = value;
        self
    }

    #[must_use]
    pub fn with_initial_scale(mut self, value: i64) -> Self {
        self.initial_scale = value;
        self
    }

    #[must_use]
    pub fn with_field_limit(mut self, value: i64) -> Self {
        self.field_limit = value;
        self
    }

    #[must_use]
    pub fn with_hand_capacity(mut self, value: usize) -> Self {
        self.hand_capacity = value;
        self
    }

    #[must_use]
    pub fn with_initial_hand_size(mut self, value: usize) -> Self {
        self.initial_hand_size = value;
        self
    }

    #[must_use]
    pub fn with_first_player_consciousness(mut self, value: i64) -> Self {
        self.first_player_consciousness = value;
        self
    }

    #[must_use]
    pub fn with_step_limit(mut self, value: u32) -> Self {
        self.step_limit = value;
        self
    }

    #[must_use]
    pub fn with_viewpoint(mut self, player: PlayerId) -> Self {
        self.viewpoint = player;
        self
    }

    #[must_use]
    pub fn with_names(mut self, names: ContentNames) -> Self {
        self.names = names;
        self
    }
}
