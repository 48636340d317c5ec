//! Core engine types: card instance ids, seats, state, RNG, configuration
//! and errors.

pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{ContentNames, RulesConfig};
pub use entity::InstanceId;
pub use error::{EngineError, PlayRejection};
pub use player::{PlayerId, PlayerMap, SEATS};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, PlayerState};
