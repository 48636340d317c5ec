//! Session-level rules: the engine API, pending decisions and win/loss
//! evaluation.

pub mod decision;
pub mod game_over;
mod engine;

pub use decision::{Choice, DecisionKind, DecisionPrompt, PendingDecision};
pub use engine::Engine;
pub use game_over::{check_game_over, GameResult};
