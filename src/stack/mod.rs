//! The effect queue and its processor.
//!
//! Queue entries pair an effect with the card that produced it. Reactions
//! additionally carry a `Trace` back to the effect that triggered them, so
//! handlers such as counter-attacks can inspect what happened.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use ideology_ccg::cards::CardRegistry;
//! use ideology_ccg::core::{GameState, RulesConfig};
//! use ideology_ccg::presentation::NoopObserver;
//! use ideology_ccg::stack::{process_effects, ResolutionStatus};
//! use ideology_ccg::triggers::ReactionResolver;
//!
//! let mut state = GameState::new(
//!     Arc::new(CardRegistry::new()),
//!     Arc::new(RulesConfig::default()),
//!     42,
//! );
//! let status = process_effects(&mut state, &ReactionResolver::new(), &mut NoopObserver);
//! assert_eq!(status, ResolutionStatus::Complete);
//! ```

mod processor;

pub use processor::process_effects;

use serde::{Deserialize, Serialize};

use crate::core::{InstanceId, PlayerId};
use crate::effects::{Effect, EffectKind, EffectView};

/// Status returned by queue processing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStatus {
    /// The queue and the delayed buffer are empty.
    Complete,

    /// A handler asked a player for a decision; the queue is left as is.
    AwaitingInput(PlayerId),

    /// The game ended.
    GameOver,
}

/// What a reaction was reacting to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    pub kind: EffectKind,
    /// Source card of the triggering effect, falling back to its queue source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_card_id: Option<InstanceId>,
    pub view: EffectView,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedEffect {
    pub effect: Effect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<InstanceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Box<Trace>>,
}

impl QueuedEffect {
    #[must_use]
    pub fn new(effect: Effect, source: Option<InstanceId>) -> Self {
        Self {
            effect,
            source,
            trace: None,
        }
    }

    #[must_use]
    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.trace = Some(Box::new(trace));
        self
    }
}
