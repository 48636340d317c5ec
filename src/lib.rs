//! # ideology-ccg
//!
//! Rules engine for a two-player card game whose cards are data. Card
//! templates declare what they do as `{effect_type, args}` pairs and which
//! effects they react to; the engine drains a queue of typed effects,
//! collects the reactions each one provokes and keeps the game state
//! consistent throughout.
//!
//! ## Design Principles
//!
//! 1. **Content is data**: card behavior lives in JSON trigger tables. Only a
//!    handful of card rules the data cannot express are code, registered by
//!    card name.
//!
//! 2. **Decode once**: untyped content is turned into typed `Effect`s at the
//!    boundary; handlers never look at raw arguments.
//!
//! 3. **Deterministic**: every random choice goes through the seeded
//!    `GameRng` stored in the state.
//!
//! ## Architecture
//!
//! - **Persistent state**: `im` collections make a snapshot clone O(1).
//!
//! - **Queue discipline**: reactions run before anything already queued;
//!   destruction follow-ups wait in a delayed buffer until the live queue
//!   drains.
//!
//! - **Suspension**: a handler that needs a player decision stores it in the
//!   state and processing stops until `Engine::resolve_input`.
//!
//! ## Modules
//!
//! - `core`: ids, seats, state, RNG, configuration, errors
//! - `zones`: piles and insertion positions
//! - `cards`: templates, instances and the template registry
//! - `effects`: effect kinds, payloads, corrections and handlers
//! - `triggers`: the reaction resolver
//! - `stack`: the effect queue processor
//! - `rules`: engine API, decisions, game over
//! - `presentation`: records for renderers and effect observers

pub mod core;
pub mod zones;
pub mod cards;
pub mod effects;
pub mod triggers;
pub mod stack;
pub mod rules;
pub mod presentation;

// Re-export commonly used types
pub use crate::core::{
    InstanceId, PlayerId, PlayerMap,
    GameRng, GameRngState,
    RulesConfig, ContentNames,
    EngineError, PlayRejection,
    GameState, PlayerState,
};

pub use crate::zones::{DeckPosition, Piles, Zone};

pub use crate::cards::{CardInstance, CardKind, CardRegistry, CardTemplate};

pub use crate::effects::{Effect, EffectKind, EffectView, SignalArgs};

pub use crate::triggers::{CardRule, CardRules, ReactionResolver, TriggerTemplate};

pub use crate::stack::{process_effects, QueuedEffect, ResolutionStatus, Trace};

pub use crate::rules::{Choice, Engine, GameResult, PendingDecision};

pub use crate::presentation::{EffectLog, EffectObserver, NoopObserver, PresentationRecord};
