//! Reaction system: how cards respond to processed effects.
//!
//! Card templates carry a trigger table mapping effect kinds to lists of
//! reaction templates. After every processed effect the
//! [`ReactionResolver`] scans all cards, filters them by trigger scope and
//! zone, evaluates conditions, substitutes placeholders and decodes the
//! surviving templates into typed effects.
//!
//! ## Key Components
//!
//! - [`TriggerTable`] / [`TriggerTemplate`]: data-driven reaction content
//! - [`ReactionContext`]: one reacting card against one processed effect
//! - [`CardRule`] / [`CardRules`]: per-card behavior the data cannot express
//! - [`ReactionResolver`]: the scan itself
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::json;
//! use ideology_ccg::cards::{CardKind, CardRegistry, CardTemplate};
//! use ideology_ccg::core::{GameState, PlayerId, RulesConfig};
//! use ideology_ccg::effects::{Effect, EffectKind, SignalArgs};
//! use ideology_ccg::stack::QueuedEffect;
//! use ideology_ccg::triggers::{ReactionResolver, TriggerTemplate};
//! use ideology_ccg::zones::Zone;
//!
//! let mut registry = CardRegistry::new();
//! registry.register(
//!     CardTemplate::new("農園", CardKind::Wealth).with_trigger(
//!         EffectKind::StartTurnOwner,
//!         TriggerTemplate::new(EffectKind::ModifyScale)
//!             .with_arg("player_id", json!("self"))
//!             .with_arg("amount", json!(1)),
//!     ),
//! );
//! let mut state = GameState::new(Arc::new(registry), Arc::new(RulesConfig::default()), 7);
//! let farm = state.deal_card("農園", PlayerId::new(0), Zone::Field).unwrap();
//!
//! let start = QueuedEffect::new(
//!     Effect::signal(EffectKind::StartTurnOwner, SignalArgs::for_player(PlayerId::new(0))),
//!     None,
//! );
//! let reactions = ReactionResolver::new().resolve(&mut state, &start);
//! assert_eq!(reactions.len(), 1);
//! assert_eq!(reactions[0].source, Some(farm));
//! ```

mod condition;
mod context;
mod placeholders;
mod resolver;
mod rules;
mod table;

pub use condition::truthy;
pub use context::ReactionContext;
pub use resolver::ReactionResolver;
pub use rules::{CardRule, CardRules, RuleVerdict, Stage};
pub use table::{ArgMap, NamedCondition, TriggerTable, TriggerTemplate};
