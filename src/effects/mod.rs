//! Effect system: the vocabulary, payloads and handlers.
//!
//! - `EffectKind`: flat name of every effect and trigger type
//! - `Effect`: typed effect, one payload per handled kind
//! - `correction`: one-shot magnitude modifiers
//! - `handlers`: one state transition per kind
//!
//! ## Design Philosophy
//!
//! Content speaks in untyped `{effect_type, args}` pairs. They are decoded
//! once, at the boundary, and everything past that point works on typed
//! payloads. Placeholders that only make sense while an effect runs
//! (`draw_from_deck`, `front`, ...) survive decoding as typed aliases.

pub mod correction;
pub mod handlers;
pub mod payload;

mod effect;
mod kind;

pub use effect::{Effect, EffectView};
pub use kind::{EffectKind, TriggerScope};
pub use payload::*;
