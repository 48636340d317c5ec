//! Trigger tables: the content side of reactions.
//!
//! A card template maps effect kinds to ordered lists of `TriggerTemplate`s.
//! When an effect of that kind resolves, the reaction resolver turns each
//! template into a concrete effect.
//!
//! Template args stay untyped until resolution because they may hold
//! placeholders (`"self"`, `"opponent"`, `"target"`, ...) and formula flags
//! (`amount_based_on_*`, `condition_*`). Once resolved they are decoded into a
//! typed `Effect`.
//!
//! ```
//! use ideology_ccg::effects::EffectKind;
//! use ideology_ccg::triggers::TriggerTemplate;
//! use serde_json::json;
//!
//! let template = TriggerTemplate::new(EffectKind::ModifyConsciousnessReserve)
//!     .with_arg("player_id", json!("opponent"))
//!     .with_arg("amount", json!(-4));
//! assert_eq!(template.args["amount"], json!(-4));
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::effects::EffectKind;

/// Untyped argument map of a trigger template.
pub type ArgMap = serde_json::Map<String, Value>;

/// Named predicate guarding a single template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedCondition {
    pub check: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// One reaction template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggerTemplate {
    pub effect_type: EffectKind,
    #[serde(default)]
    pub args: ArgMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<NamedCondition>,
}

impl TriggerTemplate {
    #[must_use]
    pub fn new(effect_type: EffectKind) -> Self {
        Self {
            effect_type,
            args: ArgMap::new(),
            condition: None,
        }
    }

    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: Value) -> Self {
        self.args.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn with_condition(mut self, check: impl Into<String>) -> Self {
        self.condition = Some(NamedCondition {
            check: check.into(),
            target: None,
        });
        self
    }
}

/// Effect kind to reaction templates.
pub type TriggerTable = FxHashMap<EffectKind, Vec<TriggerTemplate>>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_content_shape() {
        let table: TriggerTable = serde_json::from_value(json!({
            "PLAY_EVENT_THIS": [
                {
                    "effect_type": "MODIFY_CONSCIOUSNESS_RESERVE",
                    "args": { "player_id": "opponent", "amount": -4 },
                    "condition": { "check": "is_opponent_play" }
                }
            ]
        }))
        .unwrap();

        let templates = &table[&EffectKind::PlayEventThis];
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].effect_type, EffectKind::ModifyConsciousnessReserve);
        assert_eq!(templates[0].condition.as_ref().unwrap().check, "is_opponent_play");
    }

    #[test]
    fn test_args_default_to_empty() {
        let template: TriggerTemplate =
            serde_json::from_value(json!({ "effect_type": "DRAW_CARD" })).unwrap();
        assert!(template.args.is_empty());
        assert!(template.condition.is_none());
    }

    #[test]
    fn test_unknown_trigger_key_is_rejected() {
        let parsed: Result<TriggerTable, _> = serde_json::from_value(json!({ "ON_SUNRISE": [] }));
        assert!(parsed.is_err());
    }
}
