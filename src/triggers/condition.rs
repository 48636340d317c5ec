//! Template conditions.
//!
//! Two mechanisms gate a single reaction template:
//!
//! - A named condition (`"condition": {"check": ...}`) evaluated against the
//!   scratch values and the triggering effect. Unknown names pass.
//! - Argument gates: `condition_*` keys inside the template args. Comparison
//!   gates are tri-state: absent means no constraint, `true` requires the
//!   comparison to hold and `false` requires it to fail.

use serde_json::Value;

use crate::core::state::LAST_CONSCIOUSNESS_CHANGE;
use crate::zones::Zone;

use super::context::ReactionContext;
use super::table::{ArgMap, NamedCondition};

/// Evaluate a template's named condition.
#[must_use]
pub fn named_condition_holds(condition: &NamedCondition, ctx: &ReactionContext<'_>) -> bool {
    match condition.check.as_str() {
        // The corrected change, not the requested one.
        "consciousness_decreased_by_opponent" => ctx.state.temp(LAST_CONSCIOUSNESS_CHANGE) < 0,
        "is_opponent_play" => ctx.view.player_id != Some(ctx.owner()),
        other => {
            tracing::trace!(check = other, "unknown named condition passes");
            true
        }
    }
}

type Comparison = fn(&ReactionContext<'_>) -> bool;

/// Tri-state comparison gates, checked in this order.
const COMPARISON_GATES: [(&str, Comparison); 10] = [
    ("condition_self_consciousness_higher", |ctx| {
        ctx.owner_state().consciousness > ctx.opponent_state().consciousness
    }),
    ("condition_opponent_consciousness_higher", |ctx| {
        ctx.opponent_state().consciousness > ctx.owner_state().consciousness
    }),
    ("condition_self_consciousness_lower", |ctx| {
        ctx.owner_state().consciousness < ctx.opponent_state().consciousness
    }),
    ("condition_opponent_consciousness_lower", |ctx| {
        ctx.opponent_state().consciousness < ctx.owner_state().consciousness
    }),
    ("condition_self_scale_higher", |ctx| {
        ctx.owner_state().scale > ctx.opponent_state().scale
    }),
    ("condition_opponent_scale_higher", |ctx| {
        ctx.opponent_state().scale > ctx.owner_state().scale
    }),
    ("condition_self_scale_lower", |ctx| {
        ctx.owner_state().scale < ctx.opponent_state().scale
    }),
    ("condition_opponent_scale_lower", |ctx| {
        ctx.opponent_state().scale < ctx.owner_state().scale
    }),
    ("condition_fewer_wealth_than_opponent", |ctx| {
        ctx.pile_len(ctx.owner(), Zone::Field) < ctx.pile_len(ctx.opponent(), Zone::Field)
    }),
    ("condition_opponent_deck_smaller", |ctx| {
        ctx.pile_len(ctx.opponent(), Zone::Deck) < ctx.pile_len(ctx.owner(), Zone::Deck)
    }),
];

/// Check every `condition_*` gate present in `args`.
#[must_use]
pub fn argument_gates_pass(args: &ArgMap, ctx: &ReactionContext<'_>) -> bool {
    if is_set(args, "condition_money_durability_ge_10") {
        let money = ctx.state.money_on_field(ctx.owner());
        if !money.is_some_and(|card| card.current_durability >= 10) {
            return false;
        }
    }
    if is_set(args, "condition_field_wealth_count_ge_3") && ctx.wealth_count(ctx.owner()) < 3 {
        return false;
    }
    if is_set(args, "condition_scale_exceeds_25") && ctx.owner_state().scale <= 25 {
        return false;
    }

    COMPARISON_GATES.iter().all(|(key, comparison)| match args.get(*key) {
        None | Some(Value::Null) => true,
        Some(flag) => truthy(flag) == comparison(ctx),
    })
}

fn is_set(args: &ArgMap, key: &str) -> bool {
    args.get(key).is_some_and(truthy)
}

/// Content truthiness: null, `false`, zero and the empty string are false.
#[must_use]
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
