//! Placeholder and formula resolution for reaction arguments.
//!
//! Template args are written relative to the reacting card (`"self"`,
//! `"opponent"`, `"target"`, ...). Resolution rewrites them into concrete
//! ids in place, then the args are decoded into a typed effect. Handler-time
//! aliases such as `front` and `draw_from_deck` are left alone.

use serde_json::Value;

use crate::core::{GameRng, InstanceId, PlayerId};
use crate::zones::Zone;

use super::condition::truthy;
use super::context::{len_i64, ReactionContext};
use super::table::ArgMap;

/// A placeholder that names nothing in the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unresolved(pub &'static str);

fn player(id: PlayerId) -> Value {
    Value::from(id.0)
}

fn card(id: InstanceId) -> Value {
    Value::from(id.0)
}

fn text<'a>(args: &'a ArgMap, key: &str) -> Option<&'a str> {
    args.get(key).and_then(Value::as_str)
}

fn is_set(args: &ArgMap, key: &str) -> bool {
    args.get(key).is_some_and(truthy)
}

/// Replace `"current"` source piles with the reacting card's location.
pub fn resolve_current_pile(args: &mut ArgMap, ctx: &ReactionContext<'_>) {
    if text(args, "source_pile") == Some("current") {
        args.insert("source_pile".into(), Value::from(ctx.card.location.to_string()));
    }
}

/// Resolve player and card placeholders.
pub fn resolve_references(args: &mut ArgMap, ctx: &ReactionContext<'_>, rng: &mut GameRng) -> Result<(), Unresolved> {
    resolve_players(args, ctx, rng);
    resolve_cards(args, ctx)?;

    if text(args, "initial_durability") == Some("damage_this") {
        if let Some(damage) = ctx.view.damage_amount.filter(|damage| *damage < 0) {
            args.insert("initial_durability".into(), Value::from(damage.abs()));
        }
    }
    Ok(())
}

fn resolve_players(args: &mut ArgMap, ctx: &ReactionContext<'_>, rng: &mut GameRng) {
    let owner = ctx.owner();
    let opponent = ctx.opponent();

    let resolved = match text(args, "player_id") {
        Some("self") => Some(owner),
        Some("opponent") => Some(opponent),
        Some("random") => Some(if rng.flip() { owner } else { opponent }),
        Some("source") => ctx
            .view
            .source_card_id
            .and_then(|id| ctx.state.locate(id))
            .filter(|(_, zone)| matches!(zone, Zone::Hand | Zone::Field | Zone::Ideology))
            .map(|(holder, _)| holder),
        _ => None,
    };
    if let Some(resolved) = resolved {
        args.insert("player_id".into(), player(resolved));
    }

    let group = match text(args, "player_ids") {
        Some("self") => Some(vec![owner]),
        Some("opponent") => Some(vec![opponent]),
        Some("self_and_opponent") => Some(vec![owner, opponent]),
        _ => None,
    };
    if let Some(group) = group {
        args.insert("player_ids".into(), Value::Array(group.into_iter().map(player).collect()));
    }

    let target = match text(args, "target_player_id") {
        Some("self") => Some(owner),
        Some("opponent") => Some(opponent),
        _ => None,
    };
    if let Some(target) = target {
        args.insert("target_player_id".into(), player(target));
    }
}

fn resolve_cards(args: &mut ArgMap, ctx: &ReactionContext<'_>) -> Result<(), Unresolved> {
    if text(args, "target_card_id") == Some("target") {
        let target = ctx.view.target_card_id.ok_or(Unresolved("target_card_id"))?;
        args.insert("target_card_id".into(), card(target));
    }

    if text(args, "card_id") == Some("target") {
        let target = ctx
            .view
            .exposed_cards
            .first()
            .copied()
            .or(ctx.view.target_card_id)
            .ok_or(Unresolved("card_id"))?;
        args.insert("card_id".into(), card(target));
    }

    let has_card = args.get("card_id").is_some_and(truthy);
    if !has_card {
        if let Some(target) = args.get("target_card_id").filter(|value| truthy(value)).cloned() {
            args.insert("card_id".into(), target);
        }
        return Ok(());
    }

    let owner = ctx.owner_state();
    let resolved = match text(args, "card_id") {
        Some("self") => Some(ctx.card.id),
        Some("self_ideology") => Some(owner.piles.ideology.ok_or(Unresolved("self_ideology"))?),
        Some("opponent_ideology") => Some(
            ctx.opponent_state()
                .piles
                .ideology
                .ok_or(Unresolved("opponent_ideology"))?,
        ),
        Some("self_money_on_field") => Some(
            ctx.state
                .money_on_field(ctx.owner())
                .map(|money| money.id)
                .ok_or(Unresolved("self_money_on_field"))?,
        ),
        _ => None,
    };
    if let Some(resolved) = resolved {
        args.insert("card_id".into(), card(resolved));
    }
    Ok(())
}

/// Initial durability formulas for generated cards.
pub fn resolve_initial_durability(args: &mut ArgMap, ctx: &ReactionContext<'_>) {
    let scale = ctx.owner_state().scale;

    if let Some(pct) = args
        .remove("initial_durability_based_on_scale_percentage")
        .and_then(|value| value.as_i64())
    {
        args.insert("initial_durability".into(), Value::from((scale * pct).div_euclid(100).max(1)));
    }
    if args
        .remove("initial_durability_based_on_field_wealth_count_plus_one")
        .is_some_and(|value| truthy(&value))
    {
        args.insert("initial_durability".into(), Value::from(ctx.wealth_count(ctx.owner()) + 1));
    }
    if args
        .remove("initial_durability_based_on_scale")
        .is_some_and(|value| truthy(&value))
    {
        args.insert("initial_durability".into(), Value::from(scale.max(1)));
    }
}

/// Amount formulas. Later formulas override earlier ones.
pub fn resolve_amount(args: &mut ArgMap, ctx: &ReactionContext<'_>) -> Result<(), Unresolved> {
    let owner = ctx.owner();

    if let Some(sign) = args.remove("amount_based_on_self_durability").filter(truthy) {
        let durability = ctx.card.current_durability;
        let amount = if sign.as_str() == Some("minus") { -durability } else { durability };
        args.insert("amount".into(), Value::from(amount));
    }
    if is_set(args, "amount_based_on_opponent_field_wealth_count") {
        args.insert("amount".into(), Value::from(ctx.wealth_count(ctx.opponent())));
    }
    if is_set(args, "amount_based_on_money_durability") {
        let money = ctx
            .state
            .money_on_field(owner)
            .ok_or(Unresolved("amount_based_on_money_durability"))?;
        args.insert("amount".into(), Value::from(money.current_durability));
    }
    if is_set(args, "amount_based_on_removed_discard_count") {
        let removed = ctx.state.temp(crate::core::state::REMOVED_DISCARD_COUNT);
        args.insert("amount".into(), Value::from(removed));
    }
    if let Some(key) = text(args, "amount_based_on_temp_value").map(str::to_owned) {
        args.insert("amount".into(), Value::from(ctx.state.temp(&key)));
    }
    if args
        .remove("amount_based_on_field_wealth_count")
        .is_some_and(|value| truthy(&value))
    {
        args.insert("amount".into(), Value::from(ctx.wealth_count(owner)));
    }
    if args
        .remove("amount_based_on_discard_count")
        .is_some_and(|value| truthy(&value))
    {
        args.insert("amount".into(), Value::from(len_i64(ctx.state.player(owner).piles.discard.len())));
    }
    Ok(())
}
