//! Player resources, card stats and the `*_RESERVE` pre-stages.
//!
//! A reserve effect settles its amount formula, then queues its
//! increase/decrease reserve signals ahead of the direct change, so that
//! reactions can install corrections before the change is applied.

use super::HandlerContext;
use crate::core::state::{last_decrease_key, LAST_CONSCIOUSNESS_CHANGE, LAST_SCALE_CHANGE, REMOVED_DISCARD_COUNT};
use crate::core::{InstanceId, PlayerId};
use crate::effects::correction::{self, Corrected, CorrectionTarget};
use crate::effects::{
    CardAlias, CardRef, DurabilityChange, DurabilityReserve, Effect, EffectKind, MoveCard,
    RequiredScaleChange, ReserveChange, ResourceChange, SelfDurabilitySign, SignalArgs,
};
use crate::presentation::{AmountChange, PresentationRecord};
use crate::stack::QueuedEffect;
use crate::zones::Zone;

#[derive(Clone, Copy, Debug)]
enum Resource {
    Consciousness,
    Scale,
}

impl Resource {
    fn correction_target(self) -> CorrectionTarget {
        match self {
            Self::Consciousness => CorrectionTarget::Consciousness,
            Self::Scale => CorrectionTarget::Scale,
        }
    }

    fn effect_kind(self) -> EffectKind {
        match self {
            Self::Consciousness => EffectKind::ModifyConsciousness,
            Self::Scale => EffectKind::ModifyScale,
        }
    }

    fn temp_key(self) -> &'static str {
        match self {
            Self::Consciousness => LAST_CONSCIOUSNESS_CHANGE,
            Self::Scale => LAST_SCALE_CHANGE,
        }
    }
}

/// `|pct|` percent of `value`, floored or rounded to nearest.
pub(super) fn percentage_of(value: i64, pct: i64, round_down: bool) -> i64 {
    let scaled = value * pct.abs();
    if round_down {
        scaled.div_euclid(100)
    } else {
        (scaled + 50).div_euclid(100)
    }
}

pub(super) fn modify_consciousness(ctx: &mut HandlerContext<'_>, change: &ResourceChange) {
    let corrected = modify_resource(ctx, change, Resource::Consciousness);
    if change.amount < 0 {
        ctx.state
            .set_temp(last_decrease_key(change.player_id), -corrected.actual);
    }
}

pub(super) fn modify_scale(ctx: &mut HandlerContext<'_>, change: &ResourceChange) {
    modify_resource(ctx, change, Resource::Scale);
}

fn modify_resource(ctx: &mut HandlerContext<'_>, change: &ResourceChange, resource: Resource) -> Corrected {
    let player = change.player_id;
    let corrected = correction::apply(
        &mut ctx.state.player_mut(player).corrections,
        resource.correction_target(),
        change.amount,
    );
    ctx.state.set_temp(resource.temp_key(), corrected.actual);

    let state = ctx.state.player_mut(player);
    let value = match resource {
        Resource::Consciousness => &mut state.consciousness,
        Resource::Scale => &mut state.scale,
    };
    *value = (*value + corrected.actual).max(0);
    tracing::debug!(
        ?resource,
        %player,
        original = corrected.original,
        actual = corrected.actual,
        now = *value,
        "resource changed"
    );

    let amount = AmountChange {
        original: corrected.original,
        actual: corrected.actual,
        corrected: corrected.corrected,
        source_card_id: change.source_card_id.or(ctx.source),
    };
    ctx.record(match resource {
        Resource::Consciousness => PresentationRecord::ConsciousnessChanged {
            player_id: player,
            change: amount,
        },
        Resource::Scale => PresentationRecord::ScaleChanged {
            player_id: player,
            change: amount,
        },
    });
    if corrected.nullified() {
        ctx.record(PresentationRecord::EffectNullified {
            effect_type: resource.effect_kind(),
            player_id: Some(player),
        });
    }
    corrected
}

pub(super) fn set_consciousness(ctx: &mut HandlerContext<'_>, change: &ResourceChange) {
    ctx.state.player_mut(change.player_id).consciousness = change.amount.max(0);
}

pub(super) fn set_scale(ctx: &mut HandlerContext<'_>, change: &ResourceChange) {
    ctx.state.player_mut(change.player_id).scale = change.amount.max(0);
}

/// Apply a durability change to a card in play.
///
/// Queue order after the change (first processed first):
/// `SUCCESS_PROCESS`, `WEALTH_DURABILITY_ZERO_THIS`, the move to discard,
/// `DAMAGE_THIS`/`BOOST_THIS`. The other three zero triggers wait in the
/// delayed buffer.
pub(super) fn modify_card_durability(ctx: &mut HandlerContext<'_>, change: &DurabilityChange) {
    let Some(card) = ctx.state.card(change.card_id).cloned() else {
        ctx.report(false);
        return;
    };
    if !card.location.is_in_play() {
        tracing::trace!(card = %card.id, location = %card.location, "durability change outside play");
        ctx.report(false);
        return;
    }

    let corrected = correction::apply(
        &mut ctx.state.player_mut(card.owner).corrections,
        CorrectionTarget::Wealth,
        change.amount,
    );
    let actual = corrected.actual;
    let current = match ctx.state.card_mut(card.id) {
        Some(target) => {
            target.current_durability += actual;
            target.current_durability
        }
        None => return,
    };
    let source = ctx.source;
    ctx.record(PresentationRecord::CardDurabilityChanged {
        card_id: card.id,
        change: AmountChange {
            original: corrected.original,
            actual,
            corrected: corrected.corrected,
            source_card_id: change.source_card_id.or(source),
        },
    });
    if corrected.nullified() {
        ctx.record(PresentationRecord::EffectNullified {
            effect_type: EffectKind::ModifyCardDurability,
            player_id: Some(card.owner),
        });
    }

    let hit = SignalArgs {
        card_id: Some(card.id),
        target_card_id: Some(card.id),
        source_card_id: source,
        ..SignalArgs::default()
    };
    if actual < 0 {
        let args = SignalArgs {
            damage_amount: Some(actual),
            ..hit
        };
        ctx.signal_front(EffectKind::DamageThis, args, source);
    } else if actual > 0 {
        let args = SignalArgs {
            amount: Some(actual),
            ..hit
        };
        ctx.signal_front(EffectKind::BoostThis, args, source);
    }

    if current <= 0 {
        let owner = card.owner;
        tracing::debug!(card = %card.id, name = %card.name, %owner, "durability reached zero");
        ctx.push_front_from(
            Effect::MoveCard(MoveCard::new(owner, card.id, Zone::Field, Zone::Discard).from_source(source)),
            source,
        );

        let owner_args = SignalArgs {
            player_id: Some(owner),
            target_player_id: Some(owner),
            card_id: Some(card.id),
            target_card_id: Some(card.id),
            ..SignalArgs::default()
        };
        let opponent_args = SignalArgs {
            target_player_id: Some(owner.opponent()),
            ..owner_args.clone()
        };
        let destroyed = Some(card.id);
        ctx.defer_from(Effect::signal(EffectKind::WealthDurabilityZero, owner_args.clone()), destroyed);
        ctx.defer_from(Effect::signal(EffectKind::WealthDurabilityZeroOwner, owner_args.clone()), destroyed);
        ctx.defer_from(Effect::signal(EffectKind::WealthDurabilityZeroOpponent, opponent_args), destroyed);
        ctx.signal_front(EffectKind::WealthDurabilityZeroThis, owner_args, destroyed);
    }

    ctx.report(true);
}

/// Hand cards only.
pub(super) fn modify_required_scale(ctx: &mut HandlerContext<'_>, change: &RequiredScaleChange) {
    let in_hand = ctx
        .state
        .players
        .iter()
        .any(|(_, player)| player.piles.contains(Zone::Hand, change.card_id));
    if !in_hand {
        return;
    }
    if let Some(card) = ctx.state.card_mut(change.card_id) {
        let base = if change.set_value {
            change.amount
        } else {
            card.required_scale + change.amount
        };
        card.required_scale = base.max(change.min_value);
    }
}

/// A reduction below the cards already on the field fails and changes nothing.
pub(super) fn modify_field_limit(ctx: &mut HandlerContext<'_>, change: &ResourceChange) {
    let player = ctx.state.player(change.player_id);
    let new_limit = player.field_limit + change.amount;
    let on_field = i64::try_from(player.piles.field.len()).unwrap_or(i64::MAX);

    if change.amount < 0 {
        if new_limit < on_field {
            ctx.report(false);
            return;
        }
        ctx.report(true);
    }
    ctx.state.player_mut(change.player_id).field_limit = new_limit.max(0);
}

fn resource_args(player: PlayerId, amount: i64, source: Option<InstanceId>) -> SignalArgs {
    SignalArgs {
        player_id: Some(player),
        target_player_id: Some(player),
        amount: Some(amount),
        source_card_id: source,
        ..SignalArgs::default()
    }
}

/// Amount of a reserve after its percentage formula, storing the magnitude
/// under `store_original_value_for_temp` when asked.
fn percentage_amount(ctx: &mut HandlerContext<'_>, reserve: &ReserveChange, current: i64) -> Option<i64> {
    let pct = reserve.amount_percentage.filter(|pct| *pct != 0)?;
    let change = percentage_of(current, pct, reserve.round_down);
    if let Some(key) = &reserve.store_original_value_for_temp {
        ctx.state.set_temp(key.clone(), change);
    }
    Some(if pct < 0 { -change } else { change })
}

pub(super) fn consciousness_reserve(ctx: &mut HandlerContext<'_>, reserve: &ReserveChange) {
    let player = reserve.player_id;
    let current = ctx.state.player(player).consciousness;
    let amount = if let Some(amount) = percentage_amount(ctx, reserve, current) {
        amount
    } else if reserve.amount_based_on_removed_discard_count {
        ctx.state.temp(REMOVED_DISCARD_COUNT)
    } else if let Some(key) = &reserve.amount_based_on_temp_value {
        let value = ctx.state.temp(key);
        if reserve.is_negative {
            -value
        } else {
            value
        }
    } else if reserve.amount_based_on_hand_count {
        i64::try_from(ctx.state.player(player).piles.hand.len()).unwrap_or(0)
    } else {
        reserve.amount
    };

    let args = resource_args(player, amount, reserve.source_card_id);
    let mut staged = Vec::with_capacity(3);
    if amount > 0 {
        staged.push(Effect::signal(EffectKind::ModifyConsciousnessIncreaseReserveOwner, args));
    } else if amount < 0 {
        staged.push(Effect::signal(EffectKind::ModifyConsciousnessDecreaseReserveOpponent, args.clone()));
        staged.push(Effect::signal(EffectKind::ModifyConsciousnessDecreaseReserveOwner, args));
    }
    staged.push(Effect::ModifyConsciousness(ResourceChange::new(player, amount, reserve.source_card_id)));
    stage(ctx, staged);
}

pub(super) fn scale_reserve(ctx: &mut HandlerContext<'_>, reserve: &ReserveChange) {
    let player = reserve.player_id;
    let current = ctx.state.player(player).scale;
    let amount = percentage_amount(ctx, reserve, current).unwrap_or(reserve.amount);

    let args = resource_args(player, amount, reserve.source_card_id);
    let mut staged = Vec::with_capacity(2);
    if amount > 0 {
        staged.push(Effect::signal(EffectKind::ModifyScaleIncreaseReserveOwner, args));
    } else if amount < 0 {
        staged.push(Effect::signal(EffectKind::ModifyScaleDecreaseReserveOwner, args));
    }
    staged.push(Effect::ModifyScale(ResourceChange::new(player, amount, reserve.source_card_id)));
    stage(ctx, staged);
}

pub(super) fn durability_reserve(ctx: &mut HandlerContext<'_>, reserve: &DurabilityReserve) {
    let source = ctx.source_card();
    let target = match reserve.card_id {
        None => None,
        Some(CardRef::Id(id)) => Some(id),
        Some(CardRef::Alias(CardAlias::SelfMoneyOnField)) => {
            let Some(source) = &source else {
                return;
            };
            match ctx.state.money_on_field(source.owner) {
                Some(money) => Some(money.id),
                None => {
                    ctx.report(false);
                    return;
                }
            }
        }
        Some(CardRef::Alias(CardAlias::Front)) => {
            let Some(source) = &source else {
                return;
            };
            let opponent = source.owner.opponent();
            let facing = ctx
                .state
                .player(source.owner)
                .piles
                .position(Zone::Field, source.id)
                .and_then(|index| ctx.state.player(opponent).piles.field.get(index).copied());
            match facing {
                Some(card) => Some(card),
                None => return,
            }
        }
        Some(CardRef::Alias(CardAlias::LeftOpponent)) => source
            .as_ref()
            .and_then(|source| ctx.state.player(source.owner.opponent()).piles.field.front().copied()),
        Some(CardRef::Alias(CardAlias::LastAddedCard)) => ctx.trace.and_then(|trace| trace.view.card_id),
        Some(CardRef::Alias(CardAlias::DrawFromDeck)) => None,
    };
    let Some(target) = target else {
        ctx.report(false);
        return;
    };

    let amount = match (reserve.amount_based_on_self_durability, &source) {
        (Some(SelfDurabilitySign::Minus), Some(source)) => -source.current_durability,
        (Some(SelfDurabilitySign::Plus), Some(source)) => source.current_durability,
        _ => reserve.amount,
    };

    let mut staged = Vec::with_capacity(2);
    if let Some(owner) = ctx.state.card(target).map(|card| card.owner) {
        let args = SignalArgs {
            target_player_id: Some(owner),
            card_id: Some(target),
            amount: Some(amount),
            source_card_id: reserve.source_card_id,
            ..SignalArgs::default()
        };
        if amount > 0 {
            staged.push(Effect::signal(EffectKind::ModifyCardDurabilityIncreaseReserveOwner, args));
        } else if amount < 0 {
            staged.push(Effect::signal(EffectKind::ModifyCardDurabilityDecreaseReserveOwner, args));
        }
    }
    staged.push(Effect::ModifyCardDurability(DurabilityChange {
        card_id: target,
        amount,
        source_card_id: reserve.source_card_id,
    }));
    stage(ctx, staged);
}

/// Queue `effects` ahead of everything, processed in the given order.
fn stage(ctx: &mut HandlerContext<'_>, effects: Vec<Effect>) {
    let source = ctx.source;
    ctx.push_front_all(effects.into_iter().map(|effect| QueuedEffect::new(effect, source)).collect());
}
