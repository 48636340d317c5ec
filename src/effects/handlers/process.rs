//! Composite `PROCESS_*` effects.
//!
//! Each one inspects the state, then either queues primitives at the front
//! (listed here in the order they will run) or asks a player for a decision.

use super::resource::percentage_of;
use super::HandlerContext;
use crate::cards::{CardInstance, CardKind};
use crate::core::{InstanceId, PlayerId};
use crate::effects::{
    AddCard, BounceChoice, CardOperation, ChosenCard, CounterAttack, DealDamageToAllWealth,
    DeckCountBranch, DiscardForCards, DiscountedDraw, DurabilityReserve, DurabilityRoll, Effect, EffectKind,
    ExposeCards, MoneyBarrage, MoneyCardTarget, MoneyCardTurnStart, MoneyConversion, MoveCard, PileChoice,
    PlayerGroup, PlayerSet, PlayerTarget, ReserveChange, ResourceChange, RollKind, SignalArgs, TemplateChoice,
    WealthDurabilityChoice,
};
use crate::presentation::PresentationRecord;
use crate::rules::decision::{DecisionPrompt, PendingDecision};
use crate::stack::QueuedEffect;
use crate::zones::{DeckPosition, Zone};

/// Queue `effects` at the front so they run in the given order.
fn then(ctx: &mut HandlerContext<'_>, effects: Vec<Effect>) {
    let source = ctx.source;
    ctx.push_front_all(effects.into_iter().map(|effect| QueuedEffect::new(effect, source)).collect());
}

/// Ask `player` to decide. Decisions need a prompting card.
fn ask(ctx: &mut HandlerContext<'_>, player: PlayerId, prompt: DecisionPrompt) {
    match ctx.source {
        Some(source) => ctx.request(PendingDecision::new(player, source, prompt)),
        None => tracing::trace!(%player, "decision without a prompting card dropped"),
    }
}

fn move_to(ctx: &HandlerContext<'_>, player: PlayerId, card: InstanceId, from: Zone, to: Zone) -> Effect {
    Effect::MoveCard(MoveCard::new(player, card, from, to).from_source(ctx.source))
}

fn durability(ctx: &HandlerContext<'_>, card: InstanceId, amount: i64) -> Effect {
    Effect::ModifyCardDurabilityReserve(DurabilityReserve::new(card, amount, ctx.source))
}

fn add_money(ctx: &HandlerContext<'_>, player: PlayerId, durability: i64) -> Effect {
    let money = ctx.state.config.names.money.clone();
    Effect::AddCard(
        AddCard::new(player, money, Zone::Hand)
            .with_durability(durability)
            .from_source(ctx.source),
    )
}

fn hand_cards(ctx: &HandlerContext<'_>, player: PlayerId, kind: CardKind) -> Vec<InstanceId> {
    ctx.state
        .cards_in(player, Zone::Hand)
        .filter(|card| card.kind == kind)
        .map(|card| card.id)
        .collect()
}

fn money_on_field(ctx: &HandlerContext<'_>, player: PlayerId) -> Option<CardInstance> {
    ctx.state.money_on_field(player).cloned()
}

fn len_i64(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

pub(super) fn deal_damage_to_all_wealth(ctx: &mut HandlerContext<'_>, damage: &DealDamageToAllWealth) {
    if damage.amount == 0 {
        return;
    }
    let op = CardOperation::wealth_durability(ctx.source_owner(), damage.player_ids.clone(), -damage.amount);
    let mut effects = vec![Effect::CardOperation(op)];
    if let Some(next) = &damage.next_effect {
        effects.push((**next).clone());
    }
    then(ctx, effects);
}

/// Offer both ideology slots.
pub(super) fn choose_and_discard_ideology(ctx: &mut HandlerContext<'_>, target: &PlayerTarget) {
    let player = target.player_id;
    let options: Vec<InstanceId> = [player, player.opponent()]
        .into_iter()
        .filter_map(|seat| ctx.state.player(seat).piles.ideology)
        .collect();
    if options.is_empty() {
        return;
    }
    let resume = Effect::ChooseAndDiscardIdeologyResolved(ChosenCard {
        player_id: Some(player),
        card_id: None,
    });
    ask(ctx, player, DecisionPrompt::ChoiceCardForEffect { options, resume });
}

pub(super) fn discard_chosen_ideology(ctx: &mut HandlerContext<'_>, chosen: &ChosenCard) {
    let Some(card) = chosen.card_id else {
        return;
    };
    let Some(holder) = PlayerId::all().find(|seat| ctx.state.player(*seat).piles.ideology == Some(card)) else {
        return;
    };
    let discard = move_to(ctx, holder, card, Zone::Ideology, Zone::Discard);
    ctx.push_front(discard);
}

/// Replace every wealth card in hand: the cards leave first, then one draw
/// per card.
pub(super) fn cycle_hand_wealth(ctx: &mut HandlerContext<'_>, target: &PlayerTarget, to_deck: bool) {
    let player = target.player_id;
    let cards = hand_cards(ctx, player, CardKind::Wealth);
    if cards.is_empty() {
        return;
    }
    let mut effects: Vec<Effect> = cards
        .iter()
        .map(|card| {
            let mut mv = MoveCard::new(player, *card, Zone::Hand, Zone::Discard).from_source(ctx.source);
            if to_deck {
                mv.destination_pile = Zone::Deck;
                mv.position = Some(DeckPosition::Random);
            }
            Effect::MoveCard(mv)
        })
        .collect();
    effects.extend(
        cards
            .iter()
            .map(|_| Effect::MoveCard(MoveCard::draw(player).from_source(ctx.source))),
    );
    then(ctx, effects);
}

/// Reveal random matching cards and report them with `SUCCESS_PROCESS`.
pub(super) fn expose_cards(ctx: &mut HandlerContext<'_>, expose: &ExposeCards) {
    let player = expose.player_id;
    let mut candidates: Vec<InstanceId> = expose
        .source_piles
        .iter()
        .flat_map(|zone| ctx.state.cards_in(player, *zone).collect::<Vec<_>>())
        .filter(|card| expose.card_type.map_or(true, |kind| card.kind == kind))
        .map(|card| card.id)
        .collect();
    if candidates.is_empty() {
        ctx.report(false);
        return;
    }
    ctx.state.rng.shuffle(&mut candidates);
    candidates.truncate(expose.count);
    ctx.state.exposed_cards.extend(candidates.iter().copied());
    tracing::debug!(%player, exposed = ?candidates, "cards exposed");

    let Some(source) = ctx.source_card() else {
        return;
    };
    let args = SignalArgs {
        player_id: Some(source.owner),
        card_id: Some(source.id),
        target_card_id: Some(source.id),
        exposed_cards: candidates,
        ..SignalArgs::default()
    };
    ctx.signal_front(EffectKind::SuccessProcess, args, Some(source.id));
}

pub(super) fn discard_ideology_from_hand_and_deck(ctx: &mut HandlerContext<'_>, target: &PlayerTarget) {
    let player = target.player_id;
    let effects: Vec<Effect> = [Zone::Hand, Zone::Deck]
        .into_iter()
        .flat_map(|zone| {
            ctx.state
                .cards_in(player, zone)
                .filter(|card| card.is_ideology())
                .map(|card| move_to(ctx, player, card.id, zone, Zone::Discard))
                .collect::<Vec<_>>()
        })
        .collect();
    then(ctx, effects);
}

/// Every scale first drops to zero, then each player loses the scale they
/// had as consciousness.
pub(super) fn zero_scale_and_reduce_consciousness(ctx: &mut HandlerContext<'_>, group: &PlayerGroup) {
    let Some(acting) = ctx.source_owner() else {
        return;
    };
    let before: Vec<(PlayerId, i64)> = group
        .player_ids
        .resolve(acting)
        .into_iter()
        .map(|player| (player, ctx.state.player(player).scale))
        .collect();

    let source = ctx.source;
    let mut effects: Vec<Effect> = before
        .iter()
        .map(|(player, _)| Effect::SetScale(ResourceChange::new(*player, 0, source)))
        .collect();
    effects.extend(
        before
            .iter()
            .filter(|(_, scale)| *scale > 0)
            .map(|(player, scale)| Effect::ModifyConsciousnessReserve(ReserveChange::new(*player, -scale, source))),
    );
    then(ctx, effects);
}

/// A newly placed money card merges into the money already on the field.
pub(super) fn merge_money(ctx: &mut HandlerContext<'_>, target: &MoneyCardTarget) {
    let player = target.player_id;
    if !ctx.state.player(player).piles.contains(Zone::Field, target.card_id) {
        return;
    }
    let Some(played) = ctx.state.card(target.card_id).cloned() else {
        return;
    };
    let money = &ctx.state.config.names.money;
    let Some(existing) = ctx
        .state
        .cards_in(player, Zone::Field)
        .find(|card| &card.name == money && card.id != played.id)
        .map(|card| card.id)
    else {
        return;
    };
    let effects = vec![
        move_to(ctx, player, played.id, Zone::Field, Zone::Discard),
        durability(ctx, existing, played.current_durability),
    ];
    then(ctx, effects);
}

/// Trade the two cheapest hand cards for a capitalism card, and take the
/// money back into hand.
pub(super) fn money_turn_start(ctx: &mut HandlerContext<'_>, start: &MoneyCardTurnStart) {
    let player = start.player_id;
    if !ctx.state.player(player).piles.contains(Zone::Field, start.card_id) {
        return;
    }
    let Some(money) = ctx.state.card(start.card_id).cloned() else {
        return;
    };
    if start.condition_durability_ge_30 && money.current_durability < 30 {
        return;
    }

    let mut hand: Vec<CardInstance> = ctx.state.cards_in(player, Zone::Hand).cloned().collect();
    hand.sort_by_key(|card| card.required_scale);
    hand.truncate(2);

    let mut effects: Vec<Effect> = hand
        .iter()
        .map(|card| move_to(ctx, player, card.id, Zone::Hand, Zone::Discard))
        .collect();
    if !hand.is_empty() {
        let capitalism = ctx.state.config.names.capitalism.clone();
        effects.push(Effect::AddCard(
            AddCard::new(player, capitalism, Zone::Hand).from_source(ctx.source),
        ));
    }
    effects.push(Effect::MoveCard(
        MoveCard::new(player, money.id, Zone::Field, Zone::Hand)
            .maintained()
            .from_source(ctx.source),
    ));
    then(ctx, effects);
}

pub(super) fn discard_hand_ideology_for_money(ctx: &mut HandlerContext<'_>, target: &PlayerTarget) {
    let player = target.player_id;
    let cards = hand_cards(ctx, player, CardKind::Ideology);
    if cards.is_empty() {
        return;
    }
    let mut effects: Vec<Effect> = cards
        .iter()
        .map(|card| move_to(ctx, player, *card, Zone::Hand, Zone::Discard))
        .collect();
    effects.push(add_money(ctx, player, len_i64(cards.len())));
    then(ctx, effects);
}

/// Coin flip: lose `value1` percent or gain `value2` percent, floored.
pub(super) fn roll_money_durability(ctx: &mut HandlerContext<'_>, roll: &DurabilityRoll) {
    let Some(money) = money_on_field(ctx, roll.player_id) else {
        return;
    };
    let current = money.current_durability;
    let amount = match roll.change_type {
        RollKind::PercentDecreaseOrPercentIncrease => {
            if ctx.state.rng.flip() {
                -percentage_of(current, roll.value1, true)
            } else {
                percentage_of(current, roll.value2, true)
            }
        }
    };
    tracing::debug!(player = %roll.player_id, current, amount, "money durability roll");
    if amount != 0 {
        let reserve = durability(ctx, money.id, amount);
        ctx.push_front(reserve);
    }
}

pub(super) fn ask_money_conversion(ctx: &mut HandlerContext<'_>, target: &PlayerTarget) {
    let player = target.player_id;
    let Some(money) = money_on_field(ctx, player) else {
        return;
    };
    let resume = Effect::ReduceMoneyDurabilityAndGainScaleResolved(MoneyConversion {
        player_id: player,
        money_card_id: money.id,
        amount: 0,
        source_card_id: ctx.source,
    });
    let prompt = DecisionPrompt::ChoiceNumber {
        min: 0,
        max: money.current_durability,
        resume,
    };
    ask(ctx, player, prompt);
}

pub(super) fn convert_money(ctx: &mut HandlerContext<'_>, conversion: &MoneyConversion) {
    if conversion.amount <= 0 {
        return;
    }
    let source = conversion.source_card_id;
    let effects = vec![
        Effect::ModifyCardDurabilityReserve(DurabilityReserve::new(
            conversion.money_card_id,
            -conversion.amount,
            source,
        )),
        Effect::ModifyScaleReserve(ReserveChange::new(conversion.player_id, conversion.amount, source)),
    ];
    then(ctx, effects);
}

pub(super) fn add_money_for_cards_played(ctx: &mut HandlerContext<'_>, target: &PlayerTarget) {
    let played = ctx.state.player(target.player_id).cards_played_this_turn;
    if played == 0 {
        return;
    }
    let add = add_money(ctx, target.player_id, i64::from(played));
    ctx.push_front(add);
}

/// Spend the field money: it is discarded, then one hit per point of its
/// durability lands on a random opposing wealth card.
pub(super) fn money_barrage(ctx: &mut HandlerContext<'_>, barrage: &MoneyBarrage) {
    let Some(money) = money_on_field(ctx, barrage.player_id) else {
        return;
    };
    if money.current_durability <= 0 {
        return;
    }
    let targets = ctx.state.wealth_on_field(barrage.target_player_id);
    if targets.is_empty() {
        return;
    }

    let mut effects = vec![move_to(ctx, barrage.player_id, money.id, Zone::Field, Zone::Discard)];
    for _ in 0..money.current_durability {
        let Some(card) = ctx.state.rng.choose(&targets).copied() else {
            break;
        };
        effects.push(durability(ctx, card, barrage.amount));
    }
    then(ctx, effects);
}

pub(super) fn add_cards_for_discarded(ctx: &mut HandlerContext<'_>, discard: &DiscardForCards) {
    let player = discard.player_id;
    let cards = hand_cards(ctx, player, discard.card_type_to_discard);
    if cards.is_empty() {
        return;
    }
    let mut effects: Vec<Effect> = cards
        .iter()
        .map(|card| move_to(ctx, player, *card, Zone::Hand, Zone::Discard))
        .collect();
    effects.extend(cards.iter().map(|_| {
        Effect::AddCard(
            AddCard::new(player, discard.card_template_name.clone(), discard.destination_pile)
                .from_source(ctx.source),
        )
    }));
    then(ctx, effects);
}

pub(super) fn ask_template(ctx: &mut HandlerContext<'_>, choice: &TemplateChoice) {
    let prompt = DecisionPrompt::ChoiceCardToAdd {
        options: choice.options.clone(),
    };
    ask(ctx, choice.player_id, prompt);
}

pub(super) fn ask_pile_card(ctx: &mut HandlerContext<'_>, choice: &PileChoice) {
    let player = choice.player_id;
    let options: Vec<InstanceId> = choice
        .source_piles
        .iter()
        .flat_map(|zone| ctx.state.cards_in(player, *zone).collect::<Vec<_>>())
        .filter(|card| choice.card_type.map_or(true, |kind| card.kind == kind))
        .map(|card| card.id)
        .collect();
    if options.is_empty() {
        return;
    }
    let prompt = DecisionPrompt::ChoiceCardFromPile {
        options,
        source_piles: choice.source_piles.clone(),
        destination_pile: choice.destination_pile,
    };
    ask(ctx, player, prompt);
}

pub(super) fn ask_wealth_for_durability(ctx: &mut HandlerContext<'_>, choice: &WealthDurabilityChoice) {
    let options = ctx.state.wealth_on_field(choice.target_player_id);
    if options.is_empty() {
        ctx.report(false);
        return;
    }
    let resume = Effect::ChooseAndModifyWealthDurabilityResolved(choice.clone());
    ask(ctx, choice.player_id, DecisionPrompt::ChoiceCardForEffect { options, resume });
}

pub(super) fn modify_chosen_wealth(ctx: &mut HandlerContext<'_>, choice: &WealthDurabilityChoice) {
    let target = choice.card_id.and_then(|id| {
        PlayerId::all()
            .find(|seat| ctx.state.player(*seat).piles.contains(Zone::Field, id))
            .and_then(|_| ctx.state.card(id).cloned())
    });
    let Some(target) = target else {
        ctx.report(false);
        return;
    };

    let reserve = durability(ctx, target.id, choice.amount);
    ctx.push_front(reserve);
    if choice.bonus_effect_if_money && target.name == ctx.state.config.names.money {
        let bonus = ReserveChange::new(choice.player_id, choice.bonus_scale_amount, ctx.source);
        ctx.push_front(Effect::ModifyScaleReserve(bonus));
    }
    ctx.report(true);
}

/// The hand card with the highest required scale is shuffled into the deck.
pub(super) fn return_highest_scale_card(ctx: &mut HandlerContext<'_>, target: &PlayerTarget) {
    let player = target.player_id;
    let highest = ctx
        .state
        .cards_in(player, Zone::Hand)
        .fold(None::<&CardInstance>, |best, card| match best {
            Some(best) if best.required_scale >= card.required_scale => Some(best),
            _ => Some(card),
        })
        .map(|card| card.id);
    let Some(card) = highest else {
        ctx.report(false);
        return;
    };
    let mv = MoveCard::new(player, card, Zone::Hand, Zone::Deck)
        .at(DeckPosition::Random)
        .from_source(ctx.source);
    ctx.push_front(Effect::MoveCard(mv));
    ctx.report(true);
}

pub(super) fn all_wealth_boost(ctx: &mut HandlerContext<'_>, change: &ResourceChange) {
    let player = change.player_id;
    let op = CardOperation::wealth_durability(Some(player), PlayerSet::One(player), change.amount);
    ctx.push_front(Effect::CardOperation(op));
}

pub(super) fn ask_wealth_to_bounce(ctx: &mut HandlerContext<'_>, choice: &BounceChoice) {
    let options = ctx.state.wealth_on_field(choice.target_player_id);
    if options.is_empty() {
        ctx.report(false);
        return;
    }
    let resume = Effect::ChooseAndBounceWealthResolved(choice.clone());
    ask(ctx, choice.player_id, DecisionPrompt::ChoiceCardForEffect { options, resume });
}

pub(super) fn bounce_chosen_wealth(ctx: &mut HandlerContext<'_>, choice: &BounceChoice) {
    let Some(card) = choice.card_id else {
        // Quirk kept from the shipped rules: this failure names no target
        // card, so the bouncing card's own FAILED_PROCESS reactions never
        // match it.
        if let Some(source) = ctx.source_card() {
            let args = SignalArgs {
                player_id: Some(source.owner),
                card_id: Some(source.id),
                ..SignalArgs::default()
            };
            ctx.signal_front(EffectKind::FailedProcess, args, Some(source.id));
        }
        return;
    };
    let bounce = move_to(ctx, choice.target_player_id, card, Zone::Field, Zone::Hand);
    ctx.push_front(bounce);
    ctx.report(true);
}

/// Pull random matching cards from the deck straight into hand at a
/// discount. No draw signals fire.
pub(super) fn draw_discounted(ctx: &mut HandlerContext<'_>, draw: &DiscountedDraw) {
    let player = draw.player_id;
    let mut matching: Vec<InstanceId> = ctx
        .state
        .cards_in(player, Zone::Deck)
        .filter(|card| card.kind == draw.card_type)
        .map(|card| card.id)
        .collect();

    for _ in 0..draw.amount {
        if matching.is_empty() {
            break;
        }
        let index = ctx.state.rng.gen_index(matching.len());
        let id = matching.remove(index);
        ctx.state.player_mut(player).piles.remove(Zone::Deck, id);

        let full = ctx.state.player(player).hand_is_full();
        let settled = if full { Zone::Discard } else { Zone::Hand };
        if let Some(card) = ctx.state.card_mut(id) {
            let reduction = match (draw.scale_reduction, draw.scale_reduction_percentage) {
                (Some(flat), _) => flat,
                (None, Some(pct)) => percentage_of(card.required_scale, pct, draw.round_down),
                (None, None) => 0,
            };
            card.required_scale = (card.required_scale - reduction).max(0);
            card.location = settled;
        }
        let piles = &mut ctx.state.player_mut(player).piles;
        if full {
            piles.discard.push_back(id);
            ctx.record(PresentationRecord::LimitWarning {
                player_id: player,
                card_id: id,
            });
        } else {
            piles.hand.push_back(id);
        }
        ctx.record(PresentationRecord::CardMoved {
            card_id: id,
            player_id: player,
            from: Zone::Deck,
            to: settled,
        });
    }
}

/// Strike back at whatever card caused the triggering effect.
pub(super) fn counter_attack(ctx: &mut HandlerContext<'_>, counter: &CounterAttack) {
    let Some(attacker) = ctx.trace.and_then(|trace| trace.source_card_id) else {
        return;
    };
    if counter.counter_damage == 0 {
        return;
    }
    let reserve = durability(ctx, attacker, -counter.counter_damage);
    ctx.push_front(reserve);
}

pub(super) fn add_card_by_deck_count(ctx: &mut HandlerContext<'_>, branch: &DeckCountBranch) {
    let player = branch.player_id;
    let template = if ctx.state.player(player).piles.deck.len() >= branch.threshold {
        &branch.card_if_above
    } else {
        &branch.card_if_below
    };
    let add = AddCard::new(player, template.clone(), Zone::Hand).from_source(ctx.source);
    ctx.push_front(Effect::AddCard(add));
}
