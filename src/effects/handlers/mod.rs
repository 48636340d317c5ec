//! Effect handlers: one transition per effect kind.
//!
//! Handlers mutate the in-flight state through a `HandlerContext` and queue
//! follow-up effects. Insertion discipline:
//!
//! - `push_front`: runs next, ahead of everything queued. Successive
//!   `push_front` calls stack, so the last one pushed runs first.
//! - `push_back`: runs after everything currently queued.
//! - `defer`: parked in the delayed buffer until the live queue drains.
//!
//! Missing references make a handler return without queueing anything.

mod markers;
mod movement;
mod operation;
mod process;
mod resource;

use crate::cards::CardInstance;
use crate::core::{GameState, InstanceId, PlayerId};
use crate::presentation::{EffectObserver, PresentationRecord};
use crate::rules::decision::PendingDecision;
use crate::stack::{QueuedEffect, Trace};
use crate::triggers::ReactionResolver;

use super::effect::Effect;
use super::kind::EffectKind;
use super::payload::SignalArgs;

/// Mutable view over the state for the duration of one handler call.
pub struct HandlerContext<'a> {
    pub state: &'a mut GameState,
    pub resolver: &'a ReactionResolver,
    observer: &'a mut dyn EffectObserver,
    /// Card that produced the effect being handled.
    pub source: Option<InstanceId>,
    /// Present when the effect is a reaction.
    pub trace: Option<&'a Trace>,
}

impl<'a> HandlerContext<'a> {
    pub fn new(
        state: &'a mut GameState,
        resolver: &'a ReactionResolver,
        observer: &'a mut dyn EffectObserver,
        source: Option<InstanceId>,
        trace: Option<&'a Trace>,
    ) -> Self {
        Self {
            state,
            resolver,
            observer,
            source,
            trace,
        }
    }

    /// Snapshot of the source card.
    #[must_use]
    pub fn source_card(&self) -> Option<CardInstance> {
        self.source.and_then(|id| self.state.card(id).cloned())
    }

    /// Owner of the source card.
    #[must_use]
    pub fn source_owner(&self) -> Option<PlayerId> {
        self.source.and_then(|id| self.state.card(id)).map(|card| card.owner)
    }

    pub fn push_front(&mut self, effect: Effect) {
        let source = self.source;
        self.push_front_from(effect, source);
    }

    pub fn push_front_from(&mut self, effect: Effect, source: Option<InstanceId>) {
        self.state.queue.push_front(QueuedEffect::new(effect, source));
    }

    /// Queue several effects ahead of everything, keeping their order.
    pub fn push_front_all(&mut self, effects: Vec<QueuedEffect>) {
        for entry in effects.into_iter().rev() {
            self.state.queue.push_front(entry);
        }
    }

    pub fn push_back(&mut self, effect: Effect) {
        let source = self.source;
        self.push_back_from(effect, source);
    }

    pub fn push_back_from(&mut self, effect: Effect, source: Option<InstanceId>) {
        self.state.queue.push_back(QueuedEffect::new(effect, source));
    }

    pub fn defer_from(&mut self, effect: Effect, source: Option<InstanceId>) {
        self.state.delayed.push_back(QueuedEffect::new(effect, source));
    }

    pub fn signal_front(&mut self, kind: EffectKind, args: SignalArgs, source: Option<InstanceId>) {
        self.push_front_from(Effect::signal(kind, args), source);
    }

    /// Report the source card's process outcome as content.
    pub fn report(&mut self, success: bool) {
        let Some(card) = self.source_card() else {
            return;
        };
        let kind = if success {
            EffectKind::SuccessProcess
        } else {
            EffectKind::FailedProcess
        };
        let args = SignalArgs {
            player_id: Some(card.owner),
            card_id: Some(card.id),
            target_card_id: Some(card.id),
            ..SignalArgs::default()
        };
        self.signal_front(kind, args, Some(card.id));
    }

    pub fn record(&mut self, record: PresentationRecord) {
        self.observer.on_record(&record);
        self.state.animation_queue.push_back(record);
    }

    /// Suspend processing until the player answers.
    pub fn request(&mut self, decision: PendingDecision) {
        tracing::debug!(kind = ?decision.kind(), player = %decision.player_id, "awaiting input");
        self.state.awaiting_input = Some(decision);
    }
}

/// Run the handler for `effect`.
pub fn apply(ctx: &mut HandlerContext<'_>, effect: &Effect) {
    match effect {
        Effect::PlayerAction(play) => movement::play_card(ctx, play),
        Effect::DrawCard(target) => movement::draw_card(ctx, target),
        Effect::AddCard(add) => movement::add_card(ctx, add),
        Effect::RemoveCard(remove) => movement::remove_card(ctx, remove),
        Effect::MoveCard(mv) => movement::move_card(ctx, mv),

        Effect::ModifyConsciousness(change) => resource::modify_consciousness(ctx, change),
        Effect::ModifyScale(change) => resource::modify_scale(ctx, change),
        Effect::SetConsciousness(change) => resource::set_consciousness(ctx, change),
        Effect::SetScale(change) => resource::set_scale(ctx, change),
        Effect::ModifyCardDurability(change) => resource::modify_card_durability(ctx, change),
        Effect::ModifyCardRequiredScale(change) => resource::modify_required_scale(ctx, change),
        Effect::ModifyFieldLimit(change) => resource::modify_field_limit(ctx, change),
        Effect::ModifyConsciousnessReserve(reserve) => resource::consciousness_reserve(ctx, reserve),
        Effect::ModifyScaleReserve(reserve) => resource::scale_reserve(ctx, reserve),
        Effect::ModifyCardDurabilityReserve(reserve) => resource::durability_reserve(ctx, reserve),

        Effect::CardOperation(op) => operation::card_operation(ctx, op),

        Effect::DealDamageToAllWealth(damage) => process::deal_damage_to_all_wealth(ctx, damage),
        Effect::ChooseAndDiscardIdeology(target) => process::choose_and_discard_ideology(ctx, target),
        Effect::ChooseAndDiscardIdeologyResolved(chosen) => process::discard_chosen_ideology(ctx, chosen),
        Effect::DiscardHandWealthAndDraw(target) => process::cycle_hand_wealth(ctx, target, false),
        Effect::MoveHandWealthToDeckAndDraw(target) => process::cycle_hand_wealth(ctx, target, true),
        Effect::ExposeCardByType(expose) => process::expose_cards(ctx, expose),
        Effect::DiscardIdeologyFromHandAndDeck(target) => process::discard_ideology_from_hand_and_deck(ctx, target),
        Effect::ZeroScaleAndReduceConsciousness(group) => process::zero_scale_and_reduce_consciousness(ctx, group),
        Effect::MoneyCardPlacement(target) => process::merge_money(ctx, target),
        Effect::MoneyCardTurnStart(start) => process::money_turn_start(ctx, start),
        Effect::DiscardHandIdeologyAndAddMoney(target) => process::discard_hand_ideology_for_money(ctx, target),
        Effect::ModifyMoneyDurabilityRandom(roll) => process::roll_money_durability(ctx, roll),
        Effect::ReduceMoneyDurabilityAndGainScale(target) => process::ask_money_conversion(ctx, target),
        Effect::ReduceMoneyDurabilityAndGainScaleResolved(conversion) => process::convert_money(ctx, conversion),
        Effect::AddMoneyForCardsPlayed(target) => process::add_money_for_cards_played(ctx, target),
        Effect::MoneyDurabilityBarrage(barrage) => process::money_barrage(ctx, barrage),
        Effect::AddCardsForDiscarded(discard) => process::add_cards_for_discarded(ctx, discard),
        Effect::AddChoiceCardToHand(choice) => process::ask_template(ctx, choice),
        Effect::ChooseAndMoveCardFromPile(choice) => process::ask_pile_card(ctx, choice),
        Effect::ChooseAndModifyWealthDurability(choice) => process::ask_wealth_for_durability(ctx, choice),
        Effect::ChooseAndModifyWealthDurabilityResolved(choice) => process::modify_chosen_wealth(ctx, choice),
        Effect::ReturnHighestScaleCardToDeck(target) => process::return_highest_scale_card(ctx, target),
        Effect::AllWealthBoost(change) => process::all_wealth_boost(ctx, change),
        Effect::ChooseAndBounceWealth(choice) => process::ask_wealth_to_bounce(ctx, choice),
        Effect::ChooseAndBounceWealthResolved(choice) => process::bounce_chosen_wealth(ctx, choice),
        Effect::DrawDiscountedCard(draw) => process::draw_discounted(ctx, draw),
        Effect::CounterAttack(counter) => process::counter_attack(ctx, counter),
        Effect::AddCardByDeckCount(branch) => process::add_card_by_deck_count(ctx, branch),

        Effect::AddCorrection(add) => markers::add_correction(ctx, add),
        Effect::SkipEffect(skip) => markers::register_skip(ctx, skip),
        Effect::CheckGameOver | Effect::Signal(_) => {}
    }
}
