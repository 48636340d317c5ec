//! The reaction resolver.
//!
//! After every processed effect, each card in play, in hand, in a discard
//! pile or in a deck (plus the source card while it sits in the transient
//! play zone) is matched against the effect:
//!
//! 1. Look up the card's templates for the effect kind.
//! 2. Scope guard: this-card, owner and opponent trigger families.
//! 3. Zone guard: field cards react from the field or ideology slot, events
//!    from the play zone, apart from a short allow-list.
//! 4. Per template: named condition, card rule (raw), placeholders, card
//!    rule (resolved), argument gates, amount formulas.
//! 5. Decode into a typed effect sourced from the reacting card.

use serde_json::Value;

use crate::cards::{CardInstance, CardKind};
use crate::core::{GameRng, GameState, InstanceId};
use crate::effects::{AddCard, Effect, EffectKind, EffectView, TriggerScope};
use crate::stack::QueuedEffect;
use crate::zones::Zone;

use super::condition::{argument_gates_pass, named_condition_holds};
use super::context::ReactionContext;
use super::placeholders::{
    resolve_amount, resolve_current_pile, resolve_initial_durability, resolve_references,
};
use super::rules::{CardRule, CardRules, RuleVerdict, Stage};
use super::table::TriggerTemplate;

/// Turns processed effects into the reactions they provoke.
///
/// ```
/// use ideology_ccg::triggers::ReactionResolver;
///
/// let resolver = ReactionResolver::new();
/// assert!(resolver.lingers_after_play("官僚主義"));
/// assert!(!resolver.lingers_after_play("演説"));
/// ```
#[derive(Clone, Debug)]
pub struct ReactionResolver {
    rules: CardRules,
}

impl Default for ReactionResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ReactionResolver {
    /// Resolver with the built-in card rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(CardRules::builtin())
    }

    #[must_use]
    pub fn with_rules(rules: CardRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &CardRules {
        &self.rules
    }

    /// Whether an event card with this name stays in the play zone after use.
    #[must_use]
    pub fn lingers_after_play(&self, name: &str) -> bool {
        self.rules.get(name).is_some_and(|rule| rule.lingers_after_play())
    }

    /// Reactions to `entry`, in scan order, each sourced from its reacting card.
    ///
    /// Takes the state mutably only to draw from its RNG (`"random"` players).
    pub fn resolve(&self, state: &mut GameState, entry: &QueuedEffect) -> Vec<QueuedEffect> {
        let trigger = entry.effect.kind();
        let view = entry.effect.view();
        let mut rng = state.rng.clone();
        let state_ref: &GameState = state;

        let mut reactions = Vec::new();
        for id in reacting_cards(state_ref, entry.source) {
            let Some(card) = state_ref.card(id) else {
                continue;
            };
            let Some(template) = state_ref.template(&card.name) else {
                continue;
            };
            let templates = template.reactions_to(trigger);
            if templates.is_empty() {
                continue;
            }
            let ctx = ReactionContext::new(state_ref, card, trigger, &view);
            reactions.extend(self.card_reactions(&ctx, templates, &mut rng));
        }

        state.rng = rng;
        reactions
    }

    fn card_reactions(
        &self,
        ctx: &ReactionContext<'_>,
        templates: &[TriggerTemplate],
        rng: &mut GameRng,
    ) -> Vec<QueuedEffect> {
        let card = ctx.card;
        if !in_scope(ctx) {
            tracing::trace!(card = %card.id, trigger = %ctx.trigger, "out of scope");
            return Vec::new();
        }
        let rule = self.rules.get(&card.name);
        if !in_reacting_zone(ctx, rule) {
            tracing::trace!(card = %card.id, zone = %card.location, trigger = %ctx.trigger, "not in a reacting zone");
            return Vec::new();
        }

        let mut reactions = Vec::with_capacity(templates.len());
        for template in templates {
            if let Some(condition) = &template.condition {
                if !named_condition_holds(condition, ctx) {
                    tracing::trace!(card = %card.id, check = %condition.check, "condition failed");
                    continue;
                }
            }
            match self.instantiate(ctx, rule, template, rng) {
                Ok(Some(effect)) => {
                    tracing::debug!(card = %card.id, name = %card.name, reaction = %effect.kind(), "reaction");
                    reactions.push(QueuedEffect::new(effect, Some(card.id)));
                }
                Ok(None) => {}
                Err(Abort) => return Vec::new(),
            }
        }
        reactions
    }

    /// Build one concrete effect from a template.
    fn instantiate(
        &self,
        ctx: &ReactionContext<'_>,
        rule: Option<&dyn CardRule>,
        template: &TriggerTemplate,
        rng: &mut GameRng,
    ) -> Result<Option<Effect>, Abort> {
        let card = ctx.card;
        let mut args = template.args.clone();

        if let Some(rule) = rule {
            if !verdict(rule.check(ctx, template, Stage::Raw, &mut args))? {
                return Ok(None);
            }
        }
        resolve_current_pile(&mut args, ctx);

        if template.effect_type == EffectKind::ProcessAddCardConditionalOnDeckCount {
            return Ok(deck_count_branch(ctx, &args));
        }

        if let Err(unresolved) = resolve_references(&mut args, ctx, rng) {
            tracing::trace!(card = %card.id, placeholder = unresolved.0, "placeholder unresolved");
            return Ok(None);
        }
        if let Some(rule) = rule {
            if !verdict(rule.check(ctx, template, Stage::Resolved, &mut args))? {
                return Ok(None);
            }
        }
        if !argument_gates_pass(&args, ctx) {
            tracing::trace!(card = %card.id, "argument gate failed");
            return Ok(None);
        }
        resolve_initial_durability(&mut args, ctx);
        if let Err(unresolved) = resolve_amount(&mut args, ctx) {
            tracing::trace!(card = %card.id, formula = unresolved.0, "amount unresolved");
            return Ok(None);
        }
        args.insert("source_card_id".into(), Value::from(card.id.0));

        match Effect::decode(template.effect_type, Value::Object(args)) {
            Ok(effect) => Ok(Some(effect)),
            Err(err) => {
                tracing::warn!(card = %card.name, effect = %template.effect_type, error = %err, "dropping undecodable reaction");
                Ok(None)
            }
        }
    }
}

/// Every other reaction of the card is dropped.
#[derive(Debug)]
struct Abort;

fn verdict(verdict: RuleVerdict) -> Result<bool, Abort> {
    match verdict {
        RuleVerdict::Keep => Ok(true),
        RuleVerdict::Skip => Ok(false),
        RuleVerdict::Abort => Err(Abort),
    }
}

/// Candidate reacting cards: both players' piles in seat order, then the
/// source card while it is being played.
fn reacting_cards(state: &GameState, source: Option<InstanceId>) -> Vec<InstanceId> {
    let mut cards: Vec<InstanceId> = state
        .players
        .iter()
        .flat_map(|(_, player)| player.piles.scan_order())
        .collect();
    if let Some(source) = source {
        let playing = state
            .card(source)
            .is_some_and(|card| card.location == Zone::PlayingEvent);
        if playing && !cards.contains(&source) {
            cards.push(source);
        }
    }
    cards
}

fn in_scope(ctx: &ReactionContext<'_>) -> bool {
    let view: &EffectView = ctx.view;
    let in_scope = match ctx.trigger.scope() {
        Some(TriggerScope::ThisCard) => {
            let aimed = if ctx.trigger == EffectKind::PlayEventThis {
                view.card_id
            } else {
                view.target_card_id
            };
            aimed == Some(ctx.card.id)
        }
        Some(TriggerScope::Opponent) => view.player_id == Some(ctx.opponent()),
        Some(TriggerScope::Owner) => view.acting_player() == Some(ctx.owner()),
        None => true,
    };
    // A card reacts to its own play through its this-card triggers only.
    let own_play = ctx.trigger == EffectKind::PlayerPlayCardAction && view.card_id == Some(ctx.card.id);
    in_scope && !own_play
}

fn in_reacting_zone(ctx: &ReactionContext<'_>, rule: Option<&dyn CardRule>) -> bool {
    let card: &CardInstance = ctx.card;
    let natural = match card.kind {
        CardKind::Wealth | CardKind::Ideology => card.location.is_in_play(),
        CardKind::Event => card.location == Zone::PlayingEvent,
    };
    if natural {
        return true;
    }
    let allowed = match card.kind {
        CardKind::Wealth | CardKind::Ideology => matches!(
            ctx.trigger,
            EffectKind::CardDiscardedThis | EffectKind::WealthDurabilityZeroThis
        ),
        CardKind::Event => matches!(ctx.trigger, EffectKind::CardDiscardedThis | EffectKind::CardDrawnThis),
    };
    allowed || rule.is_some_and(|rule| rule.allows_out_of_zone(ctx.trigger, card))
}

/// `PROCESS_ADD_CARD_CONDITIONAL_ON_DECK_COUNT` picks its card now.
fn deck_count_branch(ctx: &ReactionContext<'_>, args: &super::table::ArgMap) -> Option<Effect> {
    let threshold = args.get("threshold").and_then(Value::as_u64)?;
    let deck = ctx.owner_state().piles.deck.len() as u64;
    let key = if deck >= threshold { "card_if_above" } else { "card_if_below" };
    let name = args.get(key).and_then(Value::as_str)?;
    Some(Effect::AddCard(
        AddCard::new(ctx.owner(), name, Zone::Hand).from_source(Some(ctx.card.id)),
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::cards::{CardRegistry, CardTemplate};
    use crate::core::{PlayerId, RulesConfig};
    use crate::effects::{ResourceChange, SignalArgs};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn reserve(player: &str, amount: i64) -> TriggerTemplate {
        TriggerTemplate::new(EffectKind::ModifyConsciousnessReserve)
            .with_arg("player_id", json!(player))
            .with_arg("amount", json!(amount))
    }

    fn registry() -> CardRegistry {
        let mut registry = CardRegistry::new();
        registry.register(
            CardTemplate::new("見張り", CardKind::Wealth)
                .with_durability(3)
                .with_trigger(EffectKind::CardPlacedOpponent, reserve("opponent", -1))
                .with_trigger(EffectKind::CardPlacedThis, reserve("self", 2))
                .with_trigger(EffectKind::CardDiscardedThis, reserve("self", 5)),
        );
        registry.register(
            CardTemplate::new("演説", CardKind::Event)
                .with_trigger(EffectKind::PlayEventThis, reserve("opponent", -4))
                .with_trigger(
                    EffectKind::PlayEventThis,
                    reserve("self", 1).with_condition("consciousness_decreased_by_opponent"),
                ),
        );
        registry.register(
            CardTemplate::new("分岐", CardKind::Wealth).with_trigger(
                EffectKind::StartTurnOwner,
                TriggerTemplate::new(EffectKind::ProcessAddCardConditionalOnDeckCount)
                    .with_arg("player_id", json!("self"))
                    .with_arg("threshold", json!(2))
                    .with_arg("card_if_above", json!("見張り"))
                    .with_arg("card_if_below", json!("演説")),
            ),
        );
        registry.register(
            CardTemplate::new("壊れ", CardKind::Wealth).with_trigger(
                EffectKind::StartTurnOwner,
                TriggerTemplate::new(EffectKind::ModifyScale).with_arg("player_id", json!("nobody")),
            ),
        );
        registry.register(
            CardTemplate::new("アナーキズム", CardKind::Ideology)
                .with_trigger(EffectKind::CardPlacedOwner, reserve("self", 1))
                .with_trigger(EffectKind::CardPlacedOwner, reserve("opponent", -1)),
        );
        registry.register(CardTemplate::new("資本主義", CardKind::Ideology));
        registry
    }

    fn state() -> GameState {
        GameState::new(Arc::new(registry()), Arc::new(RulesConfig::default()), 21)
    }

    fn placed(kind: EffectKind, player: PlayerId, card: InstanceId) -> QueuedEffect {
        let args = SignalArgs {
            player_id: Some(player),
            card_id: Some(card),
            target_card_id: Some(card),
            ..SignalArgs::default()
        };
        QueuedEffect::new(Effect::signal(kind, args), Some(card))
    }

    fn players(reactions: &[QueuedEffect]) -> Vec<(PlayerId, i64)> {
        reactions
            .iter()
            .filter_map(|reaction| match &reaction.effect {
                Effect::ModifyConsciousnessReserve(reserve) => Some((reserve.player_id, reserve.amount)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_opponent_scope() {
        let mut state = state();
        let watcher = state.deal_card("見張り", P0, Zone::Field).unwrap();
        let other = state.deal_card("見張り", P1, Zone::Field).unwrap();
        let resolver = ReactionResolver::new();

        let reactions = resolver.resolve(&mut state, &placed(EffectKind::CardPlacedOpponent, P1, other));
        assert_eq!(reactions.len(), 1);
        assert_eq!(reactions[0].source, Some(watcher));
        assert_eq!(players(&reactions), vec![(P1, -1)]);
        match &reactions[0].effect {
            Effect::ModifyConsciousnessReserve(reserve) => assert_eq!(reserve.source_card_id, Some(watcher)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_this_card_scope() {
        let mut state = state();
        let first = state.deal_card("見張り", P0, Zone::Field).unwrap();
        state.deal_card("見張り", P0, Zone::Field).unwrap();
        let resolver = ReactionResolver::new();

        let reactions = resolver.resolve(&mut state, &placed(EffectKind::CardPlacedThis, P0, first));
        assert_eq!(reactions.len(), 1);
        assert_eq!(reactions[0].source, Some(first));
        assert_eq!(players(&reactions), vec![(P0, 2)]);
    }

    #[test]
    fn test_zone_guard_allows_discard_triggers_only() {
        let mut state = state();
        let discarded = state.deal_card("見張り", P0, Zone::Discard).unwrap();
        let resolver = ReactionResolver::new();

        let placed_this = resolver.resolve(&mut state, &placed(EffectKind::CardPlacedThis, P0, discarded));
        assert!(placed_this.is_empty());

        let discarded_this = resolver.resolve(&mut state, &placed(EffectKind::CardDiscardedThis, P0, discarded));
        assert_eq!(players(&discarded_this), vec![(P0, 5)]);
    }

    #[test]
    fn test_event_reacts_from_play_zone() {
        let mut state = state();
        let speech = state.deal_card("演説", P0, Zone::Hand).unwrap();
        let resolver = ReactionResolver::new();
        let play = QueuedEffect::new(
            Effect::signal(
                EffectKind::PlayEventThis,
                SignalArgs {
                    player_id: Some(P0),
                    card_id: Some(speech),
                    ..SignalArgs::default()
                },
            ),
            Some(speech),
        );

        assert!(resolver.resolve(&mut state, &play).is_empty());

        state.player_mut(P0).piles.hand.clear();
        state.card_mut(speech).unwrap().location = Zone::PlayingEvent;
        let reactions = resolver.resolve(&mut state, &play);
        assert_eq!(players(&reactions), vec![(P1, -4)]);

        state.set_temp(crate::core::state::LAST_CONSCIOUSNESS_CHANGE, -4);
        let reactions = resolver.resolve(&mut state, &play);
        assert_eq!(players(&reactions), vec![(P1, -4), (P0, 1)]);
    }

    #[test]
    fn test_deck_count_branch_expands() {
        let mut state = state();
        let branch = state.deal_card("分岐", P0, Zone::Field).unwrap();
        let resolver = ReactionResolver::new();
        let start = QueuedEffect::new(Effect::signal(EffectKind::StartTurnOwner, SignalArgs::for_player(P0)), None);

        let reactions = resolver.resolve(&mut state, &start);
        match &reactions[..] {
            [QueuedEffect {
                effect: Effect::AddCard(add),
                source,
                ..
            }] => {
                assert_eq!(add.card_template_name, "演説");
                assert_eq!(add.destination_pile, Zone::Hand);
                assert_eq!(*source, Some(branch));
            }
            other => panic!("unexpected {other:?}"),
        }

        state.deal_card("見張り", P0, Zone::Deck);
        state.deal_card("見張り", P0, Zone::Deck);
        let reactions = resolver.resolve(&mut state, &start);
        match &reactions[0].effect {
            Effect::AddCard(add) => assert_eq!(add.card_template_name, "見張り"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_undecodable_reaction_is_dropped() {
        let mut state = state();
        state.deal_card("壊れ", P0, Zone::Field).unwrap();
        let start = QueuedEffect::new(Effect::signal(EffectKind::StartTurnOwner, SignalArgs::for_player(P0)), None);
        assert!(ReactionResolver::new().resolve(&mut state, &start).is_empty());
    }

    #[test]
    fn test_abort_drops_every_template() {
        let mut state = state();
        state.deal_card("アナーキズム", P0, Zone::Ideology).unwrap();
        let seated = state.deal_card("資本主義", P0, Zone::Field).unwrap();
        let resolver = ReactionResolver::new();

        let reactions = resolver.resolve(&mut state, &placed(EffectKind::CardPlacedOwner, P0, seated));
        assert!(reactions.is_empty());

        let wealth = state.deal_card("見張り", P0, Zone::Field).unwrap();
        let reactions = resolver.resolve(&mut state, &placed(EffectKind::CardPlacedOwner, P0, wealth));
        assert_eq!(players(&reactions), vec![(P0, 1), (P1, -1)]);
    }

    #[test]
    fn test_own_play_action_is_ignored() {
        let mut registry = registry();
        registry.register(
            CardTemplate::new("観客", CardKind::Wealth).with_trigger(EffectKind::PlayerPlayCardAction, reserve("self", 1)),
        );
        let mut state = GameState::new(Arc::new(registry), Arc::new(RulesConfig::default()), 1);
        let audience = state.deal_card("観客", P0, Zone::Field).unwrap();
        let other = state.deal_card("見張り", P0, Zone::Field).unwrap();
        let resolver = ReactionResolver::new();

        let play = |card| {
            QueuedEffect::new(
                Effect::signal(
                    EffectKind::PlayerPlayCardAction,
                    SignalArgs {
                        player_id: Some(P0),
                        card_id: Some(card),
                        ..SignalArgs::default()
                    },
                ),
                Some(card),
            )
        };
        assert!(resolver.resolve(&mut state, &play(audience)).is_empty());
        assert_eq!(resolver.resolve(&mut state, &play(other)).len(), 1);
    }

    #[test]
    fn test_non_signal_trigger_sees_effect_view() {
        let mut registry = registry();
        registry.register(
            CardTemplate::new("反響", CardKind::Wealth).with_trigger(
                EffectKind::ModifyConsciousness,
                TriggerTemplate::new(EffectKind::ModifyScale)
                    .with_arg("player_id", json!("self"))
                    .with_arg("amount", json!(1))
                    .with_arg("condition_self_consciousness_lower", json!(true)),
            ),
        );
        let mut state = GameState::new(Arc::new(registry), Arc::new(RulesConfig::default()), 1);
        state.deal_card("反響", P0, Zone::Field).unwrap();
        let hit = QueuedEffect::new(Effect::ModifyConsciousness(ResourceChange::new(P0, -5, None)), None);
        let resolver = ReactionResolver::new();

        assert!(resolver.resolve(&mut state, &hit).is_empty());
        state.player_mut(P0).consciousness = 45;
        assert_eq!(resolver.resolve(&mut state, &hit).len(), 1);
    }
}
