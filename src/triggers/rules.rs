//! Card-name rules.
//!
//! A handful of cards carry behavior that the generic guards and gates do
//! not express. Each such card gets a `CardRule`, looked up by template name
//! after the generic scope and zone guards have passed. Rules are isolated
//! content: adding one never changes how any other card reacts.

use std::fmt::Debug;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::cards::{CardInstance, CardKind};
use crate::effects::EffectKind;
use crate::zones::Zone;

use super::context::ReactionContext;
use super::table::{ArgMap, TriggerTemplate};

/// When a rule's `check` runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Before placeholders are resolved; args still read `"self"`/`"opponent"`.
    Raw,
    /// After placeholders, before argument gates and amount formulas.
    Resolved,
}

/// Outcome of a rule check for one template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleVerdict {
    Keep,
    /// Drop this template only.
    Skip,
    /// Drop every reaction of this card to the current effect.
    Abort,
}

pub trait CardRule: Debug + Send + Sync {
    /// Whether the card may react from outside its natural zone.
    fn allows_out_of_zone(&self, _trigger: EffectKind, _card: &CardInstance) -> bool {
        false
    }

    fn check(
        &self,
        _ctx: &ReactionContext<'_>,
        _template: &TriggerTemplate,
        _stage: Stage,
        _args: &mut ArgMap,
    ) -> RuleVerdict {
        RuleVerdict::Keep
    }

    /// Event cards that stay in the play zone instead of being discarded.
    fn lingers_after_play(&self) -> bool {
        false
    }
}

/// Name-keyed rule registry.
#[derive(Clone, Debug, Default)]
pub struct CardRules {
    rules: FxHashMap<String, Arc<dyn CardRule>>,
}

impl CardRules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules for the shipped card set.
    #[must_use]
    pub fn builtin() -> Self {
        let mut rules = Self::new();
        rules.register("ポピュリズム", Populism);
        rules.register("布教", ReactsFromHand);
        rules.register("官僚主義", Bureaucracy);
        rules.register("帝国主義", Imperialism);
        rules.register("救世", Salvation);
        rules.register("重金主義", Bullionism);
        rules.register("交易路", OpponentWealthPlaced);
        rules.register("隘路", OpponentWealthPlaced);
        rules.register("ニューリベラリズム", MoneyPlaced);
        rules.register("社会主義", MoneyPlaced);
        rules.register("孤立主義", Isolationism);
        rules.register("自由主義", Liberalism);
        rules.register("グローバリズム", OpponentPlaysOnly);
        rules.register("分離主義", Separatism);
        rules.register("アナーキズム", Anarchism);
        rules.register("重農主義", Physiocracy);
        rules.register("多極主義", Multipolarism);
        rules
    }

    /// Register a rule, replacing any rule already keyed on `name`.
    pub fn register(&mut self, name: impl Into<String>, rule: impl CardRule + 'static) {
        self.rules.insert(name.into(), Arc::new(rule));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn CardRule> {
        self.rules.get(name).map(|rule| rule.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn keep_if(condition: bool) -> RuleVerdict {
    if condition {
        RuleVerdict::Keep
    } else {
        RuleVerdict::Skip
    }
}

/// Seats itself from outside the field at low consciousness.
#[derive(Debug)]
struct Populism;

impl CardRule for Populism {
    fn allows_out_of_zone(&self, trigger: EffectKind, _card: &CardInstance) -> bool {
        trigger == EffectKind::StartTurnOwner
    }

    fn check(&self, ctx: &ReactionContext<'_>, _: &TriggerTemplate, stage: Stage, _: &mut ArgMap) -> RuleVerdict {
        if stage != Stage::Resolved || ctx.trigger != EffectKind::StartTurnOwner {
            return RuleVerdict::Keep;
        }
        let owner = ctx.owner_state();
        let already_seated = owner
            .piles
            .ideology
            .and_then(|id| ctx.state.card(id))
            .is_some_and(|seated| seated.name == ctx.card.name);
        keep_if(owner.consciousness <= 5 && !already_seated && ctx.card.location != Zone::Field)
    }
}

/// Event that reacts while held in hand.
#[derive(Debug)]
struct ReactsFromHand;

impl CardRule for ReactsFromHand {
    fn allows_out_of_zone(&self, _: EffectKind, card: &CardInstance) -> bool {
        card.location == Zone::Hand
    }
}

/// Reacts from hand, stays in play after use, and only counts discarded
/// ideologies.
#[derive(Debug)]
struct Bureaucracy;

impl CardRule for Bureaucracy {
    fn allows_out_of_zone(&self, _: EffectKind, card: &CardInstance) -> bool {
        card.location == Zone::Hand
    }

    fn check(&self, ctx: &ReactionContext<'_>, _: &TriggerTemplate, stage: Stage, _: &mut ArgMap) -> RuleVerdict {
        if stage == Stage::Resolved && ctx.trigger == EffectKind::CardDiscardedOwner {
            return keep_if(ctx.triggering_card_is(CardKind::Ideology));
        }
        RuleVerdict::Keep
    }

    fn lingers_after_play(&self) -> bool {
        true
    }
}

/// Active only while seated. At end of turn converts the field-limit lead
/// into the amount; on opposing destruction only during the owner's turn.
#[derive(Debug)]
struct Imperialism;

impl CardRule for Imperialism {
    fn check(&self, ctx: &ReactionContext<'_>, _: &TriggerTemplate, stage: Stage, args: &mut ArgMap) -> RuleVerdict {
        if stage != Stage::Raw {
            return RuleVerdict::Keep;
        }
        match ctx.trigger {
            EffectKind::EndTurnOwner => {
                if !ctx.is_seated_ideology() {
                    return RuleVerdict::Skip;
                }
                let lead = ctx.owner_state().field_limit - ctx.opponent_state().field_limit;
                if lead <= 0 {
                    return RuleVerdict::Skip;
                }
                let amount = match args.get("player_id").and_then(Value::as_str) {
                    Some("opponent") => Some(-lead),
                    Some("self") => Some(lead),
                    _ => None,
                };
                if let Some(amount) = amount {
                    args.insert("amount".into(), Value::from(amount));
                    args.remove("amount_based_on_field_limit_diff");
                }
                RuleVerdict::Keep
            }
            EffectKind::WealthDurabilityZeroOpponent => keep_if(
                ctx.is_seated_ideology()
                    && ctx.view.player_id == Some(ctx.opponent())
                    && ctx.state.current_turn == ctx.owner(),
            ),
            _ => RuleVerdict::Keep,
        }
    }
}

/// Sets consciousness only from 100 up; every other template only below.
#[derive(Debug)]
struct Salvation;

impl CardRule for Salvation {
    fn check(&self, ctx: &ReactionContext<'_>, template: &TriggerTemplate, stage: Stage, _: &mut ArgMap) -> RuleVerdict {
        if stage != Stage::Resolved {
            return RuleVerdict::Keep;
        }
        let saved = ctx.owner_state().consciousness >= 100;
        keep_if((template.effect_type == EffectKind::SetConsciousness) == saved)
    }
}

/// Generated money takes the size of the scale gain.
#[derive(Debug)]
struct Bullionism;

impl CardRule for Bullionism {
    fn check(&self, ctx: &ReactionContext<'_>, _: &TriggerTemplate, stage: Stage, args: &mut ArgMap) -> RuleVerdict {
        if stage == Stage::Resolved && ctx.trigger == EffectKind::ModifyScaleIncreaseReserveOwner {
            if let Some(gain) = ctx.view.amount.filter(|gain| *gain > 0) {
                args.insert("initial_durability".into(), Value::from(gain));
            }
        }
        RuleVerdict::Keep
    }
}

/// Reacts only to opposing wealth entering a field.
#[derive(Debug)]
struct OpponentWealthPlaced;

impl CardRule for OpponentWealthPlaced {
    fn check(&self, ctx: &ReactionContext<'_>, _: &TriggerTemplate, stage: Stage, _: &mut ArgMap) -> RuleVerdict {
        if stage != Stage::Resolved || ctx.trigger != EffectKind::CardPlacedOpponent {
            return RuleVerdict::Keep;
        }
        let placed_wealth = ctx
            .triggering_card()
            .is_some_and(|card| card.location == Zone::Field && card.is_wealth());
        keep_if(ctx.view.player_id != Some(ctx.owner()) && placed_wealth)
    }
}

/// Reacts to its owner's placements only when the money card was placed.
#[derive(Debug)]
struct MoneyPlaced;

impl CardRule for MoneyPlaced {
    fn check(&self, ctx: &ReactionContext<'_>, _: &TriggerTemplate, stage: Stage, _: &mut ArgMap) -> RuleVerdict {
        if stage != Stage::Resolved || ctx.trigger != EffectKind::CardPlacedOwner {
            return RuleVerdict::Keep;
        }
        let money = &ctx.state.config.names.money;
        keep_if(ctx.triggering_card().is_some_and(|card| &card.name == money))
    }
}

/// Reacts to its owner actually losing consciousness to something else.
#[derive(Debug)]
struct Isolationism;

impl CardRule for Isolationism {
    fn check(&self, ctx: &ReactionContext<'_>, _: &TriggerTemplate, stage: Stage, _: &mut ArgMap) -> RuleVerdict {
        if stage != Stage::Resolved || ctx.trigger != EffectKind::ModifyConsciousness {
            return RuleVerdict::Keep;
        }
        let owner = ctx.owner();
        let aimed_at_owner = ctx.view.target_player_id == Some(owner);
        let self_inflicted = ctx.view.source_card_id == Some(ctx.card.id);
        let requested_loss = ctx.view.amount.is_some_and(|amount| amount < 0);
        let actual_loss = ctx.state.temp(&crate::core::state::last_decrease_key(owner));
        keep_if(aimed_at_owner && !self_inflicted && requested_loss && actual_loss >= 1)
    }
}

/// Reacts to scale gains outside its owner's turn.
#[derive(Debug)]
struct Liberalism;

impl CardRule for Liberalism {
    fn check(&self, ctx: &ReactionContext<'_>, _: &TriggerTemplate, stage: Stage, _: &mut ArgMap) -> RuleVerdict {
        if stage != Stage::Resolved || ctx.trigger != EffectKind::ModifyScale {
            return RuleVerdict::Keep;
        }
        let gain = ctx.view.amount.unwrap_or(0);
        keep_if(ctx.state.current_turn != ctx.owner() && gain > 0)
    }
}

/// Reacts to card plays by the opponent only.
#[derive(Debug)]
struct OpponentPlaysOnly;

impl CardRule for OpponentPlaysOnly {
    fn check(&self, ctx: &ReactionContext<'_>, _: &TriggerTemplate, stage: Stage, _: &mut ArgMap) -> RuleVerdict {
        if stage != Stage::Resolved || ctx.trigger != EffectKind::PlayerPlayCardAction {
            return RuleVerdict::Keep;
        }
        keep_if(ctx.view.player_id.is_some_and(|player| player != ctx.owner()))
    }
}

/// Reacts when the newest hand card is beyond the owner's scale.
#[derive(Debug)]
struct Separatism;

impl CardRule for Separatism {
    fn check(&self, ctx: &ReactionContext<'_>, _: &TriggerTemplate, stage: Stage, _: &mut ArgMap) -> RuleVerdict {
        if stage != Stage::Resolved || ctx.trigger != EffectKind::CardAddedToHandOwner {
            return RuleVerdict::Keep;
        }
        let scale = ctx.owner_state().scale;
        match ctx.newest_hand_card() {
            Some(card) => keep_if(card.required_scale > scale),
            None => RuleVerdict::Keep,
        }
    }
}

/// Any non-wealth placement by its owner silences the card entirely.
#[derive(Debug)]
struct Anarchism;

impl CardRule for Anarchism {
    fn check(&self, ctx: &ReactionContext<'_>, _: &TriggerTemplate, stage: Stage, _: &mut ArgMap) -> RuleVerdict {
        if stage != Stage::Resolved || ctx.trigger != EffectKind::CardPlacedOwner {
            return RuleVerdict::Keep;
        }
        match ctx.triggering_card() {
            Some(card) if !card.is_wealth() => RuleVerdict::Abort,
            _ => RuleVerdict::Keep,
        }
    }
}

/// End-of-turn reaction needs at least one card played that turn.
#[derive(Debug)]
struct Physiocracy;

impl CardRule for Physiocracy {
    fn check(&self, ctx: &ReactionContext<'_>, _: &TriggerTemplate, stage: Stage, _: &mut ArgMap) -> RuleVerdict {
        if stage != Stage::Resolved || ctx.trigger != EffectKind::EndTurnOwner {
            return RuleVerdict::Keep;
        }
        keep_if(ctx.owner_state().cards_played_this_turn > 0)
    }
}

/// Reacts to ideologies entering its owner's hand.
#[derive(Debug)]
struct Multipolarism;

impl CardRule for Multipolarism {
    fn check(&self, ctx: &ReactionContext<'_>, _: &TriggerTemplate, stage: Stage, _: &mut ArgMap) -> RuleVerdict {
        if stage != Stage::Resolved || ctx.trigger != EffectKind::CardAddedToHandOwner {
            return RuleVerdict::Keep;
        }
        keep_if(ctx.newest_hand_card().is_some_and(CardInstance::is_ideology))
    }
}
