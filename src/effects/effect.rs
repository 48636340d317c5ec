//! The `Effect` sum type.
//!
//! Every handled kind has its own payload; pure trigger kinds share
//! `Signal`. On the wire an effect is `{"effect_type": KIND, "args": {...}}`,
//! and `Effect::decode` is the single place where untyped content arguments
//! become typed engine data.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::kind::EffectKind;
use super::payload::*;
use crate::cards::CardKind;
use crate::core::{InstanceId, PlayerId};

macro_rules! define_effects {
    ($( $variant:ident($payload:ty) => $kind:ident ),* $(,)?) => {
        /// A queued state-transition request.
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub enum Effect {
            $( $variant($payload), )*
            CheckGameOver,
            Signal(Signal),
        }

        impl Effect {
            #[must_use]
            pub fn kind(&self) -> EffectKind {
                match self {
                    $( Self::$variant(_) => EffectKind::$kind, )*
                    Self::CheckGameOver => EffectKind::CheckGameOver,
                    Self::Signal(signal) => signal.kind,
                }
            }

            /// Decode content arguments for `kind` into a typed effect.
            pub fn decode(kind: EffectKind, args: Value) -> Result<Self, serde_json::Error> {
                let args = if args.is_null() { Value::Object(Map::new()) } else { args };
                Ok(match kind {
                    $( EffectKind::$kind => Self::$variant(serde_json::from_value(args)?), )*
                    EffectKind::CheckGameOver => Self::CheckGameOver,
                    signal => Self::Signal(Signal {
                        kind: signal,
                        args: serde_json::from_value(args)?,
                    }),
                })
            }

            /// The payload in wire form.
            pub fn args_value(&self) -> Result<Value, serde_json::Error> {
                match self {
                    $( Self::$variant(payload) => serde_json::to_value(payload), )*
                    Self::CheckGameOver => Ok(Value::Object(Map::new())),
                    Self::Signal(signal) => serde_json::to_value(&signal.args),
                }
            }
        }
    };
}

define_effects! {
    PlayerAction(PlayCard) => PlayerAction,
    DrawCard(PlayerTarget) => DrawCard,
    AddCard(AddCard) => AddCardToGame,
    RemoveCard(RemoveCard) => RemoveCardFromGame,
    ModifyConsciousness(ResourceChange) => ModifyConsciousness,
    ModifyScale(ResourceChange) => ModifyScale,
    SetConsciousness(ResourceChange) => SetConsciousness,
    SetScale(ResourceChange) => SetScale,
    ModifyCardDurability(DurabilityChange) => ModifyCardDurability,
    ModifyCardRequiredScale(RequiredScaleChange) => ModifyCardRequiredScale,
    ModifyFieldLimit(ResourceChange) => ModifyFieldLimit,
    MoveCard(MoveCard) => MoveCard,
    ModifyConsciousnessReserve(ReserveChange) => ModifyConsciousnessReserve,
    ModifyScaleReserve(ReserveChange) => ModifyScaleReserve,
    ModifyCardDurabilityReserve(DurabilityReserve) => ModifyCardDurabilityReserve,
    AddCorrection(AddCorrection) => AddModifyParameterCorrection,
    SkipEffect(SkipEffect) => SkipEffect,

    CardOperation(CardOperation) => ProcessCardOperation,
    DealDamageToAllWealth(DealDamageToAllWealth) => ProcessDealDamageToAllWealth,
    ChooseAndDiscardIdeology(PlayerTarget) => ProcessChooseAndDiscardIdeology,
    ChooseAndDiscardIdeologyResolved(ChosenCard) => ProcessChooseAndDiscardIdeologyResolved,
    DiscardHandWealthAndDraw(PlayerTarget) => ProcessDiscardAllHandWealthCardsAndDraw,
    MoveHandWealthToDeckAndDraw(PlayerTarget) => ProcessMoveHandWealthToDeckAndDraw,
    ExposeCardByType(ExposeCards) => ProcessExposeCardByType,
    DiscardIdeologyFromHandAndDeck(PlayerTarget) => ProcessDiscardAllIdeologyFromHandAndDeck,
    ZeroScaleAndReduceConsciousness(PlayerGroup) => ProcessSetAllScaleToZeroAndReduceConsciousness,
    MoneyCardPlacement(MoneyCardTarget) => ProcessMoneyCardPlacementEffect,
    MoneyCardTurnStart(MoneyCardTurnStart) => ProcessMoneyCardTurnStartEffect,
    DiscardHandIdeologyAndAddMoney(PlayerTarget) => ProcessDiscardAllHandIdeologyAndAddMoney,
    ModifyMoneyDurabilityRandom(DurabilityRoll) => ProcessModifyMoneyDurabilityRandom,
    ReduceMoneyDurabilityAndGainScale(PlayerTarget) => ProcessReduceMoneyDurabilityAndGainScale,
    ReduceMoneyDurabilityAndGainScaleResolved(MoneyConversion) => ProcessReduceMoneyDurabilityAndGainScaleResolved,
    AddMoneyForCardsPlayed(PlayerTarget) => ProcessAddMoneyTokenBasedOnCardsPlayed,
    MoneyDurabilityBarrage(MoneyBarrage) => ProcessMoneyDurabilityBasedCountModifyCardDurability,
    AddCardsForDiscarded(DiscardForCards) => ProcessAddCardsBasedOnDiscardedCount,
    AddChoiceCardToHand(TemplateChoice) => ProcessAddChoiceCardToHand,
    ChooseAndMoveCardFromPile(PileChoice) => ProcessChooseAndMoveCardFromPile,
    ChooseAndModifyWealthDurability(WealthDurabilityChoice) => ProcessChooseAndModifyDurabilityToWealth,
    ChooseAndModifyWealthDurabilityResolved(WealthDurabilityChoice) => ProcessChooseAndModifyDurabilityToWealthResolved,
    ReturnHighestScaleCardToDeck(PlayerTarget) => ProcessReturnLargestRequiredScaleCardToDeck,
    AllWealthBoost(ResourceChange) => ProcessAllWealthBoost,
    ChooseAndBounceWealth(BounceChoice) => ProcessChooseAndBounceToWealth,
    ChooseAndBounceWealthResolved(BounceChoice) => ProcessChooseAndBounceToWealthResolved,
    DrawDiscountedCard(DiscountedDraw) => ProcessDrawRandomCardAndModifyRequiredScale,
    CounterAttack(CounterAttack) => ProcessCounterAttack,
    AddCardByDeckCount(DeckCountBranch) => ProcessAddCardConditionalOnDeckCount,
}

/// Read-only projection of the arguments guards and placeholders look at.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectView {
    pub player_id: Option<PlayerId>,
    pub target_player_id: Option<PlayerId>,
    pub card_id: Option<InstanceId>,
    pub target_card_id: Option<InstanceId>,
    pub source_card_id: Option<InstanceId>,
    pub amount: Option<i64>,
    pub damage_amount: Option<i64>,
    pub card_type: Option<CardKind>,
    pub exposed_cards: Vec<InstanceId>,
}

impl EffectView {
    /// The player owner-scoped triggers compare against.
    #[must_use]
    pub fn acting_player(&self) -> Option<PlayerId> {
        self.target_player_id.or(self.player_id)
    }

    fn player(player: PlayerId, amount: i64, source: Option<InstanceId>) -> Self {
        Self {
            player_id: Some(player),
            target_player_id: Some(player),
            amount: Some(amount),
            source_card_id: source,
            ..Self::default()
        }
    }
}

impl Effect {
    #[must_use]
    pub fn signal(kind: EffectKind, args: SignalArgs) -> Self {
        Self::Signal(Signal { kind, args })
    }

    #[must_use]
    pub fn is_signal(&self) -> bool {
        matches!(self, Self::Signal(_))
    }

    /// The player the effect is about, when it names one.
    #[must_use]
    pub fn player_id(&self) -> Option<PlayerId> {
        self.view().player_id
    }

    #[must_use]
    pub fn view(&self) -> EffectView {
        match self {
            Self::PlayerAction(play) => EffectView {
                player_id: Some(play.player_id),
                card_id: Some(play.card_id),
                target_card_id: play.target_card_id,
                ..EffectView::default()
            },
            Self::ModifyConsciousness(change)
            | Self::ModifyScale(change)
            | Self::SetConsciousness(change)
            | Self::SetScale(change)
            | Self::ModifyFieldLimit(change)
            | Self::AllWealthBoost(change) => {
                EffectView::player(change.player_id, change.amount, change.source_card_id)
            }
            Self::ModifyConsciousnessReserve(reserve) | Self::ModifyScaleReserve(reserve) => {
                EffectView::player(reserve.player_id, reserve.amount, reserve.source_card_id)
            }
            Self::ModifyCardDurability(change) => EffectView {
                card_id: Some(change.card_id),
                target_card_id: Some(change.card_id),
                amount: Some(change.amount),
                source_card_id: change.source_card_id,
                ..EffectView::default()
            },
            Self::ModifyCardDurabilityReserve(reserve) => EffectView {
                card_id: reserve.card_id.and_then(CardRef::id),
                amount: Some(reserve.amount),
                source_card_id: reserve.source_card_id,
                ..EffectView::default()
            },
            Self::ModifyCardRequiredScale(change) => EffectView {
                card_id: Some(change.card_id),
                amount: Some(change.amount),
                source_card_id: change.source_card_id,
                ..EffectView::default()
            },
            Self::MoveCard(mv) => EffectView {
                player_id: Some(mv.player_id),
                target_player_id: mv.target_player_id,
                card_id: mv.card_id.id(),
                source_card_id: mv.source_card_id,
                ..EffectView::default()
            },
            Self::AddCard(add) => EffectView {
                player_id: Some(add.player_id),
                source_card_id: add.source_card_id,
                ..EffectView::default()
            },
            Self::RemoveCard(remove) => EffectView {
                player_id: remove.player_id,
                card_id: Some(remove.card_id),
                ..EffectView::default()
            },
            Self::CardOperation(op) => EffectView {
                player_id: op.player_id,
                amount: Some(op.amount),
                card_type: op.card_type,
                source_card_id: op.source_card_id,
                ..EffectView::default()
            },
            Self::DrawCard(target)
            | Self::ChooseAndDiscardIdeology(target)
            | Self::DiscardHandWealthAndDraw(target)
            | Self::MoveHandWealthToDeckAndDraw(target)
            | Self::DiscardIdeologyFromHandAndDeck(target)
            | Self::DiscardHandIdeologyAndAddMoney(target)
            | Self::ReduceMoneyDurabilityAndGainScale(target)
            | Self::AddMoneyForCardsPlayed(target)
            | Self::ReturnHighestScaleCardToDeck(target) => EffectView {
                player_id: Some(target.player_id),
                source_card_id: target.source_card_id,
                ..EffectView::default()
            },
            Self::AddCorrection(add) => EffectView {
                player_id: Some(add.player_id),
                amount: Some(add.correction.amount),
                source_card_id: add.correction.source_card_id,
                ..EffectView::default()
            },
            Self::SkipEffect(skip) => EffectView {
                player_id: Some(skip.player_id),
                ..EffectView::default()
            },
            Self::ChooseAndDiscardIdeologyResolved(chosen) => EffectView {
                player_id: chosen.player_id,
                card_id: chosen.card_id,
                ..EffectView::default()
            },
            Self::ExposeCardByType(expose) => EffectView {
                player_id: Some(expose.player_id),
                card_type: expose.card_type,
                ..EffectView::default()
            },
            Self::MoneyCardPlacement(target) => EffectView {
                player_id: Some(target.player_id),
                card_id: Some(target.card_id),
                ..EffectView::default()
            },
            Self::MoneyCardTurnStart(start) => EffectView {
                player_id: Some(start.player_id),
                card_id: Some(start.card_id),
                ..EffectView::default()
            },
            Self::ModifyMoneyDurabilityRandom(roll) => EffectView {
                player_id: Some(roll.player_id),
                ..EffectView::default()
            },
            Self::ReduceMoneyDurabilityAndGainScaleResolved(conversion) => EffectView {
                player_id: Some(conversion.player_id),
                card_id: Some(conversion.money_card_id),
                amount: Some(conversion.amount),
                source_card_id: conversion.source_card_id,
                ..EffectView::default()
            },
            Self::MoneyDurabilityBarrage(barrage) => EffectView {
                player_id: Some(barrage.player_id),
                target_player_id: Some(barrage.target_player_id),
                amount: Some(barrage.amount),
                ..EffectView::default()
            },
            Self::AddCardsForDiscarded(discard) => EffectView {
                player_id: Some(discard.player_id),
                ..EffectView::default()
            },
            Self::AddChoiceCardToHand(choice) => EffectView {
                player_id: Some(choice.player_id),
                ..EffectView::default()
            },
            Self::ChooseAndMoveCardFromPile(choice) => EffectView {
                player_id: Some(choice.player_id),
                card_type: choice.card_type,
                ..EffectView::default()
            },
            Self::ChooseAndModifyWealthDurability(choice)
            | Self::ChooseAndModifyWealthDurabilityResolved(choice) => EffectView {
                player_id: Some(choice.player_id),
                target_player_id: Some(choice.target_player_id),
                card_id: choice.card_id,
                amount: Some(choice.amount),
                ..EffectView::default()
            },
            Self::ChooseAndBounceWealth(choice) | Self::ChooseAndBounceWealthResolved(choice) => {
                EffectView {
                    player_id: Some(choice.player_id),
                    target_player_id: Some(choice.target_player_id),
                    card_id: choice.card_id,
                    ..EffectView::default()
                }
            }
            Self::DrawDiscountedCard(draw) => EffectView {
                player_id: Some(draw.player_id),
                card_type: Some(draw.card_type),
                ..EffectView::default()
            },
            Self::AddCardByDeckCount(branch) => EffectView {
                player_id: Some(branch.player_id),
                ..EffectView::default()
            },
            Self::DealDamageToAllWealth(damage) => EffectView {
                amount: Some(damage.amount),
                ..EffectView::default()
            },
            Self::ZeroScaleAndReduceConsciousness(_) | Self::CounterAttack(_) | Self::CheckGameOver => {
                EffectView::default()
            }
            Self::Signal(signal) => {
                let args = &signal.args;
                EffectView {
                    player_id: args.player_id,
                    target_player_id: args.target_player_id,
                    card_id: args.card_id,
                    target_card_id: args.target_card_id,
                    source_card_id: args.source_card_id,
                    amount: args.amount,
                    damage_amount: args.damage_amount,
                    card_type: args.card_type,
                    exposed_cards: args.exposed_cards.clone(),
                }
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawEffect {
    effect_type: EffectKind,
    #[serde(default)]
    args: Value,
}

impl Serialize for Effect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let args = self.args_value().map_err(serde::ser::Error::custom)?;
        RawEffect {
            effect_type: self.kind(),
            args,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Effect {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEffect::deserialize(deserializer)?;
        Self::decode(raw.effect_type, raw.args).map_err(serde::de::Error::custom)
    }
}
