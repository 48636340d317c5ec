//! Effect and trigger type names.
//!
//! `EffectKind` is the flat vocabulary shared by the queue, the handler
//! registry and card trigger tables: a trigger table is keyed by the kind of
//! the effect it reacts to. Names travel in SCREAMING_SNAKE_CASE.

use serde::{Deserialize, Serialize};

/// Which argument a reaction's scope guard compares against the reacting card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerScope {
    /// The effect must name the reacting card itself.
    ThisCard,
    /// The effect's player must be the reacting card's owner.
    Owner,
    /// The effect's player must be the reacting card owner's opponent.
    Opponent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    // === Actions ===
    PlayerAction,
    DrawCard,
    AddCardToGame,
    RemoveCardFromGame,
    ModifyConsciousness,
    ModifyScale,
    SetConsciousness,
    SetScale,
    ModifyCardDurability,
    ModifyCardRequiredScale,
    ModifyFieldLimit,
    MoveCard,
    ModifyConsciousnessReserve,
    ModifyScaleReserve,
    ModifyCardDurabilityReserve,
    AddModifyParameterCorrection,
    SkipEffect,
    CheckGameOver,

    // === Process operations ===
    ProcessCardOperation,
    ProcessDealDamageToAllWealth,
    ProcessChooseAndDiscardIdeology,
    ProcessChooseAndDiscardIdeologyResolved,
    ProcessDiscardAllHandWealthCardsAndDraw,
    ProcessMoveHandWealthToDeckAndDraw,
    ProcessExposeCardByType,
    ProcessDiscardAllIdeologyFromHandAndDeck,
    ProcessSetAllScaleToZeroAndReduceConsciousness,
    ProcessMoneyCardPlacementEffect,
    ProcessMoneyCardTurnStartEffect,
    ProcessDiscardAllHandIdeologyAndAddMoney,
    ProcessModifyMoneyDurabilityRandom,
    ProcessReduceMoneyDurabilityAndGainScale,
    ProcessReduceMoneyDurabilityAndGainScaleResolved,
    ProcessAddMoneyTokenBasedOnCardsPlayed,
    ProcessMoneyDurabilityBasedCountModifyCardDurability,
    ProcessAddCardsBasedOnDiscardedCount,
    ProcessAddChoiceCardToHand,
    ProcessChooseAndMoveCardFromPile,
    ProcessChooseAndModifyDurabilityToWealth,
    ProcessChooseAndModifyDurabilityToWealthResolved,
    ProcessReturnLargestRequiredScaleCardToDeck,
    ProcessAllWealthBoost,
    ProcessChooseAndBounceToWealth,
    ProcessChooseAndBounceToWealthResolved,
    ProcessDrawRandomCardAndModifyRequiredScale,
    ProcessCounterAttack,
    ProcessAddCardConditionalOnDeckCount,

    // === Signals (no state change, exist to be reacted to) ===
    PlayEventThis,
    PlayEvent,
    PlayEventOwner,
    PlayEventOpponent,
    PlayerPlayCardAction,
    PlayerPlayCardActionOwner,
    PlayerPlayCardActionOpponent,
    CardPlacedThis,
    CardPlaced,
    CardPlacedOwner,
    CardPlacedOpponent,
    CardAddedToHandThis,
    CardAddedToHand,
    CardAddedToHandOwner,
    CardDrawnThis,
    CardDrawn,
    CardDrawnOwner,
    CardDiscardedThis,
    CardDiscarded,
    CardDiscardedOwner,
    CardBouncedThis,
    CardBouncedOwner,
    DamageThis,
    BoostThis,
    WealthDurabilityZero,
    WealthDurabilityZeroThis,
    WealthDurabilityZeroOwner,
    WealthDurabilityZeroOpponent,
    SuccessProcess,
    FailedProcess,
    StartTurnOwner,
    StartTurnOpponent,
    EndTurnOwner,
    EndTurnOpponent,
    ModifyConsciousnessIncreaseReserveOwner,
    ModifyConsciousnessDecreaseReserveOwner,
    ModifyConsciousnessDecreaseReserveOpponent,
    ModifyScaleIncreaseReserveOwner,
    ModifyScaleDecreaseReserveOwner,
    ModifyCardDurabilityIncreaseReserveOwner,
    ModifyCardDurabilityDecreaseReserveOwner,
}

impl EffectKind {
    /// Pure trigger kinds: dispatched through the queue only so cards can react.
    #[must_use]
    pub fn is_signal(self) -> bool {
        self >= Self::PlayEventThis
    }

    /// Scope guard family for reactions keyed on this kind.
    #[must_use]
    pub fn scope(self) -> Option<TriggerScope> {
        use EffectKind::*;
        match self {
            PlayEventThis | CardDrawnThis | CardPlacedThis | CardDiscardedThis
            | CardBouncedThis | CardAddedToHandThis | DamageThis | BoostThis
            | WealthDurabilityZeroThis | SuccessProcess | FailedProcess => {
                Some(TriggerScope::ThisCard)
            }
            ModifyConsciousnessDecreaseReserveOpponent | PlayEventOpponent
            | CardPlacedOpponent | WealthDurabilityZeroOpponent | StartTurnOpponent
            | EndTurnOpponent | PlayerPlayCardActionOpponent => Some(TriggerScope::Opponent),
            ModifyConsciousnessIncreaseReserveOwner
            | ModifyConsciousnessDecreaseReserveOwner
            | ModifyScaleIncreaseReserveOwner
            | PlayEventOwner
            | CardDrawnOwner
            | CardPlacedOwner
            | CardDiscardedOwner
            | CardBouncedOwner
            | CardAddedToHandOwner
            | StartTurnOwner
            | EndTurnOwner
            | WealthDurabilityZeroOwner
            | PlayerPlayCardActionOwner => Some(TriggerScope::Owner),
            _ => None,
        }
    }

    /// The wire name, e.g. `"MOVE_CARD"`.
    #[must_use]
    pub fn name(self) -> String {
        serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_else(|| format!("{self:?}"))
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}
