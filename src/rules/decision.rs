//! Pending player decisions.
//!
//! A handler that needs a choice stores a `PendingDecision` in the state and
//! processing stops. The caller answers through `Engine::resolve_input` with a
//! `Choice`; the decision turns the answer into the effect that continues the
//! chain.

use serde::{Deserialize, Serialize};

use crate::core::{InstanceId, PlayerId};
use crate::effects::{AddCard, CardOperation, CardRef, Effect, MoveCard, SelectionMethod};
use crate::zones::Zone;

/// The five request kinds, as named on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionKind {
    ChoiceCardToAdd,
    ChoiceCardFromPile,
    ChoiceCardsForOperation,
    ChoiceNumber,
    ChoiceCardForEffect,
}

/// What the player is asked, and how the answer resumes processing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionPrompt {
    /// Pick a template name; the card is added to the hand.
    ChoiceCardToAdd { options: Vec<String> },

    /// Pick a card; it moves from whichever listed pile holds it.
    ChoiceCardFromPile {
        options: Vec<InstanceId>,
        source_piles: Vec<Zone>,
        destination_pile: Zone,
    },

    /// Pick up to `count` cards for a card operation.
    ChoiceCardsForOperation {
        options: Vec<InstanceId>,
        count: usize,
        resume: CardOperation,
    },

    /// Pick a number in `min..=max`; it becomes the resumed effect's amount.
    ChoiceNumber { min: i64, max: i64, resume: Effect },

    /// Pick one card; it becomes the resumed effect's card.
    ChoiceCardForEffect { options: Vec<InstanceId>, resume: Effect },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDecision {
    pub player_id: PlayerId,
    pub source_card_id: InstanceId,
    pub prompt: DecisionPrompt,
}

/// A player's answer to a pending decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    Cards(Vec<InstanceId>),
    Card(InstanceId),
    Number(i64),
    Template(String),
}

impl PendingDecision {
    #[must_use]
    pub fn new(player_id: PlayerId, source_card_id: InstanceId, prompt: DecisionPrompt) -> Self {
        Self {
            player_id,
            source_card_id,
            prompt,
        }
    }

    #[must_use]
    pub fn kind(&self) -> DecisionKind {
        match &self.prompt {
            DecisionPrompt::ChoiceCardToAdd { .. } => DecisionKind::ChoiceCardToAdd,
            DecisionPrompt::ChoiceCardFromPile { .. } => DecisionKind::ChoiceCardFromPile,
            DecisionPrompt::ChoiceCardsForOperation { .. } => DecisionKind::ChoiceCardsForOperation,
            DecisionPrompt::ChoiceNumber { .. } => DecisionKind::ChoiceNumber,
            DecisionPrompt::ChoiceCardForEffect { .. } => DecisionKind::ChoiceCardForEffect,
        }
    }

    /// Card candidates offered, empty for template and number prompts.
    #[must_use]
    pub fn card_options(&self) -> &[InstanceId] {
        match &self.prompt {
            DecisionPrompt::ChoiceCardFromPile { options, .. }
            | DecisionPrompt::ChoiceCardsForOperation { options, .. }
            | DecisionPrompt::ChoiceCardForEffect { options, .. } => options,
            DecisionPrompt::ChoiceCardToAdd { .. } | DecisionPrompt::ChoiceNumber { .. } => &[],
        }
    }

    /// Build the effect that continues the chain.
    ///
    /// `holds` reports whether one of the decider's piles holds a card.
    /// Returns `Ok(None)` when the answer is valid but nothing follows from
    /// it (a card that left every listed pile), and `Err(kind)` when the
    /// choice does not fit this decision.
    pub fn resume_with(
        &self,
        choice: Choice,
        holds: impl Fn(Zone, InstanceId) -> bool,
    ) -> Result<Option<Effect>, DecisionKind> {
        let player = self.player_id;
        let mismatch = self.kind();
        match &self.prompt {
            DecisionPrompt::ChoiceCardToAdd { .. } => match choice {
                Choice::Template(name) => Ok(Some(Effect::AddCard(AddCard::new(player, name, Zone::Hand)))),
                _ => Err(mismatch),
            },
            DecisionPrompt::ChoiceCardFromPile {
                source_piles,
                destination_pile,
                ..
            } => {
                let card = single_card(&choice).ok_or(mismatch)?;
                Ok(source_piles
                    .iter()
                    .find(|pile| holds(**pile, card))
                    .map(|pile| Effect::MoveCard(MoveCard::new(player, card, *pile, *destination_pile))))
            }
            DecisionPrompt::ChoiceCardsForOperation { resume, .. } => {
                let cards = match choice {
                    Choice::Cards(cards) => cards,
                    Choice::Card(card) => vec![card],
                    _ => return Err(mismatch),
                };
                let mut op = resume.clone();
                op.selection_method = SelectionMethod::PreSelected;
                op.selected_cards = cards;
                Ok(Some(Effect::CardOperation(op)))
            }
            DecisionPrompt::ChoiceNumber { min, max, resume } => match choice {
                Choice::Number(amount) => {
                    let amount = amount.max(*min).min(*max);
                    Ok(Some(with_amount(resume.clone(), amount)))
                }
                _ => Err(mismatch),
            },
            DecisionPrompt::ChoiceCardForEffect { resume, .. } => {
                let card = single_card(&choice).ok_or(mismatch)?;
                Ok(Some(with_card(resume.clone(), card)))
            }
        }
    }
}

/// A single-card answer; multi-card answers contribute their first card.
fn single_card(choice: &Choice) -> Option<InstanceId> {
    match choice {
        Choice::Card(card) => Some(*card),
        Choice::Cards(cards) => cards.first().copied(),
        Choice::Number(_) | Choice::Template(_) => None,
    }
}

/// Substitute the chosen number into a resumed effect.
fn with_amount(effect: Effect, amount: i64) -> Effect {
    match effect {
        Effect::ReduceMoneyDurabilityAndGainScaleResolved(mut conversion) => {
            conversion.amount = amount;
            Effect::ReduceMoneyDurabilityAndGainScaleResolved(conversion)
        }
        Effect::ChooseAndModifyWealthDurabilityResolved(mut choice) => {
            choice.amount = amount;
            Effect::ChooseAndModifyWealthDurabilityResolved(choice)
        }
        other => other,
    }
}

/// Substitute the chosen card into a resumed effect.
fn with_card(effect: Effect, card: InstanceId) -> Effect {
    match effect {
        Effect::ChooseAndDiscardIdeologyResolved(mut chosen) => {
            chosen.card_id = Some(card);
            Effect::ChooseAndDiscardIdeologyResolved(chosen)
        }
        Effect::ChooseAndModifyWealthDurabilityResolved(mut choice) => {
            choice.card_id = Some(card);
            Effect::ChooseAndModifyWealthDurabilityResolved(choice)
        }
        Effect::ChooseAndBounceWealthResolved(mut choice) => {
            choice.card_id = Some(card);
            Effect::ChooseAndBounceWealthResolved(choice)
        }
        Effect::MoveCard(mut mv) => {
            mv.card_id = CardRef::Id(card);
            Effect::MoveCard(mv)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{CardOperationKind, MoneyConversion};

    fn conversion_prompt() -> PendingDecision {
        let resume = Effect::ReduceMoneyDurabilityAndGainScaleResolved(MoneyConversion {
            player_id: PlayerId::new(0),
            money_card_id: InstanceId(4),
            amount: 0,
            source_card_id: Some(InstanceId(9)),
        });
        PendingDecision::new(
            PlayerId::new(0),
            InstanceId(9),
            DecisionPrompt::ChoiceNumber { min: 0, max: 5, resume },
        )
    }

    #[test]
    fn test_number_is_clamped_into_range() {
        let decision = conversion_prompt();
        let effect = decision.resume_with(Choice::Number(12), |_, _| false).unwrap().unwrap();
        match effect {
            Effect::ReduceMoneyDurabilityAndGainScaleResolved(conversion) => {
                assert_eq!(conversion.amount, 5);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_mismatched_choice_is_rejected() {
        let decision = conversion_prompt();
        let err = decision.resume_with(Choice::Template("x".into()), |_, _| false).unwrap_err();
        assert_eq!(err, DecisionKind::ChoiceNumber);
    }

    #[test]
    fn test_pile_choice_finds_original_pile() {
        let decision = PendingDecision::new(
            PlayerId::new(1),
            InstanceId(2),
            DecisionPrompt::ChoiceCardFromPile {
                options: vec![InstanceId(5)],
                source_piles: vec![Zone::Deck, Zone::Discard],
                destination_pile: Zone::Hand,
            },
        );

        let effect = decision
            .resume_with(Choice::Card(InstanceId(5)), |zone, _| zone == Zone::Discard)
            .unwrap();
        match effect {
            Some(Effect::MoveCard(mv)) => {
                assert_eq!(mv.source_pile, Zone::Discard);
                assert_eq!(mv.destination_pile, Zone::Hand);
                assert_eq!(mv.card_id, CardRef::Id(InstanceId(5)));
            }
            other => panic!("unexpected {other:?}"),
        }

        let gone = decision.resume_with(Choice::Card(InstanceId(5)), |_, _| false).unwrap();
        assert!(gone.is_none());
    }

    #[test]
    fn test_operation_choice_becomes_pre_selected() {
        let mut op = CardOperation::new(CardOperationKind::Remove);
        op.selection_method = SelectionMethod::Choice;
        let decision = PendingDecision::new(
            PlayerId::new(0),
            InstanceId(1),
            DecisionPrompt::ChoiceCardsForOperation {
                options: vec![InstanceId(3), InstanceId(4)],
                count: 1,
                resume: op,
            },
        );
        assert_eq!(decision.card_options(), &[InstanceId(3), InstanceId(4)]);

        match decision.resume_with(Choice::Cards(vec![InstanceId(4)]), |_, _| true).unwrap() {
            Some(Effect::CardOperation(op)) => {
                assert_eq!(op.selection_method, SelectionMethod::PreSelected);
                assert_eq!(op.selected_cards, vec![InstanceId(4)]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_decision_serialization() {
        let decision = conversion_prompt();
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["prompt"]["type"], "CHOICE_NUMBER");
        let back: PendingDecision = serde_json::from_value(json).unwrap();
        assert_eq!(back, decision);
    }
}
