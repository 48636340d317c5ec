//! `PROCESS_CARD_OPERATION`: gather candidate cards, select some, then fan
//! out one primitive effect per selected card.

use smallvec::smallvec;

use super::HandlerContext;
use crate::cards::CardInstance;
use crate::core::{InstanceId, PlayerId};
use crate::effects::{
    AddCard, CardAlias, CardOperation, CardOperationKind, CardRef, DurabilityReserve, Effect, MoveCard,
    RemoveCard, RequiredScaleChange, SelectionMethod,
};
use crate::rules::decision::{DecisionPrompt, PendingDecision};
use crate::zones::Zone;

/// Outcome of the selection step for one target player.
enum Selection {
    Cards(Vec<CardInstance>),
    /// A decision was requested; the whole operation stops here.
    Suspended,
}

pub(super) fn card_operation(ctx: &mut HandlerContext<'_>, op: &CardOperation) {
    let target_card = match op.target_card_id {
        None => None,
        Some(CardRef::Id(id)) => Some(id),
        Some(CardRef::Alias(CardAlias::LastAddedCard)) => {
            match ctx.trace.and_then(|trace| trace.view.card_id) {
                Some(id) => Some(id),
                None => return,
            }
        }
        Some(CardRef::Alias(alias)) => {
            tracing::trace!(?alias, "unsupported card alias in card operation");
            return;
        }
    };
    let Some(acting) = op.player_id.or_else(|| ctx.source_owner()) else {
        return;
    };
    let targets = op
        .target_player_id
        .as_ref()
        .map_or_else(|| smallvec![acting], |set| set.resolve(acting));
    let source = op.source_card_id.or(ctx.source);

    for player in targets {
        let selected = if op.operation == CardOperationKind::GenerateCard {
            Vec::new()
        } else if let Some(id) = target_card {
            explicit_target(ctx, id, player)
        } else {
            match select(ctx, op, player) {
                Selection::Cards(cards) => cards,
                Selection::Suspended => return,
            }
        };

        if op.operation != CardOperationKind::GenerateCard {
            if selected.is_empty() {
                continue;
            }
            if let Some(key) = &op.store_count_key {
                let count = i64::try_from(selected.len()).unwrap_or(i64::MAX);
                ctx.state.set_temp(key.clone(), count);
            }
        }
        tracing::debug!(operation = ?op.operation, %player, selected = selected.len(), "card operation");
        fan_out(ctx, op, player, &selected, source);
    }
}

/// The named card, provided the target player owns it.
fn explicit_target(ctx: &HandlerContext<'_>, id: InstanceId, player: PlayerId) -> Vec<CardInstance> {
    ctx.state
        .locate(id)
        .and_then(|_| ctx.state.card(id))
        .filter(|card| card.owner == player)
        .cloned()
        .into_iter()
        .collect()
}

fn select(ctx: &mut HandlerContext<'_>, op: &CardOperation, player: PlayerId) -> Selection {
    let source = ctx.source;
    let mut available: Vec<CardInstance> = op
        .piles()
        .into_iter()
        .flat_map(|zone| ctx.state.cards_in(player, zone).cloned().collect::<Vec<_>>())
        .filter(|card| op.card_type.map_or(true, |kind| card.kind == kind))
        .filter(|card| Some(card.id) != source)
        .collect();
    if available.is_empty() {
        return Selection::Cards(available);
    }
    let count = op.count.unwrap_or(available.len());

    let cards = match op.selection_method {
        SelectionMethod::All => available,
        SelectionMethod::Random => {
            ctx.state.rng.shuffle(&mut available);
            available.truncate(count);
            available
        }
        SelectionMethod::HighestRequiredScale => {
            available.sort_by(|a, b| b.required_scale.cmp(&a.required_scale));
            available.truncate(count);
            available
        }
        SelectionMethod::LowestDurability => {
            available.sort_by_key(|card| card.current_durability);
            available.truncate(op.count.unwrap_or(1));
            available
        }
        SelectionMethod::Top => {
            available.truncate(count);
            available
        }
        SelectionMethod::Bottom => {
            let skip = available.len().saturating_sub(count);
            available.split_off(skip)
        }
        SelectionMethod::Choice => {
            let Some(source) = source else {
                return Selection::Cards(Vec::new());
            };
            let prompt = DecisionPrompt::ChoiceCardsForOperation {
                options: available.iter().map(|card| card.id).collect(),
                count,
                resume: op.clone(),
            };
            ctx.request(PendingDecision::new(player, source, prompt));
            return Selection::Suspended;
        }
        SelectionMethod::PreSelected => available
            .into_iter()
            .filter(|card| op.selected_cards.contains(&card.id))
            .collect(),
    };
    Selection::Cards(cards)
}

/// Queue one primitive per selected card. Each goes to the front, so the
/// last selected card is handled first.
fn fan_out(
    ctx: &mut HandlerContext<'_>,
    op: &CardOperation,
    player: PlayerId,
    cards: &[CardInstance],
    source: Option<InstanceId>,
) {
    match op.operation {
        CardOperationKind::ModifyDurability => {
            for card in cards {
                let reserve = DurabilityReserve::new(card.id, op.amount, source);
                ctx.push_front(Effect::ModifyCardDurabilityReserve(reserve));
            }
        }
        CardOperationKind::ModifyRequiredScale => {
            for card in cards {
                ctx.push_front(Effect::ModifyCardRequiredScale(RequiredScaleChange {
                    card_id: card.id,
                    amount: op.amount,
                    min_value: op.min_value,
                    set_value: false,
                    source_card_id: source,
                }));
            }
        }
        CardOperationKind::Move => {
            let Some(destination) = op.destination_pile else {
                tracing::trace!("move operation without destination");
                return;
            };
            for card in cards {
                let mut mv = MoveCard::new(player, card.id, card.location, destination).from_source(source);
                mv.position = op.position;
                ctx.push_front(Effect::MoveCard(mv));
            }
        }
        CardOperationKind::Remove => {
            let mut seen = Vec::with_capacity(cards.len());
            for card in cards {
                if seen.contains(&card.id) {
                    continue;
                }
                seen.push(card.id);
                ctx.push_front(Effect::RemoveCard(RemoveCard {
                    card_id: card.id,
                    player_id: Some(player),
                }));
            }
        }
        CardOperationKind::GenerateCard => {
            let Some(template) = &op.card_template_name else {
                return;
            };
            let mut add = AddCard::new(player, template.clone(), op.destination_pile.unwrap_or(Zone::Hand))
                .from_source(source);
            add.count = op.count.and_then(|count| u32::try_from(count).ok()).unwrap_or(1);
            add.position = op.position;
            ctx.push_front(Effect::AddCard(add));
        }
    }
}
