//! Card movement: plays, draws, generation, removal and `MOVE_CARD`.
//!
//! `MOVE_CARD` is the one place cards change piles. Everything else that
//! relocates a card queues a move so that the placement, draw and discard
//! signals fire consistently.

use super::HandlerContext;
use crate::cards::{CardInstance, CardKind};
use crate::core::state::LAST_PLAYED_CARD_ID;
use crate::core::{GameState, InstanceId, PlayerId};
use crate::effects::{
    AddCard, CardAlias, CardRef, DurabilityFormula, Effect, EffectKind, InitialDurability, MoveCard,
    PlayCard, PlayerTarget, RemoveCard, ResourceChange, SignalArgs,
};
use crate::presentation::PresentationRecord;
use crate::zones::Zone;

/// Play a card from hand.
///
/// Event cards pass through `playing_event`: the move in, `PLAY_EVENT_THIS`,
/// and the move out run first; the broadcast signals wait at the back.
pub(super) fn play_card(ctx: &mut HandlerContext<'_>, play: &PlayCard) {
    let player = play.player_id;
    if !ctx.state.player(player).piles.contains(Zone::Hand, play.card_id) {
        tracing::trace!(card = %play.card_id, %player, "played card not in hand");
        return;
    }
    let Some(card) = ctx.state.card(play.card_id).cloned() else {
        return;
    };

    ctx.state.player_mut(player).cards_played_this_turn += 1;
    ctx.state.set_temp(LAST_PLAYED_CARD_ID, card.id.as_temp_value());
    tracing::debug!(card = %card.id, name = %card.name, %player, "card played");

    let source = Some(card.id);
    let action = SignalArgs {
        player_id: Some(player),
        card_id: Some(card.id),
        target_card_id: Some(play.target_card_id.unwrap_or(card.id)),
        ..SignalArgs::default()
    };

    if card.is_event() {
        if !ctx.resolver.lingers_after_play(&card.name) {
            let out = MoveCard::new(player, card.id, Zone::PlayingEvent, Zone::Discard).from_source(source);
            ctx.push_front_from(Effect::MoveCard(out), source);
        }
        ctx.signal_front(EffectKind::PlayEventThis, action.clone(), source);
        let into = MoveCard::new(player, card.id, Zone::Hand, Zone::PlayingEvent).from_source(source);
        ctx.push_front_from(Effect::MoveCard(into), source);

        let base = SignalArgs {
            card_id: Some(card.id),
            target_card_id: Some(card.id),
            card_type: Some(card.kind),
            ..SignalArgs::default()
        };
        let owner = SignalArgs {
            player_id: Some(player),
            target_player_id: Some(player),
            ..base.clone()
        };
        let opponent = SignalArgs {
            player_id: Some(player),
            target_player_id: Some(player.opponent()),
            ..base
        };
        ctx.push_back_from(Effect::signal(EffectKind::PlayEvent, owner.clone()), source);
        ctx.push_back_from(Effect::signal(EffectKind::PlayEventOwner, owner), source);
        ctx.push_back_from(Effect::signal(EffectKind::PlayEventOpponent, opponent), source);
    } else {
        let destination = if card.is_ideology() { Zone::Ideology } else { Zone::Field };
        let place = MoveCard::new(player, card.id, Zone::Hand, destination).from_source(source);
        ctx.push_front_from(Effect::MoveCard(place), source);
    }

    ctx.push_back_from(Effect::signal(EffectKind::PlayerPlayCardAction, action), source);
}

pub(super) fn draw_card(ctx: &mut HandlerContext<'_>, target: &PlayerTarget) {
    if ctx.state.player(target.player_id).piles.deck.is_empty() {
        return;
    }
    let draw = MoveCard::draw(target.player_id).from_source(target.source_card_id.or(ctx.source));
    ctx.push_front(Effect::MoveCard(draw));
}

/// Generate fresh instances of a template.
pub(super) fn add_card(ctx: &mut HandlerContext<'_>, add: &AddCard) {
    let player = add.player_id;
    let destination = add.destination_pile;
    if !destination.is_player_pile() {
        tracing::trace!(%destination, "cards cannot be generated outside player piles");
        return;
    }
    let Some(template) = ctx.state.template(&add.card_template_name).cloned() else {
        tracing::trace!(template = %add.card_template_name, "unknown template");
        return;
    };

    if let Some(condition) = add.condition_field_wealth_limit {
        let limit = if condition > 0 {
            condition
        } else {
            ctx.state.player(player).field_limit
        };
        let on_field = i64::try_from(ctx.state.wealth_on_field(player).len()).unwrap_or(i64::MAX);
        if on_field >= limit {
            return;
        }
    }

    let durability = match add.initial_durability {
        Some(InitialDurability::Fixed(value)) => Some(value),
        Some(InitialDurability::Formula(DurabilityFormula::SelfAllWealthOnField)) => Some(
            ctx.state
                .cards_in(player, Zone::Field)
                .filter(|card| card.is_wealth())
                .map(|card| card.current_durability)
                .sum(),
        ),
        Some(InitialDurability::Formula(DurabilityFormula::DamageThis)) | None => None,
    };

    for _ in 0..add.count {
        let Some(id) = ctx.state.create_instance(&template.name, player, destination) else {
            return;
        };
        if let (Some(value), Some(card)) = (durability, ctx.state.card_mut(id)) {
            card.durability = value;
            card.current_durability = value;
        }

        let settled = match destination {
            Zone::Field if template.kind == CardKind::Ideology => {
                seat_ideology(ctx, player, id);
                Zone::Ideology
            }
            Zone::Ideology => {
                seat_ideology(ctx, player, id);
                Zone::Ideology
            }
            Zone::Hand if ctx.state.player(player).hand_is_full() => {
                ctx.state.player_mut(player).piles.discard.push_back(id);
                ctx.record(PresentationRecord::LimitWarning {
                    player_id: player,
                    card_id: id,
                });
                Zone::Discard
            }
            _ => {
                let GameState { players, rng, .. } = &mut *ctx.state;
                players[player].piles.insert(destination, id, add.position, rng);
                destination
            }
        };
        if let Some(card) = ctx.state.card_mut(id) {
            card.location = settled;
        }
        tracing::debug!(card = %id, template = %template.name, %player, to = %settled, "card generated");
        ctx.record(PresentationRecord::CardMoved {
            card_id: id,
            player_id: player,
            from: Zone::GameSource,
            to: settled,
        });

        if settled == Zone::Hand {
            let args = SignalArgs {
                player_id: Some(player),
                target_player_id: Some(player),
                card_id: Some(id),
                target_card_id: Some(id),
                card_type: Some(template.kind),
                source_pile: Some(Zone::GameSource),
                destination_pile: Some(Zone::Hand),
                ..SignalArgs::default()
            };
            let source = ctx.source.or(Some(id));
            ctx.signal_front(EffectKind::CardAddedToHandThis, args.clone(), source);
            ctx.signal_front(EffectKind::CardAddedToHand, args.clone(), source);
            ctx.signal_front(EffectKind::CardAddedToHandOwner, args, source);
        }
    }
}

/// Take a card out of the game. The instance stays registered.
pub(super) fn remove_card(ctx: &mut HandlerContext<'_>, remove: &RemoveCard) {
    const SEARCH: [Zone; 5] = [Zone::Hand, Zone::Deck, Zone::Field, Zone::Discard, Zone::Ideology];

    let Some(owner) = remove
        .player_id
        .or_else(|| ctx.state.card(remove.card_id).map(|card| card.owner))
    else {
        return;
    };
    let piles = &mut ctx.state.player_mut(owner).piles;
    let Some(from) = SEARCH.into_iter().find(|zone| piles.remove(*zone, remove.card_id)) else {
        return;
    };
    if let Some(card) = ctx.state.card_mut(remove.card_id) {
        card.location = Zone::Removed;
    }
    tracing::debug!(card = %remove.card_id, %owner, %from, "card removed from game");
    ctx.record(PresentationRecord::CardMoved {
        card_id: remove.card_id,
        player_id: owner,
        from,
        to: Zone::Removed,
    });
}

/// Move a card between piles and announce where it landed.
///
/// Signals go to the front one after another, so the last pushed runs
/// first: for a placement that is the opponent variant, then owner,
/// generic and this-card.
pub(super) fn move_card(ctx: &mut HandlerContext<'_>, mv: &MoveCard) {
    let id = match mv.card_id {
        CardRef::Id(id) => id,
        CardRef::Alias(CardAlias::DrawFromDeck) => {
            // The card stays on the deck until the concrete move runs.
            let Some(id) = ctx.state.player(mv.player_id).piles.deck.front().copied() else {
                return;
            };
            let concrete = MoveCard {
                card_id: CardRef::Id(id),
                ..mv.clone()
            };
            ctx.push_front(Effect::MoveCard(concrete));
            return;
        }
        CardRef::Alias(alias) => {
            tracing::trace!(?alias, "unresolved card alias in move");
            return;
        }
    };
    let Some(card) = ctx.state.card(id).cloned() else {
        return;
    };
    let from = mv.source_pile;
    if !detach(ctx.state, &card, mv) {
        tracing::trace!(card = %id, %from, "card not in source pile");
        return;
    }

    let owner = mv.target_player_id.unwrap_or(mv.player_id);
    let to = mv.destination_pile;
    let maintain = mv.maintain || (to == Zone::Hand && card.name == ctx.state.config.names.money);
    if !maintain && !matches!(to, Zone::Field | Zone::Discard) {
        let templates = std::sync::Arc::clone(&ctx.state.templates);
        if let (Some(template), Some(target)) = (templates.get(&card.name), ctx.state.card_mut(id)) {
            target.reset_to(template);
        }
    }

    let mut displaced = None;
    let settled = match to {
        Zone::Ideology => {
            displaced = seat_ideology(ctx, owner, id);
            Zone::Ideology
        }
        Zone::Field if card.is_ideology() => {
            displaced = seat_ideology(ctx, owner, id);
            Zone::Ideology
        }
        Zone::Field => {
            ctx.state.player_mut(owner).piles.field.push_back(id);
            Zone::Field
        }
        Zone::PlayingEvent => Zone::PlayingEvent,
        Zone::Hand if ctx.state.player(owner).hand_is_full() => {
            ctx.state.player_mut(owner).piles.discard.push_back(id);
            ctx.record(PresentationRecord::LimitWarning {
                player_id: owner,
                card_id: id,
            });
            Zone::Discard
        }
        Zone::Hand | Zone::Deck | Zone::Discard => {
            let GameState { players, rng, .. } = &mut *ctx.state;
            players[owner].piles.insert(to, id, mv.position, rng);
            to
        }
        Zone::GameSource | Zone::Removed => {
            restore(ctx.state, &card, from);
            tracing::trace!(card = %id, %to, "move to a non-pile destination ignored");
            return;
        }
    };
    if let Some(target) = ctx.state.card_mut(id) {
        target.location = settled;
        target.owner = owner;
    }
    tracing::debug!(card = %id, name = %card.name, %owner, %from, to = %settled, "card moved");
    ctx.record(PresentationRecord::CardMoved {
        card_id: id,
        player_id: owner,
        from,
        to: settled,
    });

    let source = ctx.source.or(Some(id));
    let args = SignalArgs {
        player_id: Some(owner),
        target_player_id: Some(owner),
        card_id: Some(id),
        target_card_id: Some(id),
        card_type: Some(card.kind),
        source_pile: Some(from),
        destination_pile: Some(settled),
        ..SignalArgs::default()
    };
    match settled {
        Zone::Field | Zone::Ideology => {
            let opponent = SignalArgs {
                target_player_id: Some(owner.opponent()),
                ..args.clone()
            };
            ctx.signal_front(EffectKind::CardPlacedThis, args.clone(), source);
            ctx.signal_front(EffectKind::CardPlaced, args.clone(), source);
            ctx.signal_front(EffectKind::CardPlacedOwner, args, source);
            ctx.signal_front(EffectKind::CardPlacedOpponent, opponent, source);
        }
        Zone::Hand => {
            ctx.signal_front(EffectKind::CardAddedToHandThis, args.clone(), source);
            ctx.signal_front(EffectKind::CardAddedToHand, args.clone(), source);
            ctx.signal_front(EffectKind::CardAddedToHandOwner, args.clone(), source);
            if from == Zone::Deck {
                ctx.signal_front(EffectKind::CardDrawnThis, args.clone(), source);
                ctx.signal_front(EffectKind::CardDrawn, args.clone(), source);
                ctx.signal_front(EffectKind::CardDrawnOwner, args, source);
            }
        }
        Zone::Discard if from != Zone::Discard => signal_discard(ctx, args, source),
        _ => {}
    }

    if let Some(incumbent) = displaced.and_then(|old| ctx.state.card(old).cloned()) {
        if incumbent.name == card.name {
            ctx.push_front_from(
                Effect::ModifyConsciousness(ResourceChange::new(owner, 1, Some(id))),
                Some(id),
            );
        }
        let replaced = SignalArgs {
            player_id: Some(incumbent.owner),
            target_player_id: Some(incumbent.owner),
            card_id: Some(incumbent.id),
            target_card_id: Some(incumbent.id),
            card_type: Some(incumbent.kind),
            source_pile: Some(Zone::Ideology),
            destination_pile: Some(Zone::Discard),
            ..SignalArgs::default()
        };
        signal_discard(ctx, replaced, Some(incumbent.id));
    }
}

fn signal_discard(ctx: &mut HandlerContext<'_>, args: SignalArgs, source: Option<InstanceId>) {
    ctx.signal_front(EffectKind::CardDiscardedThis, args.clone(), source);
    ctx.signal_front(EffectKind::CardDiscarded, args.clone(), source);
    ctx.signal_front(EffectKind::CardDiscardedOwner, args, source);
}

/// Take the card out of the pile the move names. Field moves also accept
/// the ideology slot. Cards in `playing_event` and `game_source` are not
/// held by any pile.
fn detach(state: &mut GameState, card: &CardInstance, mv: &MoveCard) -> bool {
    match mv.source_pile {
        Zone::GameSource => true,
        Zone::PlayingEvent => card.location == Zone::PlayingEvent,
        Zone::Removed => false,
        zone => {
            state.player_mut(mv.player_id).piles.remove(zone, card.id)
                || (card.owner != mv.player_id && state.player_mut(card.owner).piles.remove(zone, card.id))
        }
    }
}

/// Undo a detach for a move that had nowhere to go.
fn restore(state: &mut GameState, card: &CardInstance, from: Zone) {
    if !from.is_player_pile() {
        return;
    }
    let GameState { players, rng, .. } = state;
    players[card.owner].piles.insert(from, card.id, None, rng);
}

/// Put a card in the ideology slot. The previous ideology goes straight to
/// discard and is returned.
fn seat_ideology(ctx: &mut HandlerContext<'_>, player: PlayerId, id: InstanceId) -> Option<InstanceId> {
    let piles = &mut ctx.state.player_mut(player).piles;
    let incumbent = piles.ideology.replace(id).filter(|old| *old != id);
    if let Some(old) = incumbent {
        piles.discard.push_back(old);
        if let Some(card) = ctx.state.card_mut(old) {
            card.location = Zone::Discard;
        }
        tracing::debug!(replaced = %old, by = %id, %player, "ideology replaced");
        ctx.record(PresentationRecord::CardMoved {
            card_id: old,
            player_id: player,
            from: Zone::Ideology,
            to: Zone::Discard,
        });
    }
    incumbent
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{queued, queued_kinds, run, state};
    use super::*;
    use crate::zones::DeckPosition;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    #[test]
    fn test_draw_expands_into_concrete_move() {
        let mut state = state();
        let top = state.deal_card("農園", P0, Zone::Deck).unwrap();
        state.deal_card("工場", P0, Zone::Deck).unwrap();

        run(&mut state, &Effect::MoveCard(MoveCard::draw(P0)), None);

        assert_eq!(state.player(P0).piles.deck.len(), 2);
        match queued(&state).as_slice() {
            [Effect::MoveCard(mv)] => {
                assert_eq!(mv.card_id, CardRef::Id(top));
                assert_eq!(mv.source_pile, Zone::Deck);
            }
            other => panic!("unexpected queue {other:?}"),
        }
    }

    #[test]
    fn test_draw_signal_order() {
        let mut state = state();
        let card = state.deal_card("農園", P0, Zone::Deck).unwrap();
        let mv = MoveCard::new(P0, card, Zone::Deck, Zone::Hand);

        run(&mut state, &Effect::MoveCard(mv), None);

        assert_eq!(state.player(P0).piles.cards(Zone::Hand), vec![card]);
        assert_eq!(
            queued_kinds(&state),
            vec![
                EffectKind::CardDrawnOwner,
                EffectKind::CardDrawn,
                EffectKind::CardDrawnThis,
                EffectKind::CardAddedToHandOwner,
                EffectKind::CardAddedToHand,
                EffectKind::CardAddedToHandThis,
            ]
        );
    }

    #[test]
    fn test_field_placement_signals() {
        let mut state = state();
        let card = state.deal_card("農園", P0, Zone::Hand).unwrap();

        run(&mut state, &Effect::MoveCard(MoveCard::new(P0, card, Zone::Hand, Zone::Field)), None);

        assert_eq!(state.card(card).unwrap().location, Zone::Field);
        let effects = queued(&state);
        assert_eq!(effects.len(), 4);
        assert_eq!(effects[0].kind(), EffectKind::CardPlacedOpponent);
        assert_eq!(effects[0].view().target_player_id, Some(P1));
        assert_eq!(effects[3].kind(), EffectKind::CardPlacedThis);
        assert_eq!(state.queue[0].source, Some(card));
    }

    #[test]
    fn test_missing_source_card_is_ignored() {
        let mut state = state();
        let card = state.deal_card("農園", P0, Zone::Discard).unwrap();

        run(&mut state, &Effect::MoveCard(MoveCard::new(P0, card, Zone::Hand, Zone::Field)), None);

        assert!(state.queue.is_empty());
        assert_eq!(state.player(P0).piles.cards(Zone::Discard), vec![card]);
    }

    #[test]
    fn test_full_hand_redirects_to_discard() {
        let mut state = state();
        state.player_mut(P0).hand_capacity = 1;
        state.deal_card("マネー", P0, Zone::Hand).unwrap();
        let card = state.deal_card("農園", P0, Zone::Field).unwrap();

        run(&mut state, &Effect::MoveCard(MoveCard::new(P0, card, Zone::Field, Zone::Hand)), None);

        assert_eq!(state.card(card).unwrap().location, Zone::Discard);
        assert_eq!(state.player(P0).piles.hand.len(), 1);
        assert!(state
            .animation_queue
            .iter()
            .any(|record| matches!(record, PresentationRecord::LimitWarning { card_id, .. } if *card_id == card)));
        assert_eq!(queued_kinds(&state).last(), Some(&EffectKind::CardDiscardedThis));
    }

    #[test]
    fn test_stats_reset_unless_maintained() {
        let mut state = state();
        let card = state.deal_card("農園", P0, Zone::Field).unwrap();
        state.card_mut(card).unwrap().current_durability = 1;

        run(&mut state, &Effect::MoveCard(MoveCard::new(P0, card, Zone::Field, Zone::Hand)), None);
        assert_eq!(state.card(card).unwrap().current_durability, 5);

        let money = state.deal_card("マネー", P0, Zone::Field).unwrap();
        state.card_mut(money).unwrap().current_durability = 12;
        run(&mut state, &Effect::MoveCard(MoveCard::new(P0, money, Zone::Field, Zone::Hand)), None);
        assert_eq!(state.card(money).unwrap().current_durability, 12);
    }

    #[test]
    fn test_ideology_replacement_order() {
        let mut state = state();
        let old = state.deal_card("資本主義", P0, Zone::Hand).unwrap();
        run(&mut state, &Effect::MoveCard(MoveCard::new(P0, old, Zone::Hand, Zone::Ideology)), None);
        state.queue.clear();

        let new = state.deal_card("資本主義", P0, Zone::Hand).unwrap();
        run(&mut state, &Effect::MoveCard(MoveCard::new(P0, new, Zone::Hand, Zone::Field)), None);

        assert_eq!(state.player(P0).piles.ideology, Some(new));
        assert_eq!(state.card(old).unwrap().location, Zone::Discard);
        assert_eq!(
            queued_kinds(&state),
            vec![
                EffectKind::CardDiscardedOwner,
                EffectKind::CardDiscarded,
                EffectKind::CardDiscardedThis,
                EffectKind::ModifyConsciousness,
                EffectKind::CardPlacedOpponent,
                EffectKind::CardPlacedOwner,
                EffectKind::CardPlaced,
                EffectKind::CardPlacedThis,
            ]
        );
    }

    #[test]
    fn test_replaced_ideology_move_is_recorded() {
        let mut state = state();
        let old = state.deal_card("資本主義", P0, Zone::Hand).unwrap();
        run(&mut state, &Effect::MoveCard(MoveCard::new(P0, old, Zone::Hand, Zone::Ideology)), None);
        state.animation_queue.clear();

        let new = state.deal_card("社会主義", P0, Zone::Hand).unwrap();
        run(&mut state, &Effect::MoveCard(MoveCard::new(P0, new, Zone::Hand, Zone::Ideology)), None);

        let moves: Vec<_> = state
            .animation_queue
            .iter()
            .filter_map(|record| match record {
                PresentationRecord::CardMoved { card_id, from, to, .. } => Some((*card_id, *from, *to)),
                _ => None,
            })
            .collect();
        assert_eq!(
            moves,
            vec![(old, Zone::Ideology, Zone::Discard), (new, Zone::Hand, Zone::Ideology)]
        );
    }

    #[test]
    fn test_different_ideology_grants_nothing() {
        let mut state = state();
        let old = state.deal_card("資本主義", P0, Zone::Hand).unwrap();
        run(&mut state, &Effect::MoveCard(MoveCard::new(P0, old, Zone::Hand, Zone::Ideology)), None);
        state.queue.clear();

        let new = state.deal_card("社会主義", P0, Zone::Hand).unwrap();
        run(&mut state, &Effect::MoveCard(MoveCard::new(P0, new, Zone::Hand, Zone::Ideology)), None);
        assert!(!queued_kinds(&state).contains(&EffectKind::ModifyConsciousness));
    }

    #[test]
    fn test_move_to_opponent_changes_owner() {
        let mut state = state();
        let card = state.deal_card("農園", P0, Zone::Discard).unwrap();
        let mv = MoveCard {
            target_player_id: Some(P1),
            ..MoveCard::new(P0, card, Zone::Discard, Zone::Deck).at(DeckPosition::Top)
        };

        run(&mut state, &Effect::MoveCard(mv), None);

        assert_eq!(state.card(card).unwrap().owner, P1);
        assert_eq!(state.player(P1).piles.deck.front(), Some(&card));
        assert!(state.queue.is_empty());
    }

    #[test]
    fn test_play_event_card_queue() {
        let mut state = state();
        let card = state.deal_card("演説", P0, Zone::Hand).unwrap();

        let play = PlayCard {
            player_id: P0,
            card_id: card,
            target_card_id: None,
        };
        run(&mut state, &Effect::PlayerAction(play), Some(card));

        assert_eq!(state.player(P0).cards_played_this_turn, 1);
        assert_eq!(state.temp(LAST_PLAYED_CARD_ID), card.as_temp_value());
        assert_eq!(
            queued_kinds(&state),
            vec![
                EffectKind::MoveCard,
                EffectKind::PlayEventThis,
                EffectKind::MoveCard,
                EffectKind::PlayEvent,
                EffectKind::PlayEventOwner,
                EffectKind::PlayEventOpponent,
                EffectKind::PlayerPlayCardAction,
            ]
        );
        match &queued(&state)[0] {
            Effect::MoveCard(mv) => assert_eq!(mv.destination_pile, Zone::PlayingEvent),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_play_wealth_card_queue() {
        let mut state = state();
        let card = state.deal_card("農園", P0, Zone::Hand).unwrap();
        let play = PlayCard {
            player_id: P0,
            card_id: card,
            target_card_id: None,
        };
        run(&mut state, &Effect::PlayerAction(play), Some(card));

        assert_eq!(
            queued_kinds(&state),
            vec![EffectKind::MoveCard, EffectKind::PlayerPlayCardAction]
        );
    }

    #[test]
    fn test_add_card_respects_field_wealth_limit() {
        let mut state = state();
        state.deal_card("農園", P0, Zone::Field).unwrap();
        state.deal_card("農園", P0, Zone::Field).unwrap();

        let add = AddCard {
            condition_field_wealth_limit: Some(2),
            ..AddCard::new(P0, "マネー", Zone::Field)
        };
        run(&mut state, &Effect::AddCard(add.clone()), None);
        assert_eq!(state.player(P0).piles.field.len(), 2);

        let add = AddCard {
            condition_field_wealth_limit: Some(3),
            ..add
        };
        run(&mut state, &Effect::AddCard(add), None);
        assert_eq!(state.player(P0).piles.field.len(), 3);
    }

    #[test]
    fn test_add_card_to_hand_signals_and_durability() {
        let mut state = state();
        let add = AddCard::new(P1, "マネー", Zone::Hand).with_durability(7);

        run(&mut state, &Effect::AddCard(add), None);

        let id = state.player(P1).piles.hand[0];
        assert_eq!(state.card(id).unwrap().current_durability, 7);
        assert_eq!(
            queued_kinds(&state),
            vec![
                EffectKind::CardAddedToHandOwner,
                EffectKind::CardAddedToHand,
                EffectKind::CardAddedToHandThis,
            ]
        );
    }

    #[test]
    fn test_add_card_sums_field_wealth() {
        let mut state = state();
        state.deal_card("農園", P0, Zone::Field).unwrap();
        state.deal_card("マネー", P0, Zone::Field).unwrap();
        let add = AddCard {
            initial_durability: Some(InitialDurability::Formula(DurabilityFormula::SelfAllWealthOnField)),
            ..AddCard::new(P0, "マネー", Zone::Deck)
        };

        run(&mut state, &Effect::AddCard(add), None);

        let id = state.player(P0).piles.deck[0];
        assert_eq!(state.card(id).unwrap().durability, 8);
    }

    #[test]
    fn test_remove_card() {
        let mut state = state();
        let card = state.deal_card("資本主義", P1, Zone::Hand).unwrap();
        run(&mut state, &Effect::MoveCard(MoveCard::new(P1, card, Zone::Hand, Zone::Ideology)), None);

        run(
            &mut state,
            &Effect::RemoveCard(RemoveCard {
                card_id: card,
                player_id: None,
            }),
            None,
        );
        assert_eq!(state.player(P1).piles.ideology, None);
        assert_eq!(state.card(card).unwrap().location, Zone::Removed);
    }
}
