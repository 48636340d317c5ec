//! Session driver.
//!
//! `Engine` owns a `GameState` and the reaction resolver, validates player
//! requests, queues the effects they start and drains the queue. Processing
//! never fails; only requests that make no sense in the current state are
//! rejected with an `EngineError`.

use std::sync::Arc;

use im::Vector;

use crate::cards::{CardKind, CardRegistry};
use crate::core::{EngineError, GameState, InstanceId, PlayRejection, PlayerId, RulesConfig, SEATS};
use crate::effects::{Effect, EffectKind, PlayCard, PlayerTarget, SignalArgs};
use crate::presentation::{EffectObserver, PresentationRecord};
use crate::stack::{process_effects, QueuedEffect, ResolutionStatus};
use crate::triggers::ReactionResolver;
use crate::zones::Zone;

use super::decision::Choice;
use super::game_over;

/// A running game.
///
/// ```
/// use std::sync::Arc;
/// use ideology_ccg::cards::{CardKind, CardRegistry, CardTemplate};
/// use ideology_ccg::core::RulesConfig;
/// use ideology_ccg::presentation::NoopObserver;
/// use ideology_ccg::rules::Engine;
/// use ideology_ccg::stack::ResolutionStatus;
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardTemplate::new("農園", CardKind::Wealth).with_durability(2));
/// let deck = vec!["農園".to_string(); 10];
///
/// let mut engine = Engine::new_game(
///     Arc::new(registry),
///     Arc::new(RulesConfig::default()),
///     [deck.clone(), deck],
///     42,
/// )
/// .unwrap();
/// let status = engine.start_turn(&mut NoopObserver).unwrap();
/// assert_eq!(status, ResolutionStatus::Complete);
/// assert_eq!(engine.state().player(engine.state().current_turn).piles.hand.len(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct Engine {
    state: GameState,
    resolver: ReactionResolver,
    /// An end-of-turn drain stopped for input; the turn passes once it finishes.
    turn_ending: bool,
}

impl Engine {
    /// Set up a new game: build both decks, shuffle, deal the opening hands
    /// and pick the first player.
    ///
    /// The first turn is not started; call [`Engine::start_turn`].
    pub fn new_game(
        templates: Arc<CardRegistry>,
        config: Arc<RulesConfig>,
        decks: [Vec<String>; SEATS],
        seed: u64,
    ) -> Result<Self, EngineError> {
        if let Some(unknown) = decks.iter().flatten().find(|name| !templates.contains(name)) {
            return Err(EngineError::UnknownTemplate(unknown.clone()));
        }

        let mut state = GameState::new(templates, config, seed);
        for (player, names) in PlayerId::all().zip(decks.iter()) {
            let mut deck = Vec::with_capacity(names.len());
            for name in names {
                let id = state
                    .create_instance(name, player, Zone::Deck)
                    .ok_or_else(|| EngineError::UnknownTemplate(name.clone()))?;
                deck.push(id);
            }
            state.rng.shuffle(&mut deck);
            state.player_mut(player).piles.deck = deck.into_iter().collect::<Vector<_>>();
            deal_opening_hand(&mut state, player);
        }

        let first = if state.rng.flip() {
            PlayerId::new(0)
        } else {
            PlayerId::new(1)
        };
        state.current_turn = first;
        state.first_player = first;
        let handicap = state.config.first_player_consciousness;
        state.player_mut(first).consciousness += handicap;
        tracing::info!(first = %first, handicap, seed, "game initialized");

        Ok(Self::from_state(state))
    }

    /// Resume from an existing snapshot.
    #[must_use]
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            resolver: ReactionResolver::new(),
            turn_ending: false,
        }
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: ReactionResolver) -> Self {
        self.resolver = resolver;
        self
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// O(1) copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn resolver(&self) -> &ReactionResolver {
        &self.resolver
    }

    /// Play a card from `player`'s hand.
    pub fn play_card(
        &mut self,
        player: PlayerId,
        card: InstanceId,
        observer: &mut dyn EffectObserver,
    ) -> Result<ResolutionStatus, EngineError> {
        self.play(
            PlayCard {
                player_id: player,
                card_id: card,
                target_card_id: None,
            },
            observer,
        )
    }

    /// Validate a play, queue it behind anything already waiting and drain.
    pub fn play(&mut self, play: PlayCard, observer: &mut dyn EffectObserver) -> Result<ResolutionStatus, EngineError> {
        self.ensure_idle()?;
        self.check_play(&play).map_err(EngineError::IllegalPlay)?;

        tracing::debug!(player = %play.player_id, card = %play.card_id, "play requested");
        let source = Some(play.card_id);
        self.state
            .queue
            .push_back(QueuedEffect::new(Effect::PlayerAction(play), source));
        Ok(self.drain(observer))
    }

    /// Whether `player` could play `card` right now.
    pub fn check_play(&self, play: &PlayCard) -> Result<(), PlayRejection> {
        let state = &self.state;
        let player = play.player_id;
        if state.current_turn != player {
            return Err(PlayRejection::NotYourTurn {
                current: state.current_turn,
            });
        }
        let piles = &state.player(player).piles;
        let card = state
            .card(play.card_id)
            .filter(|_| piles.contains(Zone::Hand, play.card_id))
            .ok_or(PlayRejection::NotInHand)?;

        let available = state.effective_scale(player);
        if available < card.required_scale {
            return Err(PlayRejection::InsufficientScale {
                required: card.required_scale,
                available,
            });
        }

        if card.kind == CardKind::Wealth {
            let forbidding = &state.config.names.primitive_communism;
            let ideology = piles.ideology.and_then(|id| state.card(id));
            if ideology.is_some_and(|ideology| &ideology.name == forbidding) {
                return Err(PlayRejection::WealthForbidden {
                    ideology: forbidding.clone(),
                });
            }
            let limit = state.player(player).field_limit;
            if i64::try_from(piles.field.len()).unwrap_or(i64::MAX) >= limit {
                return Err(PlayRejection::FieldFull { limit });
            }
        }
        Ok(())
    }

    /// Begin the current player's turn: draw, then the start-of-turn signals.
    pub fn start_turn(&mut self, observer: &mut dyn EffectObserver) -> Result<ResolutionStatus, EngineError> {
        self.ensure_idle()?;
        let player = self.state.current_turn;
        let round = self.state.round;
        self.state.player_mut(player).cards_played_this_turn = 0;
        self.announce(PresentationRecord::TurnBanner { player_id: player, round }, observer);
        tracing::info!(%player, round, "turn started");

        self.queue_back(Effect::DrawCard(PlayerTarget::new(player)));
        self.queue_back(turn_signal(EffectKind::StartTurnOwner, player, player));
        self.queue_back(turn_signal(EffectKind::StartTurnOpponent, player, player.opponent()));
        Ok(self.drain(observer))
    }

    /// End the current turn. Once the end-of-turn effects settle, the turn
    /// passes and the next one starts.
    pub fn end_turn(&mut self, observer: &mut dyn EffectObserver) -> Result<ResolutionStatus, EngineError> {
        self.ensure_idle()?;
        let player = self.state.current_turn;
        tracing::info!(%player, "turn ending");

        self.queue_back(turn_signal(EffectKind::EndTurnOwner, player, player));
        self.queue_back(turn_signal(EffectKind::EndTurnOpponent, player, player.opponent()));
        self.turn_ending = true;
        self.finish_turn(observer)
    }

    /// Answer the pending decision and continue processing.
    pub fn resolve_input(
        &mut self,
        choice: Choice,
        observer: &mut dyn EffectObserver,
    ) -> Result<ResolutionStatus, EngineError> {
        if self.state.is_over() {
            return Err(EngineError::GameOver);
        }
        let decision = self
            .state
            .awaiting_input
            .as_ref()
            .ok_or(EngineError::NoPendingDecision)?;
        let source = decision.source_card_id;
        if self.state.card(source).is_none() {
            return Err(EngineError::MissingSourceCard(source));
        }
        let piles = &self.state.player(decision.player_id).piles;
        let resumed = decision
            .resume_with(choice, |zone, id| piles.contains(zone, id))
            .map_err(|expected| EngineError::ChoiceMismatch { expected })?;

        self.state.awaiting_input = None;
        if let Some(effect) = resumed {
            tracing::debug!(kind = %effect.kind(), card = %source, "resuming");
            self.state.queue.push_back(QueuedEffect::new(effect, Some(source)));
        }

        if self.turn_ending {
            self.finish_turn(observer)
        } else {
            Ok(self.drain(observer))
        }
    }

    /// Drain whatever is queued.
    pub fn process(&mut self, observer: &mut dyn EffectObserver) -> ResolutionStatus {
        self.drain(observer)
    }

    fn finish_turn(&mut self, observer: &mut dyn EffectObserver) -> Result<ResolutionStatus, EngineError> {
        let status = self.drain(observer);
        if status != ResolutionStatus::Complete {
            return Ok(status);
        }
        self.turn_ending = false;
        self.pass_turn();
        self.start_turn(observer)
    }

    fn pass_turn(&mut self) {
        let ending = self.state.current_turn;
        if ending != self.state.first_player {
            self.state.round += 1;
        }
        self.state.current_turn = ending.opponent();
    }

    fn drain(&mut self, observer: &mut dyn EffectObserver) -> ResolutionStatus {
        let status = process_effects(&mut self.state, &self.resolver, observer);
        if status != ResolutionStatus::Complete {
            return status;
        }
        match game_over::evaluate(&self.state) {
            Some(result) => {
                let record = game_over::finish(&mut self.state, result);
                observer.on_record(&record);
                ResolutionStatus::GameOver
            }
            None => status,
        }
    }

    fn ensure_idle(&self) -> Result<(), EngineError> {
        if self.state.is_over() {
            return Err(EngineError::GameOver);
        }
        if self.state.awaiting_input.is_some() {
            return Err(EngineError::DecisionPending);
        }
        Ok(())
    }

    fn queue_back(&mut self, effect: Effect) {
        self.state.queue.push_back(QueuedEffect::new(effect, None));
    }

    fn announce(&mut self, record: PresentationRecord, observer: &mut dyn EffectObserver) {
        observer.on_record(&record);
        self.state.animation_queue.push_back(record);
    }
}

fn turn_signal(kind: EffectKind, player: PlayerId, target: PlayerId) -> Effect {
    Effect::signal(
        kind,
        SignalArgs {
            player_id: Some(player),
            target_player_id: Some(target),
            ..SignalArgs::default()
        },
    )
}

fn deal_opening_hand(state: &mut GameState, player: PlayerId) {
    let count = state.config.initial_hand_size;
    for _ in 0..count {
        let Some(id) = state.player_mut(player).piles.draw() else {
            break;
        };
        state.player_mut(player).piles.hand.push_back(id);
        if let Some(card) = state.card_mut(id) {
            card.location = Zone::Hand;
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::cards::CardTemplate;
    use crate::effects::{CardOperation, CardOperationKind, SelectionMethod};
    use crate::presentation::{EffectLog, NoopObserver};
    use crate::rules::decision::{DecisionKind, DecisionPrompt, PendingDecision};
    use crate::triggers::TriggerTemplate;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn registry() -> CardRegistry {
        let mut registry = CardRegistry::new();
        registry.register(CardTemplate::new("農園", CardKind::Wealth).with_durability(2));
        registry.register(CardTemplate::new("工場", CardKind::Wealth).with_durability(4).with_required_scale(30));
        registry.register(CardTemplate::new("マネー", CardKind::Wealth).with_durability(15));
        registry.register(CardTemplate::new("原始共産制", CardKind::Ideology));
        registry.register(
            CardTemplate::new("重農主義", CardKind::Ideology).with_trigger(
                EffectKind::EndTurnOwner,
                TriggerTemplate::new(EffectKind::ModifyScale)
                    .with_arg("player_id", json!("self"))
                    .with_arg("amount", json!(3)),
            ),
        );
        registry
    }

    fn decks(size: usize) -> [Vec<String>; SEATS] {
        let deck = vec!["農園".to_string(); size];
        [deck.clone(), deck]
    }

    fn engine() -> Engine {
        Engine::new_game(Arc::new(registry()), Arc::new(RulesConfig::default()), decks(12), 5).unwrap()
    }

    /// An engine whose first player is P0, with an empty hand.
    fn seated_engine() -> Engine {
        let mut engine = engine();
        let state = engine.state_mut();
        state.current_turn = P0;
        state.first_player = P0;
        state.player_mut(P0).piles.hand.clear();
        engine
    }

    #[test]
    fn test_new_game_deals_and_handicaps() {
        let engine = engine();
        let state = engine.state();
        let first = state.current_turn;
        assert_eq!(state.first_player, first);
        for (player, seat) in state.players.iter() {
            assert_eq!(seat.piles.hand.len(), 5);
            assert_eq!(seat.piles.deck.len(), 7);
            let expected = if player == first { 47 } else { 50 };
            assert_eq!(seat.consciousness, expected);
        }
        let in_hand = state.player(first).piles.hand[0];
        assert_eq!(state.card(in_hand).unwrap().location, Zone::Hand);
    }

    #[test]
    fn test_new_game_is_deterministic() {
        let a = engine();
        let b = engine();
        assert_eq!(a.state().current_turn, b.state().current_turn);
        assert_eq!(a.state().player(P0).piles, b.state().player(P0).piles);
    }

    #[test]
    fn test_unknown_deck_card_is_rejected() {
        let decks = [vec!["幻".to_string()], Vec::new()];
        let err = Engine::new_game(Arc::new(registry()), Arc::new(RulesConfig::default()), decks, 1).unwrap_err();
        assert!(matches!(err, EngineError::UnknownTemplate(name) if name == "幻"));
    }

    #[test]
    fn test_play_validation() {
        let mut engine = seated_engine();
        let farm = engine.state_mut().deal_card("農園", P0, Zone::Hand).unwrap();
        let factory = engine.state_mut().deal_card("工場", P0, Zone::Hand).unwrap();
        let theirs = engine.state_mut().deal_card("農園", P1, Zone::Hand).unwrap();

        let rejection = |engine: &mut Engine, player, card| match engine.play_card(player, card, &mut NoopObserver) {
            Err(EngineError::IllegalPlay(reason)) => reason,
            other => panic!("expected rejection, got {other:?}"),
        };

        assert!(matches!(rejection(&mut engine, P1, theirs), PlayRejection::NotYourTurn { current } if current == P0));
        assert_eq!(rejection(&mut engine, P0, theirs), PlayRejection::NotInHand);
        assert_eq!(
            rejection(&mut engine, P0, factory),
            PlayRejection::InsufficientScale {
                required: 30,
                available: 20
            }
        );

        engine.state_mut().deal_card("マネー", P0, Zone::Field);
        assert!(engine.check_play(&PlayCard {
            player_id: P0,
            card_id: factory,
            target_card_id: None
        })
        .is_ok());

        engine.state_mut().player_mut(P0).field_limit = 1;
        assert_eq!(rejection(&mut engine, P0, farm), PlayRejection::FieldFull { limit: 1 });
    }

    #[test]
    fn test_primitive_communism_forbids_wealth() {
        let mut engine = seated_engine();
        engine.state_mut().deal_card("原始共産制", P0, Zone::Ideology);
        let farm = engine.state_mut().deal_card("農園", P0, Zone::Hand).unwrap();
        let err = engine.play_card(P0, farm, &mut NoopObserver).unwrap_err();
        assert!(matches!(
            err,
            EngineError::IllegalPlay(PlayRejection::WealthForbidden { ideology }) if ideology == "原始共産制"
        ));
    }

    #[test]
    fn test_play_card_places_wealth() {
        let mut engine = seated_engine();
        let farm = engine.state_mut().deal_card("農園", P0, Zone::Hand).unwrap();
        let mut log = EffectLog::new();

        let status = engine.play_card(P0, farm, &mut log).unwrap();
        assert_eq!(status, ResolutionStatus::Complete);
        let state = engine.state();
        assert!(state.player(P0).piles.field.contains(&farm));
        assert_eq!(state.player(P0).cards_played_this_turn, 1);
        assert_eq!(log.kinds()[0], EffectKind::PlayerAction);
    }

    #[test]
    fn test_turn_cycle_advances_round() {
        let mut engine = seated_engine();
        let mut log = EffectLog::new();

        engine.start_turn(&mut log).unwrap();
        assert_eq!(engine.state().player(P0).piles.hand.len(), 1);
        assert!(log.records.contains(&PresentationRecord::TurnBanner { player_id: P0, round: 1 }));

        engine.end_turn(&mut log).unwrap();
        assert_eq!(engine.state().current_turn, P1);
        assert_eq!(engine.state().round, 1);
        assert_eq!(engine.state().player(P1).piles.hand.len(), 6);

        engine.end_turn(&mut log).unwrap();
        assert_eq!(engine.state().current_turn, P0);
        assert_eq!(engine.state().round, 2);
        assert!(log.records.contains(&PresentationRecord::TurnBanner { player_id: P0, round: 2 }));
    }

    #[test]
    fn test_end_turn_triggers_owner_reactions() {
        let mut engine = seated_engine();
        engine.state_mut().deal_card("重農主義", P0, Zone::Ideology);
        engine.state_mut().deal_card("重農主義", P1, Zone::Ideology);

        engine.end_turn(&mut NoopObserver).unwrap();
        // The built-in rule wants a card played this turn.
        assert_eq!(engine.state().player(P0).scale, 20);

        engine.state_mut().player_mut(P1).cards_played_this_turn = 1;
        engine.end_turn(&mut NoopObserver).unwrap();
        assert_eq!(engine.state().player(P1).scale, 23);
        assert_eq!(engine.state().player(P0).scale, 20);
    }

    #[test]
    fn test_requests_refused_while_deciding() {
        let mut engine = seated_engine();
        let farm = engine.state_mut().deal_card("農園", P0, Zone::Hand).unwrap();
        engine.state_mut().awaiting_input = Some(PendingDecision::new(
            P0,
            farm,
            DecisionPrompt::ChoiceNumber {
                min: 0,
                max: 5,
                resume: Effect::ModifyScale(crate::effects::ResourceChange::new(P0, 0, None)),
            },
        ));

        assert!(matches!(engine.play_card(P0, farm, &mut NoopObserver), Err(EngineError::DecisionPending)));
        assert!(matches!(engine.end_turn(&mut NoopObserver), Err(EngineError::DecisionPending)));
        assert!(matches!(
            engine.resolve_input(Choice::Template("農園".into()), &mut NoopObserver),
            Err(EngineError::ChoiceMismatch {
                expected: DecisionKind::ChoiceNumber
            })
        ));

        let status = engine.resolve_input(Choice::Number(9), &mut NoopObserver).unwrap();
        assert_eq!(status, ResolutionStatus::Complete);
        assert_eq!(engine.state().player(P0).scale, 25);
        assert!(matches!(
            engine.resolve_input(Choice::Number(1), &mut NoopObserver),
            Err(EngineError::NoPendingDecision)
        ));
    }

    #[test]
    fn test_missing_source_card() {
        let mut engine = seated_engine();
        let ghost = InstanceId::new(9_999);
        engine.state_mut().awaiting_input = Some(PendingDecision::new(
            P0,
            ghost,
            DecisionPrompt::ChoiceCardToAdd {
                options: vec!["農園".into()],
            },
        ));
        let err = engine
            .resolve_input(Choice::Template("農園".into()), &mut NoopObserver)
            .unwrap_err();
        assert!(matches!(err, EngineError::MissingSourceCard(id) if id == ghost));
    }

    #[test]
    fn test_resume_operation_with_selected_cards() {
        let mut engine = seated_engine();
        let source = engine.state_mut().deal_card("農園", P0, Zone::Field).unwrap();
        let picked = engine.state_mut().deal_card("農園", P0, Zone::Hand).unwrap();
        let mut op = CardOperation::new(CardOperationKind::Move);
        op.player_id = Some(P0);
        op.source_pile = Some(Zone::Hand);
        op.destination_pile = Some(Zone::Discard);
        op.selection_method = SelectionMethod::Choice;
        op.count = Some(1);
        engine.state_mut().awaiting_input = Some(PendingDecision::new(
            P0,
            source,
            DecisionPrompt::ChoiceCardsForOperation {
                options: vec![picked],
                count: 1,
                resume: op,
            },
        ));

        engine.resolve_input(Choice::Cards(vec![picked]), &mut NoopObserver).unwrap();
        assert!(engine.state().player(P0).piles.discard.contains(&picked));
    }

    #[test]
    fn test_game_over_refuses_requests() {
        let mut engine = seated_engine();
        engine.state_mut().player_mut(P1).consciousness = 0;
        let status = engine.process(&mut NoopObserver);
        assert_eq!(status, ResolutionStatus::GameOver);
        assert_eq!(engine.state().result.as_ref().and_then(|r| r.winner()), Some(P0));
        assert!(matches!(engine.start_turn(&mut NoopObserver), Err(EngineError::GameOver)));
    }
}
