//! End-to-end engine tests: complete games, game-over conditions and the
//! safety break.

mod common;

use std::sync::Arc;

use common::*;
use ideology_ccg::core::{EngineError, RulesConfig};
use ideology_ccg::presentation::{EffectLog, NoopObserver, PresentationRecord};
use ideology_ccg::rules::{Engine, GameResult};
use ideology_ccg::stack::ResolutionStatus;
use ideology_ccg::zones::Zone;

fn deck(names: &[&str], copies: usize) -> Vec<String> {
    names
        .iter()
        .flat_map(|name| std::iter::repeat(name.to_string()).take(copies))
        .collect()
}

/// Play the first playable hand card. Returns whether anything was played.
fn play_something(engine: &mut Engine) -> bool {
    let player = engine.state().current_turn;
    let hand: Vec<_> = engine.state().player(player).piles.hand.iter().copied().collect();
    hand.into_iter()
        .any(|card| engine.play_card(player, card, &mut NoopObserver).is_ok())
}

/// Quiet decks run until a deck empties; the higher consciousness wins.
#[test]
fn test_full_game_ends_by_deck_out() {
    init_tracing();
    let decks = [deck(&["農園", "工場"], 5), deck(&["農園", "工場"], 5)];
    let mut engine = Engine::new_game(registry(), Arc::new(RulesConfig::default()), decks, 2024).unwrap();
    let first = engine.state().first_player;

    let mut status = engine.start_turn(&mut NoopObserver).unwrap();
    for _ in 0..40 {
        if status == ResolutionStatus::GameOver {
            break;
        }
        play_something(&mut engine);
        if engine.state().is_over() {
            break;
        }
        status = engine.end_turn(&mut NoopObserver).unwrap();
    }

    let state = engine.state();
    let result = state.result.clone().expect("game finished");
    assert_eq!(result.reason(), "deck out");
    // The first player's handicap decides an otherwise even game.
    assert!(result.is_winner(first.opponent()));
    assert!(state.round > 1);
    assert!(matches!(
        state.animation_queue.last(),
        Some(PresentationRecord::GameResult { .. })
    ));
    assert!(matches!(engine.end_turn(&mut NoopObserver), Err(EngineError::GameOver)));
}

/// Two engines with the same seed and the same requests stay identical.
#[test]
fn test_same_seed_same_game() {
    let run = || {
        let decks = [deck(&["農園", "工場", "マネー"], 4), deck(&["農園", "戦士"], 6)];
        let mut engine = Engine::new_game(registry(), Arc::new(RulesConfig::default()), decks, 99).unwrap();
        engine.start_turn(&mut NoopObserver).unwrap();
        play_something(&mut engine);
        engine.end_turn(&mut NoopObserver).unwrap();
        play_something(&mut engine);
        engine.into_state()
    };
    let a = run();
    let b = run();

    assert_eq!(a.current_turn, b.current_turn);
    assert_eq!(a.round, b.round);
    for player in [P0, P1] {
        assert_eq!(a.player(player), b.player(player));
    }
    assert_eq!(a.animation_queue, b.animation_queue);
}

/// Reducing a player to zero consciousness ends the game immediately.
#[test]
fn test_lethal_event_ends_game() {
    let mut state = table(P1);
    let event = deal(&mut state, "致命打", P1, Zone::Hand);
    deal(&mut state, "農園", P1, Zone::Hand);
    let mut engine = engine(state);

    let mut log = EffectLog::new();
    let status = engine.play_card(P1, event, &mut log).unwrap();

    assert_eq!(status, ResolutionStatus::GameOver);
    let result = engine.state().result.clone().unwrap();
    assert_eq!(
        result,
        GameResult::Winner {
            player: P1,
            reason: "consciousness depleted".into()
        }
    );
    assert_eq!(engine.state().player(P0).consciousness, 0);
    assert!(log.records.iter().any(|record| matches!(
        record,
        PresentationRecord::GameResult { winner: Some(winner), is_victory: false, .. } if *winner == P1
    )));
}

/// A self-feeding trigger is stopped by the step limit.
#[test]
fn test_runaway_trigger_hits_safety_break() {
    init_tracing();
    let mut state = state_with(RulesConfig::default().with_step_limit(60));
    stock_decks(&mut state);
    deal(&mut state, "永久機関", P0, Zone::Field);
    deal(&mut state, "工場", P0, Zone::Field);
    let mut engine = engine(state);

    let status = engine.start_turn(&mut NoopObserver).unwrap();

    assert_eq!(status, ResolutionStatus::GameOver);
    let result = engine.state().result.clone().unwrap();
    assert_eq!(result.winner(), None);
    assert!(result.reason().starts_with("safety break"));
    assert!(!engine.state().queue.is_empty());
}

/// Drawing the last deck card ends the game at the end of that drain.
#[test]
fn test_drawing_last_card_ends_game() {
    let mut state = state();
    deal(&mut state, "農園", P0, Zone::Deck);
    for _ in 0..3 {
        deal(&mut state, "農園", P1, Zone::Deck);
    }
    state.player_mut(P1).consciousness = 40;
    let mut engine = engine(state);

    let status = engine.start_turn(&mut NoopObserver).unwrap();

    assert_eq!(status, ResolutionStatus::GameOver);
    assert_eq!(engine.state().player(P0).piles.hand.len(), 1);
    assert!(engine.state().result.as_ref().unwrap().is_winner(P0));
}

/// A snapshot continues exactly like the engine it was taken from.
#[test]
fn test_snapshot_resumes_identically() {
    let mut state = table(P0);
    deal(&mut state, "工場", P0, Zone::Field);
    let mut engine = engine(state);
    engine.start_turn(&mut NoopObserver).unwrap();

    let snapshot = engine.snapshot();
    let mut resumed = Engine::from_state(snapshot);
    engine.end_turn(&mut NoopObserver).unwrap();
    resumed.end_turn(&mut NoopObserver).unwrap();

    assert_eq!(engine.state().current_turn, resumed.state().current_turn);
    assert_eq!(engine.state().player(P1), resumed.state().player(P1));
    assert_eq!(engine.state().player(P0).scale, 22);
}
