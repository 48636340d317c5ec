//! Benchmarks for queue draining and snapshotting.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::json;

use ideology_ccg::cards::{CardKind, CardRegistry, CardTemplate};
use ideology_ccg::core::{GameState, PlayerId, RulesConfig};
use ideology_ccg::effects::{CardOperation, Effect, EffectKind, PlayerAlias, PlayerSet};
use ideology_ccg::presentation::NoopObserver;
use ideology_ccg::rules::Engine;
use ideology_ccg::stack::{process_effects, QueuedEffect};
use ideology_ccg::triggers::{ReactionResolver, TriggerTemplate};
use ideology_ccg::zones::Zone;

fn registry() -> Arc<CardRegistry> {
    let mut registry = CardRegistry::new();
    registry.register(CardTemplate::new("農園", CardKind::Wealth).with_durability(3));
    registry.register(
        CardTemplate::new("工場", CardKind::Wealth)
            .with_durability(4)
            .with_trigger(
                EffectKind::StartTurnOwner,
                TriggerTemplate::new(EffectKind::ModifyScaleReserve)
                    .with_arg("player_id", json!("self"))
                    .with_arg("amount", json!(2)),
            )
            .with_trigger(
                EffectKind::WealthDurabilityZeroThis,
                TriggerTemplate::new(EffectKind::ModifyConsciousnessReserve)
                    .with_arg("player_id", json!("self"))
                    .with_arg("amount", json!(1)),
            ),
    );
    Arc::new(registry)
}

fn full_board() -> GameState {
    let mut state = GameState::new(registry(), Arc::new(RulesConfig::default()), 42);
    for player in PlayerId::all() {
        for _ in 0..20 {
            state.deal_card("農園", player, Zone::Deck);
        }
        for _ in 0..5 {
            state.deal_card("工場", player, Zone::Field);
        }
    }
    state
}

fn bench_board_wipe(c: &mut Criterion) {
    let board = full_board();
    let resolver = ReactionResolver::new();
    let wipe = CardOperation::wealth_durability(
        Some(PlayerId::new(0)),
        PlayerSet::Alias(PlayerAlias::SelfAndOpponent),
        -10,
    );

    c.bench_function("board_wipe_10_wealth", |b| {
        b.iter(|| {
            let mut state = board.clone();
            state
                .queue
                .push_back(QueuedEffect::new(Effect::CardOperation(wipe.clone()), None));
            let status = process_effects(&mut state, &resolver, &mut NoopObserver);
            black_box(status)
        });
    });
}

fn bench_turn_cycle(c: &mut Criterion) {
    let board = full_board();

    c.bench_function("turn_cycle", |b| {
        b.iter(|| {
            let mut engine = Engine::from_state(board.clone());
            engine.start_turn(&mut NoopObserver).ok();
            for _ in 0..6 {
                engine.end_turn(&mut NoopObserver).ok();
            }
            black_box(engine.state().round)
        });
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let board = full_board();

    c.bench_function("snapshot_clone", |b| {
        b.iter(|| black_box(board.clone()));
    });
}

criterion_group!(benches, bench_board_wipe, bench_turn_cycle, bench_snapshot);
criterion_main!(benches);
