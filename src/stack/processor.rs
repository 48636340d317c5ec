//! Queue draining.

use crate::core::GameState;
use crate::effects::handlers::{self, HandlerContext};
use crate::presentation::{EffectObserver, PresentationRecord};
use crate::rules::game_over::{self, GameResult, SAFETY_BREAK};
use crate::triggers::ReactionResolver;

use super::{QueuedEffect, ResolutionStatus, Trace};

/// Drain the effect queue.
///
/// Each step pops the front entry, runs its handler, queues the reactions it
/// provokes ahead of everything else and re-evaluates the game result.
/// Processing stops when a decision is pending, the game ends, or both the
/// live queue and the delayed buffer are empty. The delayed buffer is moved
/// into the live queue each time the live queue runs dry.
///
/// Exceeding `RulesConfig::step_limit` effects in one call ends the game
/// with a `Halted` result instead of looping forever.
pub fn process_effects(
    state: &mut GameState,
    resolver: &ReactionResolver,
    observer: &mut dyn EffectObserver,
) -> ResolutionStatus {
    let _span = tracing::debug_span!("process_effects", queued = state.queue.len()).entered();
    let mut steps: u32 = 0;

    loop {
        if let Some(status) = suspended(state) {
            return status;
        }

        let Some(entry) = next_entry(state) else {
            return ResolutionStatus::Complete;
        };

        steps += 1;
        if steps > state.config.step_limit {
            tracing::warn!(steps, kind = %entry.effect.kind(), "step limit exceeded");
            state.queue.push_front(entry);
            let record = game_over::finish(
                state,
                GameResult::Halted {
                    reason: SAFETY_BREAK.to_string(),
                },
            );
            observer.on_record(&record);
            return ResolutionStatus::GameOver;
        }

        step(state, resolver, observer, &entry);
    }
}

fn suspended(state: &GameState) -> Option<ResolutionStatus> {
    if state.is_over() {
        return Some(ResolutionStatus::GameOver);
    }
    state
        .awaiting_input
        .as_ref()
        .map(|decision| ResolutionStatus::AwaitingInput(decision.player_id))
}

/// Front of the live queue, refilled from the delayed buffer when empty.
fn next_entry(state: &mut GameState) -> Option<QueuedEffect> {
    if state.queue.is_empty() && !state.delayed.is_empty() {
        tracing::debug!(count = state.delayed.len(), "flushing delayed effects");
        let delayed = std::mem::take(&mut state.delayed);
        state.queue.append(delayed);
    }
    state.queue.pop_front()
}

fn step(
    state: &mut GameState,
    resolver: &ReactionResolver,
    observer: &mut dyn EffectObserver,
    entry: &QueuedEffect,
) {
    let kind = entry.effect.kind();

    if consume_skip(state, entry) {
        tracing::debug!(%kind, "effect skipped");
        let record = PresentationRecord::EffectNullified {
            effect_type: kind,
            player_id: entry.effect.player_id(),
        };
        observer.on_record(&record);
        state.animation_queue.push_back(record);
        return;
    }

    tracing::debug!(%kind, source = ?entry.source, "dispatch");
    observer.on_effect(&entry.effect, entry.source);
    {
        let trace = entry.trace.as_deref();
        let mut ctx = HandlerContext::new(state, resolver, observer, entry.source, trace);
        handlers::apply(&mut ctx, &entry.effect);
    }

    if state.awaiting_input.is_some() {
        if settle_result(state, observer) {
            // A decided game takes no more answers.
            state.awaiting_input = None;
        }
        return;
    }

    let reactions = resolver.resolve(state, entry);
    if !reactions.is_empty() {
        let view = entry.effect.view();
        let trace = Trace {
            kind,
            source_card_id: view.source_card_id.or(entry.source),
            view,
        };
        for reaction in reactions.into_iter().rev() {
            tracing::debug!(trigger = %kind, reaction = %reaction.effect.kind(), card = ?reaction.source, "reaction");
            state.queue.push_front(reaction.with_trace(trace.clone()));
        }
    }

    settle_result(state, observer);
}

/// Record the game result once the state decides it. Returns whether the
/// game ended on this call.
fn settle_result(state: &mut GameState, observer: &mut dyn EffectObserver) -> bool {
    if state.is_over() {
        return false;
    }
    let Some(result) = game_over::evaluate(state) else {
        return false;
    };
    let record = game_over::finish(state, result);
    observer.on_record(&record);
    true
}

/// Consume a one-shot skip registered for this kind and player.
fn consume_skip(state: &mut GameState, entry: &QueuedEffect) -> bool {
    let kind = entry.effect.kind();
    let Some(player) = state.effects_to_skip.get(&kind).copied() else {
        return false;
    };
    if entry.effect.player_id() != Some(player) {
        return false;
    }
    state.effects_to_skip.remove(&kind);
    true
}
