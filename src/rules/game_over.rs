//! Win/loss evaluation.
//!
//! Run after every processed effect. Once a result is set it never changes.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, PlayerId};
use crate::presentation::PresentationRecord;
use crate::zones::Zone;

/// Reason recorded when the step limit stops a drain.
pub const SAFETY_BREAK: &str = "safety break (possible infinite loop)";

/// Result of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameResult {
    /// The rules produced a winner.
    Winner { player: PlayerId, reason: String },
    /// Processing was stopped without a winner.
    Halted { reason: String },
}

impl GameResult {
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            Self::Winner { player, .. } => Some(*player),
            Self::Halted { .. } => None,
        }
    }

    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner() == Some(player)
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::Winner { reason, .. } | Self::Halted { reason } => reason,
        }
    }
}

/// Decide the winner from the current state, if the game is over.
///
/// Consciousness at or below zero loses. An empty deck on either side ends
/// the game in favour of the higher consciousness; a tie goes against the
/// player whose turn it is. The deck-out verdict takes precedence.
#[must_use]
pub fn evaluate(state: &GameState) -> Option<GameResult> {
    let p1 = PlayerId::new(0);
    let p2 = PlayerId::new(1);
    let c1 = state.player(p1).consciousness;
    let c2 = state.player(p2).consciousness;

    let mut verdict = if c1 <= 0 {
        Some((p2, "consciousness depleted"))
    } else if c2 <= 0 {
        Some((p1, "consciousness depleted"))
    } else {
        None
    };

    let deck_out = PlayerId::all().any(|player| state.player(player).piles.len(Zone::Deck) == 0);
    if deck_out {
        let winner = match c1.cmp(&c2) {
            std::cmp::Ordering::Greater => p1,
            std::cmp::Ordering::Less => p2,
            std::cmp::Ordering::Equal => state.current_turn.opponent(),
        };
        verdict = Some((winner, "deck out"));
    }

    verdict.map(|(player, reason)| GameResult::Winner {
        player,
        reason: reason.to_string(),
    })
}

/// Set the result and record it, unless the game is already over.
///
/// Returns whether this call ended the game.
pub fn check_game_over(state: &mut GameState) -> bool {
    if state.is_over() {
        return false;
    }
    match evaluate(state) {
        Some(result) => {
            finish(state, result);
            true
        }
        None => false,
    }
}

/// End the game with `result` and append the `GAME_RESULT` record.
pub(crate) fn finish(state: &mut GameState, result: GameResult) -> PresentationRecord {
    tracing::info!(winner = ?result.winner(), reason = result.reason(), "game over");
    let record = PresentationRecord::GameResult {
        winner: result.winner(),
        reason: result.reason().to_string(),
        is_victory: result.is_winner(state.config.viewpoint),
    };
    state.animation_queue.push_back(record.clone());
    state.result = Some(result);
    record
}
