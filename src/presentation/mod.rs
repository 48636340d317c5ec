//! Presentation-only output.
//!
//! The engine appends `PresentationRecord`s to `GameState::animation_queue`
//! and forwards every processed effect and record to an `EffectObserver`.
//! Nothing in the rules reads these back, so a session runs identically
//! whether or not anyone consumes them.

use serde::{Deserialize, Serialize};

use crate::core::{InstanceId, PlayerId};
use crate::effects::{Effect, EffectKind};
use crate::zones::Zone;

/// A change amount before and after corrections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountChange {
    pub original: i64,
    pub actual: i64,
    pub corrected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_card_id: Option<InstanceId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PresentationRecord {
    CardMoved {
        card_id: InstanceId,
        player_id: PlayerId,
        from: Zone,
        to: Zone,
    },
    ConsciousnessChanged {
        player_id: PlayerId,
        #[serde(flatten)]
        change: AmountChange,
    },
    ScaleChanged {
        player_id: PlayerId,
        #[serde(flatten)]
        change: AmountChange,
    },
    CardDurabilityChanged {
        card_id: InstanceId,
        #[serde(flatten)]
        change: AmountChange,
    },
    /// A card could not enter a full hand.
    LimitWarning { player_id: PlayerId, card_id: InstanceId },
    EffectNullified {
        effect_type: EffectKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        player_id: Option<PlayerId>,
    },
    TurnBanner { player_id: PlayerId, round: u32 },
    GameResult {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        winner: Option<PlayerId>,
        reason: String,
        /// Whether the configured viewpoint player won.
        is_victory: bool,
    },
}

/// Receives every processed effect and presentation record.
///
/// Passed explicitly into each processing call.
pub trait EffectObserver {
    fn on_effect(&mut self, _effect: &Effect, _source: Option<InstanceId>) {}

    fn on_record(&mut self, _record: &PresentationRecord) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl EffectObserver for NoopObserver {}

/// Observer that keeps everything it sees, in order.
#[derive(Clone, Debug, Default)]
pub struct EffectLog {
    pub effects: Vec<(EffectKind, Option<InstanceId>)>,
    pub records: Vec<PresentationRecord>,
}

impl EffectLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Kinds of processed effects, in processing order.
    #[must_use]
    pub fn kinds(&self) -> Vec<EffectKind> {
        self.effects.iter().map(|(kind, _)| *kind).collect()
    }

    /// Index of the first processed effect of `kind`.
    #[must_use]
    pub fn position(&self, kind: EffectKind) -> Option<usize> {
        self.effects.iter().position(|(k, _)| *k == kind)
    }

    #[must_use]
    pub fn count(&self, kind: EffectKind) -> usize {
        self.effects.iter().filter(|(k, _)| *k == kind).count()
    }
}

impl EffectObserver for EffectLog {
    fn on_effect(&mut self, effect: &Effect, source: Option<InstanceId>) {
        self.effects.push((effect.kind(), source));
    }

    fn on_record(&mut self, record: &PresentationRecord) {
        self.records.push(record.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_form() {
        let record = PresentationRecord::ConsciousnessChanged {
            player_id: PlayerId::new(0),
            change: AmountChange {
                original: -4,
                actual: -1,
                corrected: true,
                source_card_id: None,
            },
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "CONSCIOUSNESS_CHANGED");
        assert_eq!(json["original"], -4);
        assert_eq!(json["actual"], -1);

        let back: PresentationRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_effect_log_records_order() {
        let mut log = EffectLog::new();
        log.on_effect(&Effect::CheckGameOver, None);
        log.on_effect(&Effect::CheckGameOver, Some(InstanceId(2)));
        assert_eq!(log.count(EffectKind::CheckGameOver), 2);
        assert_eq!(log.position(EffectKind::CheckGameOver), Some(0));
        assert_eq!(log.effects[1].1, Some(InstanceId(2)));
    }
}
