//! One-shot magnitude modifiers ("corrections").
//!
//! A reaction can queue a `Correction` on a player. The next resource or
//! durability change that matches its target and direction consumes every
//! matching correction at once, whether or not each one ended up binding.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::InstanceId;

/// Which quantity a correction watches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionTarget {
    Consciousness,
    Scale,
    /// Durability of the player's wealth cards.
    Wealth,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionDirection {
    Increase,
    Decrease,
}

impl CorrectionDirection {
    /// Direction of a raw change. Zero counts as a decrease.
    #[must_use]
    pub fn of(amount: i64) -> Self {
        if amount > 0 {
            Self::Increase
        } else {
            Self::Decrease
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionKind {
    /// Caps the magnitude.
    Limit,
    /// Adds to the magnitude.
    Amplification,
    /// Subtracts from the magnitude, never past zero.
    Attenuation,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    #[serde(rename = "correct_target")]
    pub target: CorrectionTarget,
    #[serde(rename = "correct_direction")]
    pub direction: CorrectionDirection,
    #[serde(rename = "correct_type")]
    pub kind: CorrectionKind,
    #[serde(default)]
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_card_id: Option<InstanceId>,
}

impl Correction {
    #[must_use]
    pub fn new(
        target: CorrectionTarget,
        direction: CorrectionDirection,
        kind: CorrectionKind,
        amount: i64,
    ) -> Self {
        Self {
            target,
            direction,
            kind,
            amount,
            source_card_id: None,
        }
    }

    #[must_use]
    pub fn matches(&self, target: CorrectionTarget, direction: CorrectionDirection) -> bool {
        self.target == target && self.direction == direction
    }
}

/// Result of running an amount through a player's corrections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Corrected {
    pub original: i64,
    pub actual: i64,
    /// At least one correction matched and was consumed.
    pub corrected: bool,
}

impl Corrected {
    /// A non-zero change reduced to nothing.
    #[must_use]
    pub fn nullified(&self) -> bool {
        self.original != 0 && self.actual == 0
    }
}

/// Apply matching corrections to `amount` and remove them from `corrections`.
///
/// ```
/// use ideology_ccg::effects::correction::*;
/// use im::vector;
///
/// let mut list = vector![Correction::new(
///     CorrectionTarget::Consciousness,
///     CorrectionDirection::Decrease,
///     CorrectionKind::Attenuation,
///     1,
/// )];
/// let result = apply(&mut list, CorrectionTarget::Consciousness, -3);
/// assert_eq!(result.actual, -2);
/// assert!(list.is_empty());
/// ```
pub fn apply(
    corrections: &mut Vector<Correction>,
    target: CorrectionTarget,
    amount: i64,
) -> Corrected {
    let direction = CorrectionDirection::of(amount);
    let (matched, kept): (Vector<Correction>, Vector<Correction>) = corrections
        .iter()
        .cloned()
        .partition(|c| c.matches(target, direction));

    if matched.is_empty() {
        return Corrected {
            original: amount,
            actual: amount,
            corrected: false,
        };
    }
    *corrections = kept;

    let mut limit: Option<i64> = None;
    let mut adjustment = 0i64;
    for correction in &matched {
        match correction.kind {
            CorrectionKind::Limit => {
                let magnitude = correction.amount.abs();
                limit = Some(limit.map_or(magnitude, |l| l.min(magnitude)));
            }
            CorrectionKind::Amplification => adjustment += correction.amount,
            CorrectionKind::Attenuation => adjustment -= correction.amount,
        }
    }

    let sign = if amount >= 0 { 1 } else { -1 };
    let mut magnitude = (amount.abs() + adjustment).max(0);
    if let Some(limit) = limit {
        magnitude = magnitude.min(limit);
    }

    Corrected {
        original: amount,
        actual: magnitude * sign,
        corrected: true,
    }
}
