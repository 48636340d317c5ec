//! Effects that only leave a marker for later effects to consume.

use super::HandlerContext;
use crate::effects::{AddCorrection, SkipEffect};

pub(super) fn add_correction(ctx: &mut HandlerContext<'_>, add: &AddCorrection) {
    tracing::debug!(player = %add.player_id, correction = ?add.correction, "correction registered");
    ctx.state
        .player_mut(add.player_id)
        .corrections
        .push_back(add.correction.clone());
}

/// A later registration for the same kind replaces the earlier one.
pub(super) fn register_skip(ctx: &mut HandlerContext<'_>, skip: &SkipEffect) {
    ctx.state.effects_to_skip.insert(skip.effect_type, skip.player_id);
}
