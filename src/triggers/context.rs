//! What a reacting card sees while its templates are evaluated.

use crate::cards::{CardInstance, CardKind};
use crate::core::{GameState, PlayerId, PlayerState};
use crate::effects::{EffectKind, EffectView};
use crate::zones::Zone;

/// One reacting card against one processed effect.
#[derive(Clone, Copy)]
pub struct ReactionContext<'a> {
    pub state: &'a GameState,
    pub card: &'a CardInstance,
    /// Kind of the processed effect.
    pub trigger: EffectKind,
    pub view: &'a EffectView,
}

impl<'a> ReactionContext<'a> {
    #[must_use]
    pub fn new(state: &'a GameState, card: &'a CardInstance, trigger: EffectKind, view: &'a EffectView) -> Self {
        Self {
            state,
            card,
            trigger,
            view,
        }
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.card.owner
    }

    #[must_use]
    pub fn opponent(&self) -> PlayerId {
        self.card.owner.opponent()
    }

    #[must_use]
    pub fn owner_state(&self) -> &'a PlayerState {
        self.state.player(self.owner())
    }

    #[must_use]
    pub fn opponent_state(&self) -> &'a PlayerState {
        self.state.player(self.opponent())
    }

    /// Whether the reacting card currently occupies its owner's ideology slot.
    #[must_use]
    pub fn is_seated_ideology(&self) -> bool {
        self.owner_state().piles.ideology == Some(self.card.id)
    }

    /// Wealth cards on a player's field.
    #[must_use]
    pub fn wealth_count(&self, player: PlayerId) -> i64 {
        len_i64(self.state.wealth_on_field(player).len())
    }

    /// Number of cards in one of a player's piles.
    #[must_use]
    pub fn pile_len(&self, player: PlayerId, zone: Zone) -> i64 {
        len_i64(self.state.player(player).piles.len(zone))
    }

    /// The triggering effect's `card_id`, looked up in the registry.
    #[must_use]
    pub fn triggering_card(&self) -> Option<&'a CardInstance> {
        self.view.card_id.and_then(|id| self.state.card(id))
    }

    /// Whether the triggering card exists and is of `kind`.
    #[must_use]
    pub fn triggering_card_is(&self, kind: CardKind) -> bool {
        self.triggering_card().is_some_and(|card| card.kind == kind)
    }

    /// The most recent card in the owner's hand.
    #[must_use]
    pub fn newest_hand_card(&self) -> Option<&'a CardInstance> {
        self.owner_state()
            .piles
            .hand
            .back()
            .and_then(|id| self.state.card(*id))
    }
}

pub(crate) fn len_i64(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}
