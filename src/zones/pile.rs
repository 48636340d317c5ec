//! Pile names and insertion positions.

use serde::{Deserialize, Serialize};

/// Where a card instance currently is, or which pile an effect names.
///
/// `PlayingEvent` is the transient zone an event card occupies while its
/// play resolves. `GameSource` is only meaningful as a move source for cards
/// that did not come from any pile. `Removed` marks cards permanently taken
/// out of the game; such instances stay in the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Hand,
    Field,
    Deck,
    #[serde(alias = "discard_pile")]
    Discard,
    Ideology,
    PlayingEvent,
    GameSource,
    Removed,
}

impl Zone {
    /// Zones that hold a per-player pile (or the ideology slot).
    #[must_use]
    pub fn is_player_pile(self) -> bool {
        matches!(
            self,
            Self::Hand | Self::Field | Self::Deck | Self::Discard | Self::Ideology
        )
    }

    /// Field or ideology slot.
    #[must_use]
    pub fn is_in_play(self) -> bool {
        matches!(self, Self::Field | Self::Ideology)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Hand => "hand",
            Self::Field => "field",
            Self::Deck => "deck",
            Self::Discard => "discard",
            Self::Ideology => "ideology",
            Self::PlayingEvent => "playing_event",
            Self::GameSource => "game_source",
            Self::Removed => "removed",
        };
        f.write_str(name)
    }
}

/// Insertion point for cards entering the deck. Index 0 is the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckPosition {
    Top,
    Bottom,
    Random,
}
