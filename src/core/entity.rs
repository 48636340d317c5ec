//! Card instance identification.
//!
//! Every physical card in a session, whether dealt from a deck or generated
//! mid-game by an effect, gets a unique `InstanceId`. Ids are allocated
//! monotonically by `GameState::allocate_instance_id` and never reused, so an
//! id stays valid after its card is discarded or removed from the game.
//!
//! ```
//! use ideology_ccg::core::InstanceId;
//!
//! let id = InstanceId::new(7);
//! assert_eq!(id.raw(), 7);
//! assert_eq!(id.to_string(), "#7");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier of a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub u32);

impl InstanceId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Encode for the integer-only temp store.
    #[must_use]
    pub const fn as_temp_value(self) -> i64 {
        self.0 as i64
    }

    /// Decode a value previously written with `as_temp_value`.
    #[must_use]
    pub fn from_temp_value(value: i64) -> Option<Self> {
        u32::try_from(value).ok().map(Self)
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
