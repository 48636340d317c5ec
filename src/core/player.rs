//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Seat identifier for the two-player game. Seat 0 and seat 1 are each
//! other's opponent.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats at the table.
pub const SEATS: usize = 2;

/// Seat identifier. The first player is `PlayerId(0)`.
///
/// Deserializing rejects seats past `SEATS`, so content cannot name a
/// missing player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Zero-based seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat across the table.
    ///
    /// ```
    /// use ideology_ccg::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).opponent(), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(1).opponent(), PlayerId::new(0));
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - (self.0 % 2))
    }

    /// Iterate over both seats in seat order.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..SEATS as u8).map(PlayerId)
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = String;

    fn try_from(seat: u8) -> Result<Self, Self::Error> {
        if usize::from(seat) < SEATS {
            Ok(Self(seat))
        } else {
            Err(format!("no seat {seat} at a {SEATS}-seat table"))
        }
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> Self {
        player.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// One value per seat, indexable by `PlayerId`.
///
/// ```
/// use ideology_ccg::core::{PlayerId, PlayerMap};
///
/// let mut consciousness: PlayerMap<i64> = PlayerMap::new(|_| 50);
/// consciousness[PlayerId::new(1)] -= 4;
/// assert_eq!(consciousness[PlayerId::new(0)], 50);
/// assert_eq!(consciousness[PlayerId::new(1)], 46);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerMap<T> {
    seats: [T; SEATS],
}

impl<T> PlayerMap<T> {
    pub fn new(mut factory: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            seats: [factory(PlayerId(0)), factory(PlayerId(1))],
        }
    }

    /// Seat order: `(PlayerId(0), _)` first.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all().zip(self.seats.iter())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        &self.seats[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.index()]
    }
}
