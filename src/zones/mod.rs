//! Zones: pile names and per-player pile storage.
//!
//! ## Key Types
//!
//! - `Zone`: Named location of a card (hand, field, deck, discard, ideology,
//!   the transient play zone)
//! - `DeckPosition`: Where a card enters the deck
//! - `Piles`: One player's ordered piles plus the ideology slot

pub mod manager;
pub mod pile;

pub use manager::Piles;
pub use pile::{DeckPosition, Zone};
