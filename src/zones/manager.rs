//! Per-player piles.
//!
//! `Piles` holds the ordered card lists of one player plus the single-card
//! ideology slot. Piles store instance ids only; card state lives in the
//! state's instance registry, so a pile entry and its card can never
//! disagree.
//!
//! ## Ordering
//!
//! - Deck: index 0 is the top (next draw).
//! - Field: index 0 is the leftmost card; `front` pairing uses indices.
//! - Hand, discard: insertion order.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{GameRng, InstanceId};

use super::pile::{DeckPosition, Zone};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piles {
    pub hand: Vector<InstanceId>,
    pub field: Vector<InstanceId>,
    pub deck: Vector<InstanceId>,
    pub discard: Vector<InstanceId>,
    pub ideology: Option<InstanceId>,
}

impl Piles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards in a zone, in pile order. The ideology slot yields zero or one.
    #[must_use]
    pub fn cards(&self, zone: Zone) -> Vec<InstanceId> {
        match zone {
            Zone::Hand => self.hand.iter().copied().collect(),
            Zone::Field => self.field.iter().copied().collect(),
            Zone::Deck => self.deck.iter().copied().collect(),
            Zone::Discard => self.discard.iter().copied().collect(),
            Zone::Ideology => self.ideology.into_iter().collect(),
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self, zone: Zone) -> usize {
        match zone {
            Zone::Hand => self.hand.len(),
            Zone::Field => self.field.len(),
            Zone::Deck => self.deck.len(),
            Zone::Discard => self.discard.len(),
            Zone::Ideology => usize::from(self.ideology.is_some()),
            _ => 0,
        }
    }

    #[must_use]
    pub fn contains(&self, zone: Zone, id: InstanceId) -> bool {
        match zone {
            Zone::Ideology => self.ideology == Some(id),
            _ => self.list(zone).map_or(false, |pile| pile.contains(&id)),
        }
    }

    /// Index of a card within an ordered pile.
    #[must_use]
    pub fn position(&self, zone: Zone, id: InstanceId) -> Option<usize> {
        self.list(zone)?.index_of(&id)
    }

    /// Every card this player holds in any pile, in reaction scan order:
    /// field, hand, discard, ideology, deck.
    pub fn scan_order(&self) -> impl Iterator<Item = InstanceId> + '_ {
        self.field
            .iter()
            .chain(self.hand.iter())
            .chain(self.discard.iter())
            .chain(self.ideology.iter())
            .chain(self.deck.iter())
            .copied()
    }

    /// Remove a card from a zone. Removing from the field also clears the
    /// ideology slot when the card sits there.
    ///
    /// Returns `false` when the card was not found.
    pub fn remove(&mut self, zone: Zone, id: InstanceId) -> bool {
        match zone {
            Zone::Ideology => self.take_ideology(id),
            Zone::Field => {
                if let Some(index) = self.field.index_of(&id) {
                    self.field.remove(index);
                    true
                } else {
                    self.take_ideology(id)
                }
            }
            _ => match self.list_mut(zone) {
                Some(pile) => match pile.index_of(&id) {
                    Some(index) => {
                        pile.remove(index);
                        true
                    }
                    None => false,
                },
                None => false,
            },
        }
    }

    /// Append to a pile. Deck insertions honor `position`; other piles ignore it.
    ///
    /// Returns `false` for zones that are not player piles. The ideology slot is
    /// overwritten; callers displace the incumbent first.
    pub fn insert(
        &mut self,
        zone: Zone,
        id: InstanceId,
        position: Option<DeckPosition>,
        rng: &mut GameRng,
    ) -> bool {
        match zone {
            Zone::Deck => {
                match position {
                    Some(DeckPosition::Top) => self.deck.push_front(id),
                    Some(DeckPosition::Random) => {
                        let index = rng.gen_index(self.deck.len() + 1);
                        self.deck.insert(index, id);
                    }
                    Some(DeckPosition::Bottom) | None => self.deck.push_back(id),
                }
                true
            }
            Zone::Ideology => {
                self.ideology = Some(id);
                true
            }
            _ => match self.list_mut(zone) {
                Some(pile) => {
                    pile.push_back(id);
                    true
                }
                None => false,
            },
        }
    }

    /// Take the top deck card.
    pub fn draw(&mut self) -> Option<InstanceId> {
        self.deck.pop_front()
    }

    fn take_ideology(&mut self, id: InstanceId) -> bool {
        if self.ideology == Some(id) {
            self.ideology = None;
            true
        } else {
            false
        }
    }

    fn list(&self, zone: Zone) -> Option<&Vector<InstanceId>> {
        match zone {
            Zone::Hand => Some(&self.hand),
            Zone::Field => Some(&self.field),
            Zone::Deck => Some(&self.deck),
            Zone::Discard => Some(&self.discard),
            _ => None,
        }
    }

    fn list_mut(&mut self, zone: Zone) -> Option<&mut Vector<InstanceId>> {
        match zone {
            Zone::Hand => Some(&mut self.hand),
            Zone::Field => Some(&mut self.field),
            Zone::Deck => Some(&mut self.deck),
            Zone::Discard => Some(&mut self.discard),
            _ => None,
        }
    }
}
