//! Card instances - runtime card state.
//!
//! `CardInstance` is one physical copy of a template during a session. It
//! records where the card is, who owns it, and the stats effects may have
//! changed (durability, required scale). The template name links back to the
//! static data, including the trigger table.

use serde::{Deserialize, Serialize};

use super::definition::{CardKind, CardTemplate};
use crate::core::{InstanceId, PlayerId};
use crate::zones::Zone;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    pub id: InstanceId,
    /// Template name.
    pub name: String,
    pub kind: CardKind,
    pub owner: PlayerId,
    pub location: Zone,
    pub required_scale: i64,
    /// Maximum durability of this copy. Starts at the template value and may
    /// be overridden when the card is generated.
    pub durability: i64,
    pub current_durability: i64,
}

impl CardInstance {
    /// Create a fresh copy of a template.
    #[must_use]
    pub fn from_template(
        template: &CardTemplate,
        id: InstanceId,
        owner: PlayerId,
        location: Zone,
    ) -> Self {
        Self {
            id,
            name: template.name.clone(),
            kind: template.kind,
            owner,
            location,
            required_scale: template.required_scale,
            durability: template.durability,
            current_durability: template.durability,
        }
    }

    /// Override both maximum and current durability.
    #[must_use]
    pub fn with_durability(mut self, durability: i64) -> Self {
        self.durability = durability;
        self.current_durability = durability;
        self
    }

    /// Restore template stats after leaving play.
    pub fn reset_to(&mut self, template: &CardTemplate) {
        if self.kind == CardKind::Wealth {
            self.durability = template.durability;
            self.current_durability = template.durability;
        }
        self.required_scale = template.required_scale;
    }

    #[must_use]
    pub fn is_wealth(&self) -> bool {
        self.kind == CardKind::Wealth
    }

    #[must_use]
    pub fn is_ideology(&self) -> bool {
        self.kind == CardKind::Ideology
    }

    #[must_use]
    pub fn is_event(&self) -> bool {
        self.kind == CardKind::Event
    }
}
