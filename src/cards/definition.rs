//! Card templates - static card data.
//!
//! `CardTemplate` holds the immutable properties of a named card: its kind,
//! required scale, base durability and trigger table. Mutable per-copy data
//! (location, owner, current durability) lives in `CardInstance`.

use serde::{Deserialize, Serialize};

use crate::effects::EffectKind;
use crate::triggers::{TriggerTable, TriggerTemplate};

/// The three card kinds.
///
/// Content may use either the English names or the original labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    /// Stays on the field with durability; destroyed at zero.
    #[serde(alias = "財")]
    Wealth,
    /// Occupies the single ideology slot.
    #[serde(alias = "イデオロギー")]
    Ideology,
    /// Resolves once through the transient play zone, then is discarded.
    #[serde(alias = "事象")]
    Event,
}

/// Static card template.
///
/// ## Example
///
/// ```
/// use ideology_ccg::cards::{CardKind, CardTemplate};
///
/// let farm = CardTemplate::new("農場", CardKind::Wealth)
///     .with_required_scale(5)
///     .with_durability(3);
///
/// assert_eq!(farm.durability, 3);
/// assert!(farm.triggers.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub name: String,
    #[serde(rename = "card_type")]
    pub kind: CardKind,
    #[serde(default)]
    pub required_scale: i64,
    #[serde(default)]
    pub durability: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub triggers: TriggerTable,
}

impl CardTemplate {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required_scale: 0,
            durability: 0,
            description: None,
            triggers: TriggerTable::default(),
        }
    }

    #[must_use]
    pub fn with_required_scale(mut self, required_scale: i64) -> Self {
        self.required_scale = required_scale;
        self
    }

    #[must_use]
    pub fn with_durability(mut self, durability: i64) -> Self {
        self.durability = durability;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a reaction template under `on`.
    #[must_use]
    pub fn with_trigger(mut self, on: EffectKind, template: TriggerTemplate) -> Self {
        self.triggers.entry(on).or_default().push(template);
        self
    }

    /// Reaction templates for an effect kind, empty when none.
    #[must_use]
    pub fn reactions_to(&self, kind: EffectKind) -> &[TriggerTemplate] {
        self.triggers.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}
