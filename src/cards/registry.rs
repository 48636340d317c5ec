//! Card registry for template lookup by name.
//!
//! The `CardRegistry` holds every template of a content set. Templates are
//! keyed by name because effects refer to cards by name
//! (`card_template_name`, choice options, generated tokens).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{CardKind, CardTemplate};
use crate::core::EngineError;

/// Registry of card templates.
///
/// ## Example
///
/// ```
/// use ideology_ccg::cards::{CardKind, CardRegistry, CardTemplate};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardTemplate::new("マネー", CardKind::Wealth).with_durability(1));
///
/// let money = registry.get("マネー").unwrap();
/// assert_eq!(money.durability, 1);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "Vec<CardTemplate>", into = "Vec<CardTemplate>")]
pub struct CardRegistry {
    templates: FxHashMap<String, CardTemplate>,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of templates.
    ///
    /// Unknown effect kinds in trigger tables and duplicate names are errors.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let templates: Vec<CardTemplate> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for template in templates {
            registry.try_register(template)?;
        }
        Ok(registry)
    }

    /// Register a template.
    ///
    /// Panics if a template with the same name already exists.
    pub fn register(&mut self, template: CardTemplate) {
        if self.templates.contains_key(&template.name) {
            panic!("Card template {} already registered", template.name);
        }
        self.templates.insert(template.name.clone(), template);
    }

    /// Register a template, reporting duplicates instead of panicking.
    pub fn try_register(&mut self, template: CardTemplate) -> Result<(), EngineError> {
        if self.templates.contains_key(&template.name) {
            return Err(EngineError::DuplicateTemplate(template.name));
        }
        self.templates.insert(template.name.clone(), template);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CardTemplate> {
        self.templates.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.templates.values()
    }

    pub fn find_by_kind(&self, kind: CardKind) -> impl Iterator<Item = &CardTemplate> {
        self.templates.values().filter(move |t| t.kind == kind)
    }
}

impl From<Vec<CardTemplate>> for CardRegistry {
    fn from(templates: Vec<CardTemplate>) -> Self {
        Self {
            templates: templates.into_iter().map(|t| (t.name.clone(), t)).collect(),
        }
    }
}

impl From<CardRegistry> for Vec<CardTemplate> {
    fn from(registry: CardRegistry) -> Self {
        let mut templates: Vec<_> = registry.templates.into_values().collect();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        templates
    }
}
