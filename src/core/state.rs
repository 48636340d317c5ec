//! Game state.
//!
//! ## PlayerState
//!
//! Per-seat resources and piles:
//! - Consciousness (reaching 0 loses the game) and scale (gates plays)
//! - Hand, field, deck, discard and the ideology slot
//! - Field limit, hand capacity, plays this turn
//! - Pending one-shot corrections
//!
//! ## GameState
//!
//! Complete session state including:
//! - Both players
//! - The card instance registry (single source of truth for card stats)
//! - The live effect queue and the delayed buffer
//! - Pending decision, scratch values, skip registrations
//! - Presentation records and the RNG
//!
//! Uses `im` persistent collections so a snapshot clone is O(1) and every
//! engine call can hand back a fresh state without sharing mutable data.

use std::sync::Arc;

use im::{OrdMap, Vector};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::config::RulesConfig;
use super::entity::InstanceId;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{CardInstance, CardRegistry, CardTemplate};
use crate::effects::correction::Correction;
use crate::effects::EffectKind;
use crate::presentation::PresentationRecord;
use crate::rules::decision::PendingDecision;
use crate::rules::game_over::GameResult;
use crate::stack::QueuedEffect;
use crate::zones::{Piles, Zone};

/// Scratch key holding the most recent corrected consciousness change.
pub const LAST_CONSCIOUSNESS_CHANGE: &str = "last_consciousness_change";
/// Scratch key holding the most recent corrected scale change.
pub const LAST_SCALE_CHANGE: &str = "last_scale_change";
/// Scratch key holding the id of the last card played.
pub const LAST_PLAYED_CARD_ID: &str = "last_played_card_id";
/// Scratch key read by `amount_based_on_removed_discard_count`.
pub const REMOVED_DISCARD_COUNT: &str = "removed_discard_count";

/// Scratch key recording how much consciousness `player` actually lost last.
#[must_use]
pub fn last_decrease_key(player: PlayerId) -> String {
    format!("player{}_last_consciousness_decrease", player.index() + 1)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub consciousness: i64,
    pub scale: i64,
    pub piles: Piles,
    pub field_limit: i64,
    pub hand_capacity: usize,
    pub cards_played_this_turn: u32,
    pub corrections: Vector<Correction>,
}

impl PlayerState {
    #[must_use]
    pub fn new(name: impl Into<String>, config: &RulesConfig) -> Self {
        Self {
            name: name.into(),
            consciousness: config.initial_consciousness,
            scale: config.initial_scale,
            piles: Piles::new(),
            field_limit: config.field_limit,
            hand_capacity: config.hand_capacity,
            cards_played_this_turn: 0,
            corrections: Vector::new(),
        }
    }

    #[must_use]
    pub fn hand_is_full(&self) -> bool {
        self.piles.hand.len() >= self.hand_capacity
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub players: PlayerMap<PlayerState>,

    /// Every card instance ever created, keyed by id.
    pub instances: OrdMap<InstanceId, CardInstance>,

    pub templates: Arc<CardRegistry>,
    pub config: Arc<RulesConfig>,

    /// Live queue; index 0 is processed next.
    pub queue: Vector<QueuedEffect>,

    /// Flushed into the live queue once it drains.
    pub delayed: Vector<QueuedEffect>,

    pub awaiting_input: Option<PendingDecision>,

    /// Cross-effect scratch values.
    pub temp: FxHashMap<String, i64>,

    /// One-shot skips: the next effect of this kind for this player is nullified.
    pub effects_to_skip: FxHashMap<EffectKind, PlayerId>,

    pub exposed_cards: Vector<InstanceId>,

    pub current_turn: PlayerId,
    /// Seat that moved first; a round ends when the other seat ends its turn.
    pub first_player: PlayerId,
    pub round: u32,

    pub result: Option<GameResult>,

    /// Presentation-only records for an external renderer.
    pub animation_queue: Vector<PresentationRecord>,

    pub rng: GameRng,

    next_instance_id: u32,
}

impl GameState {
    /// Create an empty session: no cards, both players at starting values.
    #[must_use]
    pub fn new(templates: Arc<CardRegistry>, config: Arc<RulesConfig>, seed: u64) -> Self {
        let players = PlayerMap::new(|player| PlayerState::new(player.to_string(), &config));
        Self {
            players,
            instances: OrdMap::new(),
            templates,
            config,
            queue: Vector::new(),
            delayed: Vector::new(),
            awaiting_input: None,
            temp: FxHashMap::default(),
            effects_to_skip: FxHashMap::default(),
            exposed_cards: Vector::new(),
            current_turn: PlayerId::new(0),
            first_player: PlayerId::new(0),
            round: 1,
            result: None,
            animation_queue: Vector::new(),
            rng: GameRng::new(seed),
            next_instance_id: 1,
        }
    }

    // === Players ===

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    // === Cards ===

    #[must_use]
    pub fn card(&self, id: InstanceId) -> Option<&CardInstance> {
        self.instances.get(&id)
    }

    pub fn card_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        self.instances.get_mut(&id)
    }

    #[must_use]
    pub fn template(&self, name: &str) -> Option<&CardTemplate> {
        self.templates.get(name)
    }

    /// Reserve the next instance id.
    pub fn allocate_instance_id(&mut self) -> InstanceId {
        let id = InstanceId::new(self.next_instance_id);
        self.next_instance_id += 1;
        id
    }

    /// Register a fresh instance of `template`. The caller places it in a pile.
    pub fn create_instance(
        &mut self,
        template: &str,
        owner: PlayerId,
        location: Zone,
    ) -> Option<InstanceId> {
        let templates = Arc::clone(&self.templates);
        let template = templates.get(template)?;
        let id = self.allocate_instance_id();
        self.instances
            .insert(id, CardInstance::from_template(template, id, owner, location));
        Some(id)
    }

    /// Create an instance and append it to one of the owner's piles.
    pub fn deal_card(&mut self, template: &str, owner: PlayerId, zone: Zone) -> Option<InstanceId> {
        let id = self.create_instance(template, owner, zone)?;
        let Self { players, rng, .. } = self;
        players[owner].piles.insert(zone, id, None, rng);
        Some(id)
    }

    /// Which player's pile currently holds `id`, and which pile.
    #[must_use]
    pub fn locate(&self, id: InstanceId) -> Option<(PlayerId, Zone)> {
        const ZONES: [Zone; 5] = [Zone::Field, Zone::Ideology, Zone::Hand, Zone::Deck, Zone::Discard];
        self.players.iter().find_map(|(player, state)| {
            ZONES
                .iter()
                .find(|zone| state.piles.contains(**zone, id))
                .map(|zone| (player, *zone))
        })
    }

    /// Cards in one of a player's piles, resolved through the registry.
    pub fn cards_in(&self, player: PlayerId, zone: Zone) -> impl Iterator<Item = &CardInstance> + '_ {
        self.players[player]
            .piles
            .cards(zone)
            .into_iter()
            .filter_map(move |id| self.card(id))
    }

    /// Wealth cards on a player's field, in field order.
    #[must_use]
    pub fn wealth_on_field(&self, player: PlayerId) -> Vec<InstanceId> {
        self.cards_in(player, Zone::Field)
            .filter(|card| card.is_wealth())
            .map(|card| card.id)
            .collect()
    }

    /// The first money card on a player's field.
    #[must_use]
    pub fn money_on_field(&self, player: PlayerId) -> Option<&CardInstance> {
        let money = &self.config.names.money;
        self.cards_in(player, Zone::Field)
            .find(|card| &card.name == money)
    }

    /// Scale available for paying required scale: scale plus field money durability.
    #[must_use]
    pub fn effective_scale(&self, player: PlayerId) -> i64 {
        let money = self
            .money_on_field(player)
            .map_or(0, |card| card.current_durability);
        self.players[player].scale + money
    }

    // === Scratch values ===

    #[must_use]
    pub fn temp(&self, key: &str) -> i64 {
        self.temp.get(key).copied().unwrap_or(0)
    }

    pub fn set_temp(&mut self, key: impl Into<String>, value: i64) {
        self.temp.insert(key.into(), value);
    }
}
