//! Typed argument payloads, one shape per handled effect kind.
//!
//! Field names match the content wire format. Optional fields default so that
//! content may omit them; a missing required field (usually `player_id`)
//! makes decoding fail, which the engine treats as a no-op.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::correction::Correction;
use super::effect::Effect;
use super::kind::EffectKind;
use crate::cards::CardKind;
use crate::core::{InstanceId, PlayerId};
use crate::zones::{DeckPosition, Zone};

// ---------------------------------------------------------------------------
// References resolved at handler time
// ---------------------------------------------------------------------------

/// Card references only a handler can resolve, because they depend on the
/// state at the moment the effect runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardAlias {
    /// The top card of the player's deck.
    DrawFromDeck,
    /// The money card on the source card owner's field.
    SelfMoneyOnField,
    /// The opposing field card at the source card's field index.
    Front,
    /// The leftmost card on the opposing field.
    LeftOpponent,
    /// The card named by the triggering effect.
    LastAddedCard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardRef {
    Id(InstanceId),
    Alias(CardAlias),
}

impl CardRef {
    #[must_use]
    pub fn id(self) -> Option<InstanceId> {
        match self {
            Self::Id(id) => Some(id),
            Self::Alias(_) => None,
        }
    }
}

impl From<InstanceId> for CardRef {
    fn from(id: InstanceId) -> Self {
        Self::Id(id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAlias {
    #[serde(rename = "self")]
    Owner,
    Opponent,
    SelfAndOpponent,
}

/// One or more players, possibly relative to the acting player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerSet {
    One(PlayerId),
    Many(Vec<PlayerId>),
    Alias(PlayerAlias),
}

/// Resolved target players; never more than both seats in practice.
pub type Players = SmallVec<[PlayerId; 2]>;

impl PlayerSet {
    /// Concrete players, with aliases taken relative to `acting`.
    #[must_use]
    pub fn resolve(&self, acting: PlayerId) -> Players {
        match self {
            Self::One(player) => smallvec![*player],
            Self::Many(players) => players.iter().copied().collect(),
            Self::Alias(PlayerAlias::Owner) => smallvec![acting],
            Self::Alias(PlayerAlias::Opponent) => smallvec![acting.opponent()],
            Self::Alias(PlayerAlias::SelfAndOpponent) => smallvec![acting, acting.opponent()],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurabilityFormula {
    /// Sum of current durability of the player's field wealth.
    SelfAllWealthOnField,
    /// Left unresolved when the triggering effect carried no damage.
    DamageThis,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InitialDurability {
    Fixed(i64),
    Formula(DurabilityFormula),
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayCard {
    pub player_id: PlayerId,
    pub card_id: InstanceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_card_id: Option<InstanceId>,
}

/// Payload of effects that only name a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTarget {
    pub player_id: PlayerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_card_id: Option<InstanceId>,
}

impl PlayerTarget {
    #[must_use]
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            source_card_id: None,
        }
    }
}

fn one() -> u32 {
    1
}

fn hand() -> Zone {
    Zone::Hand
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCard {
    pub player_id: PlayerId,
    pub card_template_name: String,
    #[serde(default = "hand")]
    pub destination_pile: Zone,
    #[serde(default = "one")]
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<DeckPosition>,
    /// Skip generation when the player already has this many wealth cards on
    /// the field. Non-positive values mean the player's field limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_field_wealth_limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_durability: Option<InitialDurability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_card_id: Option<InstanceId>,
}

impl AddCard {
    #[must_use]
    pub fn new(player_id: PlayerId, template: impl Into<String>, destination: Zone) -> Self {
        Self {
            player_id,
            card_template_name: template.into(),
            destination_pile: destination,
            count: 1,
            position: None,
            condition_field_wealth_limit: None,
            initial_durability: None,
            source_card_id: None,
        }
    }

    #[must_use]
    pub fn with_durability(mut self, durability: i64) -> Self {
        self.initial_durability = Some(InitialDurability::Fixed(durability));
        self
    }

    #[must_use]
    pub fn from_source(mut self, source: Option<InstanceId>) -> Self {
        self.source_card_id = source;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveCard {
    pub card_id: InstanceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
}

/// Direct or absolute change to a player resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceChange {
    pub player_id: PlayerId,
    #[serde(default)]
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_card_id: Option<InstanceId>,
}

impl ResourceChange {
    #[must_use]
    pub fn new(player_id: PlayerId, amount: i64, source_card_id: Option<InstanceId>) -> Self {
        Self {
            player_id,
            amount,
            source_card_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurabilityChange {
    pub card_id: InstanceId,
    #[serde(default)]
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_card_id: Option<InstanceId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredScaleChange {
    pub card_id: InstanceId,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub min_value: i64,
    /// Replace the required scale instead of adding to it.
    #[serde(default)]
    pub set_value: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_card_id: Option<InstanceId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCard {
    pub player_id: PlayerId,
    pub card_id: CardRef,
    pub source_pile: Zone,
    pub destination_pile: Zone,
    /// Receiving player when different from `player_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_player_id: Option<PlayerId>,
    /// Keep modified stats instead of resetting to the template.
    #[serde(default)]
    pub maintain: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<DeckPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_card_id: Option<InstanceId>,
}

impl MoveCard {
    #[must_use]
    pub fn new(player_id: PlayerId, card: impl Into<CardRef>, from: Zone, to: Zone) -> Self {
        Self {
            player_id,
            card_id: card.into(),
            source_pile: from,
            destination_pile: to,
            target_player_id: None,
            maintain: false,
            position: None,
            source_card_id: None,
        }
    }

    #[must_use]
    pub fn draw(player_id: PlayerId) -> Self {
        Self::new(
            player_id,
            CardRef::Alias(CardAlias::DrawFromDeck),
            Zone::Deck,
            Zone::Hand,
        )
    }

    #[must_use]
    pub fn at(mut self, position: DeckPosition) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn maintained(mut self) -> Self {
        self.maintain = true;
        self
    }

    #[must_use]
    pub fn from_source(mut self, source: Option<InstanceId>) -> Self {
        self.source_card_id = source;
        self
    }
}

/// Pre-stage of a consciousness or scale change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveChange {
    pub player_id: PlayerId,
    #[serde(default)]
    pub amount: i64,
    /// Percentage of the current value; its sign is the direction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_percentage: Option<i64>,
    #[serde(default)]
    pub round_down: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_original_value_for_temp: Option<String>,
    #[serde(default)]
    pub amount_based_on_removed_discard_count: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_based_on_temp_value: Option<String>,
    #[serde(default)]
    pub is_negative: bool,
    #[serde(default)]
    pub amount_based_on_hand_count: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_card_id: Option<InstanceId>,
}

impl ReserveChange {
    #[must_use]
    pub fn new(player_id: PlayerId, amount: i64, source_card_id: Option<InstanceId>) -> Self {
        Self {
            player_id,
            amount,
            amount_percentage: None,
            round_down: false,
            store_original_value_for_temp: None,
            amount_based_on_removed_discard_count: false,
            amount_based_on_temp_value: None,
            is_negative: false,
            amount_based_on_hand_count: false,
            source_card_id,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfDurabilitySign {
    Minus,
    Plus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurabilityReserve {
    #[serde(default)]
    pub card_id: Option<CardRef>,
    #[serde(default)]
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_based_on_self_durability: Option<SelfDurabilitySign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_card_id: Option<InstanceId>,
}

impl DurabilityReserve {
    #[must_use]
    pub fn new(card: InstanceId, amount: i64, source_card_id: Option<InstanceId>) -> Self {
        Self {
            card_id: Some(CardRef::Id(card)),
            amount,
            amount_based_on_self_durability: None,
            source_card_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCorrection {
    pub player_id: PlayerId,
    #[serde(flatten)]
    pub correction: Correction,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipEffect {
    pub effect_type: EffectKind,
    pub player_id: PlayerId,
}

// ---------------------------------------------------------------------------
// Process operations
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMethod {
    All,
    Random,
    HighestRequiredScale,
    LowestDurability,
    Top,
    Bottom,
    Choice,
    PreSelected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardOperationKind {
    ModifyDurability,
    ModifyRequiredScale,
    #[serde(alias = "move_card")]
    Move,
    Remove,
    GenerateCard,
}

fn field_only() -> Vec<Zone> {
    vec![Zone::Field]
}

fn select_all() -> SelectionMethod {
    SelectionMethod::All
}

/// Gather, select, fan out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardOperation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_player_id: Option<PlayerSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_card_id: Option<CardRef>,
    /// Single-pile shorthand, used when `source_piles` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_pile: Option<Zone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_piles: Option<Vec<Zone>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<CardKind>,
    #[serde(default = "select_all")]
    pub selection_method: SelectionMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub operation: CardOperationKind,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub min_value: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_pile: Option<Zone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<DeckPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_template_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_count_key: Option<String>,
    /// Filled in when a `choice` selection is answered.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_cards: Vec<InstanceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_card_id: Option<InstanceId>,
}

impl CardOperation {
    #[must_use]
    pub fn new(operation: CardOperationKind) -> Self {
        Self {
            player_id: None,
            target_player_id: None,
            target_card_id: None,
            source_pile: None,
            source_piles: None,
            card_type: None,
            selection_method: SelectionMethod::All,
            count: None,
            operation,
            amount: 0,
            min_value: 0,
            destination_pile: None,
            position: None,
            card_template_name: None,
            store_count_key: None,
            selected_cards: Vec::new(),
            source_card_id: None,
        }
    }

    /// Piles to gather candidates from. Defaults to the field.
    #[must_use]
    pub fn piles(&self) -> Vec<Zone> {
        match (&self.source_piles, self.source_pile) {
            (Some(piles), _) => piles.clone(),
            (None, Some(pile)) => vec![pile],
            (None, None) => field_only(),
        }
    }

    /// Durability change to every wealth card on the given players' fields.
    #[must_use]
    pub fn wealth_durability(player_id: Option<PlayerId>, targets: PlayerSet, amount: i64) -> Self {
        Self {
            player_id,
            target_player_id: Some(targets),
            card_type: Some(CardKind::Wealth),
            amount,
            ..Self::new(CardOperationKind::ModifyDurability)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealDamageToAllWealth {
    pub player_ids: PlayerSet,
    #[serde(default)]
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_effect: Option<Box<Effect>>,
}

/// Answer slot of a single-card decision.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChosenCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_id: Option<InstanceId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposeCards {
    pub player_id: PlayerId,
    #[serde(default = "field_only")]
    pub source_piles: Vec<Zone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<CardKind>,
    #[serde(default = "one_usize")]
    pub count: usize,
}

fn one_usize() -> usize {
    1
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerGroup {
    pub player_ids: PlayerSet,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyCardTarget {
    pub player_id: PlayerId,
    pub card_id: InstanceId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyCardTurnStart {
    pub player_id: PlayerId,
    pub card_id: InstanceId,
    #[serde(default)]
    pub condition_durability_ge_30: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollKind {
    PercentDecreaseOrPercentIncrease,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurabilityRoll {
    pub player_id: PlayerId,
    pub change_type: RollKind,
    /// Decrease percentage.
    #[serde(default)]
    pub value1: i64,
    /// Increase percentage.
    #[serde(default)]
    pub value2: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyConversion {
    pub player_id: PlayerId,
    pub money_card_id: InstanceId,
    #[serde(default)]
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_card_id: Option<InstanceId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyBarrage {
    pub player_id: PlayerId,
    pub target_player_id: PlayerId,
    #[serde(default)]
    pub amount: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardForCards {
    pub player_id: PlayerId,
    pub card_template_name: String,
    #[serde(default = "hand")]
    pub destination_pile: Zone,
    pub card_type_to_discard: CardKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateChoice {
    pub player_id: PlayerId,
    pub options: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileChoice {
    pub player_id: PlayerId,
    pub source_piles: Vec<Zone>,
    pub destination_pile: Zone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<CardKind>,
}

/// Shared by the prompt and its resumption; `card_id` is filled on resume.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WealthDurabilityChoice {
    pub player_id: PlayerId,
    pub target_player_id: PlayerId,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub bonus_effect_if_money: bool,
    #[serde(default)]
    pub bonus_scale_amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<InstanceId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BounceChoice {
    pub player_id: PlayerId,
    pub target_player_id: PlayerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<InstanceId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountedDraw {
    pub player_id: PlayerId,
    pub card_type: CardKind,
    /// Number of cards to draw.
    #[serde(default = "one_usize")]
    pub amount: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_reduction: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_reduction_percentage: Option<i64>,
    #[serde(default)]
    pub round_down: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterAttack {
    #[serde(default)]
    pub counter_damage: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCountBranch {
    pub player_id: PlayerId,
    pub threshold: usize,
    pub card_if_above: String,
    pub card_if_below: String,
}

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

/// Common arguments carried by pure trigger effects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_player_id: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_id: Option<InstanceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_card_id: Option<InstanceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_card_id: Option<InstanceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<CardKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_pile: Option<Zone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_pile: Option<Zone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage_amount: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exposed_cards: Vec<InstanceId>,
}

impl SignalArgs {
    #[must_use]
    pub fn for_player(player: PlayerId) -> Self {
        Self {
            player_id: Some(player),
            ..Self::default()
        }
    }

    /// A this-card signal aimed at `card`.
    #[must_use]
    pub fn aimed_at(card: InstanceId) -> Self {
        Self {
            target_card_id: Some(card),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub kind: EffectKind,
    pub args: SignalArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_card_ref_accepts_ids_and_aliases() {
        let id: CardRef = serde_json::from_value(json!(12)).unwrap();
        assert_eq!(id, CardRef::Id(InstanceId(12)));

        let alias: CardRef = serde_json::from_value(json!("draw_from_deck")).unwrap();
        assert_eq!(alias, CardRef::Alias(CardAlias::DrawFromDeck));

        assert!(serde_json::from_value::<CardRef>(json!("target")).is_err());
    }

    #[test]
    fn test_player_set_resolution() {
        let acting = PlayerId::new(1);
        let set: PlayerSet = serde_json::from_value(json!("self_and_opponent")).unwrap();
        assert_eq!(set.resolve(acting).as_slice(), [PlayerId::new(1), PlayerId::new(0)]);

        let set: PlayerSet = serde_json::from_value(json!("self")).unwrap();
        assert_eq!(set.resolve(acting).as_slice(), [acting]);

        let set: PlayerSet = serde_json::from_value(json!([0])).unwrap();
        assert_eq!(set.resolve(acting).as_slice(), [PlayerId::new(0)]);
    }

    #[test]
    fn test_add_card_defaults() {
        let add: AddCard = serde_json::from_value(json!({
            "player_id": 0,
            "card_template_name": "マネー",
            "initial_durability": 3
        }))
        .unwrap();
        assert_eq!(add.destination_pile, Zone::Hand);
        assert_eq!(add.count, 1);
        assert_eq!(add.initial_durability, Some(InitialDurability::Fixed(3)));
    }

    #[test]
    fn test_card_operation_accepts_move_card_alias() {
        let op: CardOperation = serde_json::from_value(json!({
            "operation": "move_card",
            "target_player_id": "opponent",
            "source_piles": ["discard_pile"],
            "destination_pile": "hand"
        }))
        .unwrap();
        assert_eq!(op.operation, CardOperationKind::Move);
        assert_eq!(op.piles(), vec![Zone::Discard]);
        assert_eq!(op.selection_method, SelectionMethod::All);
    }

    #[test]
    fn test_missing_player_fails_to_decode() {
        assert!(serde_json::from_value::<ResourceChange>(json!({ "amount": -4 })).is_err());
    }
}
