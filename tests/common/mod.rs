//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use ideology_ccg::cards::CardRegistry;
use ideology_ccg::core::{GameState, InstanceId, PlayerId, RulesConfig};
use ideology_ccg::rules::Engine;
use ideology_ccg::zones::Zone;

pub const P0: PlayerId = PlayerId::new(0);
pub const P1: PlayerId = PlayerId::new(1);

/// A small content set in the shipped JSON format.
pub const CONTENT: &str = r#"[
    { "name": "マネー", "card_type": "財", "durability": 1 },
    { "name": "資本主義", "card_type": "イデオロギー" },
    { "name": "原始共産制", "card_type": "イデオロギー" },
    { "name": "農園", "card_type": "財", "durability": 3 },
    { "name": "戦士", "card_type": "財", "required_scale": 1, "durability": 5 },
    {
        "name": "工場",
        "card_type": "財",
        "durability": 4,
        "triggers": {
            "START_TURN_OWNER": [
                { "effect_type": "MODIFY_SCALE_RESERVE", "args": { "player_id": "self", "amount": 2 } }
            ]
        }
    },
    {
        "name": "見張り塔",
        "card_type": "財",
        "durability": 2,
        "triggers": {
            "WEALTH_DURABILITY_ZERO_THIS": [
                { "effect_type": "MODIFY_CONSCIOUSNESS_RESERVE", "args": { "player_id": "self", "amount": 5 } }
            ]
        }
    },
    {
        "name": "略奪者",
        "card_type": "財",
        "durability": 3,
        "triggers": {
            "WEALTH_DURABILITY_ZERO_OPPONENT": [
                { "effect_type": "MODIFY_SCALE_RESERVE", "args": { "player_id": "self", "amount": 4 } }
            ]
        }
    },
    {
        "name": "孤立主義",
        "card_type": "イデオロギー",
        "required_scale": 15,
        "triggers": {
            "MODIFY_CONSCIOUSNESS": [
                {
                    "effect_type": "MODIFY_CONSCIOUSNESS_RESERVE",
                    "args": { "player_id": "self", "amount": 10 },
                    "condition": { "target": "self", "check": "consciousness_decreased_by_opponent" }
                },
                {
                    "effect_type": "MODIFY_SCALE_RESERVE",
                    "args": { "player_id": "self", "amount": 10 },
                    "condition": { "target": "self", "check": "consciousness_decreased_by_opponent" }
                },
                {
                    "effect_type": "MOVE_CARD",
                    "args": { "card_id": "self", "source_pile": "field", "destination_pile": "discard", "player_id": "self" },
                    "condition": { "target": "self", "check": "consciousness_decreased_by_opponent" }
                }
            ],
            "MODIFY_CONSCIOUSNESS_DECREASE_RESERVE_OWNER": [
                {
                    "effect_type": "ADD_MODIFY_PARAMETER_CORRECTION",
                    "args": { "player_id": "self", "correct_target": "consciousness", "correct_direction": "decrease", "correct_type": "attenuation", "amount": 3 }
                }
            ],
            "MODIFY_CONSCIOUSNESS_DECREASE_RESERVE_OPPONENT": [
                {
                    "effect_type": "ADD_MODIFY_PARAMETER_CORRECTION",
                    "args": { "player_id": "opponent", "correct_target": "consciousness", "correct_direction": "decrease", "correct_type": "limit", "amount": 0 }
                }
            ],
            "MODIFY_CARD_DURABILITY_RESERVE": [
                {
                    "effect_type": "ADD_MODIFY_PARAMETER_CORRECTION",
                    "args": { "player_id": "self", "correct_target": "wealth", "correct_direction": "decrease", "correct_type": "attenuation", "amount": 1 }
                }
            ]
        }
    },
    {
        "name": "攻撃-3",
        "card_type": "事象",
        "triggers": {
            "PLAY_EVENT_THIS": [
                { "effect_type": "MODIFY_CONSCIOUSNESS_RESERVE", "args": { "player_id": "opponent", "amount": -3 } }
            ]
        }
    },
    {
        "name": "攻撃-4",
        "card_type": "事象",
        "triggers": {
            "PLAY_EVENT_THIS": [
                { "effect_type": "MODIFY_CONSCIOUSNESS_RESERVE", "args": { "player_id": "opponent", "amount": -4 } }
            ]
        }
    },
    {
        "name": "致命打",
        "card_type": "事象",
        "triggers": {
            "PLAY_EVENT_THIS": [
                { "effect_type": "MODIFY_CONSCIOUSNESS_RESERVE", "args": { "player_id": "opponent", "amount": -100 } }
            ]
        }
    },
    {
        "name": "財攻撃",
        "card_type": "事象",
        "triggers": {
            "PLAY_EVENT_THIS": [
                { "effect_type": "MODIFY_CARD_DURABILITY_RESERVE", "args": { "card_id": "target", "amount": -3 } }
            ]
        }
    },
    {
        "name": "徴発",
        "card_type": "事象",
        "triggers": {
            "PLAY_EVENT_THIS": [
                { "effect_type": "PROCESS_ADD_CHOICE_CARD_TO_HAND", "args": { "player_id": "self", "options": ["農園", "工場"] } }
            ]
        }
    },
    {
        "name": "回収",
        "card_type": "事象",
        "triggers": {
            "PLAY_EVENT_THIS": [
                {
                    "effect_type": "PROCESS_CHOOSE_AND_MOVE_CARD_FROM_PILE",
                    "args": { "player_id": "self", "source_piles": ["discard_pile"], "destination_pile": "hand" }
                }
            ]
        }
    },
    {
        "name": "焼き討ち",
        "card_type": "事象",
        "triggers": {
            "PLAY_EVENT_THIS": [
                {
                    "effect_type": "PROCESS_CARD_OPERATION",
                    "args": {
                        "player_id": "self",
                        "target_player_id": "opponent",
                        "operation": "modify_durability",
                        "card_type": "wealth",
                        "amount": -10
                    }
                }
            ]
        }
    },
    {
        "name": "永久機関",
        "card_type": "財",
        "durability": 9,
        "triggers": {
            "MODIFY_SCALE": [
                { "effect_type": "MODIFY_SCALE", "args": { "player_id": "self", "amount": 1 } }
            ]
        }
    },
    {
        "name": "送還",
        "card_type": "事象",
        "triggers": {
            "PLAY_EVENT_THIS": [
                {
                    "effect_type": "PROCESS_CHOOSE_AND_BOUNCE_TO_WEALTH",
                    "args": { "player_id": "self", "target_player_id": "opponent" }
                }
            ],
            "FAILED_PROCESS": [
                { "effect_type": "MODIFY_SCALE_RESERVE", "args": { "player_id": "self", "amount": 1 } }
            ]
        }
    },
    {
        "name": "封鎖",
        "card_type": "事象",
        "triggers": {
            "PLAY_EVENT_THIS": [
                { "effect_type": "SKIP_EFFECT", "args": { "player_id": "opponent", "effect_type": "MODIFY_SCALE" } }
            ]
        }
    }
]"#;

pub fn registry() -> Arc<CardRegistry> {
    Arc::new(CardRegistry::from_json(CONTENT).expect("fixture content parses"))
}

/// Empty state on the fixture content: no cards, `P0` to move.
pub fn state() -> GameState {
    state_with(RulesConfig::default())
}

pub fn state_with(config: RulesConfig) -> GameState {
    GameState::new(registry(), Arc::new(config), 11)
}

/// Engine over a hand-built state.
pub fn engine(state: GameState) -> Engine {
    Engine::from_state(state)
}

pub fn deal(state: &mut GameState, name: &str, player: PlayerId, zone: Zone) -> InstanceId {
    state
        .deal_card(name, player, zone)
        .unwrap_or_else(|| panic!("unknown fixture card {name}"))
}

/// Give both seats a few deck cards so an empty deck does not end the game.
pub fn stock_decks(state: &mut GameState) {
    for player in [P0, P1] {
        for _ in 0..5 {
            deal(state, "農園", player, Zone::Deck);
        }
    }
}

/// Empty-board state with stocked decks and `player` to move.
pub fn table(player: PlayerId) -> GameState {
    let mut state = state();
    stock_decks(&mut state);
    state.current_turn = player;
    state
}

/// Route engine logs to the test writer. Set `RUST_LOG` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
