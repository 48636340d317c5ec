//! Errors surfaced to callers of the engine API.
//!
//! Nothing inside effect processing returns these: rule-content failures are
//! `SUCCESS_PROCESS`/`FAILED_PROCESS` effects and unresolvable references are
//! silent no-ops. `EngineError` covers content loading and API misuse only.

use thiserror::Error;

use super::{InstanceId, PlayerId};
use crate::rules::decision::DecisionKind;

/// Why a requested card play was refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayRejection {
    NotYourTurn { current: PlayerId },
    NotInHand,
    InsufficientScale { required: i64, available: i64 },
    FieldFull { limit: i64 },
    WealthForbidden { ideology: String },
}

impl std::fmt::Display for PlayRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotYourTurn { current } => write!(f, "it is {current}'s turn"),
            Self::NotInHand => write!(f, "card is not in hand"),
            Self::InsufficientScale { required, available } => {
                write!(f, "requires scale {required}, have {available}")
            }
            Self::FieldFull { limit } => write!(f, "field is full ({limit})"),
            Self::WealthForbidden { ideology } => {
                write!(f, "wealth cannot be played under {ideology}")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid content: {0}")]
    Content(#[from] serde_json::Error),

    #[error("unknown card template `{0}`")]
    UnknownTemplate(String),

    #[error("card template `{0}` registered twice")]
    DuplicateTemplate(String),

    #[error("no decision is pending")]
    NoPendingDecision,

    #[error("pending decision expects {expected:?}")]
    ChoiceMismatch { expected: DecisionKind },

    #[error("prompting card {0} no longer exists")]
    MissingSourceCard(InstanceId),

    #[error("card {0} does not exist")]
    UnknownCard(InstanceId),

    #[error("illegal play: {0}")]
    IllegalPlay(PlayRejection),

    #[error("the game is already over")]
    GameOver,

    #[error("a decision is pending")]
    DecisionPending,
}
