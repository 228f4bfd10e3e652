//! Action resolution errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, StateError};

use super::ActionKind;

/// Reasons an action could not be resolved against the current state.
///
/// Most rule outcomes (blocked moves, empty pushes) are not errors: they
/// resolve into an outcome with a bump or fizzle animation. Errors are reserved
/// for actions whose premise no longer holds.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    /// The actor died after the action was queued.
    #[error("actor {0} is dead")]
    ActorDead(EntityId),

    #[error("{kind} requires a direction")]
    MissingDirection { kind: ActionKind },

    #[error("entity {0} is not a volatile canister")]
    NotACanister(EntityId),

    #[error("canister {0} has already detonated")]
    AlreadyDetonated(EntityId),

    #[error(transparent)]
    State(#[from] StateError),
}

impl ActionError {
    /// True for errors that only mean the action became moot.
    pub fn is_stale(&self) -> bool {
        matches!(
            self,
            ActionError::ActorDead(_) | ActionError::AlreadyDetonated(_)
        )
    }
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::ActorDead(_) | ActionError::AlreadyDetonated(_) => {
                ErrorSeverity::Recoverable
            }
            ActionError::ActorNotFound(_)
            | ActionError::MissingDirection { .. }
            | ActionError::NotACanister(_) => ErrorSeverity::Validation,
            ActionError::State(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            ActionError::ActorDead(_) => "ACTION_ACTOR_DEAD",
            ActionError::MissingDirection { .. } => "ACTION_MISSING_DIRECTION",
            ActionError::NotACanister(_) => "ACTION_NOT_A_CANISTER",
            ActionError::AlreadyDetonated(_) => "ACTION_ALREADY_DETONATED",
            ActionError::State(error) => error.error_code(),
        }
    }
}
