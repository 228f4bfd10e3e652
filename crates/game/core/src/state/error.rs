//! Grid and state lookup errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

/// Raised when a grid operation addresses a cell outside the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("position {position} is out of bounds (map size: {width}x{height})")]
pub struct InvalidPositionError {
    pub position: Position,
    pub width: u32,
    pub height: u32,
}

impl GameError for InvalidPositionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        "STATE_INVALID_POSITION"
    }
}

/// Errors raised while mutating [`CombatState`](super::CombatState).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error(transparent)]
    InvalidPosition(#[from] InvalidPositionError),

    #[error("entity {0} is not part of this combat")]
    UnknownEntity(EntityId),

    #[error("entity {id} already exists in this combat")]
    DuplicateEntity { id: EntityId },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            StateError::InvalidPosition(error) => error.severity(),
            StateError::UnknownEntity(_) => ErrorSeverity::Validation,
            StateError::DuplicateEntity { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            StateError::InvalidPosition(error) => error.error_code(),
            StateError::UnknownEntity(_) => "STATE_UNKNOWN_ENTITY",
            StateError::DuplicateEntity { .. } => "STATE_DUPLICATE_ENTITY",
        }
    }
}
