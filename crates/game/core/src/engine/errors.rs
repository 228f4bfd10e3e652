//! Error types for turn management, execution and player input.

use crate::action::ActionKind;
use crate::error::{ErrorSeverity, GameError};

use super::TurnPhase;

/// Errors raised by the turn state machine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TurnError {
    #[error("cannot {operation} during phase {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: TurnPhase,
    },

    #[error("no participant is able to take a turn")]
    NoTurnTakers,
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TurnError::InvalidPhase { .. } => ErrorSeverity::Internal,
            TurnError::NoTurnTakers => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TurnError::InvalidPhase { .. } => "TURN_INVALID_PHASE",
            TurnError::NoTurnTakers => "TURN_NO_TURN_TAKERS",
        }
    }
}

/// Errors raised by the action executor's drain bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutorError {
    #[error("a combo list is already being executed")]
    AlreadyExecuting,

    #[error("no execution is in progress")]
    NotExecuting,
}

impl GameError for ExecutorError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExecutorError::AlreadyExecuting => "EXECUTOR_ALREADY_EXECUTING",
            ExecutorError::NotExecuting => "EXECUTOR_NOT_EXECUTING",
        }
    }
}

/// Rejected player input. None of these change state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputError {
    #[error("no ability in slot {index}")]
    UnknownAbility { index: usize },

    #[error("the player has no {kind} ability")]
    MissingAbility { kind: ActionKind },

    #[error("{kind} has no uses remaining this turn")]
    NoUsesRemaining { kind: ActionKind },

    #[error("no ability is waiting for a direction")]
    NotAwaitingDirection,

    #[error("one-click movement is disabled")]
    OneClickDisabled,
}

impl GameError for InputError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            InputError::NoUsesRemaining { .. }
            | InputError::NotAwaitingDirection
            | InputError::OneClickDisabled => ErrorSeverity::Recoverable,
            InputError::UnknownAbility { .. } | InputError::MissingAbility { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            InputError::UnknownAbility { .. } => "INPUT_UNKNOWN_ABILITY",
            InputError::MissingAbility { .. } => "INPUT_MISSING_ABILITY",
            InputError::NoUsesRemaining { .. } => "INPUT_NO_USES_REMAINING",
            InputError::NotAwaitingDirection => "INPUT_NOT_AWAITING_DIRECTION",
            InputError::OneClickDisabled => "INPUT_ONE_CLICK_DISABLED",
        }
    }
}
