//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the core engine and from input providers so clients
//! can bubble them up with consistent context.
use std::fmt;

use combat_core::error::{ErrorSeverity, GameError};
use combat_core::{EngineError, ExecutorError, TurnError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{kind} input provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("player input channel closed")]
    InputChannelClosed,

    #[error("session cancelled")]
    Cancelled,

    #[error("session requires an initial combat state")]
    MissingState,

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Executor(#[from] ExecutorError),
}

impl From<EngineError> for RuntimeError {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::Turn(error) => RuntimeError::Turn(error),
            EngineError::Executor(error) => RuntimeError::Executor(error),
        }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Turn(error) => error.severity(),
            RuntimeError::Executor(error) => error.severity(),
            RuntimeError::Cancelled => ErrorSeverity::Recoverable,
            RuntimeError::ProviderNotSet { .. } | RuntimeError::MissingState => {
                ErrorSeverity::Validation
            }
            RuntimeError::InputChannelClosed => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::ProviderNotSet { .. } => "RUNTIME_PROVIDER_NOT_SET",
            RuntimeError::InputChannelClosed => "RUNTIME_INPUT_CHANNEL_CLOSED",
            RuntimeError::Cancelled => "RUNTIME_CANCELLED",
            RuntimeError::MissingState => "RUNTIME_MISSING_STATE",
            RuntimeError::Turn(error) => error.error_code(),
            RuntimeError::Executor(error) => error.error_code(),
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub enum ProviderKind {
    Player,
    Animator,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Player => "player",
            ProviderKind::Animator => "animator",
        };
        write!(f, "{}", label)
    }
}
