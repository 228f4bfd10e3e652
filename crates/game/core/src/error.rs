//! Shared error classification for combat-core.
//!
//! Domain errors (`TurnError`, `ExecutorError`, `InputError`, ...) live next to
//! the component that raises them and implement [`GameError`] so callers can
//! decide between retrying, rejecting input and aborting the session.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Can retry with the same or an alternative input.
    ///
    /// Examples: ability out of uses, no direction pending
    Recoverable,

    /// Invalid input, should not retry without changes.
    ///
    /// Examples: unknown ability index, unknown entity id
    Validation,

    /// Unexpected state inconsistency; indicates a bug.
    ///
    /// Examples: position outside the grid, phase machine misuse
    Internal,

    /// The session cannot continue.
    ///
    /// Examples: encounter map without rows, no player spawn
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for the error variant, suitable for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Internal.as_str(), "internal");
    }
}
