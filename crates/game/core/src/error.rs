//! Common error infrastructure for squad-core.
//!
//! This module provides shared types and traits used across all error types in
//! squad-core. Domain-specific errors (e.g., `CommandError`, `RosterError`) are
//! defined in their respective modules alongside the operations they validate.
//!
//! Expected "not available right now" situations (no target, no path, no
//! leader) are never errors: they surface as behavior tree statuses or no-op
//! results. Errors are reserved for rejected requests and broken wiring.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Temporary conditions that may succeed later
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Broken construction that prevents the mission from running
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry later or with an alternative request.
    ///
    /// Examples: ability already active, no charges left
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unrecognized command string, unknown roster member
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - the mission cannot be constructed or continued.
    ///
    /// Examples: missing perception port, composite without children
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug or broken wiring.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

impl core::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common trait for all squad errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, telemetry, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

impl GameError for behavior_tree::TreeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            behavior_tree::TreeError::EmptyComposite { .. } => "TREE_EMPTY_COMPOSITE",
        }
    }
}
