//! Port wiring errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors raised when a required port was never supplied.
///
/// These are construction-time failures: a mission cannot tick without
/// perception, navigation and randomness.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("PerceptionOracle not available")]
    PerceptionNotAvailable,

    #[error("NavigationOracle not available")]
    NavigationNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            PerceptionNotAvailable => "ORACLE_PERCEPTION_NOT_AVAILABLE",
            NavigationNotAvailable => "ORACLE_NAVIGATION_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
        }
    }
}
