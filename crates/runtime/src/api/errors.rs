//! Unified error types surfaced by the mission API.
//!
//! Wraps failures from port wiring, tree construction, and roster or command
//! validation so clients can bubble them up with consistent context.
use behavior_tree::TreeError;
use squad_core::{CommandError, ErrorSeverity, GameError, OracleError, RosterError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MissionError>;

#[derive(Debug, Error)]
pub enum MissionError {
    #[error("mission requires both ports before building")]
    MissingPorts(#[source] OracleError),

    #[error("failed to build behavior tree")]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

impl GameError for MissionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MissionError::MissingPorts(_) => ErrorSeverity::Fatal,
            MissionError::Tree(e) => e.severity(),
            MissionError::Roster(e) => e.severity(),
            MissionError::Command(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MissionError::MissingPorts(e) => e.error_code(),
            MissionError::Tree(e) => e.error_code(),
            MissionError::Roster(e) => e.error_code(),
            MissionError::Command(e) => e.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use squad_core::AgentId;

    use super::*;

    #[test]
    fn severity_follows_the_wrapped_error() {
        let missing = MissionError::MissingPorts(OracleError::NavigationNotAvailable);
        assert_eq!(missing.severity(), ErrorSeverity::Fatal);
        assert_eq!(missing.error_code(), "ORACLE_NAVIGATION_NOT_AVAILABLE");

        let roster = MissionError::from(RosterError::UnknownMember(AgentId(9)));
        assert_eq!(roster.severity(), ErrorSeverity::Validation);
        assert_eq!(roster.error_code(), "ROSTER_UNKNOWN_MEMBER");
    }
}
