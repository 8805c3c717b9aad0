use crate::error::{ErrorSeverity, GameError};
use crate::state::AgentId;

/// Rejected roster mutations and lookups.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("agent {0} is already on the roster")]
    DuplicateMember(AgentId),

    #[error("agent {0} is not on the roster")]
    UnknownMember(AgentId),

    #[error("agent {0} is down")]
    MemberDown(AgentId),
}

impl GameError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            RosterError::DuplicateMember(_) => "ROSTER_DUPLICATE_MEMBER",
            RosterError::UnknownMember(_) => "ROSTER_UNKNOWN_MEMBER",
            RosterError::MemberDown(_) => "ROSTER_MEMBER_DOWN",
        }
    }
}
