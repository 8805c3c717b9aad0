//! Operator commands.

use std::str::FromStr;

use super::AgentState;
use crate::error::{ErrorSeverity, GameError};

/// A command injected by the operator, overriding the behavior tree for the
/// next tick.
///
/// Parsing is exact: the wire strings are `"Follow"`, `"Hold Position"`,
/// `"Provide Cover"` and `"Use Ability"`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    #[strum(serialize = "Follow")]
    Follow,
    #[strum(serialize = "Hold Position")]
    HoldPosition,
    #[strum(serialize = "Provide Cover")]
    ProvideCover,
    #[strum(serialize = "Use Ability")]
    UseAbility,
}

impl Command {
    /// Parses a command string.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Unrecognized`] for any other string.
    pub fn parse(raw: &str) -> Result<Self, CommandError> {
        Self::from_str(raw).map_err(|_| CommandError::Unrecognized {
            command: raw.to_owned(),
        })
    }

    /// State the command forces.
    pub const fn target_state(self) -> AgentState {
        match self {
            Command::Follow => AgentState::Follow,
            Command::HoldPosition => AgentState::Idle,
            Command::ProvideCover => AgentState::Cover,
            Command::UseAbility => AgentState::Ability,
        }
    }
}

/// Rejected command requests.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unrecognized command `{command}`")]
    Unrecognized { command: String },

    #[error("cannot command a dead agent")]
    AgentDown,
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            CommandError::Unrecognized { .. } => "COMMAND_UNRECOGNIZED",
            CommandError::AgentDown => "COMMAND_AGENT_DOWN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_wire_strings() {
        assert_eq!(Command::parse("Follow"), Ok(Command::Follow));
        assert_eq!(Command::parse("Hold Position"), Ok(Command::HoldPosition));
        assert_eq!(Command::parse("Provide Cover"), Ok(Command::ProvideCover));
        assert_eq!(Command::parse("Use Ability"), Ok(Command::UseAbility));
        assert_eq!(Command::ProvideCover.to_string(), "Provide Cover");
    }

    #[test]
    fn rejects_unknown_strings() {
        let err = Command::parse("Dance").unwrap_err();
        assert_eq!(
            err,
            CommandError::Unrecognized {
                command: "Dance".into()
            }
        );
        assert_eq!(err.error_code(), "COMMAND_UNRECOGNIZED");
        assert!(Command::parse("hold position").is_err());
    }

    #[test]
    fn maps_to_forced_state() {
        assert_eq!(Command::HoldPosition.target_state(), AgentState::Idle);
        assert_eq!(Command::UseAbility.target_state(), AgentState::Ability);
    }
}
