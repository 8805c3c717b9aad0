/// High-level mode of a squad member.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    #[default]
    Idle,
    Patrol,
    Follow,
    Combat,
    Cover,
    Ability,
    Dead,
}

impl AgentState {
    /// Busy agents are skipped when looking for an available member.
    #[inline]
    pub const fn is_busy(self) -> bool {
        matches!(self, AgentState::Combat | AgentState::Ability)
    }

    /// Dead is the only state with no outgoing transitions.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, AgentState::Dead)
    }
}
