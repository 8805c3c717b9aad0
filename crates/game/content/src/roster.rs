//! Roster definitions.

use glam::Vec3;
use squad_core::{AgentClass, AgentSpec, AgentState, Leader, Pose};

/// Squad leader definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LeaderSpec {
    pub name: String,
    pub level: u32,
    pub position: Vec3,
    pub yaw: f32,
}

impl Default for LeaderSpec {
    fn default() -> Self {
        Self {
            name: "Ghost".to_owned(),
            level: 1,
            position: Vec3::ZERO,
            yaw: 0.0,
        }
    }
}

impl LeaderSpec {
    pub fn to_leader(&self) -> Leader {
        Leader::new(self.name.clone(), self.level, Pose::new(self.position, self.yaw))
    }
}

/// A leader plus the members that follow it, in roster order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RosterSpec {
    pub leader: Option<LeaderSpec>,
    pub members: Vec<AgentSpec>,
}

impl RosterSpec {
    /// Ghost with Titan, Spectre, Viper and Cipher, lined up behind the
    /// leader.
    pub fn standard_squad() -> Self {
        let members = [
            ("Titan", AgentClass::Assault),
            ("Spectre", AgentClass::Sniper),
            ("Viper", AgentClass::Demolitions),
            ("Cipher", AgentClass::Hacker),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (name, class))| {
            AgentSpec::new(name, class)
                .at(Vec3::new(0.0, 0.0, -3.0 * (i as f32 + 1.0)))
                .starting_in(AgentState::Follow)
        })
        .collect();

        Self {
            leader: Some(LeaderSpec::default()),
            members,
        }
    }

    /// First member name that is empty or repeated, if any.
    pub fn invalid_member_name(&self) -> Option<&str> {
        self.members.iter().enumerate().find_map(|(i, spec)| {
            let repeated = self.members[..i].iter().any(|other| other.name == spec.name);
            (spec.name.is_empty() || repeated).then_some(spec.name.as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_squad_is_valid() {
        let squad = RosterSpec::standard_squad();
        assert_eq!(squad.members.len(), 4);
        assert_eq!(squad.invalid_member_name(), None);
        let leader = squad.leader.map(|l| l.to_leader());
        assert_eq!(leader.map(|l| l.name().to_owned()), Some("Ghost".to_owned()));
    }

    #[test]
    fn repeated_names_are_reported() {
        let mut squad = RosterSpec::standard_squad();
        squad.members.push(AgentSpec::new("Viper", AgentClass::Medic));
        assert_eq!(squad.invalid_member_name(), Some("Viper"));

        squad.members.clear();
        squad.members.push(AgentSpec::new("", AgentClass::Medic));
        assert_eq!(squad.invalid_member_name(), Some(""));
    }
}
