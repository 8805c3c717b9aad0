//! Per-tick context the behavior tree is evaluated against.

use glam::Vec3;
use tracing::debug;

use super::AgentState;
use crate::state::AgentId;

/// Request recorded by an action leaf, applied by the agent after the tree
/// returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum Directive {
    Patrol,
    FollowTeam,
    AdvanceObjective,
}

/// Snapshot of one agent's perception and vitals, plus the directive the
/// tree chose.
///
/// The snapshot is taken after sensing and before any state change, so every
/// node in one evaluation sees the same values. Only the latest directive
/// survives; a later action overrides an earlier one.
#[derive(Clone, Debug, PartialEq)]
pub struct Blackboard {
    pub agent: AgentId,
    pub state: AgentState,
    pub health: f32,
    pub max_health: f32,
    pub ammo_ratio: f32,
    pub low_health_ratio: f32,
    pub low_ammo_ratio: f32,
    pub hostile_in_sight: bool,
    pub last_known_position: Option<Vec3>,
    pub follows_team: bool,
    directive: Option<Directive>,
}

impl Blackboard {
    pub fn new(agent: AgentId, state: AgentState, health: f32, max_health: f32) -> Self {
        Self {
            agent,
            state,
            health,
            max_health,
            ammo_ratio: 1.0,
            low_health_ratio: 0.3,
            low_ammo_ratio: 0.25,
            hostile_in_sight: false,
            last_known_position: None,
            follows_team: true,
            directive: None,
        }
    }

    pub fn is_low_health(&self) -> bool {
        self.health < self.max_health * self.low_health_ratio
    }

    pub fn is_low_ammo(&self) -> bool {
        self.ammo_ratio < self.low_ammo_ratio
    }

    pub fn request(&mut self, directive: Directive) {
        debug!(
            target: "squad::agent",
            agent = %self.agent,
            directive = %directive,
            "directive requested"
        );
        self.directive = Some(directive);
    }

    pub fn directive(&self) -> Option<Directive> {
        self.directive
    }
}
