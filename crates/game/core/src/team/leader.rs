use glam::Vec3;
use tracing::info;

use crate::agent::AgentClass;
use crate::state::Pose;

/// The privileged (possibly player-controlled) squad leader.
///
/// The leader is not part of the roster. Once down, its pose is frozen so
/// formation and follow targets keep a defined reference point.
#[derive(Clone, Debug, PartialEq)]
pub struct Leader {
    name: String,
    level: u32,
    pose: Pose,
    health: f32,
    max_health: f32,
    alive: bool,
}

impl Leader {
    pub fn new(name: impl Into<String>, level: u32, pose: Pose) -> Self {
        let max_health = AgentClass::Leader.max_health(level);
        Self {
            name: name.into(),
            level,
            pose,
            health: max_health,
            max_health,
            alive: true,
        }
    }

    /// Leader with explicit vitals.
    pub fn with_vitals(name: impl Into<String>, pose: Pose, health: f32, max_health: f32) -> Self {
        Self {
            name: name.into(),
            level: 1,
            pose,
            health: health.min(max_health),
            max_health,
            alive: health > 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Updates the pose. Ignored once the leader is down.
    pub fn set_pose(&mut self, pose: Pose) -> bool {
        if !self.alive {
            return false;
        }
        self.pose = pose;
        true
    }

    /// Returns `true` if this call killed the leader.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.alive {
            return false;
        }
        self.health -= amount.max(0.0);
        if self.health <= 0.0 {
            self.health = 0.0;
            self.alive = false;
            info!(target: "squad::team", leader = %self.name, "leader down");
            return true;
        }
        false
    }

    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.alive {
            return 0.0;
        }
        let before = self.health;
        self.health = (self.health + amount.max(0.0)).min(self.max_health);
        self.health - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_leader_pose_is_frozen() {
        let mut leader = Leader::new("Ghost", 1, Pose::new(Vec3::new(1.0, 0.0, 1.0), 0.0));
        assert_eq!(leader.max_health(), 100.0 + 8.5 * 5.0 + 3.0);

        assert!(leader.take_damage(1000.0));
        assert!(!leader.take_damage(10.0));
        assert!(!leader.set_pose(Pose::new(Vec3::new(9.0, 0.0, 9.0), 1.0)));
        assert_eq!(leader.position(), Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(leader.health(), 0.0);
    }
}
