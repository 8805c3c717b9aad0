//! Condition nodes for squad behavior trees.
//!
//! Conditions read the [`Blackboard`] and pass or fail. They never request a
//! directive.

use behavior_tree::Condition;
use squad_core::Blackboard;

/// Passes when health is below the configured fraction of max health.
pub struct CheckLowHealth;

impl Condition<Blackboard> for CheckLowHealth {
    fn name(&self) -> &'static str {
        "Check Low Health"
    }

    fn check(&self, ctx: &Blackboard) -> bool {
        ctx.is_low_health()
    }

    fn passed_label(&self) -> &'static str {
        "Seeking Cover - Low Health"
    }

    fn failed_label(&self) -> &'static str {
        "Health OK"
    }
}

/// Passes when the magazine is below the configured fraction.
pub struct CheckAmmo;

impl Condition<Blackboard> for CheckAmmo {
    fn name(&self) -> &'static str {
        "Check Ammo"
    }

    fn check(&self, ctx: &Blackboard) -> bool {
        ctx.is_low_ammo()
    }

    fn passed_label(&self) -> &'static str {
        "Low Ammo"
    }

    fn failed_label(&self) -> &'static str {
        "Ammo OK"
    }
}

/// Passes while a hostile is in line of sight.
pub struct CheckEnemyInSight;

impl Condition<Blackboard> for CheckEnemyInSight {
    fn name(&self) -> &'static str {
        "Check Enemy In Sight"
    }

    fn check(&self, ctx: &Blackboard) -> bool {
        ctx.hostile_in_sight
    }

    fn passed_label(&self) -> &'static str {
        "Engaging Enemy"
    }

    fn failed_label(&self) -> &'static str {
        "No Enemy in Sight"
    }
}

/// Passes while a lost hostile's last known position is remembered.
pub struct CheckLastKnownPosition;

impl Condition<Blackboard> for CheckLastKnownPosition {
    fn name(&self) -> &'static str {
        "Check Last Known Position"
    }

    fn check(&self, ctx: &Blackboard) -> bool {
        ctx.last_known_position.is_some()
    }

    fn passed_label(&self) -> &'static str {
        "Investigating Last Known Position"
    }

    fn failed_label(&self) -> &'static str {
        "No Last Known Position"
    }
}
