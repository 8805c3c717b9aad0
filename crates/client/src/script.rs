//! Scripted demo encounter driven against the sandbox world.
//!
//! The leader walks north up the arena. A hostile shows up ahead, the squad
//! engages, the leader calls a tactical command, and later the path narrows
//! into a corridor.
use glam::Vec3;
use squad_core::{Pose, TargetId, Tick};
use squad_runtime::{Mission, SandboxWorld};
use tracing::info;

const LEADER_SPEED: f32 = 1.5;
const HOSTILE: TargetId = TargetId(1);

/// Applies the scripted beats due at `tick`.
pub fn drive(tick: Tick, mission: &mut Mission, world: &SandboxWorld) {
    let now = mission.clock().now;
    let heading = mission
        .team()
        .leader()
        .filter(|l| l.is_alive())
        .map(|l| l.pose().yaw);
    if let Some(yaw) = heading {
        mission.update_leader(Pose::new(Vec3::new(0.0, 0.0, now * LEADER_SPEED), yaw));
    }

    match tick.0 {
        40 => {
            info!(target: "squad::mission", "hostile spotted ahead");
            world.spawn_hostile(HOSTILE, Vec3::new(4.0, 0.0, 16.0));
        }
        60 => {
            mission.leader_tactical_command();
        }
        90 => {
            if mission.issue_command("Use Ability").is_err() {
                info!(target: "squad::mission", "ability command rejected");
            }
        }
        140 => {
            info!(target: "squad::mission", "hostile neutralized");
            world.remove_hostile(HOSTILE);
        }
        200 => {
            info!(target: "squad::mission", "entering corridor");
            world.set_corridor(Some(1.5));
        }
        260 => world.set_corridor(None),
        _ => {}
    }
}
