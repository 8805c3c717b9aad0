//! Read-only views handed to HUDs and telemetry consumers.

use glam::Vec3;
use serde::Serialize;
use squad_core::{AgentSnapshot, FormationType, Leader, TeamStatus, Tick};

/// Leader row on the HUD.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LeaderHud {
    pub name: String,
    pub position: Vec3,
    pub health: f32,
    pub max_health: f32,
    pub alive: bool,
}

impl From<&Leader> for LeaderHud {
    fn from(leader: &Leader) -> Self {
        Self {
            name: leader.name().to_owned(),
            position: leader.position(),
            health: leader.health(),
            max_health: leader.max_health(),
            alive: leader.is_alive(),
        }
    }
}

/// Everything an on-screen HUD shows for one tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub tick: Tick,
    pub time: f32,
    pub formation: FormationType,
    pub team: TeamStatus,
    pub leader: Option<LeaderHud>,
    pub agents: Vec<AgentSnapshot>,
}

impl HudSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn agent(&self, name: &str) -> Option<&AgentSnapshot> {
        self.agents.iter().find(|a| a.name == name)
    }
}

/// Final report produced when a mission is torn down.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MissionSummary {
    pub ticks: u64,
    pub elapsed: f32,
    pub survivors: usize,
    pub casualties: usize,
    pub objective_progress: u32,
    pub leader_alive: bool,
}
