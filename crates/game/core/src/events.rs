//! Domain events emitted by agents and the coordinator.
//!
//! Agents and the coordinator push events into outboxes while they tick; the
//! mission drains them after each tick and forwards them to telemetry.

use glam::Vec3;

use crate::agent::{AbilityError, AbilityKind, AgentClass, AgentState, EffectKind};
use crate::state::{AgentId, TargetId};
use crate::team::{CombatTask, FormationType};

#[derive(Clone, Debug, PartialEq)]
pub enum SquadEvent {
    AgentSpawned {
        agent: AgentId,
        class: AgentClass,
    },
    StateChanged {
        agent: AgentId,
        from: AgentState,
        to: AgentState,
    },
    DamageTaken {
        agent: AgentId,
        amount: f32,
        health: f32,
    },
    Healed {
        agent: AgentId,
        amount: f32,
    },
    /// Fires exactly once per agent.
    AgentDied {
        agent: AgentId,
    },
    LevelUp {
        agent: AgentId,
        level: u32,
    },
    CombatEnded {
        agent: AgentId,
    },
    AttackRequested {
        agent: AgentId,
        target: TargetId,
    },
    CommandReceived {
        agent: AgentId,
        command: String,
    },
    /// `agent` is `None` for team-wide commands.
    UnrecognizedCommand {
        agent: Option<AgentId>,
        command: String,
    },
    AbilityUsed {
        agent: AgentId,
        ability: AbilityKind,
    },
    AbilityRejected {
        agent: AgentId,
        reason: AbilityError,
    },
    EffectApplied {
        agent: AgentId,
        effect: EffectKind,
    },
    EffectEnded {
        agent: AgentId,
        effect: EffectKind,
        /// `false` when cut short by a state exit or death.
        expired: bool,
    },
    HackCompleted {
        agent: AgentId,
    },
    ChargePlaced {
        agent: AgentId,
        position: Vec3,
        detonates_at: f32,
    },
    ChargeDetonated {
        agent: AgentId,
        position: Vec3,
        radius: f32,
        damage: f32,
    },
    RoleAssigned {
        agent: AgentId,
        task: CombatTask,
    },
    FormationChanged {
        from: FormationType,
        to: FormationType,
    },
    TeamCommand {
        command: String,
        recipients: usize,
    },
    LeaderDown,
}

impl SquadEvent {
    /// Agent the event is about, if any.
    pub fn agent(&self) -> Option<AgentId> {
        use SquadEvent::*;
        match self {
            AgentSpawned { agent, .. }
            | StateChanged { agent, .. }
            | DamageTaken { agent, .. }
            | Healed { agent, .. }
            | AgentDied { agent }
            | LevelUp { agent, .. }
            | CombatEnded { agent }
            | AttackRequested { agent, .. }
            | CommandReceived { agent, .. }
            | AbilityUsed { agent, .. }
            | AbilityRejected { agent, .. }
            | EffectApplied { agent, .. }
            | EffectEnded { agent, .. }
            | HackCompleted { agent }
            | ChargePlaced { agent, .. }
            | ChargeDetonated { agent, .. }
            | RoleAssigned { agent, .. } => Some(*agent),
            UnrecognizedCommand { agent, .. } => *agent,
            FormationChanged { .. } | TeamCommand { .. } | LeaderDown => None,
        }
    }
}
