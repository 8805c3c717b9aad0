//! Squad AI rules shared by the runtime and tooling.
//!
//! `squad-core` defines agents and their state machine, class abilities and
//! timed effects, and the team coordinator with its formations and roles.
//! The world is reached only through the ports in [`env`]; behavior trees come
//! from the `behavior-tree` crate and are evaluated on a per-agent
//! [`agent::Blackboard`].
pub mod agent;
pub mod config;
pub mod env;
pub mod error;
pub mod events;
pub mod state;
pub mod team;

#[cfg(test)]
pub(crate) mod testing;

pub use agent::{
    AbilityError, AbilityKind, Agent, AgentClass, AgentSnapshot, AgentSpec, AgentState,
    Blackboard, Command, CommandError, DeferredEffect, Directive, EffectKind, SquadTree,
    StatBlock, TeamView, TickContext, TimedEffect,
};
pub use config::{AgentTuning, MissionTuning, SquadConfig, TeamTuning};
pub use env::{
    Env, NavigationOracle, OracleError, PcgRng, PerceptionOracle, RngOracle, Sighting,
    compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use events::SquadEvent;
pub use state::{AgentId, Clock, Pose, ResourceMeter, TargetId, Tick};
pub use team::{
    CombatTask, FormationType, Leader, RoleHandler, RoleRegistry, RosterError, TeamCoordinator,
    TeamStatus,
};
