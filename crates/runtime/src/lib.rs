//! Mission orchestration for squad AI.
//!
//! This crate wires the squad rules from `squad-core` into a runnable scene:
//! the default member behavior tree, the [`Mission`] context that drives the
//! team coordinator tick by tick, telemetry topics, and a sandbox world for
//! headless runs.
//!
//! Modules are organized by responsibility:
//! - [`mission`] hosts the scene context and its builder
//! - [`ai`] provides behavior tree nodes and preset trees
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`oracle`] provides in-memory port adapters
pub mod ai;
pub mod api;
pub mod events;
pub mod mission;
pub mod oracle;

pub use ai::squad_member_tree;
pub use api::{HudSnapshot, MissionError, MissionSummary, Result};
pub use events::{Event, EventBus, Topic};
pub use mission::{Mission, MissionBuilder, TreeFactory};
pub use oracle::{Arena, SandboxWorld};
