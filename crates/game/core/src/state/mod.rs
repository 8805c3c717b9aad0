//! Identifiers, simulation time, and spatial primitives shared by agents and
//! the team coordinator.
mod common;

pub use common::{AgentId, Clock, Pose, ResourceMeter, TargetId, Tick};
