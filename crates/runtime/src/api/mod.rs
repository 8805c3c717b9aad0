//! Public mission API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the mission loop can stay focused on orchestration.

pub mod errors;
pub mod hud;

pub use errors::{MissionError, Result};
pub use hud::{HudSnapshot, MissionSummary};
