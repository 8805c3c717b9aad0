//! Data-driven squad content and loaders.
//!
//! This crate houses the squad roster definitions and provides loaders for
//! RON/TOML data files:
//! - Mission configuration (`SquadConfig`, TOML)
//! - Squad rosters (leader + members, RON or TOML)
//!
//! Content is consumed when a mission is assembled and never appears in
//! agent state.

pub mod roster;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use roster::{LeaderSpec, RosterSpec};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, RosterLoader};
