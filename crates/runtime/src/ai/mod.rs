//! Squad decision making.
//!
//! - [`nodes`]: condition and action leaves over [`squad_core::Blackboard`]
//! - [`presets`]: complete trees built from those leaves

pub mod nodes;
pub mod presets;

pub use presets::squad_member_tree;
