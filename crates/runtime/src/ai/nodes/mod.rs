//! Squad-specific behavior tree nodes.
//!
//! - `conditions`: read the blackboard and pass or fail
//! - `actions`: request a directive and report `Running`

pub mod actions;
pub mod conditions;

pub use actions::*;
pub use conditions::*;
