//! Lightweight priority behavior tree library for real-time agents.
//!
//! This library provides a minimal behavior tree implementation designed for
//! agents that replan every simulation tick.
//!
//! - **Tri-state**: nodes report `Running`, `Success` or `Failure`
//! - **Replan every tick**: no node remembers a running child between ticks
//! - **Action labels**: every outcome carries a human-readable label for HUDs
//! - **Strict priority**: child order is fixed at construction time
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`] / [`Outcome`]: tri-state result plus label
//! - Composite nodes: [`Sequence`], [`Selector`]
//! - Leaf adapters: [`ConditionNode`], [`ActionNode`]
//! - [`BehaviorTree`]: owned root with diagnostics

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod error;
pub mod leaf;
pub mod status;
pub mod tree;

// Re-export core types for ergonomic API
pub use behavior::{Behavior, NodeKind};
pub use composite::{ALL_OPTIONS_FAILED, SEQUENCE_COMPLETE, Selector, Sequence};
pub use error::TreeError;
pub use leaf::{Action, ActionNode, Condition, ConditionNode};
pub use status::{Outcome, Status};
pub use tree::{BehaviorTree, NodeReport};
