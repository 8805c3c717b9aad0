//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, which is the fundamental
//! abstraction for all behavior tree nodes. The trait is generic over a
//! context type `C`, allowing nodes to read agent state and record requests.

use crate::Outcome;

/// Structural role of a node, used for diagnostics and invariant checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Sequence,
    Selector,
    Condition,
    Action,
}

impl NodeKind {
    /// Leaves never own children.
    pub const fn is_leaf(self) -> bool {
        matches!(self, NodeKind::Condition | NodeKind::Action)
    }
}

/// A behavior tree node that can be evaluated against a context.
pub trait Behavior<C>: Send + Sync {
    /// Display name of the node (e.g. "Combat Behavior").
    fn name(&self) -> &'static str;

    fn kind(&self) -> NodeKind;

    /// Evaluate this behavior node against the given context.
    ///
    /// Every node records the outcome it produced so diagnostics can inspect
    /// the whole tree after a tick; that record is never read back by the
    /// engine on the next tick.
    fn tick(&mut self, ctx: &mut C) -> Outcome;

    /// Outcome produced by the most recent evaluation of this node, if it was
    /// reached at all.
    fn last(&self) -> Option<Outcome>;

    /// Child nodes in evaluation order. Leaves return an empty slice.
    fn children(&self) -> &[Box<dyn Behavior<C>>] {
        &[]
    }
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior<C>>` to also implement `Behavior<C>`,
/// enabling dynamic dispatch and heterogeneous collections of nodes.
impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }

    #[inline]
    fn kind(&self) -> NodeKind {
        (**self).kind()
    }

    #[inline]
    fn tick(&mut self, ctx: &mut C) -> Outcome {
        (**self).tick(ctx)
    }

    #[inline]
    fn last(&self) -> Option<Outcome> {
        (**self).last()
    }

    #[inline]
    fn children(&self) -> &[Box<dyn Behavior<C>>] {
        (**self).children()
    }
}
