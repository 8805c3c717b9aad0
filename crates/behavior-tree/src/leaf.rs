//! Leaf behavior nodes.
//!
//! Leaves come in two flavors with different contracts:
//!
//! - [`Condition`]: a pure read of the context. It can only pass or fail, so
//!   the adapter [`ConditionNode`] can never report `Running`.
//! - [`Action`]: issues a command against the context and reports its own
//!   outcome, typically `Running` ("in progress, re-evaluate next tick").

use crate::{Behavior, NodeKind, Outcome};

/// A read-only predicate over the context.
pub trait Condition<C>: Send + Sync {
    fn name(&self) -> &'static str;

    /// Evaluates the predicate. Must not mutate the context.
    fn check(&self, ctx: &C) -> bool;

    /// Label reported when the predicate holds.
    fn passed_label(&self) -> &'static str;

    /// Label reported when the predicate does not hold.
    fn failed_label(&self) -> &'static str;
}

/// A command issued against the context.
pub trait Action<C>: Send + Sync {
    fn name(&self) -> &'static str;

    fn execute(&self, ctx: &mut C) -> Outcome;
}

/// Adapts a [`Condition`] into a tree node.
pub struct ConditionNode<T> {
    condition: T,
    last: Option<Outcome>,
}

impl<T> ConditionNode<T> {
    pub fn new(condition: T) -> Self {
        Self {
            condition,
            last: None,
        }
    }
}

impl<C, T: Condition<C>> Behavior<C> for ConditionNode<T> {
    fn name(&self) -> &'static str {
        self.condition.name()
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Condition
    }

    fn tick(&mut self, ctx: &mut C) -> Outcome {
        let outcome = if self.condition.check(ctx) {
            Outcome::success(self.condition.passed_label())
        } else {
            Outcome::failure(self.condition.failed_label())
        };
        self.last = Some(outcome);
        outcome
    }

    fn last(&self) -> Option<Outcome> {
        self.last
    }
}

/// Adapts an [`Action`] into a tree node.
pub struct ActionNode<T> {
    action: T,
    last: Option<Outcome>,
}

impl<T> ActionNode<T> {
    pub fn new(action: T) -> Self {
        Self { action, last: None }
    }
}

impl<C, T: Action<C>> Behavior<C> for ActionNode<T> {
    fn name(&self) -> &'static str {
        self.action.name()
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Action
    }

    fn tick(&mut self, ctx: &mut C) -> Outcome {
        let outcome = self.action.execute(ctx);
        self.last = Some(outcome);
        outcome
    }

    fn last(&self) -> Option<Outcome> {
        self.last
    }
}
