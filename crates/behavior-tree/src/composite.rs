//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! This module provides the two priority composites used for real-time
//! replanning: [`Sequence`] (AND logic) and [`Selector`] (OR logic).

use crate::{Behavior, NodeKind, Outcome, TreeError};

/// Label reported by a sequence whose children all succeeded.
pub const SEQUENCE_COMPLETE: &str = "Sequence Complete";

/// Label reported by a selector whose children all failed.
pub const ALL_OPTIONS_FAILED: &str = "All Options Failed";

/// Executes child behaviors in order until one does not succeed.
///
/// # Semantics
///
/// A `Sequence` node evaluates its children from left to right:
/// - If a child returns `Failure` or `Running`, the sequence **stops
///   immediately** and reports that child's status and label
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - If all children return `Success`, the sequence returns `Success` with
///   the label "Sequence Complete"
pub struct Sequence<C> {
    name: &'static str,
    children: Vec<Box<dyn Behavior<C>>>,
    last: Option<Outcome>,
}

impl<C> Sequence<C> {
    /// Creates a new sequence with the given child behaviors.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EmptyComposite`] if `children` is empty.
    pub fn new(name: &'static str, children: Vec<Box<dyn Behavior<C>>>) -> Result<Self, TreeError> {
        if children.is_empty() {
            return Err(TreeError::EmptyComposite { name });
        }
        Ok(Self {
            name,
            children,
            last: None,
        })
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Sequence
    }

    fn tick(&mut self, ctx: &mut C) -> Outcome {
        let mut outcome = Outcome::success(SEQUENCE_COMPLETE);
        for child in &mut self.children {
            let result = child.tick(ctx);
            if !result.status.is_success() {
                outcome = result;
                break;
            }
        }
        self.last = Some(outcome);
        outcome
    }

    fn last(&self) -> Option<Outcome> {
        self.last
    }

    fn children(&self) -> &[Box<dyn Behavior<C>>] {
        &self.children
    }
}

/// Executes child behaviors in order until one does not fail.
///
/// # Semantics
///
/// A `Selector` node evaluates its children from left to right:
/// - If a child returns `Success` or `Running`, the selector **stops
///   immediately** and reports that child's status and label
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If all children return `Failure`, the selector returns `Failure` with
///   the label "All Options Failed"
pub struct Selector<C> {
    name: &'static str,
    children: Vec<Box<dyn Behavior<C>>>,
    last: Option<Outcome>,
}

impl<C> Selector<C> {
    /// Creates a new selector with the given child behaviors.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EmptyComposite`] if `children` is empty.
    pub fn new(name: &'static str, children: Vec<Box<dyn Behavior<C>>>) -> Result<Self, TreeError> {
        if children.is_empty() {
            return Err(TreeError::EmptyComposite { name });
        }
        Ok(Self {
            name,
            children,
            last: None,
        })
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Selector
    }

    fn tick(&mut self, ctx: &mut C) -> Outcome {
        let mut outcome = Outcome::failure(ALL_OPTIONS_FAILED);
        for child in &mut self.children {
            let result = child.tick(ctx);
            if !result.status.is_failure() {
                outcome = result;
                break;
            }
        }
        self.last = Some(outcome);
        outcome
    }

    fn last(&self) -> Option<Outcome> {
        self.last
    }

    fn children(&self) -> &[Box<dyn Behavior<C>>] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, ActionNode, Status};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TestContext {
        log: Vec<&'static str>,
    }

    /// Leaf that returns a fixed outcome and counts its invocations.
    struct Fixed {
        name: &'static str,
        outcome: Outcome,
        calls: Arc<AtomicUsize>,
    }

    impl Action<TestContext> for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn execute(&self, ctx: &mut TestContext) -> Outcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ctx.log.push(self.name);
            self.outcome
        }
    }

    fn leaf(
        name: &'static str,
        outcome: Outcome,
    ) -> (Box<dyn Behavior<TestContext>>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let node = ActionNode::new(Fixed {
            name,
            outcome,
            calls: Arc::clone(&calls),
        });
        (Box::new(node), calls)
    }

    fn ctx() -> TestContext {
        TestContext { log: Vec::new() }
    }

    #[test]
    fn empty_composites_are_rejected() {
        let err = Sequence::<TestContext>::new("Root", Vec::new())
            .err()
            .expect("empty sequence must fail");
        assert_eq!(err, TreeError::EmptyComposite { name: "Root" });

        assert!(Selector::<TestContext>::new("Pick", Vec::new()).is_err());
    }

    #[test]
    fn sequence_all_success_reports_completion() {
        let (a, _) = leaf("a", Outcome::success("A"));
        let (b, _) = leaf("b", Outcome::success("B"));
        let mut seq = Sequence::new("Seq", vec![a, b]).unwrap();

        let mut ctx = ctx();
        let outcome = seq.tick(&mut ctx);
        assert_eq!(outcome, Outcome::success(SEQUENCE_COMPLETE));
        assert_eq!(ctx.log, vec!["a", "b"]);
        assert_eq!(seq.last(), Some(outcome));
    }

    #[test]
    fn sequence_stops_at_first_failure() {
        let (a, _) = leaf("a", Outcome::success("A"));
        let (b, _) = leaf("b", Outcome::failure("B failed"));
        let (c, c_calls) = leaf("c", Outcome::success("C"));
        let mut seq = Sequence::new("Seq", vec![a, b, c]).unwrap();

        let outcome = seq.tick(&mut ctx());
        assert_eq!(outcome, Outcome::failure("B failed"));
        assert_eq!(c_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn sequence_stops_at_first_running() {
        let (a, _) = leaf("a", Outcome::running("Working"));
        let (b, b_calls) = leaf("b", Outcome::success("B"));
        let mut seq = Sequence::new("Seq", vec![a, b]).unwrap();

        let outcome = seq.tick(&mut ctx());
        assert_eq!(outcome.status, Status::Running);
        assert_eq!(outcome.label, "Working");
        assert_eq!(b_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn selector_stops_at_first_success() {
        let (a, _) = leaf("a", Outcome::failure("A failed"));
        let (b, _) = leaf("b", Outcome::success("Engaging Enemy"));
        let (c, c_calls) = leaf("c", Outcome::running("Patrolling Area"));
        let mut sel = Selector::new("Sel", vec![a, b, c]).unwrap();

        assert_eq!(sel.tick(&mut ctx()), Outcome::success("Engaging Enemy"));
        assert_eq!(c_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn selector_stops_at_first_running() {
        let (a, _) = leaf("a", Outcome::running("Patrolling Area"));
        let (b, b_calls) = leaf("b", Outcome::success("B"));
        let mut sel = Selector::new("Sel", vec![a, b]).unwrap();

        assert_eq!(sel.tick(&mut ctx()), Outcome::running("Patrolling Area"));
        assert_eq!(b_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn selector_all_failure_reports_exhaustion() {
        let (a, _) = leaf("a", Outcome::failure("A"));
        let (b, _) = leaf("b", Outcome::failure("B"));
        let mut sel = Selector::new("Sel", vec![a, b]).unwrap();

        let mut ctx = ctx();
        assert_eq!(sel.tick(&mut ctx), Outcome::failure(ALL_OPTIONS_FAILED));
        assert_eq!(ctx.log, vec!["a", "b"]);
    }

    #[test]
    fn unreached_children_keep_no_outcome() {
        let (a, _) = leaf("a", Outcome::failure("A"));
        let (b, _) = leaf("b", Outcome::success("B"));
        let mut seq = Sequence::new("Seq", vec![a, b]).unwrap();

        seq.tick(&mut ctx());
        let children = Behavior::children(&seq);
        assert!(children[0].last().is_some());
        assert!(children[1].last().is_none());
    }
}
