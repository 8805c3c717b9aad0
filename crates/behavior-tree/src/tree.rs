//! Owned tree wrapper exposing per-tick diagnostics.

use crate::{Behavior, NodeKind, Outcome, Status};

/// One line of a node dump produced by [`BehaviorTree::node_reports`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeReport {
    pub depth: usize,
    pub name: &'static str,
    pub kind: NodeKind,
    /// `None` if the node was not reached on the last evaluation.
    pub last: Option<Outcome>,
}

/// A behavior tree rooted at a single node.
///
/// The tree does not carry any "currently running" pointer: every call to
/// [`evaluate`](Self::evaluate) walks from the root, so the outcome of the
/// previous tick never affects the next one.
pub struct BehaviorTree<C> {
    root: Box<dyn Behavior<C>>,
    last: Option<Outcome>,
}

impl<C> BehaviorTree<C> {
    pub fn new(root: Box<dyn Behavior<C>>) -> Self {
        Self { root, last: None }
    }

    /// Walks the tree from the root once and returns the root outcome.
    pub fn evaluate(&mut self, ctx: &mut C) -> Outcome {
        let outcome = self.root.tick(ctx);
        self.last = Some(outcome);
        outcome
    }

    /// Root status from the last evaluation, `Failure` before the first one.
    pub fn status(&self) -> Status {
        self.last.map_or(Status::Failure, |o| o.status)
    }

    /// Action label from the last evaluation, empty before the first one.
    pub fn current_action(&self) -> &'static str {
        self.last.map_or("", |o| o.label)
    }

    pub fn last(&self) -> Option<Outcome> {
        self.last
    }

    pub fn root(&self) -> &dyn Behavior<C> {
        self.root.as_ref()
    }

    /// Pre-order dump of every node with its last outcome.
    pub fn node_reports(&self) -> Vec<NodeReport> {
        let mut out = Vec::new();
        collect(self.root.as_ref(), 0, &mut out);
        out
    }
}

fn collect<C>(node: &dyn Behavior<C>, depth: usize, out: &mut Vec<NodeReport>) {
    out.push(NodeReport {
        depth,
        name: node.name(),
        kind: node.kind(),
        last: node.last(),
    });
    for child in node.children() {
        collect(child.as_ref(), depth + 1, out);
    }
}

impl<C> std::fmt::Debug for BehaviorTree<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorTree")
            .field("root", &self.root.name())
            .field("last", &self.last)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{action, condition, selector, sequence};
    use crate::{Action, Condition};

    struct Ctx {
        hostile: bool,
        patrols: u32,
    }

    struct HostileVisible;
    impl Condition<Ctx> for HostileVisible {
        fn name(&self) -> &'static str {
            "Enemy In Sight"
        }
        fn check(&self, ctx: &Ctx) -> bool {
            ctx.hostile
        }
        fn passed_label(&self) -> &'static str {
            "Engaging Enemy"
        }
        fn failed_label(&self) -> &'static str {
            "No Enemy in Sight"
        }
    }

    struct Patrol;
    impl Action<Ctx> for Patrol {
        fn name(&self) -> &'static str {
            "Patrol"
        }
        fn execute(&self, ctx: &mut Ctx) -> Outcome {
            ctx.patrols += 1;
            Outcome::running("Patrolling Area")
        }
    }

    fn tree() -> BehaviorTree<Ctx> {
        let combat = selector(
            "Combat Behavior",
            vec![condition(HostileVisible), action(Patrol)],
        )
        .unwrap();
        BehaviorTree::new(sequence("Root", vec![combat]).unwrap())
    }

    #[test]
    fn reports_defaults_before_first_evaluation() {
        let tree = tree();
        assert_eq!(tree.status(), Status::Failure);
        assert_eq!(tree.current_action(), "");
        assert!(tree.node_reports().iter().all(|r| r.last.is_none()));
    }

    #[test]
    fn replans_from_root_every_tick() {
        let mut tree = tree();
        let mut ctx = Ctx {
            hostile: false,
            patrols: 0,
        };

        assert_eq!(tree.evaluate(&mut ctx), Outcome::running("Patrolling Area"));
        assert_eq!(ctx.patrols, 1);

        // Higher-priority branch pre-empts the running patrol immediately.
        ctx.hostile = true;
        let outcome = tree.evaluate(&mut ctx);
        assert_eq!(outcome.label, "Engaging Enemy");
        assert_eq!(tree.status(), Status::Success);
        assert_eq!(tree.current_action(), "Sequence Complete");
        assert_eq!(ctx.patrols, 1);
    }

    #[test]
    fn node_reports_are_pre_order() {
        let mut tree = tree();
        let mut ctx = Ctx {
            hostile: false,
            patrols: 0,
        };
        tree.evaluate(&mut ctx);

        let reports = tree.node_reports();
        let names: Vec<_> = reports.iter().map(|r| (r.depth, r.name)).collect();
        assert_eq!(
            names,
            vec![
                (0, "Root"),
                (1, "Combat Behavior"),
                (2, "Enemy In Sight"),
                (2, "Patrol"),
            ]
        );
        assert!(reports.iter().filter(|r| r.kind.is_leaf()).count() == 2);
        assert_eq!(reports[2].last, Some(Outcome::failure("No Enemy in Sight")));
    }
}
