//! Action nodes for squad behavior trees.
//!
//! Actions record a [`Directive`] on the blackboard and report `Running`; the
//! agent applies the directive after the tree returns.

use behavior_tree::{Action, Outcome};
use squad_core::{Blackboard, Directive};

/// Requests the Patrol state.
pub struct Patrol;

impl Action<Blackboard> for Patrol {
    fn name(&self) -> &'static str {
        "Patrol"
    }

    fn execute(&self, ctx: &mut Blackboard) -> Outcome {
        ctx.request(Directive::Patrol);
        Outcome::running("Patrolling Area")
    }
}

/// Requests objective progress for this tick.
pub struct CompleteObjective;

impl Action<Blackboard> for CompleteObjective {
    fn name(&self) -> &'static str {
        "Complete Objective"
    }

    fn execute(&self, ctx: &mut Blackboard) -> Outcome {
        ctx.request(Directive::AdvanceObjective);
        Outcome::running("Working on Objective")
    }
}

/// Requests the Follow state.
pub struct FollowTeam;

impl Action<Blackboard> for FollowTeam {
    fn name(&self) -> &'static str {
        "Follow Team"
    }

    fn execute(&self, ctx: &mut Blackboard) -> Outcome {
        ctx.request(Directive::FollowTeam);
        Outcome::running("Following Team")
    }
}
