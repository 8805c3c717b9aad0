//! Ready-made squad behavior trees.
//!
//! ```text
//! Root (Sequence)
//!   ├─ Health Check (Selector)
//!   │   ├─ Check Low Health
//!   │   └─ Check Ammo
//!   ├─ Combat Behavior (Selector)
//!   │   ├─ Check Enemy In Sight
//!   │   ├─ Check Last Known Position
//!   │   └─ Patrol
//!   └─ Mission Behavior (Selector)
//!       ├─ Complete Objective
//!       └─ Follow Team
//! ```
//!
//! The root is a Sequence over Selectors, so a Selector that fails or keeps
//! running stops the walk. A healthy, stocked agent fails the Health Check
//! and the tree yields no directive; its state machine decides on its own.

use behavior_tree::{BehaviorTree, TreeError, builder};
use squad_core::{Blackboard, SquadTree};

use super::nodes::{
    CheckAmmo, CheckEnemyInSight, CheckLastKnownPosition, CheckLowHealth, CompleteObjective,
    FollowTeam, Patrol,
};

type Node = Box<dyn behavior_tree::Behavior<Blackboard>>;

pub fn health_check() -> Result<Node, TreeError> {
    builder::selector(
        "Health Check",
        vec![builder::condition(CheckLowHealth), builder::condition(CheckAmmo)],
    )
}

pub fn combat_behavior() -> Result<Node, TreeError> {
    builder::selector(
        "Combat Behavior",
        vec![
            builder::condition(CheckEnemyInSight),
            builder::condition(CheckLastKnownPosition),
            builder::action(Patrol),
        ],
    )
}

pub fn mission_behavior() -> Result<Node, TreeError> {
    builder::selector(
        "Mission Behavior",
        vec![builder::action(CompleteObjective), builder::action(FollowTeam)],
    )
}

/// Default tree for every squad member.
pub fn squad_member_tree() -> Result<SquadTree, TreeError> {
    let root = builder::sequence(
        "Root",
        vec![health_check()?, combat_behavior()?, mission_behavior()?],
    )?;
    Ok(BehaviorTree::new(root))
}
