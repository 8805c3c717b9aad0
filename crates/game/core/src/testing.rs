//! In-crate fakes for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use behavior_tree::{Action, BehaviorTree, Condition, Outcome, builder};
use glam::Vec3;

use crate::agent::{Blackboard, Directive, SquadTree};
use crate::env::{Env, NavigationOracle, PcgRng, PerceptionOracle, Sighting};
use crate::state::{AgentId, TargetId};

/// Scriptable perception + navigation with call counters.
#[derive(Debug, Default)]
pub struct FakeWorld {
    pub hostiles: Vec<Sighting>,
    pub line_of_sight: bool,
    /// Half-width of a corridor around every probe origin.
    pub corridor: Option<f32>,
    pub cover: Option<Vec3>,
    pub unreachable: bool,
    pub arrived: bool,
    pub destinations: AtomicUsize,
    pub stops: AtomicUsize,
    rng: PcgRng,
}

impl FakeWorld {
    pub fn with_hostile(mut self, id: u32, position: Vec3) -> Self {
        self.hostiles.push(Sighting {
            target: TargetId(id),
            position,
        });
        self.line_of_sight = true;
        self
    }

    pub fn with_corridor(mut self, half_width: f32) -> Self {
        self.corridor = Some(half_width);
        self
    }

    pub fn with_unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub fn env(&self) -> Env<'_> {
        Env::new(self, self, &self.rng)
    }

    pub fn destination_requests(&self) -> usize {
        self.destinations.load(Ordering::SeqCst)
    }

    pub fn stop_requests(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl PerceptionOracle for FakeWorld {
    fn find_hostiles_in_range(&self, origin: Vec3, range: f32) -> Vec<Sighting> {
        self.hostiles
            .iter()
            .filter(|s| s.position.distance(origin) <= range)
            .copied()
            .collect()
    }

    fn has_clear_line_of_sight(&self, _from: Vec3, _to: Vec3) -> bool {
        self.line_of_sight
    }

    fn probe_obstruction(&self, _origin: Vec3, _direction: Vec3, max_distance: f32) -> bool {
        self.corridor.is_some_and(|w| w <= max_distance)
    }

    fn locate(&self, target: TargetId) -> Option<Vec3> {
        self.hostiles
            .iter()
            .find(|s| s.target == target)
            .map(|s| s.position)
    }

    fn find_cover(&self, _origin: Vec3, _threat: Option<Vec3>, _radius: f32) -> Option<Vec3> {
        self.cover
    }
}

impl NavigationOracle for FakeWorld {
    fn set_destination(&self, _agent: AgentId, _point: Vec3) -> bool {
        self.destinations.fetch_add(1, Ordering::SeqCst);
        !self.unreachable
    }

    fn stop(&self, _agent: AgentId) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }

    fn is_arrived(&self, _agent: AgentId) -> bool {
        self.arrived
    }
}

struct HostileInSight;

impl Condition<Blackboard> for HostileInSight {
    fn name(&self) -> &'static str {
        "HostileInSight"
    }

    fn check(&self, ctx: &Blackboard) -> bool {
        ctx.hostile_in_sight
    }

    fn passed_label(&self) -> &'static str {
        "Engaging"
    }

    fn failed_label(&self) -> &'static str {
        "Clear"
    }
}

struct Request(Directive);

impl Action<Blackboard> for Request {
    fn name(&self) -> &'static str {
        "Request"
    }

    fn execute(&self, ctx: &mut Blackboard) -> Outcome {
        ctx.request(self.0);
        Outcome::running("Requested")
    }
}

/// Tree that never issues a directive, leaving the state machine in charge.
pub fn simple_tree() -> SquadTree {
    match builder::selector("Root", vec![builder::condition(HostileInSight)]) {
        Ok(root) => BehaviorTree::new(root),
        Err(err) => panic!("{err}"),
    }
}

/// Tree that requests `directive` every tick.
pub fn directing_tree(directive: Directive) -> SquadTree {
    match builder::selector("Root", vec![builder::action(Request(directive))]) {
        Ok(root) => BehaviorTree::new(root),
        Err(err) => panic!("{err}"),
    }
}
