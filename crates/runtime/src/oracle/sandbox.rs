//! Flat sandbox world served through [`PerceptionOracle`] and
//! [`NavigationOracle`].
//!
//! The world is a square arena on the XZ plane. An optional corridor runs
//! along the Z axis with walls at `x = ±half_width`; the walls are what
//! obstruction probes hit. Bodies move in straight lines when
//! [`SandboxWorld::advance`] is called.
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use glam::Vec3;
use squad_core::agent::ClassProfile;
use squad_core::{AgentId, NavigationOracle, PerceptionOracle, Sighting, TargetId};

/// Walkable square centred on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub half_extent: f32,
}

impl Arena {
    pub const fn new(half_extent: f32) -> Self {
        Self { half_extent }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.x.abs() <= self.half_extent && point.z.abs() <= self.half_extent
    }

    pub fn clamp(&self, point: Vec3) -> Vec3 {
        let e = self.half_extent;
        Vec3::new(point.x.clamp(-e, e), point.y, point.z.clamp(-e, e))
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(50.0)
    }
}

#[derive(Clone, Copy, Debug)]
struct Body {
    position: Vec3,
    destination: Option<Vec3>,
    speed: f32,
}

impl Body {
    fn at(position: Vec3) -> Self {
        Self {
            position,
            destination: None,
            speed: ClassProfile::BASE_MOVE_SPEED,
        }
    }
}

#[derive(Debug, Default)]
struct WorldState {
    hostiles: BTreeMap<TargetId, Vec3>,
    cover: Vec<Vec3>,
    corridor: Option<f32>,
    bodies: BTreeMap<AgentId, Body>,
}

/// Shared in-memory world. Clone the `Arc` to hand it to a mission as both
/// ports and keep a handle for scripting hostiles.
#[derive(Debug)]
pub struct SandboxWorld {
    arena: Arena,
    sight_range: f32,
    arrival_epsilon: f32,
    state: Mutex<WorldState>,
}

impl SandboxWorld {
    pub const DEFAULT_SIGHT_RANGE: f32 = 25.0;
    const ARRIVAL_EPSILON: f32 = 0.05;

    pub fn new(arena: Arena) -> Self {
        Self {
            arena,
            sight_range: Self::DEFAULT_SIGHT_RANGE,
            arrival_epsilon: Self::ARRIVAL_EPSILON,
            state: Mutex::new(WorldState::default()),
        }
    }

    #[must_use]
    pub fn with_sight_range(mut self, range: f32) -> Self {
        self.sight_range = range;
        self
    }

    /// Adds corridor walls at `x = ±half_width`.
    #[must_use]
    pub fn with_corridor(self, half_width: f32) -> Self {
        self.lock().corridor = Some(half_width);
        self
    }

    #[must_use]
    pub fn with_cover(self, points: impl IntoIterator<Item = Vec3>) -> Self {
        self.lock().cover.extend(points);
        self
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    fn lock(&self) -> MutexGuard<'_, WorldState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ===== scripting =====

    pub fn spawn_hostile(&self, id: TargetId, position: Vec3) {
        self.lock().hostiles.insert(id, position);
    }

    pub fn move_hostile(&self, id: TargetId, position: Vec3) -> bool {
        match self.lock().hostiles.get_mut(&id) {
            Some(p) => {
                *p = position;
                true
            }
            None => false,
        }
    }

    pub fn remove_hostile(&self, id: TargetId) -> bool {
        self.lock().hostiles.remove(&id).is_some()
    }

    pub fn hostile_count(&self) -> usize {
        self.lock().hostiles.len()
    }

    pub fn set_corridor(&self, half_width: Option<f32>) {
        self.lock().corridor = half_width;
    }

    pub fn destination(&self, agent: AgentId) -> Option<Vec3> {
        self.lock().bodies.get(&agent).and_then(|b| b.destination)
    }

    pub fn speed(&self, agent: AgentId) -> Option<f32> {
        self.lock().bodies.get(&agent).map(|b| b.speed)
    }

    /// Moves every body `dt` seconds toward its destination.
    pub fn advance(&self, dt: f32) {
        let epsilon = self.arrival_epsilon;
        for body in self.lock().bodies.values_mut() {
            let Some(destination) = body.destination else {
                continue;
            };
            let to_go = destination - body.position;
            let step = body.speed * dt;
            if to_go.length() <= step.max(epsilon) {
                body.position = destination;
                body.destination = None;
            } else {
                body.position += to_go.normalize() * step;
            }
        }
    }
}

impl Default for SandboxWorld {
    fn default() -> Self {
        Self::new(Arena::default())
    }
}

impl PerceptionOracle for SandboxWorld {
    fn find_hostiles_in_range(&self, origin: Vec3, range: f32) -> Vec<Sighting> {
        let mut found: Vec<Sighting> = self
            .lock()
            .hostiles
            .iter()
            .filter(|(_, p)| p.distance(origin) <= range)
            .map(|(&target, &position)| Sighting { target, position })
            .collect();
        // Stable sort keeps id order among equidistant hostiles.
        found.sort_by(|a, b| {
            a.position
                .distance(origin)
                .total_cmp(&b.position.distance(origin))
        });
        found
    }

    fn has_clear_line_of_sight(&self, from: Vec3, to: Vec3) -> bool {
        from.distance(to) <= self.sight_range
    }

    fn probe_obstruction(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> bool {
        let Some(half_width) = self.lock().corridor else {
            return false;
        };
        let dir = direction.normalize_or_zero();
        if dir.x == 0.0 {
            return false;
        }
        [half_width, -half_width].into_iter().any(|wall| {
            let t = (wall - origin.x) / dir.x;
            t > 0.0 && t <= max_distance
        })
    }

    fn locate(&self, target: TargetId) -> Option<Vec3> {
        self.lock().hostiles.get(&target).copied()
    }

    fn find_cover(&self, origin: Vec3, threat: Option<Vec3>, radius: f32) -> Option<Vec3> {
        // Points farther from the threat than the agent come first.
        let shielded = |p: Vec3| threat.is_none_or(|t| p.distance(t) > origin.distance(t));
        self.lock()
            .cover
            .iter()
            .copied()
            .filter(|p| p.distance(origin) <= radius)
            .min_by(|a, b| {
                shielded(*b)
                    .cmp(&shielded(*a))
                    .then(a.distance(origin).total_cmp(&b.distance(origin)))
            })
    }
}

impl NavigationOracle for SandboxWorld {
    fn set_destination(&self, agent: AgentId, point: Vec3) -> bool {
        if !self.arena.contains(point) {
            return false;
        }
        self.lock()
            .bodies
            .entry(agent)
            .or_insert_with(|| Body::at(Vec3::ZERO))
            .destination = Some(point);
        true
    }

    fn stop(&self, agent: AgentId) {
        if let Some(body) = self.lock().bodies.get_mut(&agent) {
            body.destination = None;
        }
    }

    fn is_arrived(&self, agent: AgentId) -> bool {
        self.lock()
            .bodies
            .get(&agent)
            .is_none_or(|b| b.destination.is_none())
    }

    fn sample_reachable(&self, near: Vec3, max_distance: f32) -> Option<Vec3> {
        let projected = self.arena.clamp(near);
        (projected.distance(near) <= max_distance).then_some(projected)
    }

    fn position(&self, agent: AgentId) -> Option<Vec3> {
        self.lock().bodies.get(&agent).map(|b| b.position)
    }

    fn warp(&self, agent: AgentId, point: Vec3) {
        let mut state = self.lock();
        let body = state.bodies.entry(agent).or_insert_with(|| Body::at(point));
        body.position = point;
        body.destination = None;
    }

    fn set_speed(&self, agent: AgentId, speed: f32) {
        self.lock()
            .bodies
            .entry(agent)
            .or_insert_with(|| Body::at(Vec3::ZERO))
            .speed = speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostiles_are_reported_nearest_first() {
        let world = SandboxWorld::default();
        world.spawn_hostile(TargetId(1), Vec3::new(8.0, 0.0, 0.0));
        world.spawn_hostile(TargetId(2), Vec3::new(3.0, 0.0, 0.0));
        world.spawn_hostile(TargetId(3), Vec3::new(40.0, 0.0, 0.0));

        let seen = world.find_hostiles_in_range(Vec3::ZERO, 15.0);
        let ids: Vec<_> = seen.iter().map(|s| s.target).collect();
        assert_eq!(ids, vec![TargetId(2), TargetId(1)]);
    }

    #[test]
    fn corridor_walls_block_lateral_probes() {
        let world = SandboxWorld::default().with_corridor(1.5);
        assert!(world.probe_obstruction(Vec3::ZERO, Vec3::X, 2.0));
        assert!(world.probe_obstruction(Vec3::ZERO, -Vec3::X, 2.0));
        assert!(!world.probe_obstruction(Vec3::ZERO, Vec3::Z, 2.0));

        world.set_corridor(Some(4.0));
        assert!(!world.probe_obstruction(Vec3::ZERO, Vec3::X, 2.0));
    }

    #[test]
    fn bodies_walk_to_their_destination() {
        let world = SandboxWorld::default();
        let id = AgentId(1);
        world.warp(id, Vec3::ZERO);
        world.set_speed(id, 2.0);
        assert!(world.set_destination(id, Vec3::new(0.0, 0.0, 3.0)));
        assert!(!world.is_arrived(id));

        world.advance(1.0);
        assert_eq!(world.position(id), Some(Vec3::new(0.0, 0.0, 2.0)));
        world.advance(1.0);
        assert_eq!(world.position(id), Some(Vec3::new(0.0, 0.0, 3.0)));
        assert!(world.is_arrived(id));
    }

    #[test]
    fn points_outside_the_arena_are_unreachable() {
        let world = SandboxWorld::new(Arena::new(10.0));
        assert!(!world.set_destination(AgentId(1), Vec3::new(20.0, 0.0, 0.0)));
        assert_eq!(
            world.sample_reachable(Vec3::new(12.0, 0.0, 0.0), 5.0),
            Some(Vec3::new(10.0, 0.0, 0.0))
        );
        assert_eq!(world.sample_reachable(Vec3::new(30.0, 0.0, 0.0), 5.0), None);
    }

    #[test]
    fn cover_prefers_points_away_from_the_threat() {
        let world = SandboxWorld::default()
            .with_cover([Vec3::new(2.0, 0.0, 0.0), Vec3::new(-4.0, 0.0, 0.0)]);
        let threat = Some(Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(
            world.find_cover(Vec3::ZERO, threat, 8.0),
            Some(Vec3::new(-4.0, 0.0, 0.0))
        );
        assert_eq!(
            world.find_cover(Vec3::ZERO, None, 8.0),
            Some(Vec3::new(2.0, 0.0, 0.0))
        );
    }
}
