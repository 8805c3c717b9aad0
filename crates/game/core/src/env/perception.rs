//! Perception port.

use glam::Vec3;

use crate::state::TargetId;

/// A hostile reported by perception.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sighting {
    pub target: TargetId,
    pub position: Vec3,
}

/// Read-only spatial queries against the world.
///
/// All queries must be bounded in time (bounded ray casts, not unbounded
/// searches) because they run inside the tick.
pub trait PerceptionOracle: Send + Sync {
    /// Hostiles within `range` of `origin`, nearest first.
    fn find_hostiles_in_range(&self, origin: Vec3, range: f32) -> Vec<Sighting>;

    fn has_clear_line_of_sight(&self, from: Vec3, to: Vec3) -> bool;

    /// Whether a ray from `origin` along `direction` hits something within
    /// `max_distance`.
    fn probe_obstruction(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> bool;

    /// Current position of a previously sighted hostile, or `None` once it no
    /// longer exists.
    fn locate(&self, target: TargetId) -> Option<Vec3>;

    /// Nearest cover point within `radius`, preferring points shielded from
    /// `threat`.
    fn find_cover(&self, origin: Vec3, threat: Option<Vec3>, radius: f32) -> Option<Vec3> {
        let _ = (origin, threat, radius);
        None
    }
}
