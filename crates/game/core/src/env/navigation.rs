//! Navigation port.

use glam::Vec3;

use crate::state::AgentId;

/// Movement requests for squad members.
///
/// Requests are fire-and-forget; progress is observed through
/// [`is_arrived`](Self::is_arrived) on later ticks.
pub trait NavigationOracle: Send + Sync {
    /// Requests movement toward `point`. Returns `false` if the point is
    /// unreachable; the agent then keeps its current state and stays put.
    fn set_destination(&self, agent: AgentId, point: Vec3) -> bool;

    fn stop(&self, agent: AgentId);

    fn is_arrived(&self, agent: AgentId) -> bool;

    /// Projects `near` onto the walkable area within `max_distance`.
    fn sample_reachable(&self, near: Vec3, max_distance: f32) -> Option<Vec3> {
        let _ = max_distance;
        Some(near)
    }

    /// Authoritative position of `agent`, if the navigation layer tracks it.
    fn position(&self, agent: AgentId) -> Option<Vec3> {
        let _ = agent;
        None
    }

    /// Places `agent` at `point` without pathing, e.g. at spawn.
    fn warp(&self, agent: AgentId, point: Vec3) {
        let _ = (agent, point);
    }

    /// Updates the movement speed used for `agent`.
    fn set_speed(&self, agent: AgentId, speed: f32) {
        let _ = (agent, speed);
    }
}
