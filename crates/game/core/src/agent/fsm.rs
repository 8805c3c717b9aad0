//! Agent state machine: transitions, Enter/Exit hooks, and per-state ticks.

use glam::Vec3;
use tracing::{debug, info};

use super::{Agent, AgentState, TickContext};
use crate::env::{Env, compute_seed};
use crate::events::SquadEvent;
use crate::state::TargetId;

/// State hook recorded by unit tests.
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Hook {
    Enter,
    Exit,
}

impl Agent {
    /// Transitions to `next`, running the Exit hook of the current state and
    /// the Enter hook of the new one.
    ///
    /// Self-transitions are no-ops and Dead is terminal. Returns whether a
    /// transition happened.
    pub fn change_state(&mut self, next: AgentState, now: f32) -> bool {
        if self.state == next || self.state.is_terminal() {
            return false;
        }

        let previous = self.state;
        self.exit_state(previous);
        self.state = next;

        info!(
            target: "squad::agent",
            agent = %self.id,
            from = %previous,
            to = %next,
            "state changed"
        );
        self.emit(SquadEvent::StateChanged {
            agent: self.id,
            from: previous,
            to: next,
        });

        self.enter_state(next, now);
        true
    }

    fn enter_state(&mut self, state: AgentState, now: f32) {
        #[cfg(test)]
        self.hooks.push((Hook::Enter, state));
        match state {
            AgentState::Combat => {
                self.in_combat = true;
                self.last_combat_time = now;
            }
            AgentState::Cover => {
                self.providing_cover = true;
                self.cover_sought = false;
            }
            AgentState::Ability => {
                self.ability_pending = true;
            }
            AgentState::Dead => self.enter_dead(),
            AgentState::Idle | AgentState::Patrol | AgentState::Follow => {}
        }
    }

    fn exit_state(&mut self, state: AgentState) {
        #[cfg(test)]
        self.hooks.push((Hook::Exit, state));
        match state {
            AgentState::Cover => {
                self.providing_cover = false;
            }
            AgentState::Ability => {
                // In-flight work of this entry is abandoned, not completed.
                self.ability_pending = false;
                let cancelled = self.effects.cancel_bound(AgentState::Ability);
                self.end_effects(cancelled, false);
            }
            AgentState::Combat
            | AgentState::Idle
            | AgentState::Patrol
            | AgentState::Follow
            | AgentState::Dead => {}
        }
    }

    fn enter_dead(&mut self) {
        self.alive = false;
        self.health = 0.0;
        self.in_combat = false;
        self.is_moving = false;
        self.destination = None;
        self.target = None;
        self.has_line_of_sight = false;
        self.ability_pending = false;
        self.command_override = false;
        self.task = None;

        let cancelled = self.effects.cancel_all();
        self.end_effects(cancelled, false);
        self.kit.abandon_charges();
        self.deferred.clear();

        info!(
            target: "squad::agent",
            agent = %self.id,
            name = %self.name,
            "agent eliminated"
        );
        self.emit(SquadEvent::AgentDied { agent: self.id });
    }

    /// Refreshes position, arrival, and target memory from the ports.
    pub(super) fn sense(&mut self, env: Env<'_>) {
        let navigation = env.navigation();
        let perception = env.perception();

        if let Some(position) = navigation.position(self.id) {
            self.pose.position = position;
        }
        if self.is_moving && navigation.is_arrived(self.id) {
            self.is_moving = false;
            self.destination = None;
        }

        let origin = self.pose.position;
        let visible = perception
            .find_hostiles_in_range(origin, self.tuning.detection_range)
            .into_iter()
            .find(|s| perception.has_clear_line_of_sight(origin, s.position));

        match visible {
            Some(sighting) => {
                if self.target != Some(sighting.target) {
                    debug!(
                        target: "squad::agent",
                        agent = %self.id,
                        target_id = %sighting.target,
                        "hostile acquired"
                    );
                }
                self.target = Some(sighting.target);
                self.last_known_position = Some(sighting.position);
                self.has_line_of_sight = true;
            }
            None => {
                self.has_line_of_sight = false;
                if let Some(target) = self.target
                    && perception.locate(target).is_none()
                {
                    debug!(
                        target: "squad::agent",
                        agent = %self.id,
                        target_id = %target,
                        "target lost"
                    );
                    self.target = None;
                }
                if let Some(last_known) = self.last_known_position
                    && origin.distance(last_known) <= self.tuning.stopping_distance
                {
                    self.last_known_position = None;
                }
            }
        }
    }

    pub(super) fn tick_state(&mut self, ctx: &TickContext<'_>) {
        let now = ctx.clock.now;
        match self.state {
            AgentState::Idle => {
                if self.has_line_of_sight {
                    self.change_state(AgentState::Combat, now);
                } else if self.follows_team {
                    self.change_state(AgentState::Follow, now);
                }
            }
            AgentState::Patrol => {
                if !self.is_moving {
                    self.patrol_step(ctx);
                }
                if self.has_line_of_sight {
                    self.change_state(AgentState::Combat, now);
                }
            }
            AgentState::Follow => {
                if let Some(target) = ctx.team.follow_target() {
                    self.move_to(ctx.env, target);
                }
                if self.has_line_of_sight {
                    self.change_state(AgentState::Combat, now);
                }
            }
            AgentState::Combat => self.tick_combat(ctx),
            AgentState::Cover => self.tick_cover(ctx),
            AgentState::Ability => self.tick_ability(now),
            AgentState::Dead => {}
        }
    }

    fn patrol_step(&mut self, ctx: &TickContext<'_>) {
        let seed = compute_seed(ctx.seed, ctx.clock.tick.0, self.id.0, 0);
        let radius = self.tuning.patrol_radius;
        let candidate = self.pose.position + ctx.env.rng().unit_disk(seed) * radius;
        match ctx.env.navigation().sample_reachable(candidate, radius) {
            Some(point) => self.move_to(ctx.env, point),
            None => debug!(
                target: "squad::agent",
                agent = %self.id,
                "no reachable patrol point"
            ),
        }
    }

    fn tick_combat(&mut self, ctx: &TickContext<'_>) {
        let now = ctx.clock.now;
        let Some(target) = self.target else {
            self.change_state(AgentState::Follow, now);
            return;
        };

        if let Some(target_position) = self.engageable(ctx.env, target) {
            self.face(target_position, ctx.clock.delta);
            self.fire_at(target, now);
        } else if let Some(last_known) = self.last_known_position {
            self.move_to(ctx.env, last_known);
        } else {
            // Reached the last known position without regaining sight.
            debug!(
                target: "squad::agent",
                agent = %self.id,
                target_id = %target,
                "search abandoned"
            );
            let next = if self.follows_team {
                AgentState::Follow
            } else {
                AgentState::Idle
            };
            self.change_state(next, now);
        }
    }

    fn tick_cover(&mut self, ctx: &TickContext<'_>) {
        if !self.cover_sought {
            self.cover_sought = true;
            let cover = ctx.env.perception().find_cover(
                self.pose.position,
                self.last_known_position,
                self.tuning.cover_search_radius,
            );
            match cover {
                Some(point) => self.move_to(ctx.env, point),
                None => {
                    debug!(target: "squad::agent", agent = %self.id, "no cover found, holding");
                    self.stop(ctx.env);
                }
            }
        }

        // Covering fire from the held position.
        if let Some(target) = self.target
            && let Some(target_position) = self.engageable(ctx.env, target)
        {
            self.face(target_position, ctx.clock.delta);
            self.fire_at(target, ctx.clock.now);
        }
    }

    fn tick_ability(&mut self, now: f32) {
        if self.ability_pending {
            self.run_pending_ability(now);
            return;
        }
        if !self.effects.has_bound_to(AgentState::Ability) {
            let next = if self.follows_team {
                AgentState::Follow
            } else {
                AgentState::Idle
            };
            self.change_state(next, now);
        }
    }

    /// Position of `target` if it is visible and within attack range.
    fn engageable(&self, env: Env<'_>, target: TargetId) -> Option<Vec3> {
        if !self.has_line_of_sight {
            return None;
        }
        env.perception()
            .locate(target)
            .filter(|p| p.distance(self.pose.position) <= self.tuning.attack_range)
    }

    fn face(&mut self, point: Vec3, delta: f32) {
        self.pose
            .turn_towards(point, (delta * self.tuning.rotation_speed).min(1.0));
    }

    fn fire_at(&mut self, target: TargetId, now: f32) {
        if !self.ammo.consume() {
            debug!(target: "squad::agent", agent = %self.id, "magazine empty");
            return;
        }
        self.in_combat = true;
        self.last_combat_time = now;
        debug!(
            target: "squad::agent",
            agent = %self.id,
            target_id = %target,
            ammo = self.ammo.current,
            "attack requested"
        );
        self.emit(SquadEvent::AttackRequested {
            agent: self.id,
            target,
        });
    }

    /// Requests navigation to `point`. Repeating the active destination is a
    /// no-op; an unreachable point leaves the agent stationary.
    pub(super) fn move_to(&mut self, env: Env<'_>, point: Vec3) {
        if self.is_moving && self.destination == Some(point) {
            return;
        }
        if env.navigation().set_destination(self.id, point) {
            self.is_moving = true;
            self.destination = Some(point);
        } else {
            debug!(
                target: "squad::agent",
                agent = %self.id,
                x = point.x,
                z = point.z,
                "destination unreachable"
            );
            self.is_moving = false;
            self.destination = None;
        }
    }

    /// Number of times `hook` ran for `state` since the last call to
    /// [`Agent::clear_hooks`].
    #[cfg(test)]
    pub(crate) fn hook_count(&self, hook: Hook, state: AgentState) -> usize {
        self.hooks.iter().filter(|h| **h == (hook, state)).count()
    }

    #[cfg(test)]
    pub(crate) fn clear_hooks(&mut self) {
        self.hooks.clear();
    }

    pub(super) fn stop(&mut self, env: Env<'_>) {
        env.navigation().stop(self.id);
        self.is_moving = false;
        self.destination = None;
    }
}
