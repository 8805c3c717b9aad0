//! Team coordination.
//!
//! The [`TeamCoordinator`] owns the roster, the leader, the active formation
//! and the per-member formation offsets. Every tick it settles team-wide
//! state (status, roles, formation) before any member runs, hands each member
//! a frozen [`TeamView`], and resolves deferred cross-agent effects once all
//! members are done.
mod error;
mod formation;
mod leader;
mod roles;

pub use error::RosterError;
pub use formation::FormationType;
pub use leader::Leader;
pub use roles::{CombatTask, RoleHandler, RoleRegistry, TaskRole};

use std::collections::BTreeMap;

use glam::Vec3;
use tracing::{debug, info, warn};

use crate::agent::{
    Agent, AgentSnapshot, Command, CommandError, DeferredEffect, EffectKind, TeamView,
    TickContext, TimedEffect,
};
use crate::config::TeamTuning;
use crate::env::{Env, PerceptionOracle};
use crate::error::GameError;
use crate::events::SquadEvent;
use crate::state::{AgentId, Clock, Pose};

/// Team-wide posture, recomputed every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TeamStatus {
    /// Live roster members plus the leader if alive.
    pub members_alive: usize,
    pub health_fraction: f32,
    pub in_combat: bool,
    pub formation: FormationType,
}

/// Owner of the roster, leader and formation.
pub struct TeamCoordinator {
    tuning: TeamTuning,
    roles: RoleRegistry,
    leader: Option<Leader>,
    members: Vec<Agent>,
    casualties: Vec<Agent>,
    formation: FormationType,
    offsets: BTreeMap<AgentId, Vec3>,
    status: TeamStatus,
    deferred: Vec<DeferredEffect>,
    events: Vec<SquadEvent>,
}

impl TeamCoordinator {
    pub fn new(tuning: TeamTuning) -> Self {
        Self::with_roles(tuning, RoleRegistry::default_roles())
    }

    pub fn with_roles(tuning: TeamTuning, roles: RoleRegistry) -> Self {
        Self {
            tuning,
            roles,
            leader: None,
            members: Vec::new(),
            casualties: Vec::new(),
            formation: FormationType::default(),
            offsets: BTreeMap::new(),
            status: TeamStatus::default(),
            deferred: Vec::new(),
            events: Vec::new(),
        }
    }

    // ========================================================================
    // Roster
    // ========================================================================

    /// Adds a live member at the end of the roster.
    ///
    /// # Errors
    ///
    /// Rejects ids already on the roster (or among its casualties) and dead
    /// agents.
    pub fn add_member(&mut self, agent: Agent) -> Result<(), RosterError> {
        let id = agent.id();
        if id.is_leader() || self.contains(id) || self.casualties.iter().any(|a| a.id() == id) {
            return Err(RosterError::DuplicateMember(id));
        }
        if !agent.is_alive() {
            return Err(RosterError::MemberDown(id));
        }
        info!(
            target: "squad::team",
            agent = %id,
            name = agent.name(),
            class = %agent.class(),
            "member joined"
        );
        self.members.push(agent);
        self.recompute_formation();
        Ok(())
    }

    /// Removes a member from the roster and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::UnknownMember`] if `id` is not a live member.
    pub fn remove_member(&mut self, id: AgentId) -> Result<Agent, RosterError> {
        let index = self
            .members
            .iter()
            .position(|a| a.id() == id)
            .ok_or(RosterError::UnknownMember(id))?;
        let agent = self.members.remove(index);
        info!(target: "squad::team", agent = %id, "member left");
        self.recompute_formation();
        Ok(agent)
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.members.iter().any(|a| a.id() == id)
    }

    pub fn member(&self, id: AgentId) -> Option<&Agent> {
        self.members.iter().find(|a| a.id() == id)
    }

    pub fn member_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.members.iter_mut().find(|a| a.id() == id)
    }

    /// Live members in roster order.
    pub fn members(&self) -> impl Iterator<Item = &Agent> {
        self.members.iter().filter(|a| a.is_alive())
    }

    pub fn live_count(&self) -> usize {
        self.members().count()
    }

    /// Members that died, in order of death.
    pub fn casualties(&self) -> &[Agent] {
        &self.casualties
    }

    /// Moves dead members out of the roster and drops their offsets.
    fn prune_casualties(&mut self) -> bool {
        if self.members.iter().all(Agent::is_alive) {
            return false;
        }
        let (alive, dead): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.members).into_iter().partition(Agent::is_alive);
        self.members = alive;
        for agent in dead {
            debug!(target: "squad::team", agent = %agent.id(), "casualty pruned");
            self.offsets.remove(&agent.id());
            self.casualties.push(agent);
        }
        true
    }

    /// Applies damage to a member. Returns whether the hit was fatal; a fatal
    /// hit removes the member from the roster and the formation immediately.
    ///
    /// # Errors
    ///
    /// [`RosterError::MemberDown`] for casualties, [`RosterError::UnknownMember`]
    /// for ids never on the roster.
    pub fn apply_damage(&mut self, id: AgentId, amount: f32, now: f32) -> Result<bool, RosterError> {
        let Some(member) = self.member_mut(id) else {
            if self.casualties.iter().any(|a| a.id() == id) {
                return Err(RosterError::MemberDown(id));
            }
            return Err(RosterError::UnknownMember(id));
        };
        let died = member.take_damage(amount, now);
        if died {
            self.prune_casualties();
            self.recompute_formation();
            self.update_status();
        }
        Ok(died)
    }

    // ========================================================================
    // Leader
    // ========================================================================

    pub fn set_leader(&mut self, leader: Leader) {
        info!(target: "squad::team", leader = leader.name(), "leader assigned");
        self.leader = Some(leader);
        self.recompute_formation();
    }

    pub fn leader(&self) -> Option<&Leader> {
        self.leader.as_ref()
    }

    /// Updates the leader pose. Ignored without a leader or once it is down.
    pub fn move_leader(&mut self, pose: Pose) -> bool {
        let moved = self.leader.as_mut().is_some_and(|l| l.set_pose(pose));
        if moved {
            self.recompute_formation();
        }
        moved
    }

    /// Returns whether the hit killed the leader.
    pub fn damage_leader(&mut self, amount: f32) -> bool {
        let died = self.leader.as_mut().is_some_and(|l| l.take_damage(amount));
        if died {
            self.events.push(SquadEvent::LeaderDown);
            self.update_status();
        }
        died
    }

    /// Frame the formation is laid out in. The identity frame stands in when
    /// no leader is assigned.
    fn frame(&self) -> Pose {
        self.leader.as_ref().map_or(Pose::IDENTITY, Leader::pose)
    }

    // ========================================================================
    // Status
    // ========================================================================

    pub fn status(&self) -> TeamStatus {
        self.status
    }

    pub fn update_status(&mut self) -> TeamStatus {
        let leader_alive = self.leader.as_ref().is_some_and(Leader::is_alive);
        let members_alive = self.live_count() + usize::from(leader_alive);
        let health_fraction = self.team_health_fraction();
        let in_combat = self.members().any(Agent::in_combat);
        self.status = TeamStatus {
            members_alive,
            health_fraction,
            in_combat,
            formation: self.formation,
        };
        self.status
    }

    /// Current health over maximum health across the leader and the live
    /// members. Returns 0.0 when the total maximum is zero.
    pub fn team_health_fraction(&self) -> f32 {
        let (mut current, mut maximum) = self
            .leader
            .as_ref()
            .map_or((0.0, 0.0), |l| (l.health(), l.max_health()));
        for member in self.members() {
            current += member.health();
            maximum += member.max_health();
        }
        if maximum > 0.0 { current / maximum } else { 0.0 }
    }

    // ========================================================================
    // Formation
    // ========================================================================

    pub fn formation(&self) -> FormationType {
        self.formation
    }

    /// Offset of a live member relative to the leader.
    pub fn offset(&self, id: AgentId) -> Option<Vec3> {
        self.offsets.get(&id).copied()
    }

    pub fn offsets(&self) -> &BTreeMap<AgentId, Vec3> {
        &self.offsets
    }

    /// Formation policy: Diamond in combat, Column in a narrow space, Wedge
    /// otherwise.
    pub fn select_formation(&self, perception: &dyn PerceptionOracle) -> FormationType {
        if self.status.in_combat {
            return FormationType::Diamond;
        }
        if let Some(leader) = &self.leader {
            let pose = leader.pose();
            let probe = self.tuning.narrow_space_probe;
            let right = pose.right();
            if perception.probe_obstruction(pose.position, right, probe)
                || perception.probe_obstruction(pose.position, -right, probe)
            {
                return FormationType::Column;
            }
        }
        FormationType::Wedge
    }

    /// Switches to `formation` and lays it out. Returns whether it changed.
    pub fn change_formation(&mut self, formation: FormationType) -> bool {
        if formation == self.formation {
            return false;
        }
        let previous = self.formation;
        self.formation = formation;
        info!(
            target: "squad::team",
            from = %previous,
            to = %formation,
            "formation changed"
        );
        self.events.push(SquadEvent::FormationChanged {
            from: previous,
            to: formation,
        });
        self.status.formation = formation;
        self.recompute_formation();
        true
    }

    /// Selects (when automatic) and lays out the formation.
    pub fn update_formation(&mut self, perception: &dyn PerceptionOracle) {
        if self.tuning.auto_formation {
            let selected = self.select_formation(perception);
            if self.change_formation(selected) {
                return;
            }
        }
        self.recompute_formation();
    }

    /// Recomputes every live member's offset from the leader frame.
    pub fn recompute_formation(&mut self) {
        let frame = self.frame();
        let (forward, right) = (frame.forward(), frame.right());
        let spacing = self.tuning.formation_spacing;
        let formation = self.formation;
        let live: Vec<AgentId> = self.members().map(Agent::id).collect();
        let count = live.len();

        self.offsets.clear();
        for (index, id) in live.into_iter().enumerate() {
            let offset = formation.offset(index, count, spacing, forward, right);
            self.offsets.insert(id, offset);
        }
    }

    // ========================================================================
    // Roles & commands
    // ========================================================================

    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }

    pub fn roles_mut(&mut self) -> &mut RoleRegistry {
        &mut self.roles
    }

    /// Dispatches each live member's class role.
    pub fn assign_combat_roles(&mut self) {
        let roles = &self.roles;
        for member in self.members.iter_mut().filter(|a| a.is_alive()) {
            roles.dispatch(member);
        }
    }

    /// Clears combat tasks while the team is out of combat.
    pub fn coordinate_exploration(&mut self) {
        for member in self.members.iter_mut().filter(|a| a.is_alive()) {
            member.assign_task(None);
        }
    }

    /// Broadcasts a command to every live member. Returns the recipient count.
    ///
    /// # Errors
    ///
    /// An unrecognized command reaches nobody and is reported as
    /// [`SquadEvent::UnrecognizedCommand`].
    pub fn issue_command(&mut self, raw: &str, now: f32) -> Result<usize, CommandError> {
        let command = match Command::parse(raw) {
            Ok(command) => command,
            Err(err) => {
                warn!(target: "squad::team", code = err.error_code(), "{err}");
                self.events.push(SquadEvent::UnrecognizedCommand {
                    agent: None,
                    command: raw.to_owned(),
                });
                return Err(err);
            }
        };

        let mut recipients = 0;
        for member in self.members.iter_mut().filter(|a| a.is_alive()) {
            member.apply_command(command, now);
            recipients += 1;
        }
        info!(
            target: "squad::team",
            command = %command,
            recipients,
            "team command issued"
        );
        self.events.push(SquadEvent::TeamCommand {
            command: command.to_string(),
            recipients,
        });
        Ok(recipients)
    }

    /// Closest live member not in Combat or Ability. Ties go to the member
    /// earliest in the roster.
    pub fn nearest_available(&self, position: Vec3) -> Option<&Agent> {
        let mut best: Option<(&Agent, f32)> = None;
        for member in self.members().filter(|a| !a.is_busy()) {
            let distance = member.position().distance(position);
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((member, distance));
            }
        }
        best.map(|(agent, _)| agent)
    }

    // ========================================================================
    // Deferred effects
    // ========================================================================

    /// Queues a team-wide boost resolved at the next tick boundary.
    pub fn queue_team_boost(&mut self, source: AgentId) {
        self.deferred.push(DeferredEffect::TeamBoost { source });
    }

    /// Applies queued cross-agent effects to the live roster.
    pub fn resolve_deferred(&mut self, now: f32) {
        for effect in std::mem::take(&mut self.deferred) {
            match effect {
                DeferredEffect::TeamBoost { source } => {
                    info!(target: "squad::team", source = %source, "team boost");
                    for member in self.members.iter_mut().filter(|a| a.is_alive()) {
                        member.apply_effect(TimedEffect::timed(
                            EffectKind::TeamBoost,
                            now,
                            EffectKind::TEAM_BOOST_DURATION,
                        ));
                    }
                }
            }
        }
    }

    pub fn pending_deferred(&self) -> &[DeferredEffect] {
        &self.deferred
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Runs one team step: status, roles and formation first, then every
    /// live member against a frozen view, then deferred effects.
    pub fn tick(&mut self, env: Env<'_>, clock: Clock, seed: u64) {
        self.prune_casualties();
        self.update_status();
        if self.status.in_combat {
            self.assign_combat_roles();
        } else {
            self.coordinate_exploration();
        }
        self.update_formation(env.perception());

        let leader = self.leader.as_ref().map(Leader::pose);
        for member in self.members.iter_mut() {
            let team = TeamView {
                leader,
                formation_offset: self.offsets.get(&member.id()).copied(),
            };
            let ctx = TickContext {
                env,
                clock,
                seed,
                team,
            };
            member.tick(&ctx);
            self.deferred.extend(member.take_deferred());
        }

        self.resolve_deferred(clock.now);
        if self.prune_casualties() {
            self.recompute_formation();
        }
        self.update_status();
    }

    // ========================================================================
    // Telemetry
    // ========================================================================

    pub fn snapshots(&self) -> Vec<AgentSnapshot> {
        self.members.iter().map(Agent::snapshot).collect()
    }

    /// Drains member events (roster order, then casualties) followed by
    /// coordinator events.
    pub fn drain_events(&mut self) -> Vec<SquadEvent> {
        let mut events = Vec::new();
        for member in self.members.iter_mut().chain(self.casualties.iter_mut()) {
            events.extend(member.take_events());
        }
        events.append(&mut self.events);
        events
    }
}

impl std::fmt::Debug for TeamCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeamCoordinator")
            .field("leader", &self.leader.as_ref().map(Leader::name))
            .field("members", &self.members.len())
            .field("casualties", &self.casualties.len())
            .field("formation", &self.formation)
            .finish_non_exhaustive()
    }
}
