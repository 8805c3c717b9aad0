//! Mission scene context.
//!
//! A [`Mission`] owns everything a scene needs: the team coordinator, the
//! ports, the clock and the telemetry bus. It is created by
//! [`MissionBuilder::build`] when the scene starts and consumed by
//! [`Mission::end`] when it is torn down; nothing is process-global.

use std::sync::Arc;

use glam::Vec3;
use squad_content::RosterSpec;
use squad_core::{
    Agent, AgentId, AgentSpec, Clock, Command, Env, FormationType, NavigationOracle, OracleError,
    PcgRng, PerceptionOracle, Pose, RoleRegistry, RosterError, SquadConfig, SquadEvent, SquadTree,
    TeamCoordinator, TeamStatus,
};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::ai::squad_member_tree;
use crate::api::hud::LeaderHud;
use crate::api::{HudSnapshot, MissionError, MissionSummary, Result};
use crate::events::{Event, EventBus, Topic};

/// Builds a fresh behavior tree for each spawned member.
pub type TreeFactory =
    Box<dyn Fn() -> std::result::Result<SquadTree, behavior_tree::TreeError> + Send + Sync>;

/// One running squad scene.
pub struct Mission {
    config: SquadConfig,
    team: TeamCoordinator,
    perception: Arc<dyn PerceptionOracle>,
    navigation: Arc<dyn NavigationOracle>,
    rng: PcgRng,
    clock: Clock,
    bus: EventBus,
    trees: TreeFactory,
    next_id: u32,
}

impl Mission {
    pub fn builder() -> MissionBuilder {
        MissionBuilder::new()
    }

    // ========================================================================
    // Roster
    // ========================================================================

    /// Adds a member built from `spec` and places it in the navigation layer.
    /// A rejected member never reaches navigation.
    pub fn spawn(&mut self, spec: AgentSpec) -> Result<AgentId> {
        let tree = (self.trees)()?;
        let id = AgentId(self.next_id);
        let position = spec.position;
        let agent = Agent::new(id, spec, &self.config.agent, tree);
        self.team.add_member(agent)?;
        self.navigation.warp(id, position);
        self.next_id += 1;
        self.flush();
        Ok(id)
    }

    /// Deals damage to a member. Returns whether the hit was fatal.
    pub fn apply_damage(&mut self, id: AgentId, amount: f32) -> Result<bool> {
        let died = self.team.apply_damage(id, amount, self.clock.now)?;
        self.flush();
        Ok(died)
    }

    pub fn heal(&mut self, id: AgentId, amount: f32) -> Result<f32> {
        let agent = self.live_member_mut(id)?;
        let healed = agent.heal(amount);
        self.flush();
        Ok(healed)
    }

    pub fn damage_leader(&mut self, amount: f32) -> bool {
        let died = self.team.damage_leader(amount);
        self.flush();
        died
    }

    /// Reports a new leader pose from the player controller.
    pub fn update_leader(&mut self, pose: Pose) -> bool {
        self.team.move_leader(pose)
    }

    fn live_member_mut(&mut self, id: AgentId) -> Result<&mut Agent> {
        if self.team.casualties().iter().any(|a| a.id() == id) {
            return Err(RosterError::MemberDown(id).into());
        }
        self.team
            .member_mut(id)
            .ok_or_else(|| RosterError::UnknownMember(id).into())
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Broadcasts a command to the whole squad. Returns the recipient count.
    pub fn issue_command(&mut self, raw: &str) -> Result<usize> {
        let result = self.team.issue_command(raw, self.clock.now);
        self.flush();
        Ok(result?)
    }

    /// Sends a command to one member.
    pub fn command_agent(&mut self, id: AgentId, raw: &str) -> Result<Command> {
        let now = self.clock.now;
        let result = self.live_member_mut(id)?.receive_command(raw, now);
        self.flush();
        Ok(result?)
    }

    /// Leader special: queues a team boost applied at the end of the next
    /// step. Returns `false` without a living leader.
    pub fn leader_tactical_command(&mut self) -> bool {
        if !self.team.leader().is_some_and(|l| l.is_alive()) {
            debug!(target: "squad::mission", "tactical command without a leader");
            return false;
        }
        info!(target: "squad::mission", "tactical command issued");
        self.team.queue_team_boost(AgentId::LEADER);
        true
    }

    pub fn change_formation(&mut self, formation: FormationType) -> bool {
        let changed = self.team.change_formation(formation);
        self.flush();
        changed
    }

    pub fn nearest_available(&self, position: Vec3) -> Option<AgentId> {
        self.team.nearest_available(position).map(Agent::id)
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Runs one simulation step and publishes its events.
    pub fn step(&mut self) -> TeamStatus {
        let env = Env::new(
            self.perception.as_ref(),
            self.navigation.as_ref(),
            &self.rng,
        );
        self.team.tick(env, self.clock, self.config.mission.seed);
        self.flush();

        let status = self.team.status();
        debug!(
            target: "squad::mission",
            tick = %self.clock.tick,
            alive = status.members_alive,
            health = status.health_fraction,
            in_combat = status.in_combat,
            "step complete"
        );
        self.clock = self.clock.advance();
        status
    }

    /// Publishes pending events stamped with the current tick. Navigation is
    /// halted for members that just died.
    fn flush(&mut self) {
        let tick = self.clock.tick;
        for event in self.team.drain_events() {
            if let SquadEvent::AgentDied { agent } = event {
                self.navigation.stop(agent);
            }
            self.bus.publish(Event::new(tick, event));
        }
    }

    // ========================================================================
    // Telemetry
    // ========================================================================

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            tick: self.clock.tick,
            time: self.clock.now,
            formation: self.team.formation(),
            team: self.team.status(),
            leader: self.team.leader().map(LeaderHud::from),
            agents: self.team.snapshots(),
        }
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn team(&self) -> &TeamCoordinator {
        &self.team
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    pub fn config(&self) -> &SquadConfig {
        &self.config
    }

    /// Tears the scene down and reports how it went.
    pub fn end(mut self) -> MissionSummary {
        self.flush();
        let objective_progress = self
            .team
            .members()
            .chain(self.team.casualties())
            .map(Agent::objective_progress)
            .sum();
        let summary = MissionSummary {
            ticks: self.clock.tick.0,
            elapsed: self.clock.now,
            survivors: self.team.live_count(),
            casualties: self.team.casualties().len(),
            objective_progress,
            leader_alive: self.team.leader().is_some_and(|l| l.is_alive()),
        };
        info!(
            target: "squad::mission",
            ticks = summary.ticks,
            survivors = summary.survivors,
            casualties = summary.casualties,
            objective_progress = summary.objective_progress,
            "mission ended"
        );
        summary
    }
}

impl std::fmt::Debug for Mission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mission")
            .field("clock", &self.clock)
            .field("team", &self.team)
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Mission`] with flexible configuration.
pub struct MissionBuilder {
    config: SquadConfig,
    perception: Option<Arc<dyn PerceptionOracle>>,
    navigation: Option<Arc<dyn NavigationOracle>>,
    roster: RosterSpec,
    roles: Option<RoleRegistry>,
    trees: Option<TreeFactory>,
}

impl MissionBuilder {
    fn new() -> Self {
        Self {
            config: SquadConfig::default(),
            perception: None,
            navigation: None,
            roster: RosterSpec::default(),
            roles: None,
            trees: None,
        }
    }

    /// Override mission configuration
    pub fn config(mut self, config: SquadConfig) -> Self {
        self.config = config;
        self
    }

    pub fn perception(mut self, perception: Arc<dyn PerceptionOracle>) -> Self {
        self.perception = Some(perception);
        self
    }

    pub fn navigation(mut self, navigation: Arc<dyn NavigationOracle>) -> Self {
        self.navigation = Some(navigation);
        self
    }

    /// Uses one world object for both ports.
    pub fn world<W>(self, world: Arc<W>) -> Self
    where
        W: PerceptionOracle + NavigationOracle + 'static,
    {
        self.perception(world.clone()).navigation(world)
    }

    /// Leader and members spawned when the mission is built
    pub fn roster(mut self, roster: RosterSpec) -> Self {
        self.roster = roster;
        self
    }

    /// Replace the default class-to-role table
    pub fn roles(mut self, roles: RoleRegistry) -> Self {
        self.roles = Some(roles);
        self
    }

    /// Replace the default member tree
    pub fn trees<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> std::result::Result<SquadTree, behavior_tree::TreeError>
            + Send
            + Sync
            + 'static,
    {
        self.trees = Some(Box::new(factory));
        self
    }

    /// # Errors
    ///
    /// Fails fast when a port is missing, the tree factory produces a
    /// malformed tree, or the roster repeats a member.
    pub fn build(self) -> Result<Mission> {
        let perception = self
            .perception
            .ok_or(MissionError::MissingPorts(OracleError::PerceptionNotAvailable))?;
        let navigation = self
            .navigation
            .ok_or(MissionError::MissingPorts(OracleError::NavigationNotAvailable))?;
        let trees = self
            .trees
            .unwrap_or_else(|| Box::new(squad_member_tree) as TreeFactory);
        trees()?;

        let roles = self.roles.unwrap_or_else(RoleRegistry::default_roles);
        let mut team = TeamCoordinator::with_roles(self.config.team.clone(), roles);
        if let Some(leader) = &self.roster.leader {
            team.set_leader(leader.to_leader());
        }

        let bus = EventBus::with_capacity(self.config.mission.event_buffer_size);
        let clock = Clock::start(self.config.mission.tick_interval);
        let mut mission = Mission {
            config: self.config,
            team,
            perception,
            navigation,
            rng: PcgRng,
            clock,
            bus,
            trees,
            next_id: AgentId::LEADER.0 + 1,
        };

        for spec in self.roster.members {
            mission.spawn(spec)?;
        }
        mission.team.update_status();

        info!(
            target: "squad::mission",
            members = mission.team.live_count(),
            leader = mission.team.leader().map(|l| l.name()),
            formation = %mission.team.formation(),
            seed = mission.config.mission.seed,
            "mission started"
        );
        Ok(mission)
    }
}

impl Default for MissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
