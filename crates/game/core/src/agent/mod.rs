//! Squad members.
//!
//! An [`Agent`] owns its vitals, perception memory, behavior tree and state
//! machine. Each tick it senses through the perception port, evaluates its
//! tree on a [`Blackboard`] snapshot, applies the resulting [`Directive`]
//! (unless an operator command overrides it), and then runs the tick logic of
//! its current [`AgentState`].
//!
//! Agents never touch each other. Cross-agent consequences are queued as
//! [`DeferredEffect`]s and resolved by the coordinator at the tick boundary.
mod ability;
mod blackboard;
mod class;
mod command;
mod effects;
mod fsm;
mod state;
mod stats;

#[cfg(test)]
mod tests;

pub use ability::{AbilityError, AbilityKind, AbilityKit, DeferredEffect, PlacedCharge};
pub use blackboard::{Blackboard, Directive};
pub use class::{AgentClass, ClassProfile};
pub use command::{Command, CommandError};
pub use effects::{ActiveEffects, EffectKind, Insertion, Modifiers, RemovedEffects, TimedEffect};
pub use state::AgentState;
pub use stats::StatBlock;

use behavior_tree::{BehaviorTree, Status};
use glam::Vec3;
use tracing::{debug, info, warn};

use crate::config::AgentTuning;
use crate::env::Env;
use crate::error::GameError;
use crate::events::SquadEvent;
use crate::state::{AgentId, Clock, Pose, ResourceMeter, TargetId};
use crate::team::CombatTask;

/// Behavior tree evaluated by every squad member.
pub type SquadTree = BehaviorTree<Blackboard>;

/// Spawn parameters for a squad member.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentSpec {
    pub name: String,
    pub class: AgentClass,
    pub level: u32,
    pub position: Vec3,
    pub yaw: f32,
    pub initial_state: AgentState,
}

impl AgentSpec {
    pub fn new(name: impl Into<String>, class: AgentClass) -> Self {
        Self {
            name: name.into(),
            class,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn starting_in(mut self, state: AgentState) -> Self {
        self.initial_state = state;
        self
    }
}

impl Default for AgentSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            class: AgentClass::Assault,
            level: 1,
            position: Vec3::ZERO,
            yaw: 0.0,
            initial_state: AgentState::Patrol,
        }
    }
}

/// Coordinator-provided view of the team, frozen for the whole tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TeamView {
    /// Leader pose (frozen at the last known pose once the leader is down).
    pub leader: Option<Pose>,
    /// This agent's slot relative to the leader.
    pub formation_offset: Option<Vec3>,
}

impl TeamView {
    /// World-space follow position, or `None` without a leader.
    pub fn follow_target(&self) -> Option<Vec3> {
        self.leader
            .map(|l| l.position + self.formation_offset.unwrap_or(Vec3::ZERO))
    }
}

/// Everything an agent reads during its tick.
#[derive(Clone, Copy, Debug)]
pub struct TickContext<'a> {
    pub env: Env<'a>,
    pub clock: Clock,
    pub seed: u64,
    pub team: TeamView,
}

/// HUD row for one agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AgentSnapshot {
    pub id: AgentId,
    pub name: String,
    pub class: AgentClass,
    pub state: AgentState,
    pub tree_status: &'static str,
    pub action: &'static str,
    pub health: f32,
    pub max_health: f32,
    pub ammo: ResourceMeter,
    pub position: Vec3,
    pub in_combat: bool,
    pub task: Option<CombatTask>,
}

/// One controllable non-player combatant.
pub struct Agent {
    id: AgentId,
    name: String,
    class: AgentClass,
    level: u32,
    profile: ClassProfile,
    tuning: AgentTuning,

    health: f32,
    max_health: f32,
    alive: bool,
    ammo: ResourceMeter,

    pose: Pose,
    destination: Option<Vec3>,
    is_moving: bool,

    target: Option<TargetId>,
    last_known_position: Option<Vec3>,
    has_line_of_sight: bool,

    in_combat: bool,
    last_combat_time: f32,

    state: AgentState,
    tree: SquadTree,
    follows_team: bool,
    providing_cover: bool,
    cover_sought: bool,
    ability_pending: bool,
    command_override: bool,
    halt_requested: bool,
    last_command: Option<Command>,
    objective_progress: u32,
    task: Option<CombatTask>,

    effects: ActiveEffects,
    kit: AbilityKit,
    speed_dirty: bool,

    events: Vec<SquadEvent>,
    deferred: Vec<DeferredEffect>,

    #[cfg(test)]
    hooks: Vec<(fsm::Hook, AgentState)>,
}

impl Agent {
    pub fn new(id: AgentId, spec: AgentSpec, tuning: &AgentTuning, tree: SquadTree) -> Self {
        let profile = spec.class.profile();
        let max_health = spec.class.max_health(spec.level);
        let mut agent = Self {
            id,
            name: spec.name,
            class: spec.class,
            level: spec.level,
            profile,
            tuning: tuning.clone(),
            health: max_health,
            max_health,
            alive: true,
            ammo: ResourceMeter::full(profile.ammo_capacity),
            pose: Pose::new(spec.position, spec.yaw),
            destination: None,
            is_moving: false,
            target: None,
            last_known_position: None,
            has_line_of_sight: false,
            in_combat: false,
            last_combat_time: 0.0,
            state: AgentState::Idle,
            tree,
            follows_team: tuning.follows_team,
            providing_cover: false,
            cover_sought: false,
            ability_pending: false,
            command_override: false,
            halt_requested: false,
            last_command: None,
            objective_progress: 0,
            task: None,
            effects: ActiveEffects::empty(),
            kit: AbilityKit::for_class(spec.class),
            speed_dirty: true,
            events: Vec::new(),
            deferred: Vec::new(),
            #[cfg(test)]
            hooks: Vec::new(),
        };

        info!(
            target: "squad::agent",
            agent = %agent.id,
            name = %agent.name,
            class = %agent.class,
            "agent spawned"
        );
        agent.emit(SquadEvent::AgentSpawned {
            agent: id,
            class: spec.class,
        });
        agent.change_state(spec.initial_state, 0.0);
        agent
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> AgentClass {
        self.class
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn ammo(&self) -> ResourceMeter {
        self.ammo
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    /// Busy members (Combat or Ability) are skipped by availability queries.
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    pub fn last_known_position(&self) -> Option<Vec3> {
        self.last_known_position
    }

    pub fn has_line_of_sight(&self) -> bool {
        self.has_line_of_sight
    }

    /// Combat-active predicate: true until the cooldown has elapsed since the
    /// last combat activity.
    pub fn in_combat(&self) -> bool {
        self.in_combat
    }

    pub fn last_combat_time(&self) -> f32 {
        self.last_combat_time
    }

    pub fn follows_team(&self) -> bool {
        self.follows_team
    }

    pub fn is_providing_cover(&self) -> bool {
        self.providing_cover
    }

    pub fn last_command(&self) -> Option<Command> {
        self.last_command
    }

    /// Ticks spent working on the mission objective.
    pub fn objective_progress(&self) -> u32 {
        self.objective_progress
    }

    pub fn task(&self) -> Option<CombatTask> {
        self.task
    }

    pub fn effects(&self) -> &ActiveEffects {
        &self.effects
    }

    pub fn kit(&self) -> &AbilityKit {
        &self.kit
    }

    pub fn profile(&self) -> &ClassProfile {
        &self.profile
    }

    /// Effective statistics including active effects.
    pub fn stats(&self) -> StatBlock {
        StatBlock::derive(&self.profile, &self.effects)
    }

    pub fn tree(&self) -> &SquadTree {
        &self.tree
    }

    pub fn tree_status(&self) -> Status {
        self.tree.status()
    }

    pub fn current_action(&self) -> &'static str {
        self.tree.current_action()
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            id: self.id,
            name: self.name.clone(),
            class: self.class,
            state: self.state,
            tree_status: self.tree.status().as_str(),
            action: self.tree.current_action(),
            health: self.health,
            max_health: self.max_health,
            ammo: self.ammo,
            position: self.pose.position,
            in_combat: self.in_combat,
            task: self.task,
        }
    }

    // ========================================================================
    // Vitals
    // ========================================================================

    /// Applies damage and marks the agent as in combat.
    ///
    /// Returns `true` if this call killed the agent. Damage to a dead agent is
    /// ignored.
    pub fn take_damage(&mut self, amount: f32, now: f32) -> bool {
        if !self.alive {
            return false;
        }
        let amount = amount.max(0.0);
        self.health -= amount;
        self.in_combat = true;
        self.last_combat_time = now;
        self.emit(SquadEvent::DamageTaken {
            agent: self.id,
            amount,
            health: self.health.max(0.0),
        });

        if self.health <= 0.0 {
            self.change_state(AgentState::Dead, now);
            true
        } else {
            debug!(
                target: "squad::agent",
                agent = %self.id,
                amount,
                health = self.health,
                max_health = self.max_health,
                "took damage"
            );
            false
        }
    }

    /// Restores health up to the maximum and returns the amount actually
    /// healed.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.alive {
            return 0.0;
        }
        let before = self.health;
        self.health = (self.health + amount.max(0.0)).min(self.max_health);
        let healed = self.health - before;
        self.emit(SquadEvent::Healed {
            agent: self.id,
            amount: healed,
        });
        healed
    }

    /// Raises the level and heals by the resulting max-health increase.
    pub fn level_up(&mut self) {
        if !self.alive {
            return;
        }
        self.level += 1;
        let previous = self.max_health;
        self.max_health = self.class.max_health(self.level);
        self.health += self.max_health - previous;
        info!(
            target: "squad::agent",
            agent = %self.id,
            level = self.level,
            max_health = self.max_health,
            "level up"
        );
        self.emit(SquadEvent::LevelUp {
            agent: self.id,
            level: self.level,
        });
    }

    pub fn resupply(&mut self) {
        self.ammo.refill();
    }

    /// Moves the agent without going through navigation.
    pub fn place(&mut self, pose: Pose) {
        self.pose = pose;
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Parses and applies an operator command.
    ///
    /// # Errors
    ///
    /// An unrecognized string leaves the state unchanged, emits
    /// [`SquadEvent::UnrecognizedCommand`] and returns
    /// [`CommandError::Unrecognized`].
    pub fn receive_command(&mut self, raw: &str, now: f32) -> Result<Command, CommandError> {
        if !self.alive {
            return Err(CommandError::AgentDown);
        }
        let command = match Command::parse(raw) {
            Ok(command) => command,
            Err(err) => {
                warn!(
                    target: "squad::agent",
                    agent = %self.id,
                    code = err.error_code(),
                    "{err}"
                );
                self.emit(SquadEvent::UnrecognizedCommand {
                    agent: Some(self.id),
                    command: raw.to_owned(),
                });
                return Err(err);
            }
        };
        self.apply_command(command, now);
        Ok(command)
    }

    /// Forces the transition a command maps to. The behavior tree's
    /// directive is ignored on the next tick.
    pub fn apply_command(&mut self, command: Command, now: f32) {
        if !self.alive {
            return;
        }
        match command {
            Command::Follow => self.follows_team = true,
            Command::HoldPosition => {
                self.follows_team = false;
                self.halt_requested = true;
            }
            Command::ProvideCover | Command::UseAbility => {}
        }
        self.last_command = Some(command);
        self.command_override = true;

        info!(
            target: "squad::agent",
            agent = %self.id,
            command = %command,
            "command received"
        );
        self.emit(SquadEvent::CommandReceived {
            agent: self.id,
            command: command.to_string(),
        });
        self.change_state(command.target_state(), now);
    }

    // ========================================================================
    // Effects & outboxes
    // ========================================================================

    /// Inserts a timed effect; stats reflect it immediately.
    pub fn apply_effect(&mut self, effect: TimedEffect) -> Insertion {
        let insertion = self.effects.insert(effect);
        match insertion {
            Insertion::Applied | Insertion::Refreshed => {
                self.speed_dirty = true;
                debug!(
                    target: "squad::agent",
                    agent = %self.id,
                    effect = %effect.kind,
                    ?insertion,
                    "effect applied"
                );
                self.emit(SquadEvent::EffectApplied {
                    agent: self.id,
                    effect: effect.kind,
                });
            }
            Insertion::Rejected => {
                warn!(
                    target: "squad::agent",
                    agent = %self.id,
                    effect = %effect.kind,
                    "effect set full"
                );
            }
        }
        insertion
    }

    pub(crate) fn end_effects(&mut self, removed: RemovedEffects, expired: bool) {
        for effect in removed {
            self.speed_dirty = true;
            if expired && effect.kind == EffectKind::SystemHack {
                info!(target: "squad::agent", agent = %self.id, "system override complete");
                self.emit(SquadEvent::HackCompleted { agent: self.id });
            }
            debug!(
                target: "squad::agent",
                agent = %self.id,
                effect = %effect.kind,
                expired,
                "effect ended"
            );
            self.emit(SquadEvent::EffectEnded {
                agent: self.id,
                effect: effect.kind,
                expired,
            });
        }
    }

    pub(crate) fn assign_task(&mut self, task: Option<CombatTask>) {
        if self.task == task {
            return;
        }
        self.task = task;
        if let Some(task) = task {
            info!(
                target: "squad::team",
                agent = %self.id,
                task = %task,
                "combat role assigned"
            );
            self.emit(SquadEvent::RoleAssigned {
                agent: self.id,
                task,
            });
        }
    }

    pub(crate) fn emit(&mut self, event: SquadEvent) {
        self.events.push(event);
    }

    /// Drains events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<SquadEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drains cross-agent effects queued since the last call.
    pub fn take_deferred(&mut self) -> Vec<DeferredEffect> {
        std::mem::take(&mut self.deferred)
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Runs one simulation step. Dead agents do nothing.
    pub fn tick(&mut self, ctx: &TickContext<'_>) {
        if !self.alive {
            return;
        }
        let now = ctx.clock.now;

        if self.halt_requested {
            self.halt_requested = false;
            self.stop(ctx.env);
        }

        self.sense(ctx.env);

        let directive = self.think();
        if self.command_override {
            self.command_override = false;
            if directive.is_some() {
                debug!(
                    target: "squad::agent",
                    agent = %self.id,
                    ?directive,
                    "directive suppressed by command"
                );
            }
        } else if let Some(directive) = directive {
            self.apply_directive(directive, now);
        }

        self.tick_state(ctx);
        self.update_combat_cooldown(now);
        self.update_effects(now);

        if self.speed_dirty && self.alive {
            self.speed_dirty = false;
            ctx.env
                .navigation()
                .set_speed(self.id, self.stats().move_speed);
        }
    }

    fn think(&mut self) -> Option<Directive> {
        let mut blackboard = Blackboard::new(self.id, self.state, self.health, self.max_health);
        blackboard.ammo_ratio = self.ammo.ratio();
        blackboard.low_health_ratio = self.tuning.low_health_ratio;
        blackboard.low_ammo_ratio = self.tuning.low_ammo_ratio;
        blackboard.hostile_in_sight = self.has_line_of_sight;
        blackboard.last_known_position = self.last_known_position;
        blackboard.follows_team = self.follows_team;

        let outcome = self.tree.evaluate(&mut blackboard);
        debug!(
            target: "squad::agent",
            agent = %self.id,
            status = %outcome.status,
            action = outcome.label,
            "behavior tree evaluated"
        );
        blackboard.directive()
    }

    fn apply_directive(&mut self, directive: Directive, now: f32) {
        match directive {
            Directive::Patrol => {
                self.change_state(AgentState::Patrol, now);
            }
            Directive::FollowTeam => {
                self.change_state(AgentState::Follow, now);
            }
            Directive::AdvanceObjective => {
                self.objective_progress += 1;
            }
        }
    }

    fn update_combat_cooldown(&mut self, now: f32) {
        if self.in_combat && now - self.last_combat_time >= self.tuning.combat_cooldown {
            self.in_combat = false;
            info!(target: "squad::agent", agent = %self.id, "no longer in combat");
            self.emit(SquadEvent::CombatEnded { agent: self.id });
        }
    }

    fn update_effects(&mut self, now: f32) {
        let expired = self.effects.expire(now);
        self.end_effects(expired, true);
        self.detonate_due_charges(now);
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("class", &self.class)
            .field("state", &self.state)
            .field("health", &self.health)
            .field("alive", &self.alive)
            .finish_non_exhaustive()
    }
}
