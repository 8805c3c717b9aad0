//! Role registry for combat coordination.
//!
//! Each class that has a combat specialty registers a [`RoleHandler`]. While
//! the team is in combat the coordinator looks up the handler for every live
//! member and dispatches to it; classes without a handler are left alone.
//! Adding a class means registering a handler, not editing a match.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::agent::{Agent, AgentClass};

/// Specialty task assigned to a member during combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatTask {
    SeekElevatedPosition,
    EngageHeavyTargets,
    DisableEnemySystems,
    SuppressiveFire,
}

/// Fire-and-forget combat dispatch for one class.
pub trait RoleHandler: Send + Sync {
    fn name(&self) -> &'static str;

    fn dispatch(&self, member: &mut Agent);
}

/// Handler that assigns a fixed task.
#[derive(Clone, Copy, Debug)]
pub struct TaskRole {
    name: &'static str,
    task: CombatTask,
}

impl TaskRole {
    pub const fn new(name: &'static str, task: CombatTask) -> Self {
        Self { name, task }
    }

    pub const fn task(&self) -> CombatTask {
        self.task
    }
}

impl RoleHandler for TaskRole {
    fn name(&self) -> &'static str {
        self.name
    }

    fn dispatch(&self, member: &mut Agent) {
        member.assign_task(Some(self.task));
    }
}

/// Class → handler lookup.
#[derive(Clone, Default)]
pub struct RoleRegistry {
    handlers: HashMap<AgentClass, Arc<dyn RoleHandler>>,
}

impl RoleRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the standard specialties:
    /// - Sniper: seek an elevated position
    /// - Demolitions: engage heavy targets
    /// - Hacker: disable enemy systems
    /// - Assault: suppressive fire
    pub fn default_roles() -> Self {
        let mut registry = Self::empty();
        registry.register(
            AgentClass::Sniper,
            Arc::new(TaskRole::new("marksman", CombatTask::SeekElevatedPosition)),
        );
        registry.register(
            AgentClass::Demolitions,
            Arc::new(TaskRole::new("breacher", CombatTask::EngageHeavyTargets)),
        );
        registry.register(
            AgentClass::Hacker,
            Arc::new(TaskRole::new("infiltrator", CombatTask::DisableEnemySystems)),
        );
        registry.register(
            AgentClass::Assault,
            Arc::new(TaskRole::new("rifleman", CombatTask::SuppressiveFire)),
        );
        registry
    }

    /// Registers (or replaces) the handler for `class`.
    pub fn register(&mut self, class: AgentClass, handler: Arc<dyn RoleHandler>) {
        if let Some(previous) = self.handlers.insert(class, handler) {
            debug!(
                target: "squad::team",
                class = %class,
                replaced = previous.name(),
                "role handler replaced"
            );
        }
    }

    pub fn handler(&self, class: AgentClass) -> Option<&Arc<dyn RoleHandler>> {
        self.handlers.get(&class)
    }

    pub fn dispatch(&self, member: &mut Agent) -> bool {
        match self.handlers.get(&member.class()) {
            Some(handler) => {
                handler.dispatch(member);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for RoleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self
            .handlers
            .iter()
            .map(|(class, h)| (*class, h.name()))
            .collect();
        names.sort();
        f.debug_struct("RoleRegistry").field("handlers", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn default_roles_cover_combat_specialists() {
        let registry = RoleRegistry::default_roles();
        let covered: Vec<_> = AgentClass::iter()
            .filter(|c| registry.handler(*c).is_some())
            .collect();
        assert_eq!(
            covered,
            vec![
                AgentClass::Assault,
                AgentClass::Sniper,
                AgentClass::Demolitions,
                AgentClass::Hacker
            ]
        );
        assert_eq!(registry.len(), 4);
        assert!(registry.handler(AgentClass::Medic).is_none());
    }

    #[test]
    fn registering_replaces_handler() {
        let mut registry = RoleRegistry::default_roles();
        registry.register(
            AgentClass::Sniper,
            Arc::new(TaskRole::new("overwatch", CombatTask::SuppressiveFire)),
        );
        assert_eq!(registry.len(), 4);
        let handler = registry.handler(AgentClass::Sniper).map(|h| h.name());
        assert_eq!(handler, Some("overwatch"));
    }
}
