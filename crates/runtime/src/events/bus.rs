//! Topic-based event bus implementation.

use squad_core::{SquadEvent, Tick};
use tokio::sync::broadcast;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, strum::Display)]
pub enum Topic {
    /// Per-agent lifecycle: spawn, state changes, commands, abilities, effects
    Agent,
    /// Coordinator decisions: formation, roles, team commands, leader
    Team,
    /// Damage, deaths, attacks and charges
    Combat,
}

/// Domain event stamped with the tick that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub tick: Tick,
    pub event: SquadEvent,
}

impl Event {
    pub fn new(tick: Tick, event: SquadEvent) -> Self {
        Self { tick, event }
    }

    pub fn topic(&self) -> Topic {
        use SquadEvent::*;
        match &self.event {
            DamageTaken { .. }
            | AgentDied { .. }
            | AttackRequested { .. }
            | CombatEnded { .. }
            | ChargePlaced { .. }
            | ChargeDetonated { .. } => Topic::Combat,
            FormationChanged { .. } | TeamCommand { .. } | LeaderDown | RoleAssigned { .. } => {
                Topic::Team
            }
            _ => Topic::Agent,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; events without
/// subscribers are dropped.
#[derive(Clone)]
pub struct EventBus {
    agent: broadcast::Sender<Event>,
    team: broadcast::Sender<Event>,
    combat: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            agent: broadcast::channel(capacity).0,
            team: broadcast::channel(capacity).0,
            combat: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Agent => &self.agent,
            Topic::Team => &self.team,
            Topic::Combat => &self.combat,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!(target: "squad::mission", %topic, "no subscribers");
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        topics.iter().map(|&t| (t, self.subscribe(t))).collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("agent_subscribers", &self.agent.receiver_count())
            .field("team_subscribers", &self.team.receiver_count())
            .field("combat_subscribers", &self.combat.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use squad_core::{AgentId, FormationType};

    use super::*;

    #[test]
    fn events_route_to_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut team = bus.subscribe(Topic::Team);
        let mut combat = bus.subscribe(Topic::Combat);

        bus.publish(Event::new(
            Tick(1),
            SquadEvent::FormationChanged {
                from: FormationType::Wedge,
                to: FormationType::Diamond,
            },
        ));
        bus.publish(Event::new(Tick(1), SquadEvent::AgentDied { agent: AgentId(2) }));

        assert_eq!(team.try_recv().unwrap().topic(), Topic::Team);
        assert!(team.try_recv().is_err());
        let death = combat.try_recv().unwrap();
        assert_eq!(death.event, SquadEvent::AgentDied { agent: AgentId(2) });
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::default();
        bus.publish(Event::new(Tick(0), SquadEvent::LeaderDown));
    }
}
