//! Topic-based event bus for mission telemetry.
//!
//! Domain events drained from the coordinator after each tick are published
//! to topics, and consumers subscribe only to the topics they need.

mod bus;

pub use bus::{Event, EventBus, Topic};
