//! Background consumers for mission telemetry topics.
use squad_runtime::{EventBus, Topic};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Spawns one logging task per topic. Tasks finish when the mission is
/// torn down and the bus closes.
pub fn spawn_consumers(bus: &EventBus) -> Vec<JoinHandle<()>> {
    [Topic::Team, Topic::Combat]
        .into_iter()
        .map(|topic| {
            let mut rx = bus.subscribe(topic);
            tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(event) => info!(
                            target: "squad::mission",
                            %topic,
                            tick = %event.tick,
                            event = ?event.event,
                            "telemetry"
                        ),
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(target: "squad::mission", %topic, skipped, "telemetry lagged");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            })
        })
        .collect()
}
