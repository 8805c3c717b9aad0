//! Headless squad client.
//!
//! Loads mission config and roster, wires the sandbox world into a
//! [`Mission`], and runs a scripted encounter while logging HUD lines.
//!
//! ```bash
//! SQUAD_TICKS=600 RUST_LOG=squad::team=debug cargo run -p squad-client
//! ```
mod config;
mod script;
mod telemetry;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use squad_content::{ConfigLoader, ContentFactory, RosterLoader};
use squad_core::SquadConfig;
use squad_runtime::{Arena, HudSnapshot, Mission, SandboxWorld};
use tokio::time::MissedTickBehavior;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let client = ClientConfig::from_env();
    let content = ContentFactory::new(&client.data_dir);
    let squad_config = match &client.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => content.load_config()?,
    };
    let roster = match &client.roster_path {
        Some(path) => RosterLoader::load(path)?,
        None => content.load_roster()?,
    };

    let world = Arc::new(
        SandboxWorld::new(Arena::default())
            .with_cover([(-6.0, 0.0, 12.0), (6.0, 0.0, 20.0)].map(glam::Vec3::from)),
    );
    let mut mission = Mission::builder()
        .config(squad_config.clone())
        .world(world.clone())
        .roster(roster)
        .build()
        .context("failed to assemble mission")?;

    let consumers = telemetry::spawn_consumers(mission.bus());
    run(&mut mission, &world, &client, &squad_config).await;

    let summary = mission.end();
    for consumer in consumers {
        consumer.await.context("telemetry consumer panicked")?;
    }
    println!("{}", summary_line(&summary));
    Ok(())
}

async fn run(mission: &mut Mission, world: &SandboxWorld, client: &ClientConfig, config: &SquadConfig) {
    let delta = config.mission.tick_interval;
    let mut interval = tokio::time::interval(Duration::from_secs_f32(delta.max(0.001)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    for _ in 0..client.ticks {
        if client.realtime {
            interval.tick().await;
        } else {
            tokio::task::yield_now().await;
        }

        let tick = mission.clock().tick;
        script::drive(tick, mission, world);
        mission.step();
        world.advance(delta);

        if tick.0 % client.hud_every == 0 {
            log_hud(&mission.hud());
        }
    }
}

fn log_hud(hud: &HudSnapshot) {
    info!(
        target: "squad::mission",
        tick = %hud.tick,
        formation = %hud.formation,
        alive = hud.team.members_alive,
        health_pct = (hud.team.health_fraction * 100.0).round(),
        in_combat = hud.team.in_combat,
        "hud"
    );
    for agent in &hud.agents {
        info!(
            target: "squad::mission",
            name = %agent.name,
            state = %agent.state,
            tree = agent.tree_status,
            action = agent.action,
            health = agent.health,
            ammo = agent.ammo.current,
            task = ?agent.task,
            "  member"
        );
    }
}

fn summary_line(summary: &squad_runtime::MissionSummary) -> String {
    format!(
        "mission over after {} ticks ({:.1}s): {} survivors, {} casualties, objective progress {}",
        summary.ticks, summary.elapsed, summary.survivors, summary.casualties, summary.objective_progress
    )
}

/// Log to stderr; `RUST_LOG` overrides the default `info` filter.
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
