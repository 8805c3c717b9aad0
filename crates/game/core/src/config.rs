//! Tunable parameters for agents, the team coordinator, and the mission loop.

/// Root configuration for a squad mission.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SquadConfig {
    pub agent: AgentTuning,
    pub team: TeamTuning,
    pub mission: MissionTuning,
}

impl SquadConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum concurrently active timed effects per agent.
    pub const MAX_ACTIVE_EFFECTS: usize = 8;
    /// Maximum concurrent hacks a hacker can run.
    pub const MAX_ACTIVE_HACKS: usize = 3;
    /// Explosive charges carried by a demolitions specialist.
    pub const MAX_EXPLOSIVES: u32 = 5;

    pub fn new() -> Self {
        Self::default()
    }
}

/// Per-agent perception, movement and combat tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentTuning {
    /// Range within which hostiles are detected.
    pub detection_range: f32,
    /// Range within which a visible target is attacked.
    pub attack_range: f32,
    /// Distance at which a destination counts as reached.
    pub stopping_distance: f32,
    /// Radius of random patrol destinations around the agent.
    pub patrol_radius: f32,
    /// Radius searched for cover when entering the Cover state.
    pub cover_search_radius: f32,
    /// Seconds without combat activity before `in_combat` clears.
    pub combat_cooldown: f32,
    /// Angular interpolation rate used when facing a target.
    pub rotation_speed: f32,
    /// Health fraction below which the low-health check passes.
    pub low_health_ratio: f32,
    /// Ammo fraction below which the low-ammo check passes.
    pub low_ammo_ratio: f32,
    /// Whether Idle agents fall back into Follow by default.
    pub follows_team: bool,
}

impl AgentTuning {
    pub const DEFAULT_DETECTION_RANGE: f32 = 15.0;
    pub const DEFAULT_ATTACK_RANGE: f32 = 10.0;
    pub const DEFAULT_STOPPING_DISTANCE: f32 = 2.0;
    pub const DEFAULT_PATROL_RADIUS: f32 = 10.0;
    pub const DEFAULT_COVER_SEARCH_RADIUS: f32 = 8.0;
    pub const DEFAULT_COMBAT_COOLDOWN: f32 = 10.0;
    pub const DEFAULT_ROTATION_SPEED: f32 = 10.0;
    pub const DEFAULT_LOW_HEALTH_RATIO: f32 = 0.3;
    pub const DEFAULT_LOW_AMMO_RATIO: f32 = 0.25;
}

impl Default for AgentTuning {
    fn default() -> Self {
        Self {
            detection_range: Self::DEFAULT_DETECTION_RANGE,
            attack_range: Self::DEFAULT_ATTACK_RANGE,
            stopping_distance: Self::DEFAULT_STOPPING_DISTANCE,
            patrol_radius: Self::DEFAULT_PATROL_RADIUS,
            cover_search_radius: Self::DEFAULT_COVER_SEARCH_RADIUS,
            combat_cooldown: Self::DEFAULT_COMBAT_COOLDOWN,
            rotation_speed: Self::DEFAULT_ROTATION_SPEED,
            low_health_ratio: Self::DEFAULT_LOW_HEALTH_RATIO,
            low_ammo_ratio: Self::DEFAULT_LOW_AMMO_RATIO,
            follows_team: true,
        }
    }
}

/// Team coordinator tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TeamTuning {
    /// Distance between formation slots.
    pub formation_spacing: f32,
    /// Lateral probe distance used to detect narrow spaces.
    pub narrow_space_probe: f32,
    /// When false, the formation only changes through `change_formation`.
    pub auto_formation: bool,
}

impl TeamTuning {
    pub const DEFAULT_FORMATION_SPACING: f32 = 3.0;
    pub const DEFAULT_NARROW_SPACE_PROBE: f32 = 2.0;
}

impl Default for TeamTuning {
    fn default() -> Self {
        Self {
            formation_spacing: Self::DEFAULT_FORMATION_SPACING,
            narrow_space_probe: Self::DEFAULT_NARROW_SPACE_PROBE,
            auto_formation: true,
        }
    }
}

/// Mission loop tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MissionTuning {
    /// Simulated seconds per tick.
    pub tick_interval: f32,
    /// Base seed for deterministic patrol sampling.
    pub seed: u64,
    /// Capacity of each telemetry topic channel.
    pub event_buffer_size: usize,
}

impl MissionTuning {
    pub const DEFAULT_TICK_INTERVAL: f32 = 0.1;
    pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;
}

impl Default for MissionTuning {
    fn default() -> Self {
        Self {
            tick_interval: Self::DEFAULT_TICK_INTERVAL,
            seed: 0,
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER_SIZE,
        }
    }
}
