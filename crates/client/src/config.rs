//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Where content comes from and how long the demo runs.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub data_dir: PathBuf,
    pub config_path: Option<PathBuf>,
    pub roster_path: Option<PathBuf>,
    pub ticks: u64,
    pub hud_every: u64,
    pub realtime: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            config_path: None,
            roster_path: None,
            ticks: 300,
            hud_every: 10,
            realtime: false,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SQUAD_DATA_DIR` - Directory holding `config.toml` and `roster.ron` (default: `data`)
    /// - `SQUAD_CONFIG` - Explicit mission config file, overrides the data dir
    /// - `SQUAD_ROSTER` - Explicit roster file (`.ron` or `.toml`)
    /// - `SQUAD_TICKS` - Number of ticks to simulate (default: 300)
    /// - `SQUAD_HUD_EVERY` - Ticks between HUD lines (default: 10)
    /// - `SQUAD_REALTIME` - Pace ticks at the configured tick interval (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("SQUAD_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config.config_path = env::var("SQUAD_CONFIG").ok().map(PathBuf::from);
        config.roster_path = env::var("SQUAD_ROSTER").ok().map(PathBuf::from);

        if let Some(ticks) = read_env::<u64>("SQUAD_TICKS") {
            config.ticks = ticks;
        }
        if let Some(every) = read_env::<u64>("SQUAD_HUD_EVERY") {
            config.hud_every = every.max(1);
        }
        if let Some(realtime) = read_env::<bool>("SQUAD_REALTIME") {
            config.realtime = realtime;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
