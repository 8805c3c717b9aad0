//! Roster loader.
//!
//! Rosters are written in RON (`.ron`) or TOML (`.toml`); the format is
//! picked from the file extension.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::roster::RosterSpec;

/// Loader for squad rosters.
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<RosterSpec> {
        let content = read_file(path)?;
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        match extension {
            "ron" => Self::parse_ron(&content),
            "toml" => Self::parse_toml(&content),
            other => anyhow::bail!(
                "Unsupported roster format '{}' for {}",
                other,
                path.display()
            ),
        }
    }

    pub fn parse_ron(content: &str) -> LoadResult<RosterSpec> {
        let roster: RosterSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;
        Self::validate(roster)
    }

    pub fn parse_toml(content: &str) -> LoadResult<RosterSpec> {
        let roster: RosterSpec = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster TOML: {}", e))?;
        Self::validate(roster)
    }

    fn validate(roster: RosterSpec) -> LoadResult<RosterSpec> {
        if let Some(name) = roster.invalid_member_name() {
            anyhow::bail!("Roster member names must be unique and non-empty, got '{}'", name);
        }
        Ok(roster)
    }
}
