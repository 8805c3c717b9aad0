//! Squad configuration loader.

use std::path::Path;

use squad_core::SquadConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for squad configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing tables and keys fall back to their defaults.
    pub fn load(path: &Path) -> LoadResult<SquadConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<SquadConfig> {
        let config: SquadConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.mission.tick_interval <= 0.0 {
            anyhow::bail!(
                "mission.tick_interval must be positive, got {}",
                config.mission.tick_interval
            );
        }
        if config.team.formation_spacing < 0.0 {
            anyhow::bail!(
                "team.formation_spacing must not be negative, got {}",
                config.team.formation_spacing
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[team]\nformation_spacing = 4.5\n\n[agent]\ncombat_cooldown = 6.0"
        )
        .unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.team.formation_spacing, 4.5);
        assert_eq!(config.agent.combat_cooldown, 6.0);
        assert_eq!(config.agent.detection_range, 15.0);
        assert_eq!(config.mission, SquadConfig::default().mission);
    }

    #[test]
    fn rejects_non_positive_tick_interval() {
        let err = ConfigLoader::parse("[mission]\ntick_interval = 0.0").unwrap_err();
        assert!(err.to_string().contains("tick_interval"));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
