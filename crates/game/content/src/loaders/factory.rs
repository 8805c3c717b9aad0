//! Content factory for loading mission content from a data directory.

use std::path::{Path, PathBuf};

use squad_core::SquadConfig;

use crate::loaders::{ConfigLoader, LoadResult, RosterLoader};
use crate::roster::RosterSpec;

/// Content factory that loads all squad content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── roster.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load configuration from `config.toml`, or defaults if it is absent.
    pub fn load_config(&self) -> LoadResult<SquadConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(SquadConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the roster from `roster.ron`, or the standard squad if it is
    /// absent.
    pub fn load_roster(&self) -> LoadResult<RosterSpec> {
        let path = self.data_dir.join("roster.ron");
        if !path.exists() {
            return Ok(RosterSpec::standard_squad());
        }
        RosterLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
