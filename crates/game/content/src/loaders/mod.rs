//! Content loaders for reading combat data from files.
//!
//! RON carries the structured catalogs (encounters, maps, groups, player);
//! TOML carries the tuning knobs (combat config, settings).

pub mod config;
pub mod encounters;
pub mod factory;
pub mod map;
pub mod player;
pub mod settings;

pub use config::ConfigLoader;
pub use encounters::{EncounterLoader, GroupLoader};
pub use factory::ContentFactory;
pub use map::MapLoader;
pub use player::PlayerLoader;
pub use settings::{SettingsFile, SettingsLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses a RON document, naming `what` in the error.
pub(crate) fn parse_ron<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> LoadResult<T> {
    let content = read_file(path)?;
    ron::from_str(&content).map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e))
}
