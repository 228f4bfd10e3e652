//! Content factory for building encounters from data files.

use std::path::{Path, PathBuf};

use combat_core::CombatConfig;
use tracing::debug;

use crate::catalog::{EncounterCatalog, GroupCatalog, MapCatalog, PlayerSeed};
use crate::encounter::EncounterFactory;
use crate::loaders::{
    ConfigLoader, EncounterLoader, GroupLoader, LoadResult, MapLoader, PlayerLoader,
    SettingsFile, SettingsLoader,
};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional)
/// ├── settings.toml    (optional)
/// ├── player.ron
/// ├── encounters.ron
/// ├── groups.ron
/// └── maps.ron
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

    /// Load combat tuning from `config.toml`, or defaults if the file is absent.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            debug!(
                target: "combat::content",
                path = %path.display(),
                "No config file, using defaults"
            );
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load speed presets from `settings.toml`, or built-in presets if absent.
    pub fn load_settings(&self) -> LoadResult<SettingsFile> {
        let path = self.data_dir.join("settings.toml");
        if !path.exists() {
            debug!(
                target: "combat::content",
                path = %path.display(),
                "No settings file, using defaults"
            );
            return Ok(SettingsFile::default());
        }
        SettingsLoader::load(&path)
    }

    pub fn load_player(&self) -> LoadResult<PlayerSeed> {
        PlayerLoader::load(&self.data_dir.join("player.ron"))
    }

    pub fn load_encounters(&self) -> LoadResult<EncounterCatalog> {
        EncounterLoader::load(&self.data_dir.join("encounters.ron"))
    }

    pub fn load_groups(&self) -> LoadResult<GroupCatalog> {
        GroupLoader::load(&self.data_dir.join("groups.ron"))
    }

    pub fn load_maps(&self) -> LoadResult<MapCatalog> {
        MapLoader::load(&self.data_dir.join("maps.ron"))
    }

    /// Loads every catalog and assembles an [`EncounterFactory`].
    pub fn encounter_factory(&self) -> LoadResult<EncounterFactory> {
        Ok(EncounterFactory::new(
            self.load_encounters()?,
            self.load_maps()?,
            self.load_groups()?,
            self.load_player()?,
            self.load_config()?,
        ))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use combat_core::PcgRng;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_optional_files_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap(), CombatConfig::default());
        assert_eq!(factory.load_settings().unwrap(), SettingsFile::default());
        assert!(factory.load_player().is_err());
    }

    #[test]
    fn bundled_data_builds_every_encounter() {
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let factory = ContentFactory::new(&data).encounter_factory().unwrap();

        for key in factory.encounters.encounters.keys() {
            for seed in 0..8 {
                let encounter = factory.build(key, &mut PcgRng::seeded(seed)).unwrap();
                assert!(!encounter.state.are_enemies_defeated(), "{key} has no enemies");
            }
        }
    }

    #[test]
    fn loads_a_complete_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("player.ron"),
            "(max_hp: 10, abilities: [(kind: Attack, uses: 1)])",
        )
        .unwrap();
        fs::write(
            dir.path().join("encounters.ron"),
            r#"(default_encounter: "a", encounters: { "a": (map_key: "m") })"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("groups.ron"),
            r#"(default_enemy_group: "e", default_hazard_group: "h",
                enemy_groups: { "e": [RustedBrute] }, hazard_groups: { "h": [Wall] })"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("maps.ron"),
            r#"(separator: "", maps: [(key: "m", rows: ["P.E", ".H."])])"#,
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path()).encounter_factory().unwrap();
        let encounter = factory.build("a", &mut PcgRng::seeded(0)).unwrap();
        assert_eq!(encounter.state.render_rows(), vec!["@.B", ".#."]);
    }
}
