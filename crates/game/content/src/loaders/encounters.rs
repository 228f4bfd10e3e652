//! Encounter and spawn-group catalog loaders.

use std::path::Path;

use tracing::warn;

use crate::catalog::{EncounterCatalog, GroupCatalog};
use crate::loaders::{LoadResult, parse_ron};

/// Loader for encounter definitions.
pub struct EncounterLoader;

impl EncounterLoader {
    /// RON format: `(default_encounter: "...", encounters: { "key": (...) })`.
    pub fn load(path: &Path) -> LoadResult<EncounterCatalog> {
        let catalog: EncounterCatalog = parse_ron(path, "encounter catalog")?;

        if !catalog.encounters.contains_key(&catalog.default_encounter) {
            warn!(
                target: "combat::content",
                default = %catalog.default_encounter,
                path = %path.display(),
                "Default encounter is not defined"
            );
        }
        for (key, definition) in &catalog.encounters {
            for (label, groups) in [
                ("enemy", &definition.enemy_groups),
                ("hazard", &definition.hazard_groups),
            ] {
                let total: u32 = groups.iter().map(|group| group.chance).sum();
                if total > 100 {
                    warn!(
                        target: "combat::content",
                        encounter = %key,
                        total,
                        "{} group chances exceed 100",
                        label
                    );
                }
            }
        }

        Ok(catalog)
    }
}

/// Loader for enemy and hazard groups.
pub struct GroupLoader;

impl GroupLoader {
    pub fn load(path: &Path) -> LoadResult<GroupCatalog> {
        let catalog: GroupCatalog = parse_ron(path, "group catalog")?;

        if !catalog.enemy_groups.contains_key(&catalog.default_enemy_group) {
            anyhow::bail!(
                "Default enemy group '{}' is not defined in {}",
                catalog.default_enemy_group,
                path.display()
            );
        }
        if !catalog.hazard_groups.contains_key(&catalog.default_hazard_group) {
            anyhow::bail!(
                "Default hazard group '{}' is not defined in {}",
                catalog.default_hazard_group,
                path.display()
            );
        }

        Ok(catalog)
    }
}
