//! Static content records: encounters, maps, spawn groups and the player seed.
//!
//! These are plain data. They are loaded from RON/TOML by [`crate::loaders`]
//! and consumed by [`crate::EncounterFactory`]; none of them ever appear in
//! combat state.

use std::collections::BTreeMap;

use combat_core::{ActionKind, EnemyKind, HazardType};

/// Weighted reference to a spawn group.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupChance {
    pub key: String,
    /// Percentage weight; rolls are taken on `0..=99`.
    pub chance: u32,
}

impl GroupChance {
    pub fn new(key: impl Into<String>, chance: u32) -> Self {
        Self {
            key: key.into(),
            chance,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterDefinition {
    pub map_key: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemy_groups: Vec<GroupChance>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hazard_groups: Vec<GroupChance>,
    /// Follow-up event raised by the host game on victory.
    #[cfg_attr(feature = "serde", serde(default))]
    pub victory_event: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defeat_event: Option<String>,
}

/// All encounters keyed by encounter key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterCatalog {
    /// Used when a requested key is missing.
    pub default_encounter: String,
    pub encounters: BTreeMap<String, EncounterDefinition>,
}

/// Symbol sets that classify map cells.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapLegend {
    pub enemy_symbols: Vec<String>,
    pub hazard_symbols: Vec<String>,
    pub player_spawn_symbols: Vec<String>,
    pub wall_symbols: Vec<String>,
}

impl Default for MapLegend {
    fn default() -> Self {
        Self {
            enemy_symbols: vec!["E".to_owned()],
            hazard_symbols: vec!["H".to_owned()],
            player_spawn_symbols: vec!["P".to_owned()],
            wall_symbols: vec!["#".to_owned()],
        }
    }
}

/// What a single map cell stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Blank,
    EnemySpawn,
    HazardSpawn,
    PlayerSpawn,
    Wall,
}

impl MapLegend {
    pub fn classify(&self, symbol: &str) -> CellKind {
        let matches = |symbols: &[String]| symbols.iter().any(|candidate| candidate == symbol);
        if matches(&self.enemy_symbols) {
            CellKind::EnemySpawn
        } else if matches(&self.hazard_symbols) {
            CellKind::HazardSpawn
        } else if matches(&self.player_spawn_symbols) {
            CellKind::PlayerSpawn
        } else if matches(&self.wall_symbols) {
            CellKind::Wall
        } else {
            CellKind::Blank
        }
    }
}

/// Textual map layout. Each row is split on the catalog separator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapLayout {
    pub key: String,
    pub rows: Vec<String>,
}

/// Ordered list of maps; the first one doubles as the fallback.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapCatalog {
    pub separator: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub legend: MapLegend,
    pub maps: Vec<MapLayout>,
}

impl Default for MapCatalog {
    fn default() -> Self {
        Self {
            separator: ",".to_owned(),
            legend: MapLegend::default(),
            maps: Vec::new(),
        }
    }
}

impl MapCatalog {
    pub fn find(&self, key: &str) -> Option<&MapLayout> {
        self.maps.iter().find(|map| map.key == key)
    }
}

/// Enemy and hazard groups. A group lists kinds assigned to spawn cells in
/// reading order, cycling when a map has more cells than the group has kinds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupCatalog {
    pub default_enemy_group: String,
    pub default_hazard_group: String,
    pub enemy_groups: BTreeMap<String, Vec<EnemyKind>>,
    pub hazard_groups: BTreeMap<String, Vec<HazardType>>,
}

/// One ability slot granted to the player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySeed {
    pub kind: ActionKind,
    pub uses: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bypass_use_limits: bool,
}

impl AbilitySeed {
    pub fn new(kind: ActionKind, uses: u32) -> Self {
        Self {
            kind,
            uses,
            bypass_use_limits: false,
        }
    }
}

/// Player stats and ability list carried into each encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSeed {
    pub max_hp: u32,
    pub abilities: Vec<AbilitySeed>,
}

impl Default for PlayerSeed {
    fn default() -> Self {
        Self {
            max_hp: 20,
            abilities: vec![
                AbilitySeed::new(ActionKind::Move, 3),
                AbilitySeed::new(ActionKind::Attack, 2),
                AbilitySeed::new(ActionKind::Block, 1),
                AbilitySeed::new(ActionKind::PushRange5, 1),
                AbilitySeed::new(ActionKind::PullRange5, 1),
            ],
        }
    }
}
