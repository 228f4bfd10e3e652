//! Builds a ready-to-run [`CombatState`] from encounter and map records.

use combat_core::error::{ErrorSeverity, GameError};
use combat_core::{
    ActionWithUses, CombatAction, CombatConfig, CombatRng, CombatState, Enemy, EnemyKind, Hazard,
    HazardType, IdGenerator, Player, Position, StateError,
};
use tracing::{debug, warn};

use crate::catalog::{
    CellKind, EncounterCatalog, EncounterDefinition, GroupCatalog, GroupChance, MapCatalog,
    MapLayout, PlayerSeed,
};

/// Unrecoverable content problems. Missing keys are not errors: the factory
/// substitutes defaults and logs a warning instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncounterError {
    #[error("no encounters defined")]
    NoEncounters,

    #[error("no combat maps defined")]
    NoMaps,

    #[error("map '{map_key}' is blank")]
    EmptyMap { map_key: String },

    #[error("map '{map_key}' has no player spawn point")]
    NoPlayerSpawn { map_key: String },

    #[error(transparent)]
    State(#[from] StateError),
}

impl GameError for EncounterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EncounterError::State(error) => error.severity(),
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            EncounterError::NoEncounters => "CONTENT_NO_ENCOUNTERS",
            EncounterError::NoMaps => "CONTENT_NO_MAPS",
            EncounterError::EmptyMap { .. } => "CONTENT_EMPTY_MAP",
            EncounterError::NoPlayerSpawn { .. } => "CONTENT_NO_PLAYER_SPAWN",
            EncounterError::State(error) => error.error_code(),
        }
    }
}

/// A populated encounter plus the bookkeeping the host game needs afterwards.
#[derive(Clone, Debug)]
pub struct Encounter {
    pub key: String,
    pub map_key: String,
    pub enemy_group: String,
    pub hazard_group: String,
    pub victory_event: Option<String>,
    pub defeat_event: Option<String>,
    pub state: CombatState,
}

/// Turns content records into combat state.
#[derive(Clone, Debug, Default)]
pub struct EncounterFactory {
    pub encounters: EncounterCatalog,
    pub maps: MapCatalog,
    pub groups: GroupCatalog,
    pub player: PlayerSeed,
    pub config: CombatConfig,
}

impl EncounterFactory {
    pub fn new(
        encounters: EncounterCatalog,
        maps: MapCatalog,
        groups: GroupCatalog,
        player: PlayerSeed,
        config: CombatConfig,
    ) -> Self {
        Self {
            encounters,
            maps,
            groups,
            player,
            config,
        }
    }

    /// Builds encounter `key`.
    ///
    /// One roll on `0..=99` picks both the enemy and the hazard group by
    /// cumulative chance; a second roll picks the player spawn point.
    pub fn build(&self, key: &str, rng: &mut impl CombatRng) -> Result<Encounter, EncounterError> {
        let (key, definition) = self.resolve_encounter(key)?;
        let layout = self.resolve_map(&definition.map_key)?;
        let cells = parse_rows(layout, &self.maps.separator)?;

        let roll = rng.range(0, 99);
        let enemy_group = pick_group(&definition.enemy_groups, roll)
            .unwrap_or(&self.groups.default_enemy_group)
            .to_owned();
        let hazard_group = pick_group(&definition.hazard_groups, roll)
            .unwrap_or(&self.groups.default_hazard_group)
            .to_owned();
        debug!(
            target: "combat::content",
            encounter = %key,
            map = %layout.key,
            roll,
            enemy_group = %enemy_group,
            hazard_group = %hazard_group,
            "Rolled spawn groups"
        );

        let mut spawns = SpawnCells::default();
        for (y, row) in cells.rows.iter().enumerate() {
            for (x, symbol) in row.iter().enumerate() {
                let position = Position::new(x as i32, y as i32);
                match self.maps.legend.classify(symbol) {
                    CellKind::EnemySpawn => spawns.enemies.push(position),
                    CellKind::HazardSpawn => spawns.hazards.push(position),
                    CellKind::PlayerSpawn => spawns.players.push(position),
                    CellKind::Wall => spawns.walls.push(position),
                    CellKind::Blank => {}
                }
            }
        }

        if spawns.players.is_empty() {
            return Err(EncounterError::NoPlayerSpawn {
                map_key: layout.key.clone(),
            });
        }
        let last = spawns.players.len() as i32 - 1;
        let index = rng.range(0, last).clamp(0, last) as usize;
        let player = self.spawn_player(spawns.players[index]);

        let mut state = CombatState::new(cells.width, cells.height, player);
        for position in spawns.walls {
            state.add_hazard(Hazard::spawn(HazardType::Wall, position, &self.config))?;
        }

        let enemy_kinds = self.enemy_kinds(&enemy_group);
        for (slot, position) in spawns.enemies.into_iter().enumerate() {
            if let Some(kind) = cycle(&enemy_kinds, slot) {
                state.add_enemy(Enemy::spawn(kind, position, &self.config))?;
            }
        }

        let hazard_types = self.hazard_types(&hazard_group);
        for (slot, position) in spawns.hazards.into_iter().enumerate() {
            if let Some(hazard_type) = cycle(&hazard_types, slot) {
                state.add_hazard(Hazard::spawn(hazard_type, position, &self.config))?;
            }
        }

        Ok(Encounter {
            key: key.to_owned(),
            map_key: layout.key.clone(),
            enemy_group,
            hazard_group,
            victory_event: definition.victory_event.clone(),
            defeat_event: definition.defeat_event.clone(),
            state,
        })
    }

    /// Creates the player from the seed with a fresh id.
    pub fn spawn_player(&self, position: Position) -> Player {
        let id = IdGenerator::next_id();
        let abilities = self
            .player
            .abilities
            .iter()
            .map(|seed| {
                let template = CombatAction::from_kind(seed.kind, id, &self.config);
                ActionWithUses::new(template, seed.uses).with_bypass(seed.bypass_use_limits)
            })
            .collect();
        Player::new(id, self.player.max_hp, position).with_abilities(abilities)
    }

    fn resolve_encounter<'a>(
        &'a self,
        key: &'a str,
    ) -> Result<(&'a str, &'a EncounterDefinition), EncounterError> {
        if let Some(definition) = self.encounters.encounters.get(key) {
            return Ok((key, definition));
        }

        let fallback = self.encounters.default_encounter.as_str();
        warn!(
            target: "combat::content",
            requested = key,
            fallback,
            "Unknown encounter, using default encounter"
        );
        self.encounters
            .encounters
            .get_key_value(fallback)
            .or_else(|| self.encounters.encounters.iter().next())
            .map(|(key, definition)| (key.as_str(), definition))
            .ok_or(EncounterError::NoEncounters)
    }

    fn resolve_map(&self, map_key: &str) -> Result<&MapLayout, EncounterError> {
        if let Some(layout) = self.maps.find(map_key) {
            return Ok(layout);
        }

        let layout = self.maps.maps.first().ok_or(EncounterError::NoMaps)?;
        warn!(
            target: "combat::content",
            requested = map_key,
            fallback = %layout.key,
            "Unknown map, using first map"
        );
        Ok(layout)
    }

    fn enemy_kinds(&self, group: &str) -> Vec<EnemyKind> {
        lookup_group(
            &self.groups.enemy_groups,
            group,
            &self.groups.default_enemy_group,
            "enemy",
        )
    }

    fn hazard_types(&self, group: &str) -> Vec<HazardType> {
        lookup_group(
            &self.groups.hazard_groups,
            group,
            &self.groups.default_hazard_group,
            "hazard",
        )
    }
}

#[derive(Default)]
struct SpawnCells {
    enemies: Vec<Position>,
    hazards: Vec<Position>,
    players: Vec<Position>,
    walls: Vec<Position>,
}

struct ParsedRows {
    rows: Vec<Vec<String>>,
    width: u32,
    height: u32,
}

/// Splits each row on `separator`. Width is the longest row; shorter rows are
/// padded with blank cells implicitly.
fn parse_rows(layout: &MapLayout, separator: &str) -> Result<ParsedRows, EncounterError> {
    let rows: Vec<Vec<String>> = layout
        .rows
        .iter()
        .map(|row| {
            if row.trim().is_empty() {
                Vec::new()
            } else if separator.is_empty() {
                row.chars().map(String::from).collect()
            } else {
                row.split(separator)
                    .map(|cell| cell.trim().to_owned())
                    .collect()
            }
        })
        .collect();

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if rows.is_empty() || width == 0 {
        return Err(EncounterError::EmptyMap {
            map_key: layout.key.clone(),
        });
    }

    Ok(ParsedRows {
        height: rows.len() as u32,
        width: width as u32,
        rows,
    })
}

/// First group whose cumulative chance reaches `roll`.
fn pick_group(groups: &[GroupChance], roll: i32) -> Option<&str> {
    let mut cumulative = 0i64;
    groups
        .iter()
        .find(|group| {
            cumulative += i64::from(group.chance);
            i64::from(roll) <= cumulative
        })
        .map(|group| group.key.as_str())
}

fn lookup_group<T: Clone>(
    catalog: &std::collections::BTreeMap<String, Vec<T>>,
    group: &str,
    default: &str,
    label: &str,
) -> Vec<T> {
    if let Some(members) = catalog.get(group) {
        return members.clone();
    }
    warn!(
        target: "combat::content",
        group,
        fallback = default,
        "Unknown {} group, using default group",
        label
    );
    catalog.get(default).cloned().unwrap_or_default()
}

fn cycle<T: Copy>(members: &[T], slot: usize) -> Option<T> {
    if members.is_empty() {
        None
    } else {
        Some(members[slot % members.len()])
    }
}
