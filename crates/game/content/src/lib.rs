//! Data-driven encounter content and loaders.
//!
//! This crate turns static content into ready-to-run combat state:
//! - Encounter definitions (map key, weighted spawn groups, follow-up events)
//! - Textual map layouts with a symbol legend (data-driven via RON)
//! - Enemy and hazard groups (data-driven via RON)
//! - Player seed (data-driven via RON)
//! - Combat tuning and speed presets (data-driven via TOML)
//!
//! Missing keys are tolerated: the [`EncounterFactory`] falls back to the
//! default encounter, the first map or the default group and logs a warning.
//! Only content that cannot produce a playable grid is an error.

pub mod catalog;
pub mod encounter;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{
    AbilitySeed, CellKind, EncounterCatalog, EncounterDefinition, GroupCatalog, GroupChance,
    MapCatalog, MapLayout, MapLegend, PlayerSeed,
};
pub use encounter::{Encounter, EncounterError, EncounterFactory};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EncounterLoader, GroupLoader, LoadResult, MapLoader,
    PlayerLoader, SettingsFile, SettingsLoader,
};
