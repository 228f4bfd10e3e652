//! Simulator configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Everything the simulator needs before content is loaded.
#[derive(Clone, Debug, Default)]
pub struct SimConfig {
    /// Content directory; falls back to the bundled data when unset.
    pub data_dir: Option<PathBuf>,
    /// Encounter key; the catalog default is used when unset or unknown.
    pub encounter: Option<String>,
    /// Seed for spawn rolls. A random seed is drawn when unset.
    pub seed: Option<u64>,
    /// Speed preset name from `settings.toml`.
    pub speed: Option<String>,
    pub max_turns: Option<u64>,
    pub session_id: Option<String>,
    /// Overrides the one-click flag from `settings.toml`.
    pub one_click_move: Option<bool>,
}

impl SimConfig {
    /// Default turn limit so an auto-piloted stalemate still terminates.
    pub const DEFAULT_MAX_TURNS: u64 = 200;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_DATA_DIR` - Content directory (default: bundled data)
    /// - `COMBAT_ENCOUNTER` - Encounter key (default: catalog default)
    /// - `COMBAT_SEED` - Spawn roll seed (default: random)
    /// - `COMBAT_SPEED` - Speed preset name (default: settings default)
    /// - `COMBAT_MAX_TURNS` - Turn limit (default: 200, `0` disables it)
    /// - `COMBAT_SESSION_ID` - Log directory name (default: timestamp based)
    /// - `COMBAT_ONE_CLICK_MOVE` - Override one-click movement
    pub fn from_env() -> Self {
        let max_turns = match read_env::<u64>("COMBAT_MAX_TURNS") {
            Some(0) => None,
            Some(limit) => Some(limit),
            None => Some(Self::DEFAULT_MAX_TURNS),
        };

        Self {
            data_dir: env::var("COMBAT_DATA_DIR").ok().map(PathBuf::from),
            encounter: non_empty("COMBAT_ENCOUNTER"),
            seed: read_env("COMBAT_SEED"),
            speed: non_empty("COMBAT_SPEED"),
            max_turns,
            session_id: non_empty("COMBAT_SESSION_ID"),
            one_click_move: read_env("COMBAT_ONE_CLICK_MOVE"),
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| {
                PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../game/content/data")
            })
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}
