//! Player seed loader.

use std::path::Path;

use crate::catalog::PlayerSeed;
use crate::loaders::{LoadResult, parse_ron};

pub struct PlayerLoader;

impl PlayerLoader {
    /// RON format: `(max_hp: 20, abilities: [(kind: Move, uses: 3), ...])`.
    pub fn load(path: &Path) -> LoadResult<PlayerSeed> {
        let seed: PlayerSeed = parse_ron(path, "player")?;
        if seed.max_hp == 0 {
            anyhow::bail!("Player max_hp must be positive in {}", path.display());
        }
        Ok(seed)
    }
}
