//! Map catalog loader.
//!
//! Maps are textual layouts; cell meaning comes from the catalog legend.

use std::collections::BTreeSet;
use std::path::Path;

use crate::catalog::MapCatalog;
use crate::loaders::{LoadResult, parse_ron};

/// Loader for map layouts from RON files.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<MapCatalog> {
        let catalog: MapCatalog = parse_ron(path, "map catalog")?;

        let mut seen = BTreeSet::new();
        for layout in &catalog.maps {
            if !seen.insert(layout.key.as_str()) {
                anyhow::bail!("Duplicate map key '{}' in {}", layout.key, path.display());
            }
        }

        Ok(catalog)
    }
}
