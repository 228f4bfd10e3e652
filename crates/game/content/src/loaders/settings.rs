//! Player settings loader.

use std::path::Path;

use combat_core::{Settings, SpeedSetting};
use serde::Deserialize;
use tracing::warn;

use crate::loaders::{LoadResult, read_file};

/// Contents of `settings.toml`: speed presets plus toggles.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SettingsFile {
    pub default_speed: String,
    pub one_click_move: bool,
    pub speeds: Vec<SpeedSetting>,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            default_speed: "Normal".to_owned(),
            one_click_move: true,
            speeds: vec![
                SpeedSetting::new("Slow", 1.5),
                SpeedSetting::default(),
                SpeedSetting::new("Fast", 0.5),
                SpeedSetting::instant(),
            ],
        }
    }
}

impl SettingsFile {
    /// Resolves a preset by name (case-insensitive). Unknown names fall back
    /// to the default preset.
    pub fn speed(&self, name: Option<&str>) -> SpeedSetting {
        let find = |wanted: &str| {
            self.speeds
                .iter()
                .find(|speed| speed.name.eq_ignore_ascii_case(wanted))
                .cloned()
        };

        if let Some(name) = name {
            if let Some(speed) = find(name) {
                return speed;
            }
            warn!(
                target: "combat::content",
                requested = name,
                fallback = %self.default_speed,
                "Unknown speed preset, using default"
            );
        }
        find(&self.default_speed).unwrap_or_default()
    }

    pub fn settings(&self, speed: Option<&str>) -> Settings {
        Settings::new(self.speed(speed), self.one_click_move)
    }
}

pub struct SettingsLoader;

impl SettingsLoader {
    pub fn load(path: &Path) -> LoadResult<SettingsFile> {
        let content = read_file(path)?;
        toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse settings TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn resolves_presets_by_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"default_speed = "Brisk"
one_click_move = false

[[speeds]]
name = "Brisk"
multiplier = 0.75

[[speeds]]
name = "Crawl"
multiplier = 3.0"#
        )
        .unwrap();

        let file = SettingsLoader::load(file.path()).unwrap();
        assert!(!file.one_click_move);
        assert_eq!(file.speed(Some("crawl")).multiplier, 3.0);
        assert_eq!(file.speed(Some("warp")).name, "Brisk");
        assert_eq!(file.settings(None).speed.multiplier, 0.75);
    }

    #[test]
    fn missing_default_preset_is_normal_speed() {
        let file = SettingsFile {
            default_speed: "Ghost".to_owned(),
            ..SettingsFile::default()
        };
        assert_eq!(file.speed(None), SpeedSetting::default());
    }
}
