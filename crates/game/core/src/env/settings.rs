use std::time::Duration;

/// Named pacing preset; every schedule delay is multiplied by `multiplier`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedSetting {
    pub name: String,
    pub multiplier: f64,
}

impl SpeedSetting {
    pub fn new(name: impl Into<String>, multiplier: f64) -> Self {
        Self {
            name: name.into(),
            multiplier,
        }
    }

    /// Zero delay; used by headless runs and tests.
    pub fn instant() -> Self {
        Self::new("Instant", 0.0)
    }
}

impl Default for SpeedSetting {
    fn default() -> Self {
        Self::new("Normal", 1.0)
    }
}

/// Read-only player preferences consulted by the engine.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    pub speed: SpeedSetting,
    /// Lets a bare direction input dispatch the Move ability.
    pub one_click_move: bool,
}

impl Settings {
    pub fn new(speed: SpeedSetting, one_click_move: bool) -> Self {
        Self {
            speed,
            one_click_move,
        }
    }

    /// Scales a base delay by the active speed preset.
    pub fn timing(&self, base_ms: u64) -> Duration {
        let multiplier = if self.speed.multiplier.is_finite() {
            self.speed.multiplier.max(0.0)
        } else {
            1.0
        };
        Duration::from_millis((base_ms as f64 * multiplier).round() as u64)
    }
}
