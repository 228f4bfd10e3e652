//! Assembles a ready-to-run combat session from content and configuration.
use std::time::Duration;

use anyhow::Result;
use combat_content::ContentFactory;
use combat_core::PcgRng;
use combat_runtime::CombatSession;
use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::autopilot::AutoPilot;
use crate::config::SimConfig;
use crate::presenter::LogAnimator;

/// Identifies what was built, for the final summary.
#[derive(Clone, Debug, Serialize)]
pub struct SimulationInfo {
    pub encounter: String,
    pub map: String,
    pub enemy_group: String,
    pub hazard_group: String,
    pub seed: u64,
    pub speed: String,
}

pub struct Simulation {
    pub info: SimulationInfo,
    pub session: CombatSession,
}

pub struct SimulationBuilder {
    config: SimConfig,
    cue_delay: Option<Duration>,
}

impl SimulationBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            cue_delay: None,
        }
    }

    /// Overrides the per-cue animation hold, which otherwise follows the
    /// speed preset.
    pub fn cue_delay(mut self, delay: Duration) -> Self {
        self.cue_delay = Some(delay);
        self
    }

    pub fn build(self) -> Result<Simulation> {
        let content = ContentFactory::new(self.config.data_dir());
        info!(target: "combat::sim", data_dir = %content.data_dir().display(), "Loading content");

        let combat_config = content.load_config()?;
        let settings_file = content.load_settings()?;
        let mut settings = settings_file.settings(self.config.speed.as_deref());
        if let Some(one_click_move) = self.config.one_click_move {
            settings.one_click_move = one_click_move;
        }

        let seed = self
            .config
            .seed
            .unwrap_or_else(|| rand::thread_rng().r#gen());
        let mut rng = PcgRng::seeded(seed);

        let factory = content.encounter_factory()?;
        let key = self
            .config
            .encounter
            .clone()
            .unwrap_or_else(|| factory.encounters.default_encounter.clone());
        let encounter = factory.build(&key, &mut rng)?;

        let info = SimulationInfo {
            encounter: encounter.key.clone(),
            map: encounter.map_key.clone(),
            enemy_group: encounter.enemy_group.clone(),
            hazard_group: encounter.hazard_group.clone(),
            seed,
            speed: settings.speed.name.clone(),
        };
        info!(
            target: "combat::sim",
            encounter = %info.encounter,
            map = %info.map,
            enemies = %info.enemy_group,
            hazards = %info.hazard_group,
            seed,
            "Encounter built"
        );
        for row in encounter.state.render_rows() {
            info!(target: "combat::sim", "  {row}");
        }

        let cue_delay = self.cue_delay.unwrap_or_else(|| settings.timing(100));
        let mut builder = CombatSession::builder()
            .combat_config(combat_config)
            .settings(settings)
            .initial_state(encounter.state)
            .player_provider(AutoPilot::new())
            .animator(LogAnimator::new(cue_delay))
            .follow_up_events(encounter.victory_event, encounter.defeat_event);
        if let Some(limit) = self.config.max_turns {
            builder = builder.max_turns(limit);
        }

        Ok(Simulation {
            info,
            session: builder.build()?,
        })
    }
}
