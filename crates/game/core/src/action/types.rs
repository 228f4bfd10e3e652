use crate::engine::SpawnRecord;
use crate::state::{DamageReport, EntityId};

use super::AnimationCue;

/// Everything a resolved action changed, in the order it happened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionOutcome {
    pub cues: Vec<AnimationCue>,
    pub damage: Vec<DamageReport>,
    /// Players and enemies killed by this action.
    pub deaths: Vec<EntityId>,
    /// Canisters knocked to zero hp that still owe an explosion.
    pub triggered: Vec<EntityId>,
    /// Canisters that exploded during this action.
    pub detonated: Vec<EntityId>,
    pub spawned: Vec<SpawnRecord>,
}

impl ActionOutcome {
    pub fn with_cue(cue: AnimationCue) -> Self {
        Self {
            cues: vec![cue],
            ..Self::default()
        }
    }

    /// True when an entity joined or left the turn order.
    pub fn changes_turn_order(&self) -> bool {
        !self.deaths.is_empty() || self.spawned.iter().any(|record| record.turn_capable)
    }
}
