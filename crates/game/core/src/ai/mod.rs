//! Decision routines for non-player participants.
//!
//! Routines never touch the combo list directly: they return a
//! [`DecisionSchedule`] that the turn manager owns and the driver plays back
//! with pacing. Dispatching through an enemy's ability slots spends its uses
//! while planning.

mod enemies;
mod hazards;

use crate::config::CombatConfig;
use crate::engine::DecisionSchedule;
use crate::state::{CombatState, EntityId, TurnRole};

/// Plans the turn of participant `id`.
///
/// Unknown ids and the player yield a schedule that only ends the decision.
pub fn plan_turn(id: EntityId, state: &mut CombatState, config: &CombatConfig) -> DecisionSchedule {
    match state.role_of(id) {
        Some(TurnRole::Enemy) => enemies::plan(id, state, config),
        Some(TurnRole::Hazard) => hazards::plan(id, state, config),
        Some(TurnRole::Player) | None => {
            let mut schedule = DecisionSchedule::new();
            schedule.end_decision();
            schedule
        }
    }
}
