use crate::action::CombatAction;
use crate::config::CombatConfig;
use crate::engine::DecisionSchedule;
use crate::state::{CombatState, Direction, EntityId, HazardKind};

/// Burning floors scorch their own cell and ignite neighbouring canisters.
pub(super) fn plan(
    id: EntityId,
    state: &mut CombatState,
    config: &CombatConfig,
) -> DecisionSchedule {
    let mut schedule = DecisionSchedule::new();
    schedule.wait(config.pacing.hazard_think_ms);

    let Some(hazard) = state.hazard(id) else {
        schedule.end_decision();
        return schedule;
    };

    if let HazardKind::BurningFloor { .. } = hazard.kind {
        let origin = hazard.core.position;
        schedule.enqueue(CombatAction::burn(id, config.burn_damage));

        let neighbours: Vec<_> = Direction::PRIORITY
            .iter()
            .map(|&direction| origin.offset(direction, 1))
            .collect();
        let ignited: Vec<_> = state
            .primed_canisters()
            .filter(|canister| neighbours.contains(&canister.core.position))
            .map(|canister| canister.core.id)
            .collect();
        for canister in ignited {
            schedule.enqueue(CombatAction::explosion(
                canister,
                config.explosion_radius,
                config.explosion_damage,
            ));
        }
    }

    schedule.end_decision();
    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionKind;
    use crate::state::{Hazard, HazardType, IdGenerator, Player, Position};

    #[test]
    fn floor_burns_and_ignites_adjacent_canisters_only() {
        let config = CombatConfig::default();
        let mut state = CombatState::new(
            5,
            5,
            Player::new(IdGenerator::next_id(), 20, Position::new(4, 4)),
        );
        let floor = state
            .add_hazard(Hazard::spawn(HazardType::BurningFloor, Position::new(2, 2), &config))
            .unwrap();
        let adjacent = state
            .add_hazard(Hazard::spawn(
                HazardType::VolatileCanister,
                Position::new(2, 1),
                &config,
            ))
            .unwrap();
        state
            .add_hazard(Hazard::spawn(
                HazardType::VolatileCanister,
                Position::new(3, 3),
                &config,
            ))
            .unwrap();

        let schedule = plan(floor, &mut state, &config);
        let actions: Vec<_> = schedule.actions().collect();

        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].kind(), ActionKind::Attack);
        assert_eq!(actions[0].actor(), floor);
        assert_eq!(actions[1].kind(), ActionKind::AreaExplosion);
        assert_eq!(actions[1].actor(), adjacent);
    }
}
