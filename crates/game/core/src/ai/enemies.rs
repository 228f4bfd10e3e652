use crate::action::ActionKind;
use crate::config::CombatConfig;
use crate::engine::DecisionSchedule;
use crate::pathfinding::find_path;
use crate::state::{CombatState, Direction, Enemy, EnemyKind, EntityId};

pub(super) fn plan(
    id: EntityId,
    state: &mut CombatState,
    config: &CombatConfig,
) -> DecisionSchedule {
    let target = state.player.core.position;
    let path = match state.enemy(id).map(|enemy| enemy.kind) {
        Some(EnemyKind::RustedBrute) => {
            let start = state.position_of(id).unwrap_or(target);
            find_path(start, target, &state.occupancy())
        }
        _ => Vec::new(),
    };

    let mut schedule = DecisionSchedule::new();
    match state.enemy_mut(id) {
        Some(enemy) => match enemy.kind {
            EnemyKind::RustedShambler => shambler(enemy, config, &mut schedule),
            EnemyKind::RustedBrute => brute(enemy, &path, config, &mut schedule),
        },
        None => {
            schedule.end_decision();
        }
    }
    schedule
}

/// Fixed script: attack left twice, step down twice.
fn shambler(enemy: &mut Enemy, config: &CombatConfig, schedule: &mut DecisionSchedule) {
    schedule.wait(config.pacing.shambler_think_ms);

    let script = [
        (ActionKind::Attack, Direction::Left),
        (ActionKind::Attack, Direction::Left),
        (ActionKind::Move, Direction::Down),
        (ActionKind::Move, Direction::Down),
    ];
    for (kind, direction) in script {
        if let Some(action) = enemy
            .action_mut(kind)
            .and_then(|slot| slot.dispatch(Some(direction)))
        {
            schedule.enqueue(action);
        }
    }

    schedule.wait(config.pacing.shambler_execute_ms).end_decision();
}

/// Walks toward the player within its move budget, never onto the player's
/// cell, and strikes if that leaves it adjacent.
fn brute(
    enemy: &mut Enemy,
    path: &[Direction],
    config: &CombatConfig,
    schedule: &mut DecisionSchedule,
) {
    schedule.wait(config.pacing.brute_think_ms);

    let move_budget = enemy.action(ActionKind::Move).map_or(0, |slot| slot.uses()) as usize;
    let steps = path.len().saturating_sub(1).min(move_budget);

    let mut taken = 0;
    for (index, &direction) in path.iter().take(steps).enumerate() {
        let Some(action) = enemy
            .action_mut(ActionKind::Move)
            .and_then(|slot| slot.dispatch(Some(direction)))
        else {
            break;
        };
        if index > 0 {
            schedule.wait(config.pacing.brute_step_ms);
        }
        schedule.enqueue(action);
        taken += 1;
    }

    if path.len() - taken == 1 {
        let toward_player = path[taken];
        if let Some(action) = enemy
            .action_mut(ActionKind::Attack)
            .and_then(|slot| slot.dispatch(Some(toward_player)))
        {
            schedule.wait(config.pacing.brute_step_ms).enqueue(action);
        }
    }

    schedule.wait(config.pacing.brute_execute_ms).end_decision();
}
