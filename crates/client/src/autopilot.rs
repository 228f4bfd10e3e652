//! Greedy player stand-in for headless runs.
//!
//! At the start of each decision window the pilot picks the nearest living
//! enemy, walks toward it along [`find_path`] within the Move budget and
//! spends its Attack uses if that leaves it adjacent. The plan is then fed to
//! the session one command at a time.
use std::collections::VecDeque;

use async_trait::async_trait;
use combat_core::{ActionKind, CombatState, Direction, InputMode, Position, find_path};
use combat_runtime::{PlayerCommand, PlayerInputProvider, PlayerView, Result};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Default)]
struct Plan {
    commands: VecDeque<PlayerCommand>,
    /// Set while a planned turn is being fed out.
    active: bool,
}

#[derive(Default)]
pub struct AutoPilot {
    plan: Mutex<Plan>,
}

impl AutoPilot {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerInputProvider for AutoPilot {
    async fn next_command(&self, view: PlayerView<'_>) -> Result<PlayerCommand> {
        let mut plan = self.plan.lock().await;

        let awaiting_direction = matches!(view.mode, InputMode::AwaitingDirection { .. });
        if awaiting_direction && !matches!(plan.commands.front(), Some(PlayerCommand::Direction(_)))
        {
            return Ok(PlayerCommand::Cancel);
        }

        if let Some(command) = plan.commands.pop_front() {
            return Ok(command);
        }
        if plan.active {
            plan.active = false;
            return Ok(PlayerCommand::EndTurn);
        }

        let commands = plan_turn(view.state);
        debug!(target: "combat::sim", commands = commands.len(), "Auto-pilot planned turn");
        plan.commands = commands.into();
        match plan.commands.pop_front() {
            Some(command) => {
                plan.active = true;
                Ok(command)
            }
            None => Ok(PlayerCommand::EndTurn),
        }
    }
}

/// Commands for one decision window, without the closing `EndTurn`.
pub fn plan_turn(state: &CombatState) -> Vec<PlayerCommand> {
    let player = &state.player;
    let start = player.core.position;

    let Some(target) = state
        .living_enemies()
        .map(|enemy| enemy.core.position)
        .min_by_key(|position| (start.manhattan_distance(*position), position.y, position.x))
    else {
        return Vec::new();
    };

    let slot = |kind: ActionKind| {
        player
            .ability_index(kind)
            .map(|index| (index, &player.abilities[index]))
            .filter(|(_, ability)| ability.has_uses())
    };

    let mut commands = Vec::new();
    let mut position = start;

    if position.manhattan_distance(target) > 1
        && let Some((index, ability)) = slot(ActionKind::Move)
    {
        let budget = if ability.bypasses_use_limits() {
            usize::MAX
        } else {
            ability.uses() as usize
        };
        let path = find_path(start, target, &state.occupancy());
        // The last step would enter the target's own cell.
        let walkable = path.len().saturating_sub(1);
        for direction in path.into_iter().take(walkable.min(budget)) {
            commands.push(PlayerCommand::Select(index));
            commands.push(PlayerCommand::Direction(direction));
            position = position.offset(direction, 1);
        }
    }

    if let Some(direction) = adjacent_direction(position, target)
        && let Some((index, ability)) = slot(ActionKind::Attack)
    {
        let swings = if ability.bypasses_use_limits() {
            1
        } else {
            ability.uses()
        };
        for _ in 0..swings {
            commands.push(PlayerCommand::Select(index));
            commands.push(PlayerCommand::Direction(direction));
        }
    }

    commands
}

fn adjacent_direction(from: Position, to: Position) -> Option<Direction> {
    if from.manhattan_distance(to) == 1 {
        from.direction_to(to)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{
        ActionWithUses, CombatAction, CombatConfig, Enemy, EnemyKind, IdGenerator, Player,
    };

    use super::*;

    fn state(player_at: Position, enemy_at: Position) -> CombatState {
        let id = IdGenerator::next_id();
        let player = Player::new(id, 20, player_at).with_abilities(vec![
            ActionWithUses::new(CombatAction::movement(id, None), 3),
            ActionWithUses::new(CombatAction::attack(id, None, 5, 1), 2),
        ]);
        let mut state = CombatState::new(8, 1, player);
        state
            .add_enemy(Enemy::spawn(
                EnemyKind::RustedShambler,
                enemy_at,
                &CombatConfig::default(),
            ))
            .unwrap();
        state
    }

    #[test]
    fn adjacent_enemy_is_attacked_with_every_use() {
        let commands = plan_turn(&state(Position::new(0, 0), Position::new(1, 0)));
        assert_eq!(
            commands,
            vec![
                PlayerCommand::Select(1),
                PlayerCommand::Direction(Direction::Right),
                PlayerCommand::Select(1),
                PlayerCommand::Direction(Direction::Right),
            ]
        );
    }

    #[test]
    fn distant_enemy_is_approached_within_budget() {
        let commands = plan_turn(&state(Position::new(0, 0), Position::new(6, 0)));
        assert_eq!(commands.len(), 6);
        assert!(
            commands
                .iter()
                .all(|command| matches!(
                    command,
                    PlayerCommand::Select(0) | PlayerCommand::Direction(Direction::Right)
                ))
        );
    }

    #[test]
    fn walk_then_strike_when_close_enough() {
        let commands = plan_turn(&state(Position::new(0, 0), Position::new(3, 0)));
        assert_eq!(commands.len(), 8);
        assert_eq!(commands[4], PlayerCommand::Select(1));
    }
}
