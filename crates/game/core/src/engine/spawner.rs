//! Runtime creation of enemies and hazards.

use crate::config::CombatConfig;
use crate::state::{
    CombatState, Enemy, EnemyKind, EntityId, Hazard, HazardType, Position, StateError,
    TurnCapable, TurnRole,
};

/// What to create and where.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Spawn {
    /// Reinforcements placed by content hooks; no built-in action creates enemies.
    Enemy {
        kind: EnemyKind,
        position: Position,
    },
    Hazard {
        hazard_type: HazardType,
        position: Position,
    },
}

/// Receipt for a spawned participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnRecord {
    pub id: EntityId,
    pub position: Position,
    pub role: TurnRole,
    /// The turn order must be rebuilt to include this participant.
    pub turn_capable: bool,
}

/// Inserts a new participant into `state` immediately.
pub fn spawn(
    state: &mut CombatState,
    spawn: Spawn,
    config: &CombatConfig,
) -> Result<SpawnRecord, StateError> {
    match spawn {
        Spawn::Enemy { kind, position } => {
            let enemy = Enemy::spawn(kind, position, config);
            let turn_capable = enemy.can_take_turn();
            let id = state.add_enemy(enemy)?;
            Ok(SpawnRecord {
                id,
                position,
                role: TurnRole::Enemy,
                turn_capable,
            })
        }
        Spawn::Hazard {
            hazard_type,
            position,
        } => {
            let hazard = Hazard::spawn(hazard_type, position, config);
            let turn_capable = hazard.can_take_turn();
            let id = state.add_hazard(hazard)?;
            Ok(SpawnRecord {
                id,
                position,
                role: TurnRole::Hazard,
                turn_capable,
            })
        }
    }
}
