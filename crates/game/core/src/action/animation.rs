//! Declarative animation descriptors handed to the presentation layer.

use crate::state::{Direction, EntityId, Position};

use super::CombatAction;

/// A single visual beat produced while resolving an action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationCue {
    Move {
        entity: EntityId,
        from: Position,
        to: Position,
    },
    /// Movement into a blocked cell or off the grid.
    Bump {
        entity: EntityId,
        direction: Direction,
    },
    Strike {
        entity: EntityId,
        cells: Vec<Position>,
    },
    Hit {
        entity: EntityId,
        amount: u32,
    },
    Guard {
        entity: EntityId,
        reduction: u32,
    },
    /// Forced movement caused by push or pull.
    Slide {
        entity: EntityId,
        from: Position,
        to: Position,
    },
    /// An ability that found nothing to act on.
    Fizzle {
        entity: EntityId,
    },
    Explosion {
        origin: Position,
        cells: Vec<Position>,
    },
    Death {
        entity: EntityId,
    },
    Spawn {
        entity: EntityId,
        position: Position,
    },
}

/// Everything the animator must play for one resolved action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationBatch {
    pub action: CombatAction,
    pub cues: Vec<AnimationCue>,
}

impl AnimationBatch {
    pub fn new(action: CombatAction, cues: Vec<AnimationCue>) -> Self {
        Self { action, cues }
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}
