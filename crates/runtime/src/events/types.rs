//! Event payloads broadcast by a combat session.

use combat_core::{
    AnimationBatch, CombatAction, CombatOutcome, EntityId, SpawnRecord, TurnTaker,
};
use serde::{Deserialize, Serialize};

/// Everything observable that happens during a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    TurnStarted {
        taker: TurnTaker,
        round: u32,
    },

    /// An action joined the combo list. `entry` is the compressed combo entry
    /// it merged into, rendered like `Move LEFT x3`.
    DecisionQueued {
        actor: EntityId,
        entry: String,
    },

    /// Player input that was rejected without changing state.
    InputRejected {
        code: String,
        error: String,
    },

    ActionResolved {
        action: CombatAction,
        animations: AnimationBatch,
    },

    /// A stale action was skipped (dead actor, spent canister).
    ActionSkipped {
        action: CombatAction,
        error: String,
    },

    EntityDied {
        entity: EntityId,
    },

    EntitySpawned {
        record: SpawnRecord,
    },

    TurnEnded {
        taker: Option<TurnTaker>,
        /// Burning floors that burnt out at the end of this turn.
        expired: Vec<EntityId>,
    },

    CombatEnded {
        outcome: CombatOutcome,
        /// Follow-up event the host game should raise.
        follow_up_event: Option<String>,
    },
}

impl CombatEvent {
    pub fn topic(&self) -> Topic {
        match self {
            CombatEvent::TurnStarted { .. } | CombatEvent::TurnEnded { .. } => Topic::Turn,
            CombatEvent::DecisionQueued { .. } | CombatEvent::InputRejected { .. } => {
                Topic::Decision
            }
            CombatEvent::ActionResolved { .. }
            | CombatEvent::ActionSkipped { .. }
            | CombatEvent::EntityDied { .. }
            | CombatEvent::EntitySpawned { .. } => Topic::Action,
            CombatEvent::CombatEnded { .. } => Topic::Combat,
        }
    }
}

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Turn boundaries
    Turn,
    /// Combo list changes and rejected input
    Decision,
    /// Action resolution and its consequences
    Action,
    /// Session end
    Combat,
}
