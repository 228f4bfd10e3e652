//! Deterministic combat rules shared by the runtime and offline tools.
//!
//! `combat-core` owns the canonical rules of a tactical encounter: the entity
//! model, action resolution, the turn state machine and the enemy/hazard
//! decision routines. Nothing here sleeps, logs or performs I/O; pacing and
//! presentation are layered on top by `combat-runtime`.
pub mod action;
pub mod ai;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod pathfinding;
pub mod state;

pub use action::{
    ActionError, ActionKind, ActionOutcome, ActionTransition, ActionWithUses, AnimationBatch,
    AnimationCue, AreaOfEffect, AreaShape, CombatAction, ComboList, QueuedAction,
};
pub use config::{CombatConfig, PacingConfig};
pub use engine::{
    ActionExecutor, AnimationSink, CombatEngine, CombatOutcome, DecisionSchedule, DecisionStep,
    EngineError, ExecutionStep, ExecutorError, InputError, InputMode, PlayerController,
    ScheduledStep, Spawn, SpawnRecord, TurnEnd, TurnError, TurnManager, TurnPhase,
};
pub use env::{CombatRng, PcgRng, Settings, SpeedSetting};
pub use error::{ErrorSeverity, GameError};
pub use pathfinding::find_path;
pub use state::{
    CombatMap, CombatState, Direction, Enemy, EnemyKind, EntityCore, EntityId, Hazard, HazardKind,
    HazardType, IdGenerator, Occupant, Player, Position, ResourceMeter, StateError, TurnRole,
    TurnTaker,
};
