pub mod common;
pub mod entities;
pub mod turn;
pub mod world;

pub use common::{Direction, EntityId, IdGenerator, Position, ResourceMeter};

pub use entities::{
    Blocking, Combatant, DamageReport, Damageable, Enemy, EnemyKind, EntityCore, Hazard,
    HazardKind, HazardType, Player, TurnCapable,
};

pub use turn::{TurnRole, TurnTaker};

pub use world::{CombatMap, Occupant};
