use super::EntityId;

/// Which collaborator decides a turn-taker's actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnRole {
    Player,
    Enemy,
    Hazard,
}

/// One slot of the turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnTaker {
    pub id: EntityId,
    pub role: TurnRole,
}

impl TurnTaker {
    pub const fn new(id: EntityId, role: TurnRole) -> Self {
        Self { id, role }
    }

    pub const fn is_player(&self) -> bool {
        matches!(self.role, TurnRole::Player)
    }
}
