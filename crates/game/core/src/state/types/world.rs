use crate::state::InvalidPositionError;

use super::{EntityId, Position};

/// What a grid cell points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Occupant {
    /// The player or an enemy.
    Entity(EntityId),
    Hazard(EntityId),
}

impl Occupant {
    pub fn id(self) -> EntityId {
        match self {
            Occupant::Entity(id) | Occupant::Hazard(id) => id,
        }
    }
}

/// Fixed-size occupancy grid, one optional occupant per cell.
///
/// Instances are projections of [`CombatState`](crate::state::CombatState);
/// cloning yields an independent copy of the occupancy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatMap {
    width: u32,
    height: u32,
    cells: Vec<Option<Occupant>>,
}

impl CombatMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    fn index(&self, position: Position) -> Result<usize, InvalidPositionError> {
        if !self.contains(position) {
            return Err(InvalidPositionError {
                position,
                width: self.width,
                height: self.height,
            });
        }
        Ok(position.y as usize * self.width as usize + position.x as usize)
    }

    pub fn set_occupant(
        &mut self,
        position: Position,
        occupant: Occupant,
    ) -> Result<(), InvalidPositionError> {
        let index = self.index(position)?;
        self.cells[index] = Some(occupant);
        Ok(())
    }

    /// Empties a cell, returning whatever occupied it.
    pub fn clear_occupant(
        &mut self,
        position: Position,
    ) -> Result<Option<Occupant>, InvalidPositionError> {
        let index = self.index(position)?;
        Ok(self.cells[index].take())
    }

    pub fn occupant_at(
        &self,
        position: Position,
    ) -> Result<Option<Occupant>, InvalidPositionError> {
        let index = self.index(position)?;
        Ok(self.cells[index])
    }

    /// In bounds and unoccupied.
    pub fn is_vacant(&self, position: Position) -> bool {
        matches!(self.occupant_at(position), Ok(None))
    }

    /// Iterates over every occupied cell in reading order.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Occupant)> + '_ {
        let width = self.width.max(1) as usize;
        self.cells.iter().enumerate().filter_map(move |(index, cell)| {
            cell.map(|occupant| {
                (
                    Position::new((index % width) as i32, (index / width) as i32),
                    occupant,
                )
            })
        })
    }
}
