//! Area-of-effect shapes and cell resolution.

use crate::state::{CombatMap, Direction, Occupant, Position};

/// Geometric footprint of an area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AreaShape {
    /// Straight band starting next to the origin. `width` lanes wide, centered
    /// on the origin's row or column.
    Line { direction: Direction, width: u32 },

    /// Square of Chebyshev radius `range` around the origin, origin included.
    Burst,
}

/// Set of cells an action touches, relative to its origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaOfEffect {
    pub range: u32,
    pub shape: AreaShape,
    /// Lines stop at (and include) the first occupied cell of each lane.
    pub requires_clear_path: bool,
}

impl AreaOfEffect {
    pub const fn line(direction: Direction, range: u32, width: u32) -> Self {
        Self {
            range,
            shape: AreaShape::Line { direction, width },
            requires_clear_path: false,
        }
    }

    pub const fn burst(range: u32) -> Self {
        Self {
            range,
            shape: AreaShape::Burst,
            requires_clear_path: false,
        }
    }

    pub const fn with_clear_path(mut self, requires_clear_path: bool) -> Self {
        self.requires_clear_path = requires_clear_path;
        self
    }

    /// Resolves the in-bounds cells covered from `origin`.
    ///
    /// A range of zero covers the origin cell only, whatever the shape. With a
    /// clear path required, every occupant ends its lane.
    pub fn cells(&self, origin: Position, map: &CombatMap) -> Vec<Position> {
        self.cells_through(origin, map, |_| true)
    }

    /// Like [`AreaOfEffect::cells`], but a clear-path lane only ends on
    /// occupants for which `stops` holds.
    pub fn cells_through(
        &self,
        origin: Position,
        map: &CombatMap,
        stops: impl Fn(Occupant) -> bool,
    ) -> Vec<Position> {
        if self.range == 0 {
            return if map.contains(origin) {
                vec![origin]
            } else {
                Vec::new()
            };
        }

        match self.shape {
            AreaShape::Line { direction, width } => {
                self.line_cells(origin, direction, width, map, &stops)
            }
            AreaShape::Burst => {
                let radius = self.range as i32;
                let mut cells = Vec::new();
                for y in origin.y - radius..=origin.y + radius {
                    for x in origin.x - radius..=origin.x + radius {
                        let cell = Position::new(x, y);
                        if map.contains(cell) {
                            cells.push(cell);
                        }
                    }
                }
                cells
            }
        }
    }

    fn line_cells(
        &self,
        origin: Position,
        direction: Direction,
        width: u32,
        map: &CombatMap,
        stops: &impl Fn(Occupant) -> bool,
    ) -> Vec<Position> {
        let width = width.max(1) as i32;
        let lateral = direction.perpendicular();
        let first_lane = -(width - 1) / 2;

        let mut cells = Vec::new();
        for lane in first_lane..first_lane + width {
            let lane_origin = origin.offset(lateral, lane);
            for step in 1..=self.range as i32 {
                let cell = lane_origin.offset(direction, step);
                if !map.contains(cell) {
                    break;
                }
                cells.push(cell);
                if self.requires_clear_path
                    && let Ok(Some(occupant)) = map.occupant_at(cell)
                    && stops(occupant)
                {
                    break;
                }
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EntityId, Occupant};

    #[test]
    fn zero_range_covers_the_origin() {
        let map = CombatMap::new(3, 3);
        let area = AreaOfEffect::line(Direction::Left, 0, 1);
        assert_eq!(area.cells(Position::new(1, 1), &map), vec![Position::new(1, 1)]);
    }

    #[test]
    fn line_is_clipped_by_the_map_edge() {
        let map = CombatMap::new(5, 1);
        let area = AreaOfEffect::line(Direction::Right, 4, 1);
        assert_eq!(
            area.cells(Position::new(2, 0), &map),
            vec![Position::new(3, 0), Position::new(4, 0)]
        );
    }

    #[test]
    fn clear_path_stops_at_first_occupant() {
        let mut map = CombatMap::new(6, 1);
        map.set_occupant(Position::new(2, 0), Occupant::Entity(EntityId(1)))
            .unwrap();
        let area = AreaOfEffect::line(Direction::Right, 5, 1).with_clear_path(true);

        assert_eq!(
            area.cells(Position::new(0, 0), &map),
            vec![Position::new(1, 0), Position::new(2, 0)]
        );
    }

    #[test]
    fn clear_path_passes_occupants_that_do_not_stop_it() {
        let mut map = CombatMap::new(6, 1);
        map.set_occupant(Position::new(1, 0), Occupant::Hazard(EntityId(7)))
            .unwrap();
        map.set_occupant(Position::new(3, 0), Occupant::Entity(EntityId(1)))
            .unwrap();
        let area = AreaOfEffect::line(Direction::Right, 5, 1).with_clear_path(true);

        let cells = area.cells_through(Position::new(0, 0), &map, |occupant| {
            occupant != Occupant::Hazard(EntityId(7))
        });
        assert_eq!(
            cells,
            vec![Position::new(1, 0), Position::new(2, 0), Position::new(3, 0)]
        );
    }

    #[test]
    fn wide_line_spreads_across_lanes() {
        let map = CombatMap::new(5, 5);
        let area = AreaOfEffect::line(Direction::Up, 1, 3);
        let cells = area.cells(Position::new(2, 2), &map);

        assert_eq!(cells.len(), 3);
        assert!(cells.contains(&Position::new(1, 1)));
        assert!(cells.contains(&Position::new(2, 1)));
        assert!(cells.contains(&Position::new(3, 1)));
    }

    #[test]
    fn burst_includes_diagonals() {
        let map = CombatMap::new(5, 5);
        let cells = AreaOfEffect::burst(1).cells(Position::new(0, 0), &map);
        assert_eq!(cells.len(), 4);
        assert!(cells.contains(&Position::new(1, 1)));
    }
}
