//! Grid pathfinding over an occupancy projection.

use std::collections::{HashMap, VecDeque};

use crate::state::{CombatMap, Direction, Position};

/// Shortest 4-connected route from `start` to `goal` as a list of steps.
///
/// Breadth-first; neighbours are expanded in [`Direction::PRIORITY`] order so
/// ties always resolve the same way. Every occupied cell other than `goal` is
/// impassable. Returns an empty path when `start == goal`, when either end
/// lies outside the map, or when the goal is unreachable.
pub fn find_path(start: Position, goal: Position, map: &CombatMap) -> Vec<Direction> {
    if start == goal || !map.contains(start) || !map.contains(goal) {
        return Vec::new();
    }

    let mut came_from: HashMap<Position, (Position, Direction)> = HashMap::new();
    let mut frontier = VecDeque::from([start]);

    while let Some(current) = frontier.pop_front() {
        if current == goal {
            return reconstruct(&came_from, start, goal);
        }

        for direction in Direction::PRIORITY {
            let next = current.offset(direction, 1);
            if next == start || came_from.contains_key(&next) {
                continue;
            }
            let passable = next == goal || map.is_vacant(next);
            if !passable {
                continue;
            }
            came_from.insert(next, (current, direction));
            frontier.push_back(next);
        }
    }

    Vec::new()
}

fn reconstruct(
    came_from: &HashMap<Position, (Position, Direction)>,
    start: Position,
    goal: Position,
) -> Vec<Direction> {
    let mut steps = Vec::new();
    let mut cursor = goal;
    while cursor != start {
        let Some(&(previous, direction)) = came_from.get(&cursor) else {
            return Vec::new();
        };
        steps.push(direction);
        cursor = previous;
    }
    steps.reverse();
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EntityId, Occupant};

    #[test]
    fn straight_line_when_unobstructed() {
        let map = CombatMap::new(5, 5);
        let path = find_path(Position::new(0, 2), Position::new(3, 2), &map);
        assert_eq!(path, vec![Direction::Right; 3]);
    }

    #[test]
    fn ties_follow_direction_priority() {
        let map = CombatMap::new(3, 3);
        // Down is expanded before Right, so the vertical leg comes first.
        let path = find_path(Position::new(0, 0), Position::new(1, 1), &map);
        assert_eq!(path, vec![Direction::Down, Direction::Right]);
        assert_eq!(path, find_path(Position::new(0, 0), Position::new(1, 1), &map));
    }

    #[test]
    fn occupied_goal_is_reachable_but_other_occupants_block() {
        let mut map = CombatMap::new(3, 3);
        map.set_occupant(Position::new(1, 0), Occupant::Hazard(EntityId(1)))
            .unwrap();
        map.set_occupant(Position::new(2, 0), Occupant::Entity(EntityId(2)))
            .unwrap();

        let path = find_path(Position::new(0, 0), Position::new(2, 0), &map);
        assert_eq!(
            path,
            vec![
                Direction::Down,
                Direction::Right,
                Direction::Right,
                Direction::Up
            ]
        );
    }

    #[test]
    fn empty_when_trivial_or_unreachable() {
        let mut map = CombatMap::new(3, 1);
        assert!(find_path(Position::new(1, 0), Position::new(1, 0), &map).is_empty());
        assert!(find_path(Position::new(0, 0), Position::new(7, 0), &map).is_empty());

        map.set_occupant(Position::new(1, 0), Occupant::Hazard(EntityId(1)))
            .unwrap();
        assert!(find_path(Position::new(0, 0), Position::new(2, 0), &map).is_empty());
    }
}
