use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Unique identifier for any entity or hazard tracked in a combat session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

static NEXT_ENTITY_ID: AtomicU32 = AtomicU32::new(1);

/// Process-wide source of fresh [`EntityId`]s.
///
/// Ids are never reused within a process, so entities spawned mid-combat can
/// never collide with ones created by the encounter factory.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdGenerator;

impl IdGenerator {
    pub fn next_id() -> EntityId {
        EntityId(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Discrete grid position expressed in tile coordinates.
///
/// `y` grows downward (row index of the textual map layout).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position `steps` tiles away in `direction`.
    pub fn offset(self, direction: Direction, steps: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx * steps, self.y + dy * steps)
    }

    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Returns the direction pointing straight at `other` when both share a
    /// row or column.
    pub fn direction_to(self, other: Position) -> Option<Direction> {
        match (other.x - self.x, other.y - self.y) {
            (0, dy) if dy < 0 => Some(Direction::Up),
            (0, dy) if dy > 0 => Some(Direction::Down),
            (dx, 0) if dx < 0 => Some(Direction::Left),
            (dx, 0) if dx > 0 => Some(Direction::Right),
            _ => None,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal direction on the combat grid.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Expansion order used wherever ties must be broken deterministically.
    pub const PRIORITY: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Direction rotated a quarter turn; used for the lateral spread of wide areas.
    pub const fn perpendicular(self) -> Self {
        match self {
            Direction::Up | Direction::Down => Direction::Right,
            Direction::Left | Direction::Right => Direction::Down,
        }
    }
}

/// Integer resource meter (hit points) tracked per combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Lowers the meter, saturating at zero. Returns the amount actually removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }

    pub fn deplete(&mut self) {
        self.current = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_follow_screen_coordinates() {
        let origin = Position::new(3, 3);
        assert_eq!(origin.offset(Direction::Up, 1), Position::new(3, 2));
        assert_eq!(origin.offset(Direction::Down, 2), Position::new(3, 5));
        assert_eq!(origin.offset(Direction::Left, 3), Position::new(0, 3));
        assert_eq!(origin.offset(Direction::Right, 1), Position::new(4, 3));
    }

    #[test]
    fn direction_to_requires_shared_axis() {
        let origin = Position::new(2, 2);
        assert_eq!(origin.direction_to(Position::new(2, 0)), Some(Direction::Up));
        assert_eq!(origin.direction_to(Position::new(5, 2)), Some(Direction::Right));
        assert_eq!(origin.direction_to(Position::new(3, 3)), None);
        assert_eq!(origin.direction_to(origin), None);
    }

    #[test]
    fn meter_never_underflows() {
        let mut hp = ResourceMeter::full(5);
        assert_eq!(hp.drain(3), 3);
        assert_eq!(hp.drain(10), 2);
        assert!(hp.is_depleted());
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("left".parse::<Direction>().ok(), Some(Direction::Left));
        assert_eq!(Direction::Down.to_string(), "DOWN");
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = IdGenerator::next_id();
        let b = IdGenerator::next_id();
        assert_ne!(a, b);
    }
}
