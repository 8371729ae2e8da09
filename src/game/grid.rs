//! Grid coordinates and movement directions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A cell on the battle grid.
///
/// Serialized as a two-element array `[x, y]`, which is the shape replay
/// consumers expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u16; 2]", into = "[u16; 2]")]
pub struct Position {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two cells.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) as u32 + self.y.abs_diff(other.y) as u32
    }

    /// Check whether this position lies inside a `width × height` grid.
    #[must_use]
    pub const fn in_bounds(self, width: u16, height: u16) -> bool {
        self.x < width && self.y < height
    }

    /// One step in `direction`, clamped to the grid edges.
    ///
    /// Stepping off the grid leaves the coordinate on the edge cell.
    #[must_use]
    pub fn step(self, direction: Direction, width: u16, height: u16) -> Self {
        match direction {
            Direction::Up => Self::new(self.x, self.y.saturating_sub(1)),
            Direction::Down => {
                Self::new(self.x, (self.y + 1).min(height.saturating_sub(1)))
            }
            Direction::Left => Self::new(self.x.saturating_sub(1), self.y),
            Direction::Right => {
                Self::new((self.x + 1).min(width.saturating_sub(1)), self.y)
            }
        }
    }
}

impl From<[u16; 2]> for Position {
    fn from([x, y]: [u16; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Position> for [u16; 2] {
    fn from(pos: Position) -> Self {
        [pos.x, pos.y]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A movement direction. `Up` decreases y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The token naming this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let a = Position::new(3, 3);
        assert_eq!(a.manhattan_distance(a), 0);
        assert_eq!(a.manhattan_distance(Position::new(4, 3)), 1);
        assert_eq!(a.manhattan_distance(Position::new(4, 4)), 2);
        assert_eq!(a.manhattan_distance(Position::new(0, 7)), 7);
    }

    #[test]
    fn test_step_interior() {
        let p = Position::new(4, 3);
        assert_eq!(p.step(Direction::Up, 9, 7), Position::new(4, 2));
        assert_eq!(p.step(Direction::Down, 9, 7), Position::new(4, 4));
        assert_eq!(p.step(Direction::Left, 9, 7), Position::new(3, 3));
        assert_eq!(p.step(Direction::Right, 9, 7), Position::new(5, 3));
    }

    #[test]
    fn test_step_clamps_at_edges() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.step(Direction::Up, 9, 7), corner);
        assert_eq!(corner.step(Direction::Left, 9, 7), corner);

        let far = Position::new(8, 6);
        assert_eq!(far.step(Direction::Down, 9, 7), far);
        assert_eq!(far.step(Direction::Right, 9, 7), far);
    }

    #[test]
    fn test_position_serializes_as_array() {
        let json = serde_json::to_string(&Position::new(7, 3)).unwrap();
        assert_eq!(json, "[7,3]");
        let back: Position = serde_json::from_str("[1,2]").unwrap();
        assert_eq!(back, Position::new(1, 2));
    }

    #[test]
    fn test_direction_tokens() {
        for dir in Direction::ALL {
            assert_eq!(dir.as_str().parse::<Direction>(), Ok(dir));
        }
        assert!("north".parse::<Direction>().is_err());
    }
}
