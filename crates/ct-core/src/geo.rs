//! Grid geometry: integer cell coordinates and compass directions.
//!
//! The simulation y-axis points **up**: `Direction::Up` is `+y`.  Map text is
//! stored top-down, so loaders flip rows with `y = height - row - 1`.
//!
//! `Coord` uses signed components so neighbour arithmetic can step off the
//! grid; bounds are enforced by the grid, never by wrapping.

use std::fmt;

// ── Coord ────────────────────────────────────────────────────────────────────

/// A cell coordinate on the city grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `dir`.
    #[inline]
    pub fn step(self, dir: Direction) -> Coord {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy)
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Coord {
        Coord { x: self.x + dx, y: self.y + dy }
    }

    /// `(dx, dy)` from `self` to `other`.
    #[inline]
    pub fn delta_to(self, other: Coord) -> (i32, i32) {
        (other.x - self.x, other.y - self.y)
    }

    /// Squared Euclidean distance.  Exact in integers, so it is what
    /// nearest-destination comparisons use.
    #[inline]
    pub fn distance_sq(self, other: Coord) -> i64 {
        let dx = (other.x - self.x) as i64;
        let dy = (other.y - self.y) as i64;
        dx * dx + dy * dy
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Coord { x, y }
    }
}

// ── Direction ────────────────────────────────────────────────────────────────

/// One of the four compass directions a road can carry traffic in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Neighbour generation order used by pathfinding.  Part of the
    /// deterministic tie-breaking contract; do not reorder.
    pub const SEARCH_ORDER: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Right, Direction::Left];

    /// Unit step `(dx, dy)` with `Up = +y`.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up    => (0, 1),
            Direction::Down  => (0, -1),
            Direction::Left  => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Inverse of [`delta`](Self::delta) for unit orthogonal steps.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        match (dx, dy) {
            (0, 1)  => Some(Direction::Up),
            (0, -1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0)  => Some(Direction::Right),
            _       => None,
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up    => Direction::Down,
            Direction::Down  => Direction::Up,
            Direction::Left  => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Rotate 90° clockwise (the direction of a right turn).
    #[inline]
    pub fn right_of(self) -> Direction {
        match self {
            Direction::Up    => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down  => Direction::Left,
            Direction::Left  => Direction::Up,
        }
    }

    /// Rotate 90° counter-clockwise (the direction of a left turn).
    #[inline]
    pub fn left_of(self) -> Direction {
        self.right_of().opposite()
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Label used by legends and output files.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up    => "Up",
            Direction::Down  => "Down",
            Direction::Left  => "Left",
            Direction::Right => "Right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Up"    => Ok(Direction::Up),
            "Down"  => Ok(Direction::Down),
            "Left"  => Ok(Direction::Left),
            "Right" => Ok(Direction::Right),
            other   => Err(format!("unknown direction {other:?}")),
        }
    }
}
