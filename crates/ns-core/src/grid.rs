//! Grid coordinates and 8-connected stepping.
//!
//! Agents move one cell per step in any of the eight directions, so the
//! natural metric is Chebyshev distance: the number of steps between two
//! cells on an open grid.

use std::fmt;

/// A cell on the world grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

/// Offsets of the eight neighbours, orthogonals first.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, -1), (1, 0), (0, 1), (-1, 0),
    (1, -1), (1, 1), (-1, 1), (-1, -1),
];

impl Pos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Pos {
        Pos::new(self.x + dx, self.y + dy)
    }

    /// Number of 8-connected steps between `self` and `other`.
    #[inline]
    pub fn chebyshev(self, other: Pos) -> u32 {
        (self.x - other.x).unsigned_abs().max((self.y - other.y).unsigned_abs())
    }

    /// Squared Euclidean distance; used to break ties among equal Chebyshev
    /// distances so diagonals do not look free.
    #[inline]
    pub fn distance_sq(self, other: Pos) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// `true` if `other` is one of the eight neighbours (not `self`).
    #[inline]
    pub fn is_adjacent(self, other: Pos) -> bool {
        self != other && self.chebyshev(other) == 1
    }

    /// The cell one step from `self` toward `goal` (diagonal allowed).
    /// Returns `self` when already there.
    #[inline]
    pub fn step_toward(self, goal: Pos) -> Pos {
        self.offset((goal.x - self.x).signum(), (goal.y - self.y).signum())
    }

    /// Single-axis steps toward `goal`: the dominant axis first, then the
    /// other one.  Axes with zero delta are omitted.
    pub fn axis_steps_toward(self, goal: Pos) -> Vec<Pos> {
        let dx = (goal.x - self.x).signum();
        let dy = (goal.y - self.y).signum();
        let horizontal = (dx != 0).then(|| self.offset(dx, 0));
        let vertical = (dy != 0).then(|| self.offset(0, dy));
        let x_dominant = (goal.x - self.x).abs() >= (goal.y - self.y).abs();
        let ordered = if x_dominant { [horizontal, vertical] } else { [vertical, horizontal] };
        ordered.into_iter().flatten().collect()
    }

    /// All eight neighbours in `NEIGHBOR_OFFSETS` order.
    pub fn neighbors(self) -> impl Iterator<Item = Pos> {
        NEIGHBOR_OFFSETS.into_iter().map(move |(dx, dy)| self.offset(dx, dy))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
