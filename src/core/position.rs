//! Grid coordinates on the 5×5 waffle
//!
//! The waffle has four structural holes at `(1,1)`, `(1,3)`, `(3,1)` and `(3,3)`:
//! every position whose row and column are both odd.

use std::fmt;

/// Side length of the waffle grid
pub const GRID_SIZE: usize = 5;

/// Number of tiles on a waffle (25 cells minus 4 holes)
pub const TILE_COUNT: usize = 21;

/// The fixed hole positions, in row-major order
pub const HOLES: [Position; 4] = [
    Position::new(1, 1),
    Position::new(1, 3),
    Position::new(3, 1),
    Position::new(3, 3),
];

/// A cell on the waffle grid (row, column), both in `0..5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[inline]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Create a position, returning `None` when it falls outside the grid
    #[must_use]
    pub const fn checked(row: usize, col: usize) -> Option<Self> {
        if row < GRID_SIZE && col < GRID_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// True for the four structural holes
    #[inline]
    #[must_use]
    pub const fn is_hole(self) -> bool {
        self.row % 2 == 1 && self.col % 2 == 1
    }

    /// True when the position is on the grid and not a hole
    #[inline]
    #[must_use]
    pub const fn holds_tile(self) -> bool {
        self.row < GRID_SIZE && self.col < GRID_SIZE && !self.is_hole()
    }

    /// Iterate every grid cell in row-major order, holes included
    pub fn all() -> impl Iterator<Item = Self> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Self::new(row, col)))
    }

    /// Iterate the 21 tile-bearing positions in row-major order
    pub fn tiles() -> impl Iterator<Item = Self> {
        Self::all().filter(|p| !p.is_hole())
    }

    /// Step one cell in a direction, staying on the grid
    #[must_use]
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Self::checked(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}
