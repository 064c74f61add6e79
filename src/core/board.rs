//! Waffle board representation and parsing
//!
//! A board is a 5×5 grid of optional tiles. Rows 0, 2 and 4 are full words; rows
//! 1 and 3 only carry tiles in columns 0, 2 and 4.
//!
//! Input notation is five slash-separated segments of 5, 3, 5, 3 and 5
//! characters. Case picks the tile color (see [`TileColor::from_input`]).

use super::{GRID_SIZE, Position, Tile, TileColor};
use std::fmt;

/// Required character count of each slash-separated segment
pub const SEGMENT_LENGTHS: [usize; 5] = [5, 3, 5, 3, 5];

/// Error type for board text that does not match the waffle shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Wrong number of `/`-separated segments
    SegmentCount(usize),
    /// A segment has the wrong length (`segment` is 1-based)
    SegmentLength {
        segment: usize,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SegmentCount(count) => {
                write!(
                    f,
                    "Please enter 5 sections separated by slashes (got {count})"
                )
            }
            Self::SegmentLength {
                segment,
                expected,
                actual,
            } => write!(
                f,
                "Section {segment} should have {expected} characters (got {actual})"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// The waffle grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Tile>; GRID_SIZE]; GRID_SIZE],
}

impl Board {
    /// Parse slash-delimited board text
    ///
    /// Surrounding whitespace is trimmed from the whole input and from each
    /// segment. Characters are not checked for being alphabetic.
    ///
    /// # Errors
    /// Returns `ParseError` if there are not exactly five segments or a segment
    /// length differs from [`SEGMENT_LENGTHS`].
    ///
    /// # Examples
    /// ```
    /// use waffle_helper::core::{Board, Position};
    ///
    /// let board = Board::parse("bnoad/ipl/aarli/acn/lskmy").unwrap();
    /// assert_eq!(board.letter_at(Position::new(0, 0)), Some('B'));
    /// assert!(board.get(Position::new(1, 1)).is_none());
    ///
    /// assert!(Board::parse("bnoad/ipl").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let segments: Vec<&str> = text.trim().split('/').map(str::trim).collect();

        if segments.len() != SEGMENT_LENGTHS.len() {
            return Err(ParseError::SegmentCount(segments.len()));
        }

        for (i, (segment, &expected)) in segments.iter().zip(&SEGMENT_LENGTHS).enumerate() {
            let actual = segment.chars().count();
            if actual != expected {
                return Err(ParseError::SegmentLength {
                    segment: i + 1,
                    expected,
                    actual,
                });
            }
        }

        let mut cells = [[None; GRID_SIZE]; GRID_SIZE];
        for (row, segment) in segments.iter().enumerate() {
            // Short rows step over the holes in columns 1 and 3
            let step = if row % 2 == 0 { 1 } else { 2 };
            for (i, ch) in segment.chars().enumerate() {
                let position = Position::new(row, i * step);
                cells[row][position.col] = Some(Tile::from_input(ch, position));
            }
        }

        Ok(Self { cells })
    }

    /// Get the tile at a position, or `None` for a hole or off-grid position
    #[inline]
    #[must_use]
    pub fn get(&self, position: Position) -> Option<&Tile> {
        self.cells.get(position.row)?.get(position.col)?.as_ref()
    }

    /// Letter shown at a position
    #[inline]
    #[must_use]
    pub fn letter_at(&self, position: Position) -> Option<char> {
        self.get(position).map(|tile| tile.letter)
    }

    /// Color class at a position
    #[inline]
    #[must_use]
    pub fn color_at(&self, position: Position) -> Option<TileColor> {
        self.get(position).map(|tile| tile.color)
    }

    /// Exchange the letters of two tiles
    ///
    /// Colors and positions stay where they are: only the letters move. Returns
    /// `false` without touching the board if either position is a hole or off
    /// the grid, or if both positions are the same.
    pub fn swap_letters(&mut self, a: Position, b: Position) -> bool {
        if a == b {
            return false;
        }
        let (Some(first), Some(second)) = (self.letter_at(a), self.letter_at(b)) else {
            return false;
        };

        if let Some(tile) = self.cells[a.row][a.col].as_mut() {
            tile.letter = second;
        }
        if let Some(tile) = self.cells[b.row][b.col].as_mut() {
            tile.letter = first;
        }
        true
    }

    /// Iterate all tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten().flatten()
    }

    /// Tile letters in row-major order
    #[must_use]
    pub fn letters(&self) -> String {
        self.tiles().map(|tile| tile.letter).collect()
    }

    /// Letters of one grid row, with `None` for holes
    #[must_use]
    pub fn row(&self, row: usize) -> [Option<char>; GRID_SIZE] {
        let mut letters = [None; GRID_SIZE];
        for (col, slot) in letters.iter_mut().enumerate() {
            *slot = self.letter_at(Position::new(row, col));
        }
        letters
    }
}
