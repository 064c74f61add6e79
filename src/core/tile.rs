//! Waffle tiles and their color classes

use super::Position;

/// Uppercase letters that parse as green tiles; every other uppercase letter is yellow
pub const GREEN_LETTERS: [char; 5] = ['B', 'P', 'D', 'R', 'Y'];

/// Correctness color shown on a tile
///
/// Chosen once at parse time from the case of the input character and never
/// recomputed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileColor {
    Neutral,
    Green,
    Yellow,
}

impl TileColor {
    /// Derive the color class from a raw input character
    ///
    /// Lowercase (and any caseless character except a space) is neutral. Uppercase
    /// is green when it belongs to [`GREEN_LETTERS`], otherwise yellow. A space
    /// counts as uppercase, so it comes out yellow.
    ///
    /// # Examples
    /// ```
    /// use waffle_helper::core::TileColor;
    ///
    /// assert_eq!(TileColor::from_input('b'), TileColor::Neutral);
    /// assert_eq!(TileColor::from_input('B'), TileColor::Green);
    /// assert_eq!(TileColor::from_input('A'), TileColor::Yellow);
    /// assert_eq!(TileColor::from_input(' '), TileColor::Yellow);
    /// ```
    #[must_use]
    pub fn from_input(ch: char) -> Self {
        if !ch.is_uppercase() && ch != ' ' {
            Self::Neutral
        } else if GREEN_LETTERS.contains(&ch) {
            Self::Green
        } else {
            Self::Yellow
        }
    }

    /// Single-character code used in plain-text output
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Neutral => '-',
            Self::Green => 'G',
            Self::Yellow => 'Y',
        }
    }
}

/// A lettered tile at a fixed grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub letter: char,
    pub position: Position,
    pub color: TileColor,
}

impl Tile {
    /// Build a tile from a raw input character; the letter is stored uppercased
    #[must_use]
    pub fn from_input(ch: char, position: Position) -> Self {
        Self {
            letter: ch.to_uppercase().next().unwrap_or(ch),
            position,
            color: TileColor::from_input(ch),
        }
    }
}
