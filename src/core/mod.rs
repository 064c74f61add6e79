//! Core domain types for the Waffle helper
//!
//! Board geometry, tiles, parsing, swap history and the interaction state
//! machine. Nothing here touches the terminal.

mod board;
mod history;
mod position;
mod session;
mod tile;
mod timer;

pub use board::{Board, ParseError, SEGMENT_LENGTHS};
pub use history::{HistoryLog, Snapshot};
pub use position::{GRID_SIZE, HOLES, Position, TILE_COUNT};
pub use session::{ClickOutcome, InteractionState, Session};
pub use tile::{GREEN_LETTERS, Tile, TileColor};
pub use timer::{UNLOCK_WINDOW, UnlockTimer};
