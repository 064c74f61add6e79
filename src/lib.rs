//! Waffle Helper
//!
//! An interactive helper for Waffle word puzzles: enter the board, then swap
//! tiles by hand, lock the ones you are sure of, and undo or reset as you go.
//! It never solves the puzzle for you.
//!
//! # Quick Start
//!
//! ```rust
//! use std::time::Instant;
//! use waffle_helper::core::{Position, Session};
//!
//! let mut session = Session::parse("bnoad/ipl/aarli/acn/lskmy").unwrap();
//! let now = Instant::now();
//!
//! // Select a tile, then click another to swap their letters
//! session.click(Position::new(0, 0), now);
//! session.click(Position::new(0, 1), now);
//! assert_eq!(session.swap_count(), 1);
//! ```

// Core domain types
pub mod core;

// Runtime settings
pub mod config;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
