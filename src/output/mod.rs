//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{describe_outcome, print_board, print_replay_result};
pub use formatters::{board_lines, board_notation, color_key_lines, history_hint};
