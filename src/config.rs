//! Runtime settings shared by all modes
//!
//! Built from command-line flags in `main`; library code only reads it.

use crate::core::{Board, ParseError, Session, UNLOCK_WINDOW};
use std::time::Duration;

/// Demonstration board pre-filled when no board is given
pub const DEFAULT_BOARD: &str = "bnoad/ipl/aarli/acn/lskmy";

/// Settings for a helper run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperConfig {
    /// Board text used for the first session
    pub board: String,
    /// How long an unlock candidate waits for its confirming click
    pub unlock_window: Duration,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            board: DEFAULT_BOARD.to_string(),
            unlock_window: UNLOCK_WINDOW,
        }
    }
}

impl HelperConfig {
    #[must_use]
    pub fn new(board: Option<String>, unlock_ms: Option<u64>) -> Self {
        let defaults = Self::default();
        Self {
            board: board.unwrap_or(defaults.board),
            unlock_window: unlock_ms.map_or(defaults.unlock_window, Duration::from_millis),
        }
    }

    /// Parse board text into a session using these settings
    ///
    /// # Errors
    /// Returns `ParseError` if the text is not a waffle board.
    pub fn session(&self, text: &str) -> Result<Session, ParseError> {
        Board::parse(text).map(|board| Session::with_unlock_window(board, self.unlock_window))
    }
}
