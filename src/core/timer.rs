//! One-shot unlock confirmation timer
//!
//! Clicking a locked tile arms the timer for that tile. A second click before the
//! deadline confirms the unlock; otherwise the candidate lapses. Arming again
//! replaces whatever was pending, so at most one timer is ever live.
//!
//! Time is passed in by the caller rather than read from a clock, which keeps the
//! state machine deterministic.

use super::Position;
use std::time::{Duration, Instant};

/// Default confirmation window for unlocking a tile
pub const UNLOCK_WINDOW: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    position: Position,
    deadline: Instant,
}

/// Cancellable single-shot task owned by a session
#[derive(Debug, Clone)]
pub struct UnlockTimer {
    window: Duration,
    pending: Option<Pending>,
}

impl Default for UnlockTimer {
    fn default() -> Self {
        Self::new(UNLOCK_WINDOW)
    }
}

impl UnlockTimer {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Arm the timer for `position`, cancelling any earlier candidate
    pub fn arm(&mut self, position: Position, now: Instant) {
        self.pending = Some(Pending {
            position,
            deadline: now + self.window,
        });
    }

    /// Cancel the pending candidate, returning it if there was one
    pub fn cancel(&mut self) -> Option<Position> {
        self.pending.take().map(|p| p.position)
    }

    /// Fire the timer if its deadline has passed
    ///
    /// Returns the position whose candidacy lapsed.
    pub fn expire(&mut self, now: Instant) -> Option<Position> {
        match self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending = None;
                Some(pending.position)
            }
            _ => None,
        }
    }

    /// The current unlock candidate, if any
    #[must_use]
    pub fn candidate(&self) -> Option<Position> {
        self.pending.map(|p| p.position)
    }

    /// When the live timer fires
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }
}
