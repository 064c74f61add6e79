//! Interactive tile-swap session
//!
//! A [`Session`] owns everything created by a successful parse: the board, the
//! lock set, the swap history, the current selection, the unlock timer and any
//! tile being dragged. Input handlers call into it; displays only read from it.
//!
//! Click handling, in priority order, for a tile at `p`:
//! 1. `p` locked and not the unlock candidate: arm the unlock timer for `p`.
//! 2. `p` locked and the unlock candidate: unlock `p`, back to idle.
//! 3. `p` already selected: lock `p`, back to idle.
//! 4. another tile selected: swap letters, record history, back to idle.
//! 5. otherwise: select `p`.
//!
//! Invalid input (holes, off-grid positions, moves into locked tiles) is ignored
//! rather than reported as an error.

use super::{Board, HistoryLog, ParseError, Position, UnlockTimer};
use rustc_hash::FxHashSet;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// What the session is waiting for, derived from its fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Selected(Position),
    LockConfirmPending(Position),
}

/// Result of a click or drop, reported back to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Input had no effect
    Ignored,
    Selected(Position),
    Locked(Position),
    Swapped {
        from: Position,
        to: Position,
        swap_count: u32,
    },
    /// A locked tile now awaits a confirming second click
    UnlockArmed(Position),
    Unlocked(Position),
}

/// All mutable state for one parsed board
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    locks: FxHashSet<Position>,
    history: HistoryLog,
    selected: Option<Position>,
    unlock: UnlockTimer,
    dragged: Option<Position>,
}

impl Session {
    /// Start a session on a parsed board with the default unlock window
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self::with_unlock_window(board, super::UNLOCK_WINDOW)
    }

    #[must_use]
    pub fn with_unlock_window(board: Board, window: Duration) -> Self {
        Self {
            history: HistoryLog::new(board.clone()),
            board,
            locks: FxHashSet::default(),
            selected: None,
            unlock: UnlockTimer::new(window),
            dragged: None,
        }
    }

    /// Parse board text and start a session on it
    ///
    /// # Errors
    /// Returns `ParseError` if the text does not describe a waffle board.
    ///
    /// # Examples
    /// ```
    /// use std::time::Instant;
    /// use waffle_helper::core::{Position, Session};
    ///
    /// let mut session = Session::parse("bnoad/ipl/aarli/acn/lskmy").unwrap();
    /// let now = Instant::now();
    /// session.click(Position::new(0, 0), now);
    /// session.click(Position::new(0, 1), now);
    /// assert_eq!(session.swap_count(), 1);
    /// assert_eq!(session.board().letter_at(Position::new(0, 0)), Some('N'));
    ///
    /// session.undo();
    /// assert_eq!(session.board().letter_at(Position::new(0, 0)), Some('B'));
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Board::parse(text).map(Self::new)
    }

    /// Handle a click on the tile at `position`
    pub fn click(&mut self, position: Position, now: Instant) -> ClickOutcome {
        self.tick(now);

        if !position.holds_tile() {
            trace!(%position, "click on hole ignored");
            return ClickOutcome::Ignored;
        }

        if self.locks.contains(&position) {
            if self.unlock.candidate() == Some(position) {
                self.unlock.cancel();
                self.locks.remove(&position);
                self.selected = None;
                debug!(%position, "tile unlocked");
                return ClickOutcome::Unlocked(position);
            }
            self.unlock.arm(position, now);
            debug!(%position, "unlock armed");
            return ClickOutcome::UnlockArmed(position);
        }

        match self.selected {
            Some(selected) if selected == position => {
                self.selected = None;
                self.locks.insert(position);
                debug!(%position, "tile locked");
                ClickOutcome::Locked(position)
            }
            Some(selected) => {
                self.selected = None;
                self.swap_and_record(selected, position)
            }
            None => {
                self.selected = Some(position);
                debug!(%position, "tile selected");
                ClickOutcome::Selected(position)
            }
        }
    }

    /// Begin dragging the tile at `position`
    ///
    /// Returns `false` for holes and locked tiles, which cannot be dragged.
    pub fn start_drag(&mut self, position: Position) -> bool {
        if !position.holds_tile() || self.locks.contains(&position) {
            trace!(%position, "drag refused");
            self.dragged = None;
            return false;
        }
        self.dragged = Some(position);
        true
    }

    /// Drop the dragged tile onto `target`, swapping their letters
    ///
    /// The selection is left alone. Dropping with nothing dragged, onto a hole or
    /// onto a locked tile does nothing.
    pub fn drop_on(&mut self, target: Position) -> ClickOutcome {
        let Some(source) = self.dragged.take() else {
            return ClickOutcome::Ignored;
        };
        if !target.holds_tile() || self.locks.contains(&target) {
            trace!(%source, %target, "drop rejected");
            return ClickOutcome::Ignored;
        }
        self.swap_and_record(source, target)
    }

    pub fn cancel_drag(&mut self) {
        self.dragged = None;
    }

    /// Drop the current selection without locking or swapping
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Expire the unlock candidate if its window has passed
    pub fn tick(&mut self, now: Instant) -> Option<Position> {
        let lapsed = self.unlock.expire(now);
        if let Some(position) = lapsed {
            debug!(%position, "unlock window lapsed");
        }
        lapsed
    }

    /// Roll back the most recent swap
    ///
    /// Returns `false` when no swap has been made. Locks are kept.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.board = snapshot.board.clone();
        self.selected = None;
        debug!(swap_count = snapshot.swap_count, "undo");
        true
    }

    /// Return to the post-parse board and clear all locks
    ///
    /// Returns `true` if anything changed.
    pub fn reset(&mut self) -> bool {
        let rewound = if let Some(snapshot) = self.history.reset() {
            self.board = snapshot.board.clone();
            true
        } else {
            false
        };
        let annotated = !self.locks.is_empty() || self.selected.is_some();

        self.locks.clear();
        self.selected = None;
        self.dragged = None;
        self.unlock.cancel();

        if rewound || annotated {
            debug!("board reset");
        }
        rewound || annotated
    }

    /// Remove every lock and any pending unlock candidate
    pub fn unlock_all(&mut self) -> bool {
        let pending = self.unlock.cancel().is_some();
        if self.locks.is_empty() {
            return pending;
        }
        debug!(count = self.locks.len(), "all tiles unlocked");
        self.locks.clear();
        true
    }

    fn swap_and_record(&mut self, from: Position, to: Position) -> ClickOutcome {
        if self.locks.contains(&from) || self.locks.contains(&to) {
            trace!(%from, %to, "swap into locked tile rejected");
            return ClickOutcome::Ignored;
        }
        if !self.board.swap_letters(from, to) {
            return ClickOutcome::Ignored;
        }

        let swap_count = self.swap_count() + 1;
        self.history.record_swap(self.board.clone(), swap_count);
        debug!(%from, %to, swap_count, "tiles swapped");
        ClickOutcome::Swapped {
            from,
            to,
            swap_count,
        }
    }

    #[inline]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    #[must_use]
    pub const fn locks(&self) -> &FxHashSet<Position> {
        &self.locks
    }

    #[inline]
    #[must_use]
    pub fn is_locked(&self, position: Position) -> bool {
        self.locks.contains(&position)
    }

    #[inline]
    #[must_use]
    pub const fn selected(&self) -> Option<Position> {
        self.selected
    }

    #[inline]
    #[must_use]
    pub fn unlock_candidate(&self) -> Option<Position> {
        self.unlock.candidate()
    }

    /// When the pending unlock candidate lapses
    #[inline]
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.unlock.deadline()
    }

    /// How long an unlock candidate waits for confirmation
    #[inline]
    #[must_use]
    pub const fn unlock_window(&self) -> Duration {
        self.unlock.window()
    }

    #[inline]
    #[must_use]
    pub const fn dragged(&self) -> Option<Position> {
        self.dragged
    }

    #[must_use]
    pub fn state(&self) -> InteractionState {
        if let Some(position) = self.unlock.candidate() {
            InteractionState::LockConfirmPending(position)
        } else if let Some(position) = self.selected {
            InteractionState::Selected(position)
        } else {
            InteractionState::Idle
        }
    }

    /// Swaps made since the last parse or reset
    #[inline]
    #[must_use]
    pub fn swap_count(&self) -> u32 {
        self.history.current().swap_count
    }

    #[inline]
    #[must_use]
    pub const fn history(&self) -> &HistoryLog {
        &self.history
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Reset has swaps to roll back
    #[must_use]
    pub fn can_reset(&self) -> bool {
        self.history.can_undo() && self.swap_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = "bnoad/ipl/aarli/acn/lskmy";

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn session() -> Session {
        Session::parse(DEMO).unwrap()
    }

    fn swap(session: &mut Session, a: Position, b: Position, now: Instant) {
        session.click(a, now);
        session.click(b, now);
    }

    fn lock(session: &mut Session, p: Position, now: Instant) {
        session.click(p, now);
        session.click(p, now);
    }

    #[test]
    fn demo_scenario_swap_and_undo() {
        let now = Instant::now();
        let mut s = session();
        assert_eq!(s.board().row(0), [Some('B'), Some('N'), Some('O'), Some('A'), Some('D')]);

        assert_eq!(s.click(pos(0, 0), now), ClickOutcome::Selected(pos(0, 0)));
        assert_eq!(
            s.click(pos(0, 1), now),
            ClickOutcome::Swapped {
                from: pos(0, 0),
                to: pos(0, 1),
                swap_count: 1
            }
        );
        assert_eq!(s.board().letter_at(pos(0, 0)), Some('N'));
        assert_eq!(s.board().letter_at(pos(0, 1)), Some('B'));
        assert_eq!(s.swap_count(), 1);
        assert_eq!(s.state(), InteractionState::Idle);

        assert!(s.undo());
        assert_eq!(s.board().letter_at(pos(0, 0)), Some('B'));
        assert_eq!(s.board().letter_at(pos(0, 1)), Some('N'));
        assert_eq!(s.swap_count(), 0);
    }

    #[test]
    fn undo_n_times_restores_initial() {
        let now = Instant::now();
        let mut s = session();
        let initial = s.board().clone();
        let moves = [
            (pos(0, 0), pos(4, 4)),
            (pos(1, 2), pos(2, 3)),
            (pos(3, 0), pos(0, 2)),
            (pos(4, 1), pos(2, 4)),
        ];
        for (a, b) in moves {
            swap(&mut s, a, b, now);
        }
        assert_eq!(s.swap_count(), 4);
        assert_eq!(s.history().len(), 5);

        for _ in 0..moves.len() {
            assert!(s.undo());
        }
        assert_eq!(s.board(), &initial);
        assert_eq!(s.swap_count(), 0);
        assert!(!s.undo());
    }

    #[test]
    fn undo_clears_selection_keeps_locks() {
        let now = Instant::now();
        let mut s = session();
        swap(&mut s, pos(0, 0), pos(0, 1), now);
        lock(&mut s, pos(2, 2), now);
        s.click(pos(4, 0), now);

        assert!(s.undo());
        assert_eq!(s.selected(), None);
        assert!(s.is_locked(pos(2, 2)));
    }

    #[test]
    fn reset_clears_everything() {
        let now = Instant::now();
        let mut s = session();
        let initial = s.board().clone();
        swap(&mut s, pos(0, 0), pos(0, 1), now);
        swap(&mut s, pos(2, 0), pos(2, 4), now);
        lock(&mut s, pos(4, 4), now);
        s.click(pos(3, 2), now);

        assert!(s.reset());
        assert_eq!(s.swap_count(), 0);
        assert!(s.locks().is_empty());
        assert_eq!(s.board(), &initial);
        assert_eq!(s.board(), &s.history().initial().board);
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.state(), InteractionState::Idle);
    }

    #[test]
    fn reset_without_swaps_still_clears_locks() {
        let now = Instant::now();
        let mut s = session();
        lock(&mut s, pos(0, 0), now);
        assert!(!s.can_reset());

        assert!(s.reset());
        assert!(s.locks().is_empty());
        assert_eq!(s.swap_count(), 0);
        assert!(!s.reset());
    }

    #[test]
    fn second_click_on_selected_locks() {
        let now = Instant::now();
        let mut s = session();
        s.click(pos(2, 2), now);
        assert_eq!(s.state(), InteractionState::Selected(pos(2, 2)));
        assert_eq!(s.click(pos(2, 2), now), ClickOutcome::Locked(pos(2, 2)));
        assert!(s.is_locked(pos(2, 2)));
        assert_eq!(s.state(), InteractionState::Idle);
    }

    #[test]
    fn locked_tile_cannot_be_swapped_into() {
        let now = Instant::now();
        let mut s = session();
        lock(&mut s, pos(0, 1), now);
        let before = s.board().clone();

        s.click(pos(0, 0), now);
        let outcome = s.click(pos(0, 1), now);
        assert_eq!(outcome, ClickOutcome::UnlockArmed(pos(0, 1)));
        assert_eq!(s.board(), &before);
        assert_eq!(s.swap_count(), 0);
        // Selection survives the locked click
        assert_eq!(s.selected(), Some(pos(0, 0)));
        assert_eq!(s.state(), InteractionState::LockConfirmPending(pos(0, 1)));
    }

    #[test]
    fn locked_tile_cannot_be_selected() {
        let now = Instant::now();
        let mut s = session();
        lock(&mut s, pos(4, 2), now);
        s.click(pos(4, 2), now);
        assert_ne!(s.selected(), Some(pos(4, 2)));
    }

    #[test]
    fn unlock_candidate_lapses_after_window() {
        let now = Instant::now();
        let mut s = session();
        lock(&mut s, pos(2, 2), now);

        assert_eq!(s.click(pos(2, 2), now), ClickOutcome::UnlockArmed(pos(2, 2)));
        assert_eq!(s.unlock_candidate(), Some(pos(2, 2)));

        let later = now + Duration::from_millis(1000);
        assert_eq!(s.tick(later), Some(pos(2, 2)));
        assert_eq!(s.unlock_candidate(), None);
        assert!(s.is_locked(pos(2, 2)));
        assert_eq!(s.state(), InteractionState::Idle);
    }

    #[test]
    fn lapsed_candidate_restores_previous_selection() {
        let now = Instant::now();
        let mut s = session();
        lock(&mut s, pos(2, 2), now);
        s.click(pos(0, 0), now);
        s.click(pos(2, 2), now);
        assert_eq!(s.state(), InteractionState::LockConfirmPending(pos(2, 2)));

        s.tick(now + Duration::from_secs(2));
        assert_eq!(s.state(), InteractionState::Selected(pos(0, 0)));
    }

    #[test]
    fn confirming_click_within_window_unlocks() {
        let now = Instant::now();
        let mut s = session();
        lock(&mut s, pos(2, 2), now);
        s.click(pos(2, 2), now);

        let soon = now + Duration::from_millis(400);
        assert_eq!(s.click(pos(2, 2), soon), ClickOutcome::Unlocked(pos(2, 2)));
        assert!(!s.is_locked(pos(2, 2)));
        assert_eq!(s.unlock_candidate(), None);
        assert_eq!(s.state(), InteractionState::Idle);
    }

    #[test]
    fn click_after_window_rearms_instead_of_unlocking() {
        let now = Instant::now();
        let mut s = session();
        lock(&mut s, pos(2, 2), now);
        s.click(pos(2, 2), now);

        let late = now + Duration::from_millis(1500);
        assert_eq!(s.click(pos(2, 2), late), ClickOutcome::UnlockArmed(pos(2, 2)));
        assert!(s.is_locked(pos(2, 2)));
    }

    #[test]
    fn new_candidate_replaces_old() {
        let now = Instant::now();
        let mut s = session();
        lock(&mut s, pos(0, 0), now);
        lock(&mut s, pos(4, 4), now);

        s.click(pos(0, 0), now);
        s.click(pos(4, 4), now);
        assert_eq!(s.unlock_candidate(), Some(pos(4, 4)));

        // (0,0) is no longer the candidate so this re-arms it
        assert_eq!(s.click(pos(0, 0), now), ClickOutcome::UnlockArmed(pos(0, 0)));
        assert!(s.is_locked(pos(0, 0)));
    }

    #[test]
    fn custom_unlock_window() {
        let now = Instant::now();
        let board = Board::parse(DEMO).unwrap();
        let mut s = Session::with_unlock_window(board, Duration::from_millis(200));
        lock(&mut s, pos(0, 0), now);
        s.click(pos(0, 0), now);
        assert_eq!(s.next_deadline(), Some(now + Duration::from_millis(200)));
        assert_eq!(s.tick(now + Duration::from_millis(250)), Some(pos(0, 0)));
    }

    #[test]
    fn hole_clicks_are_ignored() {
        let now = Instant::now();
        let mut s = session();
        s.click(pos(0, 0), now);
        assert_eq!(s.click(pos(1, 1), now), ClickOutcome::Ignored);
        assert_eq!(s.click(pos(5, 0), now), ClickOutcome::Ignored);
        assert_eq!(s.selected(), Some(pos(0, 0)));
        assert_eq!(s.swap_count(), 0);
    }

    #[test]
    fn unlock_all_clears_locks_and_candidate() {
        let now = Instant::now();
        let mut s = session();
        lock(&mut s, pos(0, 0), now);
        lock(&mut s, pos(2, 0), now);
        s.click(pos(0, 0), now);

        assert!(s.unlock_all());
        assert!(s.locks().is_empty());
        assert_eq!(s.unlock_candidate(), None);
        assert!(!s.unlock_all());
    }

    #[test]
    fn drag_and_drop_swaps() {
        let now = Instant::now();
        let mut s = session();
        s.click(pos(4, 0), now);

        assert!(s.start_drag(pos(0, 0)));
        assert_eq!(s.dragged(), Some(pos(0, 0)));
        assert!(matches!(
            s.drop_on(pos(2, 2)),
            ClickOutcome::Swapped { swap_count: 1, .. }
        ));
        assert_eq!(s.board().letter_at(pos(2, 2)), Some('B'));
        assert_eq!(s.dragged(), None);
        assert_eq!(s.selected(), Some(pos(4, 0)));
    }

    #[test]
    fn drop_rejections() {
        let now = Instant::now();
        let mut s = session();
        lock(&mut s, pos(2, 2), now);

        assert_eq!(s.drop_on(pos(0, 0)), ClickOutcome::Ignored);
        assert!(!s.start_drag(pos(2, 2)));
        assert!(!s.start_drag(pos(1, 3)));

        assert!(s.start_drag(pos(0, 0)));
        assert_eq!(s.drop_on(pos(2, 2)), ClickOutcome::Ignored);
        assert!(s.start_drag(pos(0, 0)));
        assert_eq!(s.drop_on(pos(3, 3)), ClickOutcome::Ignored);
        assert!(s.start_drag(pos(0, 0)));
        assert_eq!(s.drop_on(pos(0, 0)), ClickOutcome::Ignored);
        assert_eq!(s.swap_count(), 0);
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn colors_stay_in_place_after_swap() {
        let now = Instant::now();
        let mut s = Session::parse("Bnoad/ipl/aarli/acn/lskmy").unwrap();
        swap(&mut s, pos(0, 0), pos(0, 1), now);
        assert_eq!(
            s.board().color_at(pos(0, 0)),
            Some(crate::core::TileColor::Green)
        );
        assert_eq!(s.board().letter_at(pos(0, 1)), Some('B'));
    }
}
