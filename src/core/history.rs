//! Swap history for undo and reset
//!
//! The log always holds the post-parse board as its first entry. Each completed
//! swap appends a full board copy.

use super::Board;

/// Board state after a given number of swaps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub swap_count: u32,
}

/// Append-only list of snapshots, rewound by undo and reset
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: Vec<Snapshot>,
}

impl HistoryLog {
    /// Start a log whose initial entry is `board` with zero swaps
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self {
            entries: vec![Snapshot {
                board,
                swap_count: 0,
            }],
        }
    }

    /// Append the state produced by a swap
    pub fn record_swap(&mut self, board: Board, swap_count: u32) {
        debug_assert_eq!(swap_count, self.current().swap_count + 1);
        self.entries.push(Snapshot { board, swap_count });
    }

    /// Drop the latest entry and return the one now on top
    ///
    /// Returns `None` when only the initial snapshot remains.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.pop();
        self.entries.last()
    }

    /// Truncate to the initial snapshot and return it
    ///
    /// Returns `None` when there was nothing to rewind.
    pub fn reset(&mut self) -> Option<&Snapshot> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.truncate(1);
        self.entries.first()
    }

    /// The post-parse snapshot
    #[must_use]
    pub fn initial(&self) -> &Snapshot {
        &self.entries[0]
    }

    /// The most recent snapshot
    #[must_use]
    pub fn current(&self) -> &Snapshot {
        // Never empty: construction seeds the initial entry and neither
        // undo nor reset removes it.
        &self.entries[self.entries.len() - 1]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; the initial snapshot is never removed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when at least one swap can be undone
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.entries.len() > 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;

    fn demo() -> Board {
        Board::parse("bnoad/ipl/aarli/acn/lskmy").unwrap()
    }

    fn swapped(board: &Board, a: Position, b: Position) -> Board {
        let mut next = board.clone();
        next.swap_letters(a, b);
        next
    }

    #[test]
    fn new_log_holds_initial() {
        let log = HistoryLog::new(demo());
        assert_eq!(log.len(), 1);
        assert_eq!(log.initial().swap_count, 0);
        assert_eq!(log.current(), log.initial());
        assert!(!log.can_undo());
    }

    #[test]
    fn undo_on_initial_is_noop() {
        let mut log = HistoryLog::new(demo());
        assert!(log.undo().is_none());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn undo_returns_previous_entry() {
        let initial = demo();
        let first = swapped(&initial, Position::new(0, 0), Position::new(0, 1));
        let second = swapped(&first, Position::new(2, 0), Position::new(4, 4));

        let mut log = HistoryLog::new(initial.clone());
        log.record_swap(first.clone(), 1);
        log.record_swap(second, 2);

        let top = log.undo().unwrap();
        assert_eq!(top.board, first);
        assert_eq!(top.swap_count, 1);

        let top = log.undo().unwrap();
        assert_eq!(top.board, initial);
        assert_eq!(top.swap_count, 0);
        assert!(log.undo().is_none());
    }

    #[test]
    fn reset_truncates_to_initial() {
        let initial = demo();
        let mut log = HistoryLog::new(initial.clone());
        let mut board = initial.clone();
        for count in 1..=3 {
            board = swapped(&board, Position::new(0, 0), Position::new(0, count as usize));
            log.record_swap(board.clone(), count);
        }

        let snapshot = log.reset().unwrap();
        assert_eq!(snapshot.board, initial);
        assert_eq!(snapshot.swap_count, 0);
        assert_eq!(log.len(), 1);
        assert!(log.reset().is_none());
    }

    #[test]
    fn swap_counts_increase_by_one() {
        let mut log = HistoryLog::new(demo());
        let board = demo();
        log.record_swap(board.clone(), 1);
        log.record_swap(board, 2);
        let counts: Vec<u32> = log.iter().map(|s| s.swap_count).collect();
        assert_eq!(counts, vec![0, 1, 2]);
    }
}
