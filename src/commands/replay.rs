//! Move replay command
//!
//! Applies a scripted list of moves to a board and reports the outcome of each.
//! Moves go through the same click handling as the interactive modes, so locked
//! tiles and holes behave exactly as they do on screen.
//!
//! Move notation:
//! - `r,c:r,c` swap two tiles
//! - `lock:r,c` / `unlock:r,c`
//! - `undo`, `reset`, `unlock-all`

use crate::config::HelperConfig;
use crate::core::{Board, ClickOutcome, Position, Session, Snapshot, UNLOCK_WINDOW};
use std::fmt;
use std::time::{Duration, Instant};

/// A single scripted move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Swap(Position, Position),
    Lock(Position),
    Unlock(Position),
    Undo,
    Reset,
    UnlockAll,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Swap(a, b) => write!(f, "{},{}:{},{}", a.row, a.col, b.row, b.col),
            Self::Lock(p) => write!(f, "lock:{},{}", p.row, p.col),
            Self::Unlock(p) => write!(f, "unlock:{},{}", p.row, p.col),
            Self::Undo => write!(f, "undo"),
            Self::Reset => write!(f, "reset"),
            Self::UnlockAll => write!(f, "unlock-all"),
        }
    }
}

/// Parse `r,c` into a grid position
///
/// # Errors
/// Returns an error if the text is not two comma-separated numbers inside the grid.
pub fn parse_position(text: &str) -> Result<Position, String> {
    let (row, col) = text
        .split_once(',')
        .ok_or_else(|| format!("Expected 'row,col', got '{text}'"))?;
    let row: usize = row
        .trim()
        .parse()
        .map_err(|_| format!("Invalid row in '{text}'"))?;
    let col: usize = col
        .trim()
        .parse()
        .map_err(|_| format!("Invalid column in '{text}'"))?;
    Position::checked(row, col).ok_or_else(|| format!("Position '{text}' is outside the grid"))
}

/// Parse one move in replay notation
///
/// # Errors
/// Returns an error naming the move if it is not valid notation.
///
/// # Examples
/// ```
/// use waffle_helper::commands::replay::{Move, parse_move};
/// use waffle_helper::core::Position;
///
/// assert_eq!(
///     parse_move("0,0:0,1").unwrap(),
///     Move::Swap(Position::new(0, 0), Position::new(0, 1))
/// );
/// assert_eq!(parse_move("undo").unwrap(), Move::Undo);
/// assert!(parse_move("0,0-0,1").is_err());
/// ```
pub fn parse_move(text: &str) -> Result<Move, String> {
    let text = text.trim().to_lowercase();
    let invalid = |e: String| format!("Invalid move '{text}': {e}");

    match text.as_str() {
        "undo" => return Ok(Move::Undo),
        "reset" => return Ok(Move::Reset),
        "unlock-all" => return Ok(Move::UnlockAll),
        _ => {}
    }

    let (left, right) = text
        .split_once(':')
        .ok_or_else(|| invalid("expected 'r,c:r,c', 'lock:r,c' or 'unlock:r,c'".to_string()))?;

    match left {
        "lock" => parse_position(right).map(Move::Lock).map_err(invalid),
        "unlock" => parse_position(right).map(Move::Unlock).map_err(invalid),
        _ => {
            let from = parse_position(left).map_err(invalid)?;
            let to = parse_position(right).map_err(invalid)?;
            Ok(Move::Swap(from, to))
        }
    }
}

/// Configuration for a replay run
pub struct ReplayConfig {
    pub board: String,
    pub moves: Vec<String>,
    pub unlock_window: Duration,
}

impl ReplayConfig {
    #[must_use]
    pub const fn new(board: String, moves: Vec<String>) -> Self {
        Self {
            board,
            moves,
            unlock_window: UNLOCK_WINDOW,
        }
    }

    /// Take the board and unlock window from the shared settings
    #[must_use]
    pub fn from_helper(config: &HelperConfig, moves: Vec<String>) -> Self {
        Self {
            board: config.board.clone(),
            moves,
            unlock_window: config.unlock_window,
        }
    }
}

/// What happened to one move
#[derive(Debug, Clone)]
pub struct ReplayStep {
    pub mv: Move,
    pub applied: bool,
    pub swap_count: u32,
}

/// Result of replaying a move list
pub struct ReplayResult {
    pub initial: Snapshot,
    pub session: Session,
    pub steps: Vec<ReplayStep>,
}

impl ReplayResult {
    /// Number of moves that were rejected
    #[must_use]
    pub fn ignored(&self) -> usize {
        self.steps.iter().filter(|s| !s.applied).count()
    }
}

/// Replay moves on a freshly parsed board
///
/// Every move after the first runs past the previous unlock window, so a stray
/// unlock candidate never carries over between moves.
///
/// # Errors
///
/// Returns an error if the board text or any move is malformed. Moves are all
/// parsed before any is applied.
pub fn replay(config: ReplayConfig) -> Result<ReplayResult, String> {
    let board = Board::parse(&config.board).map_err(|e| e.to_string())?;
    let mut session = Session::with_unlock_window(board, config.unlock_window);
    let moves = config
        .moves
        .iter()
        .map(|m| parse_move(m.as_str()))
        .collect::<Result<Vec<_>, _>>()?;

    let initial = session.history().initial().clone();
    let start = Instant::now();
    let spacing = session.unlock_window() + Duration::from_millis(1);
    let mut steps = Vec::with_capacity(moves.len());

    for (i, mv) in moves.into_iter().enumerate() {
        let now = start + spacing * u32::try_from(i).unwrap_or(u32::MAX);
        session.tick(now);
        let applied = apply_move(&mut session, mv, now);
        steps.push(ReplayStep {
            mv,
            applied,
            swap_count: session.swap_count(),
        });
    }

    Ok(ReplayResult {
        initial,
        session,
        steps,
    })
}

fn apply_move(session: &mut Session, mv: Move, now: Instant) -> bool {
    match mv {
        Move::Swap(from, to) => {
            if session.click(from, now) != ClickOutcome::Selected(from) {
                return false;
            }
            let applied = matches!(session.click(to, now), ClickOutcome::Swapped { .. });
            session.clear_selection();
            applied
        }
        Move::Lock(position) => {
            if session.is_locked(position) {
                return false;
            }
            session.clear_selection();
            session.click(position, now);
            session.click(position, now) == ClickOutcome::Locked(position)
        }
        Move::Unlock(position) => {
            if !session.is_locked(position) {
                return false;
            }
            session.click(position, now);
            session.click(position, now) == ClickOutcome::Unlocked(position)
        }
        Move::Undo => session.undo(),
        Move::Reset => session.reset(),
        Move::UnlockAll => session.unlock_all(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = "bnoad/ipl/aarli/acn/lskmy";

    fn run(moves: &[&str]) -> ReplayResult {
        let moves = moves.iter().map(ToString::to_string).collect();
        replay(ReplayConfig::new(DEMO.to_string(), moves)).unwrap()
    }

    #[test]
    fn parse_position_valid_and_invalid() {
        assert_eq!(parse_position("2,3"), Ok(Position::new(2, 3)));
        assert_eq!(parse_position(" 4 , 0 "), Ok(Position::new(4, 0)));
        assert!(parse_position("5,0").is_err());
        assert!(parse_position("a,1").is_err());
        assert!(parse_position("11").is_err());
    }

    #[test]
    fn parse_move_variants() {
        let a = Position::new(0, 0);
        assert_eq!(parse_move("lock:0,0"), Ok(Move::Lock(a)));
        assert_eq!(parse_move("UNLOCK:0,0"), Ok(Move::Unlock(a)));
        assert_eq!(parse_move("reset"), Ok(Move::Reset));
        assert_eq!(parse_move("unlock-all"), Ok(Move::UnlockAll));
        assert!(parse_move("swap").is_err());
        assert!(parse_move("0,0:9,9").is_err());
    }

    #[test]
    fn move_display_matches_notation() {
        for text in ["0,0:0,1", "lock:2,2", "unlock:4,4", "undo", "reset", "unlock-all"] {
            assert_eq!(parse_move(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn replay_swaps_and_counts() {
        let result = run(&["0,0:0,1", "2,0:2,4"]);
        assert_eq!(result.session.swap_count(), 2);
        assert_eq!(result.ignored(), 0);
        assert_eq!(
            result.session.board().letter_at(Position::new(0, 0)),
            Some('N')
        );
        assert_eq!(result.initial.swap_count, 0);
    }

    #[test]
    fn replay_lock_blocks_swap() {
        let result = run(&["lock:0,1", "0,0:0,1", "unlock:0,1", "0,0:0,1"]);
        let applied: Vec<bool> = result.steps.iter().map(|s| s.applied).collect();
        assert_eq!(applied, vec![true, false, true, true]);
        assert_eq!(result.session.swap_count(), 1);
        assert!(result.session.locks().is_empty());
    }

    #[test]
    fn replay_locked_source_is_ignored() {
        let result = run(&["lock:0,0", "0,0:4,4", "4,4:0,1"]);
        assert!(!result.steps[1].applied);
        assert!(result.steps[2].applied);
        assert!(result.session.is_locked(Position::new(0, 0)));
    }

    #[test]
    fn replay_undo_and_reset() {
        let result = run(&["0,0:0,1", "0,2:0,3", "undo", "lock:4,4", "reset", "undo"]);
        let counts: Vec<u32> = result.steps.iter().map(|s| s.swap_count).collect();
        assert_eq!(counts, vec![1, 2, 1, 1, 0, 0]);
        assert!(!result.steps[5].applied);
        assert_eq!(result.session.board(), &result.initial.board);
        assert!(result.session.locks().is_empty());
    }

    #[test]
    fn replay_uses_helper_settings() {
        let settings = HelperConfig::new(Some("Bnoad/ipl/aarli/acn/lskmy".to_string()), Some(50));
        let config = ReplayConfig::from_helper(&settings, vec!["0,0:0,1".to_string()]);
        let result = replay(config).unwrap();
        assert_eq!(result.session.unlock_window(), Duration::from_millis(50));
        assert_eq!(result.session.board().letter_at(Position::new(0, 1)), Some('B'));
        assert_eq!(result.steps[0].swap_count, 1);
    }

    #[test]
    fn replay_hole_move_ignored() {
        let result = run(&["1,1:0,0"]);
        assert!(!result.steps[0].applied);
        assert_eq!(result.session.swap_count(), 0);
    }

    #[test]
    fn replay_rejects_bad_input() {
        assert!(replay(ReplayConfig::new("abc".to_string(), vec![])).is_err());
        let err = replay(ReplayConfig::new(
            DEMO.to_string(),
            vec!["0,0:0,1".to_string(), "bogus".to_string()],
        ))
        .err()
        .unwrap();
        assert!(err.contains("bogus"));
    }
}
