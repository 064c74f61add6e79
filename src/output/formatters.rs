//! Formatting utilities for terminal output

use crate::core::{Board, GRID_SIZE, Position, Session, TileColor};

/// Render a board back into slash notation
///
/// Neutral tiles print lowercase, colored tiles uppercase, so an unswapped board
/// parses back to itself.
#[must_use]
pub fn board_notation(board: &Board) -> String {
    (0..GRID_SIZE)
        .map(|row| {
            (0..GRID_SIZE)
                .filter_map(|col| board.get(Position::new(row, col)))
                .map(|tile| match tile.color {
                    TileColor::Neutral => tile.letter.to_ascii_lowercase(),
                    TileColor::Green | TileColor::Yellow => tile.letter,
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Three-character cell for plain-text boards
///
/// `[X]` selected, `(X)` locked, `<X>` awaiting unlock confirmation, blank for holes.
#[must_use]
pub fn cell_text(session: &Session, position: Position) -> String {
    let Some(letter) = session.board().letter_at(position) else {
        return "   ".to_string();
    };

    if session.unlock_candidate() == Some(position) {
        format!("<{letter}>")
    } else if session.is_locked(position) {
        format!("({letter})")
    } else if session.selected() == Some(position) {
        format!("[{letter}]")
    } else {
        format!(" {letter} ")
    }
}

/// Plain-text board, one string per grid row
#[must_use]
pub fn board_lines(session: &Session) -> Vec<String> {
    (0..GRID_SIZE)
        .map(|row| {
            (0..GRID_SIZE)
                .map(|col| cell_text(session, Position::new(row, col)))
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

/// Which history actions are available, for status lines
#[must_use]
pub fn history_hint(session: &Session) -> &'static str {
    match (session.can_undo(), session.can_reset()) {
        (true, true) => "Undo / reset available",
        (true, false) => "Undo available",
        (false, true) => "Reset available",
        (false, false) => "Nothing to undo",
    }
}

/// Letters beside their color codes, one string per grid row
#[must_use]
pub fn color_key_lines(board: &Board) -> Vec<String> {
    let codes = color_lines(board);
    (0..GRID_SIZE)
        .zip(codes)
        .map(|(row, code)| {
            let letters: String = board
                .row(row)
                .iter()
                .map(|letter| letter.unwrap_or(' '))
                .collect();
            format!("{letters}   {code}")
        })
        .collect()
}

/// Color codes per tile (`G`, `Y`, `-`), holes as spaces
#[must_use]
pub fn color_lines(board: &Board) -> Vec<String> {
    (0..GRID_SIZE)
        .map(|row| {
            (0..GRID_SIZE)
                .map(|col| board.color_at(Position::new(row, col)).map_or(' ', TileColor::code))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    const DEMO: &str = "bnoad/ipl/aarli/acn/lskmy";

    #[test]
    fn notation_round_trip() {
        for text in [DEMO, "BnoAd/iPl/aarLi/acN/lskmY"] {
            let board = Board::parse(text).unwrap();
            assert_eq!(board_notation(&board), text);
        }
    }

    #[test]
    fn notation_after_swap_uses_slot_color() {
        let mut board = Board::parse("Bnoad/ipl/aarli/acn/lskmy").unwrap();
        board.swap_letters(Position::new(0, 0), Position::new(0, 1));
        assert_eq!(board_notation(&board), "Nboad/ipl/aarli/acn/lskmy");
    }

    #[test]
    fn lines_mark_selection_and_locks() {
        let now = Instant::now();
        let mut session = Session::parse(DEMO).unwrap();
        session.click(Position::new(0, 4), now);
        session.click(Position::new(0, 4), now);
        session.click(Position::new(0, 0), now);

        let lines = board_lines(&session);
        assert_eq!(lines[0], "[B] N  O  A (D)");
        assert_eq!(lines[1], " I     P     L");

        session.click(Position::new(0, 4), now);
        assert_eq!(board_lines(&session)[0], "[B] N  O  A <D>");
    }

    #[test]
    fn color_codes() {
        let board = Board::parse("BnoAd/ipl/aarli/acn/lskmy").unwrap();
        let lines = color_lines(&board);
        assert_eq!(lines[0], "G--Y-");
        assert_eq!(lines[1], "- - -");
    }

    #[test]
    fn color_key_pairs_letters_with_codes() {
        let board = Board::parse("BnoAd/ipl/aarli/acn/lskmY").unwrap();
        let lines = color_key_lines(&board);
        assert_eq!(lines.len(), GRID_SIZE);
        assert_eq!(lines[0], "BNOAD   G--Y-");
        assert_eq!(lines[1], "I P L   - - -");
        assert_eq!(lines[4], "LSKMY   ----G");
    }

    #[test]
    fn history_hint_follows_swaps() {
        let now = Instant::now();
        let mut session = Session::parse(DEMO).unwrap();
        assert_eq!(history_hint(&session), "Nothing to undo");

        session.click(Position::new(0, 0), now);
        session.click(Position::new(0, 1), now);
        assert_eq!(history_hint(&session), "Undo / reset available");

        session.reset();
        assert_eq!(history_hint(&session), "Nothing to undo");
    }
}
