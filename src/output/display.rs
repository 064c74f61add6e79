//! Display functions for boards and command results

use super::formatters::{board_notation, cell_text, color_key_lines, history_hint};
use crate::commands::ReplayResult;
use crate::core::{ClickOutcome, GRID_SIZE, Position, Session, TileColor};
use colored::{ColoredString, Colorize};

fn colored_cell(session: &Session, position: Position) -> ColoredString {
    let cell = cell_text(session, position);
    let text = cell.as_str();
    let Some(color) = session.board().color_at(position) else {
        return text.normal();
    };

    // Locked tiles show green whatever their parsed color
    let styled = if session.is_locked(position) {
        text.white().on_green()
    } else {
        match color {
            TileColor::Neutral => text.black().on_white(),
            TileColor::Green => text.white().on_green(),
            TileColor::Yellow => text.white().on_yellow(),
        }
    };

    if session.selected() == Some(position) {
        styled.bold().underline()
    } else {
        styled.bold()
    }
}

/// Print the board with tile colors, locks and selection
pub fn print_board(session: &Session) {
    println!();
    for row in 0..GRID_SIZE {
        print!("  ");
        for col in 0..GRID_SIZE {
            print!("{} ", colored_cell(session, Position::new(row, col)));
        }
        println!();
    }

    println!(
        "\n  Swaps: {}   Locked: {}   {}",
        session.swap_count().to_string().bright_yellow().bold(),
        session.locks().len(),
        history_hint(session).dimmed()
    );
    if let Some(position) = session.selected()
        && let Some(letter) = session.board().letter_at(position)
    {
        println!(
            "  {}",
            format!("Selected: {letter} (click another tile to swap)").bright_blue()
        );
    }
    println!();
}

/// Human-readable description of a click outcome
#[must_use]
pub fn describe_outcome(session: &Session, outcome: ClickOutcome) -> String {
    let letter = |p: Position| session.board().letter_at(p).unwrap_or(' ');

    match outcome {
        ClickOutcome::Ignored => "Nothing to do there".to_string(),
        ClickOutcome::Selected(p) => {
            format!("Selected: {} (click another tile to swap)", letter(p))
        }
        ClickOutcome::Locked(p) => format!("🔒 Locked {} at {p}", letter(p)),
        ClickOutcome::Swapped {
            from,
            to,
            swap_count,
        } => format!("⇄ Swapped {from} and {to} (swaps: {swap_count})"),
        ClickOutcome::UnlockArmed(p) => format!(
            "Click {} at {p} again within {} ms to unlock",
            letter(p),
            session.unlock_window().as_millis()
        ),
        ClickOutcome::Unlocked(p) => format!("🔓 Unlocked {} at {p}", letter(p)),
    }
}

/// Print the result of a replay
pub fn print_replay_result(result: &ReplayResult, verbose: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Replaying {} moves",
        result.steps.len().to_string().bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());

    if verbose {
        println!("\nInitial board (G green, Y yellow, - grey):");
        for line in color_key_lines(&result.initial.board) {
            println!("  {line}");
        }
    }

    for (i, step) in result.steps.iter().enumerate() {
        let mark = if step.applied {
            "✓".green()
        } else {
            "✗ ignored".red()
        };
        if verbose || !step.applied {
            println!(
                "  {:>3}. {:<12} {mark}  swaps: {}",
                i + 1,
                step.mv.to_string(),
                step.swap_count
            );
        }
    }

    print_board(&result.session);

    let ignored = result.ignored();
    if ignored == 0 {
        println!(
            "{}",
            format!("✅ {} swaps applied", result.session.swap_count())
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!(
                "⚠ {} swaps applied, {ignored} moves ignored",
                result.session.swap_count()
            )
            .yellow()
            .bold()
        );
    }
    println!(
        "Board: {}",
        board_notation(result.session.board())
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn describe_each_outcome() {
        let now = Instant::now();
        let mut session = Session::parse("bnoad/ipl/aarli/acn/lskmy").unwrap();
        let a = Position::new(0, 0);
        let b = Position::new(0, 1);

        let outcome = session.click(a, now);
        assert_eq!(
            describe_outcome(&session, outcome),
            "Selected: B (click another tile to swap)"
        );
        let outcome = session.click(b, now);
        assert_eq!(
            describe_outcome(&session, outcome),
            "⇄ Swapped (0,0) and (0,1) (swaps: 1)"
        );

        session.click(a, now);
        let outcome = session.click(a, now);
        assert_eq!(describe_outcome(&session, outcome), "🔒 Locked N at (0,0)");

        let outcome = session.click(a, now);
        assert_eq!(
            describe_outcome(&session, outcome),
            "Click N at (0,0) again within 1000 ms to unlock"
        );
        let outcome = session.click(a, now);
        assert_eq!(describe_outcome(&session, outcome), "🔓 Unlocked N at (0,0)");

        assert_eq!(
            describe_outcome(&session, ClickOutcome::Ignored),
            "Nothing to do there"
        );
    }
}
