//! Simple interactive CLI mode
//!
//! Line-based helper without the TUI. Each command maps to one session action.

use super::replay::parse_position;
use crate::config::HelperConfig;
use crate::core::{ClickOutcome, Position, Session};
use crate::output::{describe_outcome, print_board};
use std::io::{self, Write};
use std::time::Instant;
use tracing::warn;

/// A parsed line of input
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Init(String),
    Click(Position),
    Drag(Position, Position),
    Undo,
    Reset,
    UnlockAll,
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match word.to_lowercase().as_str() {
        "init" | "i" => {
            if rest.is_empty() {
                Err("Usage: init <board>".to_string())
            } else {
                Ok(Command::Init(rest.to_string()))
            }
        }
        "click" | "c" => match positions(rest)?.as_slice() {
            [position] => Ok(Command::Click(*position)),
            _ => Err("Usage: click r,c".to_string()),
        },
        "drag" | "d" => match positions(rest)?.as_slice() {
            [from, to] => Ok(Command::Drag(*from, *to)),
            _ => Err("Usage: drag r,c r,c".to_string()),
        },
        "undo" | "u" => Ok(Command::Undo),
        "reset" | "r" => Ok(Command::Reset),
        "unlock" | "l" => Ok(Command::UnlockAll),
        "show" | "s" | "" => Ok(Command::Show),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("Unknown command '{other}' (type 'help')")),
    }
}

/// Read coordinates as number pairs, separated by any mix of spaces and commas
fn positions(text: &str) -> Result<Vec<Position>, String> {
    let numbers: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .collect();
    if numbers.len() % 2 != 0 {
        return Err(format!("Expected row,col pairs, got '{text}'"));
    }
    numbers
        .chunks(2)
        .map(|pair| parse_position(&format!("{},{}", pair[0], pair[1])))
        .collect()
}

fn print_help() {
    println!("Commands:");
    println!("  init <board>    start from board text, e.g. bnoad/ipl/aarli/acn/lskmy");
    println!("  click r,c       select / swap / lock / unlock the tile at row r, column c");
    println!("  drag r,c r,c    drag one tile onto another");
    println!("  undo            undo the last swap");
    println!("  reset           back to the initial board, clearing locks");
    println!("  unlock          unlock all tiles");
    println!("  show            print the board");
    println!("  quit            exit\n");
}

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if there's an I/O error reading user input.
pub fn run_simple(config: &HelperConfig) -> Result<(), String> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║               Waffle Helper - Interactive Mode               ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    print_help();

    let mut session: Option<Session> = None;
    match config.session(&config.board) {
        Ok(initial) => {
            print_board(&initial);
            session = Some(initial);
        }
        Err(e) => println!("❌ {e}\n"),
    }

    loop {
        let Some(line) = get_user_input("waffle")? else {
            return Ok(());
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("❌ {e}\n");
                continue;
            }
        };

        match command {
            Command::Quit => {
                println!("\n👋 Bye!\n");
                return Ok(());
            }
            Command::Help => print_help(),
            Command::Init(text) => match config.session(&text) {
                Ok(fresh) => {
                    print_board(&fresh);
                    session = Some(fresh);
                }
                Err(e) => {
                    warn!(input = %text, error = %e, "board rejected");
                    println!("❌ {e}\n");
                }
            },
            command => {
                let Some(active) = session.as_mut() else {
                    println!("No board yet. Use 'init <board>' first.\n");
                    continue;
                };
                apply(active, command);
                print_board(active);
            }
        }
    }
}

fn apply(session: &mut Session, command: Command) {
    let now = Instant::now();
    session.tick(now);

    let message = match command {
        Command::Click(position) => {
            let outcome = session.click(position, now);
            describe_outcome(session, outcome)
        }
        Command::Drag(from, to) => {
            let outcome = if session.start_drag(from) {
                session.drop_on(to)
            } else {
                ClickOutcome::Ignored
            };
            describe_outcome(session, outcome)
        }
        Command::Undo => status(session.undo(), "✓ Undone", "Nothing to undo"),
        Command::Reset => status(session.reset(), "✓ Board reset", "Nothing to reset"),
        Command::UnlockAll => status(session.unlock_all(), "✓ All tiles unlocked", "No locked tiles"),
        Command::Show | Command::Help | Command::Init(_) | Command::Quit => String::new(),
    };

    if !message.is_empty() {
        println!("{message}");
    }
}

fn status(done: bool, success: &str, noop: &str) -> String {
    let text = if done { success } else { noop };
    text.to_string()
}

/// Get user input with a prompt, `None` at end of input
fn get_user_input(prompt: &str) -> Result<Option<String>, String> {
    print!("{prompt}> ");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .map_err(|e| e.to_string())?;

    if read == 0 {
        Ok(None)
    } else {
        Ok(Some(input.trim().to_string()))
    }
}
