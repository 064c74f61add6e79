//! TUI application state and logic

use super::rendering;
use crate::config::HelperConfig;
use crate::core::{ClickOutcome, Position, Session};
use crate::output::describe_outcome;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Longest wait between redraws when no unlock timer is pending
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Application state
pub struct App {
    pub config: HelperConfig,
    pub session: Option<Session>,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub cursor: Position,
    pub messages: Vec<Message>,
    pub should_quit: bool,
    /// Board panel from the last draw, used for mouse hit-testing
    pub board_area: Rect,
    pressed: Option<Position>,
    dragging: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys act on the board
    Board,
    /// Keys edit the board text
    BoardText,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl App {
    /// Create the app with the configured board text pre-filled and parsed
    #[must_use]
    pub fn new(config: HelperConfig) -> Self {
        let mut app = Self {
            input_buffer: config.board.clone(),
            config,
            session: None,
            input_mode: InputMode::BoardText,
            cursor: Position::new(0, 0),
            messages: Vec::new(),
            should_quit: false,
            board_area: Rect::default(),
            pressed: None,
            dragging: false,
        };
        app.add_message(
            "Enter the board as 5/3/5/3/5 letters (lowercase = grey, uppercase = colored)",
            MessageStyle::Info,
        );
        app.initialize();
        app
    }

    /// Parse the input buffer and replace the session
    ///
    /// On failure the previous session is kept.
    pub fn initialize(&mut self) {
        match self.config.session(&self.input_buffer) {
            Ok(session) => {
                debug!(board = %self.input_buffer, "board initialized");
                self.session = Some(session);
                self.input_mode = InputMode::Board;
                self.pressed = None;
                self.dragging = false;
                self.add_message(
                    "Board ready. Click two tiles to swap, click twice to lock.",
                    MessageStyle::Success,
                );
            }
            Err(e) => {
                warn!(board = %self.input_buffer, error = %e, "board rejected");
                self.add_message(&e.to_string(), MessageStyle::Error);
            }
        }
    }

    pub fn click(&mut self, position: Position, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let outcome = session.click(position, now);
        self.report(outcome);
    }

    pub fn click_cursor(&mut self, now: Instant) {
        self.click(self.cursor, now);
    }

    fn report(&mut self, outcome: ClickOutcome) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let style = match outcome {
            ClickOutcome::Ignored => return,
            ClickOutcome::Swapped { .. } | ClickOutcome::Locked(_) | ClickOutcome::Unlocked(_) => {
                MessageStyle::Success
            }
            ClickOutcome::Selected(_) | ClickOutcome::UnlockArmed(_) => MessageStyle::Info,
        };
        let text = describe_outcome(session, outcome);
        self.add_message(&text, style);
    }

    pub fn undo(&mut self) {
        match self.session.as_mut().map(Session::undo) {
            Some(true) => self.add_message("Undone!", MessageStyle::Info),
            Some(false) => self.add_message("Nothing to undo!", MessageStyle::Error),
            None => {}
        }
    }

    pub fn reset(&mut self) {
        if self.session.as_mut().is_some_and(Session::reset) {
            self.add_message("Board reset to its initial state", MessageStyle::Info);
        }
    }

    pub fn unlock_all(&mut self) {
        if self.session.as_mut().is_some_and(Session::unlock_all) {
            self.add_message("All tiles unlocked", MessageStyle::Info);
        }
    }

    /// Move the keyboard cursor, skipping over holes
    pub fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let mut next = self.cursor;
        while let Some(step) = next.offset(d_row, d_col) {
            next = step;
            if step.holds_tile() {
                self.cursor = step;
                return;
            }
        }
    }

    /// Expire a pending unlock candidate
    pub fn tick(&mut self, now: Instant) {
        if let Some(session) = self.session.as_mut() {
            session.tick(now);
        }
    }

    /// How long to wait for input before the next tick
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.session
            .as_ref()
            .and_then(Session::next_deadline)
            .map_or(IDLE_POLL, |deadline| {
                deadline.saturating_duration_since(now).min(IDLE_POLL)
            })
    }

    pub fn mouse_down(&mut self, target: Option<Position>) {
        self.pressed = target;
        self.dragging = false;
    }

    pub fn mouse_drag(&mut self, target: Option<Position>) {
        let Some(source) = self.pressed else {
            return;
        };
        if self.dragging || target == Some(source) {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            self.dragging = session.start_drag(source);
        }
    }

    /// Finish a press: a click when released on the pressed tile, a drop when dragging
    pub fn mouse_up(&mut self, target: Option<Position>, now: Instant) {
        let pressed = self.pressed.take();
        let dragging = std::mem::take(&mut self.dragging);

        if dragging {
            let Some(session) = self.session.as_mut() else {
                return;
            };
            let outcome = match target {
                Some(position) => session.drop_on(position),
                None => {
                    session.cancel_drag();
                    ClickOutcome::Ignored
                }
            };
            self.report(outcome);
        } else if let Some(position) = target
            && pressed == Some(position)
        {
            self.cursor = position;
            self.click(position, now);
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::BoardText => match key.code {
                KeyCode::Esc => {
                    if self.session.is_some() {
                        self.input_mode = InputMode::Board;
                    }
                }
                KeyCode::Enter => self.initialize(),
                KeyCode::Char(c) => self.input_buffer.push(c),
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                _ => {}
            },
            InputMode::Board => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('i') => self.input_mode = InputMode::BoardText,
                KeyCode::Char('u') => self.undo(),
                KeyCode::Char('r') => self.reset(),
                KeyCode::Char('l') => self.unlock_all(),
                KeyCode::Esc => {
                    if let Some(session) = self.session.as_mut() {
                        session.clear_selection();
                    }
                }
                KeyCode::Up => self.move_cursor(-1, 0),
                KeyCode::Down => self.move_cursor(1, 0),
                KeyCode::Left => self.move_cursor(0, -1),
                KeyCode::Right => self.move_cursor(0, 1),
                KeyCode::Char(' ') | KeyCode::Enter => self.click_cursor(now),
                _ => {}
            },
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let target = rendering::tile_at(self.board_area, mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.mouse_down(target),
            MouseEventKind::Drag(MouseButton::Left) => self.mouse_drag(target),
            MouseEventKind::Up(MouseButton::Left) => self.mouse_up(target, now),
            _ => {}
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| {
            app.board_area = rendering::board_area(f.area());
            rendering::ui(f, &app);
        })?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            let now = Instant::now();
            match event::read()? {
                // Only process key press events (fixes Windows double-input bug)
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key, now),
                Event::Mouse(mouse) => app.handle_mouse(mouse, now),
                _ => {}
            }
        }
        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
