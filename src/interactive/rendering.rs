//! TUI rendering with ratatui
//!
//! Draws the waffle grid and maps mouse coordinates back onto tiles.

use super::app::{App, InputMode, MessageStyle};
use crate::core::{GRID_SIZE, InteractionState, Position, Session, TileColor};
use crate::output::history_hint;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

/// Width of one tile in cells
pub const TILE_WIDTH: u16 = 5;
/// Height of one tile in cells
pub const TILE_HEIGHT: u16 = 3;
/// Horizontal gap between tiles
pub const TILE_GAP: u16 = 1;

const GRID_WIDTH: u16 = GRID_SIZE as u16 * (TILE_WIDTH + TILE_GAP) - TILE_GAP;
const GRID_HEIGHT: u16 = GRID_SIZE as u16 * TILE_HEIGHT;

fn main_chunks(area: Rect) -> (Rect, Rect, Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                // Header
            Constraint::Min(GRID_HEIGHT + 2),     // Board + side panel
            Constraint::Length(3),                // Input area
            Constraint::Length(3),                // Status bar
        ])
        .split(area);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    (chunks[0], middle[0], middle[1], chunks[2], chunks[3])
}

/// The board panel inside a full-screen area
#[must_use]
pub fn board_area(area: Rect) -> Rect {
    main_chunks(area).1
}

/// Top-left cell of the tile grid, centered inside the bordered board panel
fn grid_origin(board_area: Rect) -> (u16, u16) {
    let inner_x = board_area.x + 1;
    let inner_y = board_area.y + 1;
    let inner_w = board_area.width.saturating_sub(2);
    let inner_h = board_area.height.saturating_sub(2);
    (
        inner_x + inner_w.saturating_sub(GRID_WIDTH) / 2,
        inner_y + inner_h.saturating_sub(GRID_HEIGHT) / 2,
    )
}

/// Screen rectangle of a grid cell
#[must_use]
pub fn tile_rect(board_area: Rect, position: Position) -> Rect {
    let (x, y) = grid_origin(board_area);
    Rect::new(
        x + position.col as u16 * (TILE_WIDTH + TILE_GAP),
        y + position.row as u16 * TILE_HEIGHT,
        TILE_WIDTH,
        TILE_HEIGHT,
    )
}

/// Tile under a screen coordinate, if any
///
/// Gaps between tiles and holes map to `None`.
#[must_use]
pub fn tile_at(board_area: Rect, column: u16, row: u16) -> Option<Position> {
    let (x, y) = grid_origin(board_area);
    let dx = column.checked_sub(x)?;
    let dy = row.checked_sub(y)?;
    if dx >= GRID_WIDTH || dy >= GRID_HEIGHT || dx % (TILE_WIDTH + TILE_GAP) >= TILE_WIDTH {
        return None;
    }
    let position = Position::checked(
        usize::from(dy / TILE_HEIGHT),
        usize::from(dx / (TILE_WIDTH + TILE_GAP)),
    )?;
    position.holds_tile().then_some(position)
}

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let (header, board, side, input, status) = main_chunks(f.area());

    render_header(f, header);
    render_board(f, app, board);
    render_side_panel(f, app, side);
    render_input(f, app, input);
    render_status(f, app, status);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🧇 WAFFLE HELPER - Swap, Lock, Undo")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Board ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let Some(session) = app.session.as_ref() else {
        let paragraph = Paragraph::new("No board yet - enter one below and press Enter")
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
        return;
    };
    f.render_widget(block, area);

    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let position = Position::new(row, col);
            let Some(letter) = session.board().letter_at(position) else {
                continue;
            };
            let rect = tile_rect(area, position);
            if rect.right() > area.right() || rect.bottom() > area.bottom() {
                continue;
            }
            render_tile(f, app, session, position, letter, rect);
        }
    }
}

fn tile_background(session: &Session, position: Position) -> Color {
    if session.is_locked(position) {
        return Color::Green;
    }
    match session.board().color_at(position) {
        Some(TileColor::Green) => Color::Green,
        Some(TileColor::Yellow) => Color::Yellow,
        Some(TileColor::Neutral) | None => Color::Gray,
    }
}

fn render_tile(
    f: &mut Frame,
    app: &App,
    session: &Session,
    position: Position,
    letter: char,
    rect: Rect,
) {
    let (border, border_type) = if session.unlock_candidate() == Some(position) {
        (Color::Red, BorderType::Thick)
    } else if session.selected() == Some(position) {
        (Color::Blue, BorderType::Thick)
    } else if app.cursor == position && app.input_mode == InputMode::Board {
        (Color::White, BorderType::Double)
    } else {
        (Color::DarkGray, BorderType::Rounded)
    };

    // The dragged tile's letter disappears from its slot until dropped
    let text = if session.dragged() == Some(position) {
        " ".to_string()
    } else {
        letter.to_string()
    };

    let tile = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Black)
                .bg(tile_background(session, position))
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(border_type)
                .border_style(Style::default().fg(border)),
        );
    f.render_widget(tile, rect);
}

fn state_line(session: &Session) -> Line<'static> {
    let letter = |p: Position| session.board().letter_at(p).unwrap_or(' ');
    match session.state() {
        InteractionState::Idle => Line::from("Idle - click a tile to select it"),
        InteractionState::Selected(p) => Line::from(vec![
            Span::raw("Selected: "),
            Span::styled(
                letter(p).to_string(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" (click another tile to swap)"),
        ]),
        InteractionState::LockConfirmPending(p) => Line::from(Span::styled(
            format!("Click {} again to unlock", letter(p)),
            Style::default().fg(Color::Red),
        )),
    }
}

fn render_side_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(area);

    let content = match app.session.as_ref() {
        Some(session) => vec![
            Line::from(vec![
                Span::raw("Swaps:   "),
                Span::styled(
                    session.swap_count().to_string(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(format!("Locked:  {}", session.locks().len())),
            Line::from(format!("History: {} snapshots", session.history().len())),
            state_line(session),
        ],
        None => vec![Line::from("Waiting for a board")],
    };

    let info = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Session ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(info, chunks[0]);

    render_messages(f, app, chunks[1]);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, color) = match app.input_mode {
        InputMode::BoardText => (
            " Board text (5/3/5/3/5) | Enter to initialize | ESC to cancel ",
            Color::Yellow,
        ),
        InputMode::Board => (" Board text | press 'i' to edit ", Color::DarkGray),
    };

    let input = Paragraph::new(app.input_buffer.as_str())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let undo_text = app.session.as_ref().map_or("", history_hint);
    f.render_widget(
        Paragraph::new(undo_text).alignment(Alignment::Center),
        chunks[0],
    );

    let help_text = match app.input_mode {
        InputMode::Board => {
            "q: Quit | arrows + Space: Click | u: Undo | r: Reset | l: Unlock all | i: Edit"
        }
        InputMode::BoardText => "Enter: Initialize | ESC: Back to board | Ctrl-C: Quit",
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[1]);
}
