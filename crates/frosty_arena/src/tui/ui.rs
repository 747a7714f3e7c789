//! Stateless UI rendering for a match in progress.

use super::app::App;
use frosty_tictactoe::{Board, Mark, Position, Square};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Renders the whole screen: title, board, commentary and status.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(13),   // Board + log
            Constraint::Length(3), // Status
        ])
        .split(area);

    let title = Paragraph::new(format!("Frosty Tic-Tac-Toe: {}", app.matchup()))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    draw_board(frame, middle[0], app.board(), app.frozen());
    draw_log(frame, middle[1], app);

    let status_text = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_text, chunks[2]);
}

fn draw_board(frame: &mut Frame, area: Rect, board: &Board, frozen: Option<Position>) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for (i, row) in Position::ALL.chunks(3).enumerate() {
        draw_row(frame, rows[i * 2], board, frozen, row);
        if i < 2 {
            draw_separator(frame, rows[i * 2 + 1]);
        }
    }
}

fn draw_row(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    frozen: Option<Position>,
    positions: &[Position],
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for (i, pos) in positions.iter().enumerate() {
        draw_cell(frame, cols[i * 2], board, frozen, *pos);
        if i < 2 {
            draw_separator_vertical(frame, cols[i * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, board: &Board, frozen: Option<Position>, pos: Position) {
    let (symbol, style) = if Some(pos) == frozen {
        (" ❄ ", Style::default().fg(Color::Black).bg(Color::LightCyan))
    } else {
        match board.get(pos) {
            Square::Empty => ("   ", Style::default().fg(Color::DarkGray)),
            Square::Occupied(Mark::X) => (
                " X ",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Square::Occupied(Mark::O) => (
                " O ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        }
    };

    let paragraph =
        Paragraph::new(Line::from(Span::styled(symbol, style))).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_log(frame: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<&str> = app.log().collect();
    let skip = lines.len().saturating_sub(visible);
    let items: Vec<ListItem> = lines[skip..]
        .iter()
        .map(|line| ListItem::new(line.to_string()))
        .collect();

    let list = List::new(items).block(Block::default().title("Commentary").borders(Borders::ALL));
    frame.render_widget(list, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("──────────────────────────────────────")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Length(area.height.saturating_sub(height) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Length(area.width.saturating_sub(width) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MatchEvent;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_renders_marks_and_frozen_cell() {
        let mut board = Board::new();
        board.place(Position::TopLeft, Mark::X);
        let mut app = App::new();
        app.handle_event(MatchEvent::BoardUpdated {
            board,
            frozen: Some(Position::Center),
        });

        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains('X'));
        assert!(text.contains('❄'));
        assert!(text.contains("Commentary"));
    }
}
