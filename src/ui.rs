use std::io;

use anyhow::Result;
use crossterm::cursor::SetCursorStyle;
use crossterm::execute;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{FrameRow, Mode, RenderFrame, RowContent, Theme};

pub fn apply_cursor_style(mode: Mode) -> Result<()> {
    match mode {
        Mode::Insert => {
            execute!(io::stdout(), SetCursorStyle::SteadyBar)?;
        }
        Mode::Command => {
            execute!(io::stdout(), SetCursorStyle::SteadyBlock)?;
        }
    }
    Ok(())
}

pub fn draw(f: &mut Frame<'_>, frame: &RenderFrame, theme: &Theme) {
    let size = f.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .split(size);

    let main_area = rows[0];
    let status_area = rows[1];
    let message_area = rows[2];

    let base = Style::default().fg(theme.text_fg).bg(theme.background_bg);
    let text_lines: Vec<Line> = frame.rows.iter().map(|row| render_row(row, theme)).collect();
    let paragraph = Paragraph::new(text_lines)
        .style(base)
        .block(Block::default().borders(Borders::NONE));
    f.render_widget(paragraph, main_area);

    let status_paragraph = Paragraph::new(frame.status.as_str())
        .style(Style::default().fg(Color::Black).bg(theme.status_bg));
    f.render_widget(status_paragraph, status_area);

    f.render_widget(Paragraph::new(frame.message.as_str()).style(base), message_area);

    let (x, y) = frame.cursor;
    let cursor_x = size.x.saturating_add(x.min(u16::MAX as usize) as u16);
    let cursor_y = size.y.saturating_add(y.min(u16::MAX as usize) as u16);
    if cursor_x < size.right() && cursor_y < size.bottom() {
        f.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn render_row(row: &FrameRow, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::with_capacity(2);
    if let Some(gutter) = &row.gutter {
        spans.push(Span::styled(gutter.clone(), Style::default().fg(Color::DarkGray)));
    }
    match &row.content {
        RowContent::Text { text, comment } => {
            let style = if *comment {
                Style::default().fg(theme.comment_fg)
            } else {
                Style::default()
            };
            spans.push(Span::styled(text.clone(), style));
        }
        RowContent::Tilde => spans.push(Span::styled("~", Style::default().fg(theme.text_fg))),
        RowContent::Blank => {}
    }
    let line = Line::from(spans);
    if row.highlight {
        line.style(Style::default().add_modifier(Modifier::REVERSED))
    } else {
        line
    }
}
