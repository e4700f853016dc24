//! 终端界面：卡片布局、按键处理和配色

pub mod app;
pub mod card;
pub mod navigation;
pub mod theme;

use crate::config::SymbolSpec;
use app::{App, Slot};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // 卡片
            Constraint::Length(1), // 状态
            Constraint::Length(1), // 快捷键
        ])
        .split(f.area());

    if !app.slots.is_empty() {
        let n = app.slots.len() as u32;
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(app.slots.iter().map(|_| Constraint::Ratio(1, n)))
            .split(chunks[0]);

        for (i, (slot, spec)) in app.slots.iter().zip(&app.specs).enumerate() {
            render_slot(f, columns[i], slot, spec, i == app.focused);
        }
    }

    if let Some(status) = &app.status {
        let status = Paragraph::new(Line::styled(
            status.clone(),
            Style::default().fg(Color::Yellow),
        ));
        f.render_widget(status, chunks[1]);
    }

    render_footer(f, chunks[2]);
}

fn render_slot(f: &mut Frame, area: Rect, slot: &Slot, spec: &SymbolSpec, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused { theme::focused_border() } else { theme::muted() })
        .title(Span::styled(
            format!(" {} ", spec.code.to_uppercase()),
            Style::default().add_modifier(Modifier::BOLD),
        ));

    let lines = match slot {
        Slot::Ready { summary, state } => card::card_lines(summary, spec.kind, state),
        Slot::Loading { last_error } => loading_lines(last_error.as_deref()),
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn loading_lines(last_error: Option<&str>) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::raw(""),
        Line::styled(
            "Loading data...",
            Style::default().fg(Color::Gray).add_modifier(Modifier::SLOW_BLINK),
        ),
    ];
    if let Some(error) = last_error {
        lines.push(Line::raw(""));
        lines.push(Line::styled(format!("last fetch failed: {}", error), theme::muted()));
        lines.push(Line::styled("press r to retry", theme::muted()));
    }
    lines
}

fn render_footer(f: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let hotkeys = vec![
        Span::raw(" ["),
        Span::styled("Tab", key),
        Span::raw("] card  ["),
        Span::styled("t", key),
        Span::raw("] trend  ["),
        Span::styled("n", key),
        Span::raw("] next day  ["),
        Span::styled("b", key),
        Span::raw("] backlog  ["),
        Span::styled("r", key),
        Span::raw("] refetch  ["),
        Span::styled("q", key),
        Span::raw("] quit"),
    ];

    f.render_widget(Paragraph::new(Line::from(hotkeys)), area);
}
