use crate::ui::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// 需要主循环处理的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Refresh,
    Quit,
}

pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            Action::Quit
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            Action::Quit
        }
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
            app.focus_next();
            Action::None
        }
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
            app.focus_prev();
            Action::None
        }
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.toggle_trend();
            Action::None
        }
        KeyCode::Char('n') | KeyCode::Char('N') => {
            app.advance_next_day();
            Action::None
        }
        KeyCode::Char('b') | KeyCode::Char('B') => {
            app.toggle_backlog();
            Action::None
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Refresh,
        _ => Action::None,
    }
}
