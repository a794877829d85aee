use crate::app::{App, MenuItem};
use crate::state::app_state::Focus;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn handle_key_bindings(key_event: KeyEvent, app: &Arc<Mutex<App>>) {
    if key_event.kind == KeyEventKind::Release {
        return;
    }

    if quits(&key_event) {
        crate::cleanup_terminal();
        std::process::exit(0);
    }

    let mut guard = app.lock().await;

    // While a bound is focused, keys edit it rather than acting as commands.
    if let Focus::Filter(_) = guard.state.focus
        && guard.state.active_tab == MenuItem::Board
    {
        match key_event.code {
            KeyCode::Tab => guard.focus_next(),
            KeyCode::BackTab => guard.focus_prev(),
            KeyCode::Esc | KeyCode::Enter => guard.focus_table(),
            KeyCode::Backspace => guard.filter_backspace(),
            Char(c) => guard.filter_input(c),
            _ => {}
        }
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Board),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Board navigation
        (MenuItem::Board, KeyCode::Tab, _) => guard.focus_next(),
        (MenuItem::Board, KeyCode::BackTab, _) => guard.focus_prev(),
        (MenuItem::Board, Char('j') | KeyCode::Down, _) => guard.board_next(),
        (MenuItem::Board, Char('k') | KeyCode::Up, _) => guard.board_prev(),
        (MenuItem::Board, KeyCode::Enter | Char(' '), _) => guard.toggle_selected_injuries(),
        (MenuItem::Board, Char('c'), _) => guard.clear_filter(),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}

/// `q` is never valid bound input, so it quits from the filter bar as well.
fn quits(key_event: &KeyEvent) -> bool {
    match key_event.code {
        Char('c') => key_event.modifiers.contains(KeyModifiers::CONTROL),
        Char('q') => !key_event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
