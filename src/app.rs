use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, Focus, LoadPhase};
use chrono::Local;
use log::debug;
use odds_feed::Feed;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Board,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let app = Self::with_settings(AppSettings::load());

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        Self { settings, state: AppState::new() }
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    /// `Loading → Loaded`: render the board, then expose the filter bar.
    pub fn on_feed_loaded(&mut self, feed: Feed) {
        if self.state.phase.is_settled() {
            return;
        }
        self.state.board.load(feed.matches);
        self.state.filter.clear();
        self.state.focus = Focus::Table;
        self.state.phase = LoadPhase::Loaded {
            loaded_at: Local::now().format("%H:%M").to_string(),
        };
    }

    /// `Loading → Error`. Nothing is rendered in place of the board.
    pub fn on_error(&mut self, message: String) {
        if self.state.phase.is_settled() {
            return;
        }
        self.state.phase = LoadPhase::Error(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Focus and filter editing
    // -----------------------------------------------------------------------

    pub fn focus_next(&mut self) {
        if self.state.filter_visible() {
            self.state.focus = self.state.focus.next();
        }
    }

    pub fn focus_prev(&mut self) {
        if self.state.filter_visible() {
            self.state.focus = self.state.focus.prev();
        }
    }

    pub fn focus_table(&mut self) {
        self.state.focus = Focus::Table;
    }

    /// Type into the focused bound and re-run the filter.
    pub fn filter_input(&mut self, c: char) {
        let Focus::Filter(field) = self.state.focus else {
            return;
        };
        if self.state.filter.push_char(field, c) {
            self.refilter();
        }
    }

    pub fn filter_backspace(&mut self) {
        let Focus::Filter(field) = self.state.focus else {
            return;
        };
        if self.state.filter.pop_char(field) {
            self.refilter();
        }
    }

    pub fn clear_filter(&mut self) {
        if !self.state.filter_visible() {
            return;
        }
        self.state.filter.clear();
        self.refilter();
    }

    fn refilter(&mut self) {
        let applied = self.state.board.apply_filter(&self.state.filter);
        debug!(
            "filter min={:?} max={:?} applied={applied} visible={}",
            self.state.filter.min,
            self.state.filter.max,
            self.state.board.visible_count()
        );
    }

    // -----------------------------------------------------------------------
    // Board navigation
    // -----------------------------------------------------------------------

    pub fn board_next(&mut self) {
        self.state.board.select_next();
    }

    pub fn board_prev(&mut self) {
        self.state.board.select_prev();
    }

    pub fn toggle_selected_injuries(&mut self) {
        self.state.board.toggle_selected_injuries();
    }
}
