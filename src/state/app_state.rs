use crate::app::MenuItem;
use crate::state::board::BoardState;
use crate::state::filter::{FilterField, FilterState};

// ---------------------------------------------------------------------------
// Feed load lifecycle
// ---------------------------------------------------------------------------

/// `Loading` moves to exactly one of the other two and stays there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Loading,
    Loaded {
        /// Local wall-clock time the feed arrived, `HH:MM`.
        loaded_at: String,
    },
    Error(String),
}

impl LoadPhase {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadPhase::Loaded { .. })
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, LoadPhase::Loading)
    }
}

// ---------------------------------------------------------------------------
// Input focus
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Table,
    Filter(FilterField),
}

impl Focus {
    /// Table → min bound → max bound → table.
    pub fn next(self) -> Self {
        match self {
            Focus::Table => Focus::Filter(FilterField::Min),
            Focus::Filter(FilterField::Min) => Focus::Filter(FilterField::Max),
            Focus::Filter(FilterField::Max) => Focus::Table,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Table => Focus::Filter(FilterField::Max),
            Focus::Filter(FilterField::Max) => Focus::Filter(FilterField::Min),
            Focus::Filter(FilterField::Min) => Focus::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub phase: LoadPhase,
    pub board: BoardState,
    pub filter: FilterState,
    pub focus: Focus,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The filter bar exists only once there is data to filter.
    pub fn filter_visible(&self) -> bool {
        self.phase.is_loaded()
    }
}
