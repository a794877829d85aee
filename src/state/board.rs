use crate::state::filter::FilterState;
use odds_feed::{LineValue, Match};

/// One rendered matchup row.
#[derive(Debug, Clone)]
pub struct BoardRow {
    /// Stable row index assigned at render time. Keys per-row UI state.
    pub id: usize,
    pub matchup: Match,
    /// Row-level copy of the current spread that filtering scans.
    pub current_odds: LineValue,
    pub visible: bool,
    pub injuries_expanded: bool,
}

impl BoardRow {
    fn new(id: usize, matchup: Match) -> Self {
        Self {
            id,
            current_odds: matchup.current_odds.clone(),
            matchup,
            visible: true,
            injuries_expanded: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct BoardState {
    pub rows: Vec<BoardRow>,
    /// Position of the cursor among the visible rows.
    pub selected: usize,
}

impl BoardState {
    /// Replace the board with one row per match, in feed order.
    pub fn load(&mut self, matches: Vec<Match>) {
        self.rows = matches
            .into_iter()
            .enumerate()
            .map(|(id, m)| BoardRow::new(id, m))
            .collect();
        self.selected = 0;
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &BoardRow> {
        self.rows.iter().filter(|r| r.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_rows().count()
    }

    /// Recompute row visibility from the filter bounds.
    ///
    /// Returns `false` without touching any row when only one bound is set.
    /// The cursor stays on the same matchup while it remains visible.
    pub fn apply_filter(&mut self, filter: &FilterState) -> bool {
        let Some(range) = filter.range() else {
            return false;
        };
        let selected_id = self.selected_row().map(|r| r.id);
        for row in &mut self.rows {
            row.visible = range.admits(&row.current_odds);
        }
        match selected_id.and_then(|id| self.visible_rows().position(|r| r.id == id)) {
            Some(position) => self.selected = position,
            None => self.clamp_selection(),
        }
        true
    }

    pub fn select_next(&mut self) {
        let max = self.visible_count().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_row(&self) -> Option<&BoardRow> {
        self.visible_rows().nth(self.selected)
    }

    /// Flip the injury list of the selected row. Returns the new state.
    pub fn toggle_selected_injuries(&mut self) -> Option<bool> {
        let id = self.selected_row()?.id;
        self.toggle_injuries(id)
    }

    pub fn toggle_injuries(&mut self, id: usize) -> Option<bool> {
        let row = self.rows.get_mut(id)?;
        row.injuries_expanded = !row.injuries_expanded;
        Some(row.injuries_expanded)
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.visible_count().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matchup(home: &str, current_odds: LineValue) -> Match {
        Match {
            home_team: home.into(),
            away_team: format!("{home} opp"),
            current_odds,
            ..Default::default()
        }
    }

    fn board() -> BoardState {
        let mut board = BoardState::default();
        board.load(vec![
            matchup("A", LineValue::Text("-3.5".into())),
            matchup("B", LineValue::Number(2.0)),
            matchup("C", LineValue::Text("PK".into())),
            matchup("D", LineValue::Text("-7".into())),
        ]);
        board
    }

    fn visible_homes(board: &BoardState) -> Vec<String> {
        board.visible_rows().map(|r| r.matchup.home_team.clone()).collect()
    }

    fn filter(min: &str, max: &str) -> FilterState {
        FilterState { min: min.into(), max: max.into() }
    }

    #[test]
    fn load_keeps_feed_order_and_ids() {
        let board = board();
        assert_eq!(board.rows.len(), 4);
        assert_eq!(visible_homes(&board), vec!["A", "B", "C", "D"]);
        let ids: Vec<usize> = board.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(board.rows[0].current_odds, LineValue::Text("-3.5".into()));
    }

    #[test]
    fn bounded_filter_shows_rows_in_range() {
        let mut board = board();
        assert!(board.apply_filter(&filter("-5", "0")));
        assert_eq!(visible_homes(&board), vec!["A"]);
        assert_eq!(board.rows.len(), 4, "filtering never removes rows");
    }

    #[test]
    fn single_bound_leaves_visibility_alone() {
        let mut board = board();
        board.apply_filter(&filter("-5", "0"));
        assert!(!board.apply_filter(&filter("-10", "")));
        assert_eq!(visible_homes(&board), vec!["A"]);
    }

    #[test]
    fn clearing_both_bounds_restores_all_rows() {
        let mut board = board();
        board.apply_filter(&filter("0", "5"));
        assert_eq!(visible_homes(&board), vec!["B"]);
        assert!(board.apply_filter(&filter("", "")));
        assert_eq!(visible_homes(&board), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let mut board = board();
        board.apply_filter(&filter("-8", "-3"));
        let once = visible_homes(&board);
        board.apply_filter(&filter("-8", "-3"));
        assert_eq!(visible_homes(&board), once);
        assert_eq!(once, vec!["A", "D"]);
    }

    #[test]
    fn selection_is_clamped_after_filtering() {
        let mut board = board();
        board.select_next();
        board.select_next();
        board.select_next();
        assert_eq!(board.selected, 3);
        board.apply_filter(&filter("-8", "-3"));
        assert_eq!(board.selected, 1);
        assert_eq!(board.selected_row().map(|r| r.id), Some(3));
    }

    #[test]
    fn selection_follows_its_matchup_when_rows_above_hide() {
        let mut board = board();
        board.select_next();
        board.select_next();
        board.select_next();
        assert_eq!(board.selected_row().map(|r| r.id), Some(3));

        board.apply_filter(&filter("-10", "-5"));
        assert_eq!(visible_homes(&board), vec!["D"]);
        assert_eq!(board.selected, 0);
        assert_eq!(board.selected_row().map(|r| r.id), Some(3));

        board.apply_filter(&filter("", ""));
        assert_eq!(board.selected, 3);
        assert_eq!(board.selected_row().map(|r| r.id), Some(3));
    }

    #[test]
    fn selection_falls_back_when_its_matchup_hides() {
        let mut board = board();
        board.select_next();
        assert_eq!(board.selected_row().map(|r| r.id), Some(1));
        board.apply_filter(&filter("-8", "-3"));
        assert_eq!(visible_homes(&board), vec!["A", "D"]);
        assert_eq!(board.selected, 1);
        assert_eq!(board.selected_row().map(|r| r.id), Some(3));
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut board = board();
        board.select_prev();
        assert_eq!(board.selected, 0);
        for _ in 0..10 {
            board.select_next();
        }
        assert_eq!(board.selected, 3);
    }

    #[test]
    fn injury_toggles_are_independent_per_row() {
        let mut board = board();
        let first = board.rows[0].matchup.clone();
        let mut same_names = first.clone();
        same_names.current_odds = LineValue::Number(1.0);
        board.load(vec![first, same_names]);

        assert_eq!(board.toggle_selected_injuries(), Some(true));
        assert!(board.rows[0].injuries_expanded);
        assert!(!board.rows[1].injuries_expanded, "rows sharing team names stay independent");

        board.select_next();
        assert_eq!(board.toggle_selected_injuries(), Some(true));
        assert_eq!(board.toggle_injuries(0), Some(false));
        assert!(board.rows[1].injuries_expanded);
        assert_eq!(board.toggle_injuries(9), None);
    }

    #[test]
    fn empty_board_has_no_selection() {
        let mut board = BoardState::default();
        board.load(Vec::new());
        assert!(board.selected_row().is_none());
        assert_eq!(board.toggle_selected_injuries(), None);
        assert!(board.apply_filter(&filter("", "")));
        assert_eq!(board.selected, 0);
    }
}
