use tui::buffer::Buffer;
use tui::layout::{Constraint, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::Text;
use tui::widgets::{Cell, Row, StatefulWidget, Table, TableState, Widget};

use crate::components::cells::{format_current_line, format_injury_cell, format_recent_results};
use crate::state::board::{BoardRow, BoardState};

/// Column headers in canonical order: home side always before away side.
pub const HEADERS: [&str; 13] = [
    "Time",
    "Home",
    "Away",
    "Open Spread",
    "Open Total",
    "Spread",
    "Total",
    "Home O/U",
    "Away O/U",
    "Home Injuries",
    "Away Injuries",
    "Home ATS",
    "Away ATS",
];

/// Same columns, abbreviated for terminals narrower than [`COMPACT_BELOW`].
pub const COMPACT_HEADERS: [&str; 13] = [
    "Time", "Home", "Away", "OSprd", "OTot", "Sprd", "Tot", "H O/U", "A O/U", "H Inj", "A Inj",
    "H ATS", "A ATS",
];

/// Table widths under which the compact headers and widths are used.
pub const COMPACT_BELOW: u16 = 140;

const WIDTHS: [Constraint; 13] = [
    Constraint::Length(6),
    Constraint::Fill(2),
    Constraint::Fill(2),
    Constraint::Length(11),
    Constraint::Length(10),
    Constraint::Length(8),
    Constraint::Length(7),
    Constraint::Length(8),
    Constraint::Length(8),
    Constraint::Fill(3),
    Constraint::Fill(3),
    Constraint::Fill(2),
    Constraint::Fill(2),
];

const COMPACT_WIDTHS: [Constraint; 13] = [
    Constraint::Length(5),
    Constraint::Fill(3),
    Constraint::Fill(3),
    Constraint::Length(5),
    Constraint::Length(5),
    Constraint::Length(6),
    Constraint::Length(5),
    Constraint::Length(5),
    Constraint::Length(5),
    Constraint::Fill(2),
    Constraint::Fill(2),
    Constraint::Fill(2),
    Constraint::Fill(2),
];

/// The matchup board: one header row and one row per visible matchup.
pub struct MatchupTable<'a> {
    pub board: &'a BoardState,
    /// Whether the table currently owns keyboard focus (drives the cursor).
    pub focused: bool,
}

impl Widget for MatchupTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (headers, widths) = if area.width < COMPACT_BELOW {
            (COMPACT_HEADERS, COMPACT_WIDTHS)
        } else {
            (HEADERS, WIDTHS)
        };
        let header = Row::new(headers.iter().map(|h| Cell::from(*h)))
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .bottom_margin(1);

        let highlight = if self.focused {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };

        let table = Table::new(table_rows(self.board), widths)
            .header(header)
            .column_spacing(1)
            .row_highlight_style(highlight)
            .highlight_symbol("> ");

        let mut state = TableState::default().with_selected(Some(self.board.selected));
        StatefulWidget::render(table, area, buf, &mut state);
    }
}

/// Rows for every visible matchup, in board order.
pub fn table_rows(board: &BoardState) -> Vec<Row<'static>> {
    board.visible_rows().map(matchup_row).collect()
}

fn matchup_row(row: &BoardRow) -> Row<'static> {
    let m = &row.matchup;
    let home_injuries = format_injury_cell(m.home_injuries.as_deref(), row.injuries_expanded);
    let away_injuries = format_injury_cell(m.away_injuries.as_deref(), row.injuries_expanded);
    let height = home_injuries.height().max(away_injuries.height()).max(1) as u16;

    Row::new(vec![
        Cell::from(m.time.clone()),
        Cell::from(m.home_team.clone()),
        Cell::from(m.away_team.clone()),
        Cell::from(m.initial_odds.to_string()),
        Cell::from(m.initial_over_under.to_string()),
        Cell::from(format_current_line(&m.initial_odds, &row.current_odds)),
        Cell::from(m.current_over_under.to_string()),
        Cell::from(m.home_over_under.to_string()),
        Cell::from(m.away_over_under.to_string()),
        Cell::from(home_injuries),
        Cell::from(away_injuries),
        Cell::from(Text::from(format_recent_results(&m.home_dish))),
        Cell::from(Text::from(format_recent_results(&m.away_dish))),
    ])
    .height(height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::filter::FilterState;
    use odds_feed::{Injury, LineValue, Match, RecentResults};

    fn matchup(home: &str, away: &str, odds: &str) -> Match {
        Match {
            time: "7:00".into(),
            home_team: home.into(),
            away_team: away.into(),
            current_odds: LineValue::Text(odds.into()),
            home_injuries: Some(vec![]),
            away_injuries: Some(vec![Injury {
                name: "Player".into(),
                link: "https://example.com/p".into(),
                status: "GTD".into(),
            }]),
            home_dish: RecentResults::Entries(vec!["贏".into()]),
            away_dish: RecentResults::Malformed,
            ..Default::default()
        }
    }

    fn render(board: &BoardState) -> Vec<String> {
        render_at(board, 220)
    }

    fn render_at(board: &BoardState, width: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, 16);
        let mut buf = Buffer::empty(area);
        MatchupTable { board, focused: true }.render(area, &mut buf);
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect()
    }

    #[test]
    fn one_row_per_matchup_in_order() {
        let mut board = BoardState::default();
        board.load(vec![matchup("Alpha", "Bravo", "-3.5"), matchup("Charlie", "Delta", "2")]);
        assert_eq!(table_rows(&board).len(), 2);

        let lines = render(&board);
        let alpha = lines.iter().position(|l| l.contains("Alpha")).expect("Alpha rendered");
        let charlie = lines.iter().position(|l| l.contains("Charlie")).expect("Charlie rendered");
        assert!(alpha < charlie);
        assert!(lines[0].contains("Time") && lines[0].contains("Away ATS"));
    }

    #[test]
    fn hidden_rows_are_not_drawn() {
        let mut board = BoardState::default();
        board.load(vec![matchup("Alpha", "Bravo", "-3.5"), matchup("Charlie", "Delta", "2")]);
        board.apply_filter(&FilterState { min: "-5".into(), max: "0".into() });

        assert_eq!(table_rows(&board).len(), 1);
        let lines = render(&board);
        assert!(lines.iter().any(|l| l.contains("Alpha")));
        assert!(!lines.iter().any(|l| l.contains("Charlie")));
    }

    #[test]
    fn placeholder_and_collapsed_injuries_are_drawn() {
        let mut board = BoardState::default();
        board.load(vec![matchup("Alpha", "Bravo", "-3.5")]);
        let lines = render(&board);
        let row = lines.iter().find(|l| l.contains("Alpha")).unwrap();
        assert!(row.contains("None"));
        assert!(row.contains("▸ show 1"));
    }

    #[test]
    fn expanded_row_grows_to_fit_injuries() {
        let mut board = BoardState::default();
        board.load(vec![matchup("Alpha", "Bravo", "-3.5")]);
        board.toggle_selected_injuries();
        let lines = render(&board);
        let row = lines.iter().position(|l| l.contains("Alpha")).unwrap();
        assert!(lines[row].contains("Player"));
        assert!(lines[row + 1].contains("▾ hide"));
    }

    #[test]
    fn narrow_table_uses_compact_columns() {
        let mut board = BoardState::default();
        board.load(vec![matchup("Alpha", "Bravo", "-3.5")]);
        let lines = render_at(&board, 78);
        assert!(lines[0].contains("Sprd") && lines[0].contains("A ATS"));
        assert!(!lines[0].contains("Home Injuries"));
        let row = lines.iter().find(|l| l.contains("Alpha")).expect("home team drawn in full");
        assert!(row.contains("Bravo"));
        assert!(row.contains("-3.5"));
    }
}
