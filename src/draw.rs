use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::cells::{format_injuries, format_recent_results, status_style};
use crate::components::matchup_table::MatchupTable;
use crate::state::app_state::{Focus, LoadPhase};
use crate::state::filter::FilterField;
use crate::state::network::LoadingState;
use crate::ui::layout::LayoutAreas;
use odds_feed::{Injury, RecentResults};

static TABS: &[&str; 2] = &["Matchups", "Help"];

const FILTER_BAR_HEIGHT: u16 = 3;
const DETAIL_HEIGHT: u16 = 9;
/// Below this inner height the table and the detail pane take turns: the
/// detail pane replaces the table while the selected row's injuries are open.
const DETAIL_MIN_INNER_HEIGHT: u16 = 24;

const HELP_TEXT: &str = "\
Tab / Shift-Tab   move focus: table → min spread → max spread
j/k  ↑/↓          move between matchups
Enter / Space     show or hide the selected matchup's injury lists
0-9 - .           edit the focused spread bound
Backspace         erase in the focused bound
c                 clear both bounds (show every matchup)
Esc               back to the table / leave help
f                 toggle full screen
\"                 toggle the log pane
?                 this help
q / Ctrl-C        quit (from the filter bar too)

The filter applies when both bounds are set, or both are empty.
A single populated bound leaves the board as it is.";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Board => draw_board(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Board => 0,
        MenuItem::Help => 1,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_board(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Matchups ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let loaded_at = match &app.state.phase {
        LoadPhase::Loading => {
            f.render_widget(
                Paragraph::new("Loading matchups...")
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center),
                inner,
            );
            return;
        }
        LoadPhase::Error(message) => {
            f.render_widget(
                Paragraph::new(format!("Error: {message}"))
                    .style(Style::default().fg(Color::Red))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                inner,
            );
            return;
        }
        LoadPhase::Loaded { loaded_at } => loaded_at.as_str(),
    };

    let injuries_open = app.state.board.selected_row().is_some_and(|r| r.injuries_expanded);
    let (show_table, show_detail, table_height, detail_height) =
        match (inner.height >= DETAIL_MIN_INNER_HEIGHT, injuries_open) {
            (true, _) => (true, true, Constraint::Fill(1), Constraint::Length(DETAIL_HEIGHT)),
            (false, true) => (false, true, Constraint::Length(0), Constraint::Fill(1)),
            (false, false) => (true, false, Constraint::Fill(1), Constraint::Length(0)),
        };
    let [filter_bar, status, table, detail] = Layout::vertical([
        Constraint::Length(FILTER_BAR_HEIGHT),
        Constraint::Length(1),
        table_height,
        detail_height,
    ])
    .areas(inner);

    draw_filter_bar(f, filter_bar, app);
    draw_status_line(f, status, app, loaded_at);

    if show_detail {
        let title = if show_table { " Selected " } else { " Selected (Enter to hide) " };
        draw_detail(f, detail, app, title);
    }
    if !show_table {
        return;
    }

    if app.state.board.rows.is_empty() {
        f.render_widget(
            Paragraph::new("The feed has no matchups")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            table,
        );
    } else {
        f.render_widget(
            MatchupTable {
                board: &app.state.board,
                focused: app.state.focus == Focus::Table,
            },
            table,
        );
    }
}

fn draw_filter_bar(f: &mut Frame, area: Rect, app: &App) {
    let [min_area, max_area, hint_area] = Layout::horizontal([
        Constraint::Length(24),
        Constraint::Length(24),
        Constraint::Fill(1),
    ])
    .areas(area);

    for (field, field_area) in [(FilterField::Min, min_area), (FilterField::Max, max_area)] {
        let focused = app.state.focus == Focus::Filter(field);
        let border = if focused { Color::Yellow } else { Color::DarkGray };
        let value = app.state.filter.text(field);
        let text = if focused { format!("{value}_") } else { value.to_string() };
        f.render_widget(
            Paragraph::new(text).block(default_border(border).title(format!(" {} ", field.label()))),
            field_area,
        );
    }

    let hint = if app.state.filter.is_active() {
        Span::styled(
            format!(
                "showing {} ≤ spread ≤ {}",
                app.state.filter.min.trim(),
                app.state.filter.max.trim()
            ),
            Style::default().fg(Color::Yellow),
        )
    } else {
        Span::styled("Tab to edit bounds, c to clear", Style::default().fg(Color::DarkGray))
    };
    let [_, hint_line, _] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
            .areas(hint_area);
    f.render_widget(Paragraph::new(Line::from(hint)), hint_line);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App, loaded_at: &str) {
    let board = &app.state.board;
    let text = format!(
        "{} of {} matchups | loaded {loaded_at} from {} | Enter=injuries  j/k=move  ?=help  q=quit",
        board.visible_count(),
        board.rows.len(),
        app.settings.source_label(),
    );
    f.render_widget(Paragraph::new(text).style(Style::default().fg(Color::DarkGray)), area);
}

fn draw_detail(f: &mut Frame, area: Rect, app: &App, title: &str) {
    let block = default_border(Color::DarkGray).title(title.to_string());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(row) = app.state.board.selected_row() else {
        f.render_widget(
            Paragraph::new("No matchup in range")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };
    let m = &row.matchup;

    let [home_area, away_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(inner);

    f.render_widget(
        Paragraph::new(side_lines(&m.home_team, m.home_injuries.as_deref(), &m.home_dish)),
        home_area,
    );
    f.render_widget(
        Paragraph::new(side_lines(&m.away_team, m.away_injuries.as_deref(), &m.away_dish)),
        away_area,
    );
}

fn side_lines(team: &str, injuries: Option<&[Injury]>, dish: &RecentResults) -> Vec<Line<'static>> {
    let mut ats = vec![Span::styled("ATS ", Style::default().fg(Color::DarkGray))];
    ats.extend(format_recent_results(dish).spans);

    let mut lines = vec![
        Line::from(Span::styled(team.to_string(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(ats),
    ];
    match injuries.filter(|list| !list.is_empty()) {
        Some(list) => lines.extend(list.iter().map(injury_detail_line)),
        None => lines.extend(format_injuries(None).lines),
    }
    lines
}

/// Injury with its link spelled out, since terminals cannot follow markup links.
fn injury_detail_line(injury: &Injury) -> Line<'static> {
    Line::from(vec![
        Span::styled(injury.status.clone(), status_style(injury)),
        Span::raw(" "),
        Span::raw(injury.name.clone()),
        Span::styled(format!("  {}", injury.link), Style::default().fg(Color::DarkGray)),
    ])
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(HELP_TEXT).style(Style::default().fg(Color::Gray)),
        inner,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logger = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::Gray));
    f.render_widget(logger, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading {
        return;
    }
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::White));
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
