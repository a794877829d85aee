use odds_feed::{DishOutcome, Injury, LineValue, RecentResults, classify_dish};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span, Text};

pub const NO_INJURIES: &str = "None";
pub const RESULT_SEPARATOR: &str = ", ";
pub const EXPAND_LABEL: &str = "▸ show";
pub const COLLAPSE_LABEL: &str = "▾ hide";

pub fn placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
}

pub fn link_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED)
}

/// Game-time decision.
pub fn questionable_style() -> Style {
    Style::default().fg(Color::Yellow)
}

pub fn out_style() -> Style {
    Style::default().fg(Color::Red)
}

pub fn win_style() -> Style {
    Style::default().fg(Color::Green)
}

pub fn loss_style() -> Style {
    Style::default().fg(Color::Red)
}

fn toggle_style() -> Style {
    Style::default().fg(Color::Blue)
}

pub fn status_style(injury: &Injury) -> Style {
    if injury.is_questionable() { questionable_style() } else { out_style() }
}

/// One line per injury in feed order, or the placeholder when there are none.
pub fn format_injuries(injuries: Option<&[Injury]>) -> Text<'static> {
    let injuries = injuries.unwrap_or_default();
    if injuries.is_empty() {
        return Text::from(Line::from(Span::styled(NO_INJURIES, placeholder_style())));
    }
    Text::from(injuries.iter().map(injury_line).collect::<Vec<_>>())
}

fn injury_line(injury: &Injury) -> Line<'static> {
    Line::from(vec![
        Span::styled(injury.name.clone(), link_style()),
        Span::raw(" "),
        Span::styled(injury.status.clone(), status_style(injury)),
    ])
}

/// Injury cell with its show/hide affordance.
///
/// Collapsed lists show only the count and the expand label; an expanded list
/// is followed by the collapse label. Empty lists always show the placeholder.
pub fn format_injury_cell(injuries: Option<&[Injury]>, expanded: bool) -> Text<'static> {
    let list = injuries.unwrap_or_default();
    if list.is_empty() {
        return format_injuries(None);
    }
    if !expanded {
        let questionable = list.iter().filter(|i| i.is_questionable()).count();
        let mut spans = vec![Span::styled(format!("{EXPAND_LABEL} {}", list.len()), toggle_style())];
        if questionable > 0 {
            spans.push(Span::styled(format!(" ({questionable} GTD)"), questionable_style()));
        }
        return Text::from(Line::from(spans));
    }
    let mut text = format_injuries(Some(list));
    text.push_line(Line::from(Span::styled(COLLAPSE_LABEL, toggle_style())));
    text
}

/// Recent against-the-spread results on one line, covers green, misses red.
pub fn format_recent_results(results: &RecentResults) -> Line<'static> {
    let RecentResults::Entries(entries) = results else {
        return Line::default();
    };

    let mut spans = Vec::with_capacity(entries.len() * 2);
    for (idx, entry) in entries.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(RESULT_SEPARATOR));
        }
        let entry = entry.trim().to_string();
        let span = match classify_dish(&entry) {
            DishOutcome::Win => Span::styled(entry, win_style()),
            DishOutcome::Loss => Span::styled(entry, loss_style()),
            DishOutcome::Other => Span::raw(entry),
        };
        spans.push(span);
    }
    Line::from(spans)
}

/// Current spread with a marker when it moved off the opening number.
pub fn format_current_line(initial: &LineValue, current: &LineValue) -> Line<'static> {
    let text = Span::raw(current.to_string());
    let marker = match (initial.as_f64(), current.as_f64()) {
        (Some(open), Some(now)) if now > open => Some(Span::styled(" ▲", win_style())),
        (Some(open), Some(now)) if now < open => Some(Span::styled(" ▼", loss_style())),
        _ => None,
    };
    match marker {
        Some(marker) => Line::from(vec![text, marker]),
        None => Line::from(text),
    }
}
