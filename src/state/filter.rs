use odds_feed::LineValue;

/// Longest bound a user can type. Spreads never need more.
const MAX_BOUND_LEN: usize = 8;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FilterField {
    #[default]
    Min,
    Max,
}

impl FilterField {
    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Min => "Min spread",
            FilterField::Max => "Max spread",
        }
    }
}

/// The two spread bounds exactly as typed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub min: String,
    pub max: String,
}

/// What the current bounds mean for row visibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterRange {
    /// Both bounds empty: every row is shown.
    All,
    /// Both bounds set: rows with `min <= currentOdds <= max` are shown.
    Between(f64, f64),
}

impl FilterRange {
    pub fn admits(&self, current_odds: &LineValue) -> bool {
        match self {
            FilterRange::All => true,
            FilterRange::Between(min, max) => current_odds
                .as_f64()
                .is_some_and(|odds| *min <= odds && odds <= *max),
        }
    }
}

impl FilterState {
    pub fn text(&self, field: FilterField) -> &str {
        match field {
            FilterField::Min => &self.min,
            FilterField::Max => &self.max,
        }
    }

    fn text_mut(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Min => &mut self.min,
            FilterField::Max => &mut self.max,
        }
    }

    /// Append a character to a bound. Only characters that can appear in a
    /// spread are accepted; returns whether the bound changed.
    pub fn push_char(&mut self, field: FilterField, c: char) -> bool {
        if !(c.is_ascii_digit() || c == '-' || c == '.') {
            return false;
        }
        let text = self.text_mut(field);
        if text.chars().count() >= MAX_BOUND_LEN {
            return false;
        }
        text.push(c);
        true
    }

    pub fn pop_char(&mut self, field: FilterField) -> bool {
        self.text_mut(field).pop().is_some()
    }

    pub fn clear(&mut self) {
        self.min.clear();
        self.max.clear();
    }

    /// The range to apply, or `None` when exactly one bound is populated.
    /// A partially typed bound such as `-` counts as empty.
    pub fn range(&self) -> Option<FilterRange> {
        match (parse_bound(&self.min), parse_bound(&self.max)) {
            (None, None) => Some(FilterRange::All),
            (Some(min), Some(max)) => Some(FilterRange::Between(min, max)),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.range(), Some(FilterRange::Between(_, _)))
    }
}

fn parse_bound(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
