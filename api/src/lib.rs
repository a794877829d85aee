pub mod client;
pub mod wire;

use std::fmt;

// ---------------------------------------------------------------------------
// Domain types, independent of the loose feed wire format
// ---------------------------------------------------------------------------

/// Recent against-the-spread token for a covered game.
pub const WIN_TOKEN: &str = "贏";
/// Recent against-the-spread token for a missed cover.
pub const LOSS_TOKEN: &str = "輸";
/// Injury status marking a game-time decision.
pub const GTD_STATUS: &str = "GTD";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feed {
    pub matches: Vec<Match>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Match {
    pub time: String,
    pub home_team: String,
    pub away_team: String,
    pub initial_odds: LineValue,
    pub initial_over_under: LineValue,
    pub current_odds: LineValue,
    pub current_over_under: LineValue,
    pub home_over_under: LineValue,
    pub away_over_under: LineValue,
    /// `None` when the feed sent null or no list at all.
    pub home_injuries: Option<Vec<Injury>>,
    pub away_injuries: Option<Vec<Injury>>,
    pub home_dish: RecentResults,
    pub away_dish: RecentResults,
}

/// A betting line as it arrived on the wire: the feed mixes numbers and strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LineValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl LineValue {
    /// Numeric reading of the line. Text is trimmed and parsed as a float;
    /// anything that is not a finite number yields `None`.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            LineValue::Number(n) => *n,
            LineValue::Text(s) => s.trim().parse::<f64>().ok()?,
            LineValue::Missing => return None,
        };
        value.is_finite().then_some(value)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, LineValue::Missing)
    }
}

impl fmt::Display for LineValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineValue::Number(n) => write!(f, "{n}"),
            LineValue::Text(s) => f.write_str(s),
            LineValue::Missing => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Injury {
    pub name: String,
    pub link: String,
    pub status: String,
}

impl Injury {
    /// Only an exact `GTD` counts as questionable; every other status is "out".
    pub fn is_questionable(&self) -> bool {
        self.status == GTD_STATUS
    }
}

/// Recent against-the-spread results for one team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecentResults {
    Entries(Vec<String>),
    /// The feed sent something other than an array. Rendered as nothing.
    Malformed,
}

impl Default for RecentResults {
    fn default() -> Self {
        RecentResults::Entries(Vec::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DishOutcome {
    Win,
    Loss,
    Other,
}

/// Classify a single recent-results entry after trimming it.
pub fn classify_dish(entry: &str) -> DishOutcome {
    match entry.trim() {
        WIN_TOKEN => DishOutcome::Win,
        LOSS_TOKEN => DishOutcome::Loss,
        _ => DishOutcome::Other,
    }
}
