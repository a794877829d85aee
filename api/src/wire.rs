/// Wire types for the matchup feed.
/// Endpoint: {base}/api/games
///
/// The feed is only loosely contracted: lines arrive as numbers or strings,
/// lists may be null or missing. Everything that can vary stays a raw
/// `serde_json::Value` here and is interpreted in `client::map_match`.
use serde::Deserialize;
use serde_json::Value;

/// `matches` is the one required field: a body without it is not a feed.
#[derive(Deserialize, Default, Debug)]
pub struct FeedResponse {
    pub matches: Vec<WireMatch>,
}

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireMatch {
    #[serde(default)]
    pub time: Value,
    #[serde(default)]
    pub home_team: Value,
    #[serde(default)]
    pub away_team: Value,
    #[serde(default)]
    pub initial_odds: Value,
    #[serde(default)]
    pub initial_over_under: Value,
    #[serde(default)]
    pub current_odds: Value,
    #[serde(default)]
    pub current_over_under: Value,
    #[serde(default)]
    pub home_over_under: Value,
    #[serde(default)]
    pub away_over_under: Value,
    #[serde(default)]
    pub home_injuries: Value,
    #[serde(default)]
    pub away_injuries: Value,
    #[serde(default)]
    pub home_dish: Value,
    #[serde(default)]
    pub away_dish: Value,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct WireInjury {
    pub name: Option<String>,
    pub link: Option<String>,
    pub status: Option<String>,
}
