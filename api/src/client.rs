use crate::wire::{FeedResponse, WireInjury, WireMatch};
use crate::{Feed, Injury, LineValue, Match, RecentResults};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub type FeedResult<T> = Result<T, FeedError>;

/// Fixed path of the matchup feed, relative to the configured base URL.
pub const GAMES_PATH: &str = "/api/games";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Matchup feed client.
#[derive(Debug, Clone)]
pub struct OddsApi {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
    snapshot: Option<PathBuf>,
}

impl Default for OddsApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// The feed could not be obtained. Every variant is terminal for a load:
/// the caller shows the message and renders no table.
#[derive(Debug)]
pub enum FeedError {
    Network(reqwest::Error, String),
    Status(StatusCode, String),
    Parsing(reqwest::Error, String),
    Snapshot(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            FeedError::Status(status, url) => write!(f, "Feed returned {status} for {url}"),
            FeedError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            FeedError::Snapshot(msg) => write!(f, "Snapshot error: {msg}"),
        }
    }
}

impl std::error::Error for FeedError {}

impl OddsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("oddsboard/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            timeout: None,
            snapshot: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the feed from a local JSON file instead of the network.
    pub fn with_snapshot(mut self, path: Option<PathBuf>) -> Self {
        self.snapshot = path;
        self
    }

    pub fn games_url(&self) -> String {
        games_url(&self.base_url)
    }

    /// Fetch the matchup feed.
    ///
    /// With a snapshot configured the file is read instead and the network is
    /// never touched. Otherwise a single GET is issued; any non-2xx status,
    /// transport failure or undecodable body is a `FeedError`.
    pub async fn fetch_feed(&self) -> FeedResult<Feed> {
        if let Some(path) = &self.snapshot {
            let content = std::fs::read_to_string(path)
                .map_err(|e| FeedError::Snapshot(format!("could not read {}: {e}", path.display())))?;
            return parse_feed(&content)
                .map_err(|e| FeedError::Snapshot(format!("invalid feed json at {}: {e}", path.display())));
        }

        let url = self.games_url();
        let raw: FeedResponse = self.get(&url).await?;
        Ok(map_feed(raw))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> FeedResult<T> {
        let mut request = self.client.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request
            .send()
            .await
            .map_err(|e| FeedError::Network(e, url.to_owned()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status, url.to_owned()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FeedError::Parsing(e, url.to_owned()))
    }
}

/// Feed URL for a base such as `http://host:8080` or `http://host:8080/`.
pub fn games_url(base_url: &str) -> String {
    format!("{}{GAMES_PATH}", base_url.trim_end_matches('/'))
}

/// Parse a feed document already held in memory.
pub fn parse_feed(content: &str) -> Result<Feed, serde_json::Error> {
    let raw: FeedResponse = serde_json::from_str(content)?;
    Ok(map_feed(raw))
}

// ---------------------------------------------------------------------------
// Mapping: loose wire values → clean domain types
// ---------------------------------------------------------------------------

fn map_feed(raw: FeedResponse) -> Feed {
    Feed { matches: raw.matches.iter().map(map_match).collect() }
}

fn map_match(m: &WireMatch) -> Match {
    Match {
        time: value_to_text(&m.time),
        home_team: value_to_text(&m.home_team),
        away_team: value_to_text(&m.away_team),
        initial_odds: value_to_line(&m.initial_odds),
        initial_over_under: value_to_line(&m.initial_over_under),
        current_odds: value_to_line(&m.current_odds),
        current_over_under: value_to_line(&m.current_over_under),
        home_over_under: value_to_line(&m.home_over_under),
        away_over_under: value_to_line(&m.away_over_under),
        home_injuries: map_injuries(&m.home_injuries),
        away_injuries: map_injuries(&m.away_injuries),
        home_dish: map_recent_results(&m.home_dish),
        away_dish: map_recent_results(&m.away_dish),
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn value_to_line(value: &Value) -> LineValue {
    match value {
        Value::Null => LineValue::Missing,
        Value::Number(n) => n.as_f64().map(LineValue::Number).unwrap_or(LineValue::Missing),
        Value::String(s) => LineValue::Text(s.clone()),
        other => LineValue::Text(other.to_string()),
    }
}

/// Non-array values map to `None`; array items that are not injury objects are skipped.
fn map_injuries(value: &Value) -> Option<Vec<Injury>> {
    let Value::Array(items) = value else {
        return None;
    };
    let injuries = items
        .iter()
        .filter_map(|item| serde_json::from_value::<WireInjury>(item.clone()).ok())
        .map(|w| Injury {
            name: w.name.unwrap_or_default(),
            link: w.link.unwrap_or_default(),
            status: w.status.unwrap_or_default(),
        })
        .collect();
    Some(injuries)
}

fn map_recent_results(value: &Value) -> RecentResults {
    match value {
        Value::Array(items) => RecentResults::Entries(items.iter().map(value_to_text).collect()),
        _ => RecentResults::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_body() -> String {
        json!({
            "matches": [
                {
                    "time": "7:00",
                    "homeTeam": "A",
                    "awayTeam": "B",
                    "initialOdds": -2.5,
                    "initialOverUnder": "221.5",
                    "currentOdds": "-3.5",
                    "currentOverUnder": 223,
                    "homeOverUnder": "112",
                    "awayOverUnder": "109.5",
                    "homeInjuries": [],
                    "awayInjuries": [
                        {"name": "Player One", "link": "https://example.com/p1", "status": "GTD"},
                        {"name": "Player Two", "link": "https://example.com/p2", "status": "Out"}
                    ],
                    "homeDish": ["贏", " 輸 ", "走"],
                    "awayDish": "n/a"
                },
                {
                    "time": "9:30",
                    "homeTeam": "C",
                    "awayTeam": "D",
                    "currentOdds": 2
                }
            ]
        })
        .to_string()
    }

    #[test]
    fn parse_feed_maps_loose_fields() {
        let feed = parse_feed(&sample_body()).expect("sample feed should parse");
        assert_eq!(feed.matches.len(), 2);

        let first = &feed.matches[0];
        assert_eq!(first.time, "7:00");
        assert_eq!(first.initial_odds, LineValue::Number(-2.5));
        assert_eq!(first.current_odds, LineValue::Text("-3.5".into()));
        assert_eq!(first.current_over_under, LineValue::Number(223.0));
        assert_eq!(first.home_injuries, Some(vec![]));
        let away = first.away_injuries.as_ref().expect("away injuries present");
        assert_eq!(away.len(), 2);
        assert_eq!(away[0].name, "Player One");
        assert!(away[0].is_questionable());
        assert!(!away[1].is_questionable());
        assert_eq!(
            first.home_dish,
            RecentResults::Entries(vec!["贏".into(), " 輸 ".into(), "走".into()])
        );
        assert_eq!(first.away_dish, RecentResults::Malformed);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let feed = parse_feed(&sample_body()).unwrap();
        let second = &feed.matches[1];
        assert_eq!(second.current_odds, LineValue::Number(2.0));
        assert!(second.initial_odds.is_missing());
        assert_eq!(second.home_injuries, None);
        assert_eq!(second.home_dish, RecentResults::Malformed);
    }

    #[test]
    fn injury_items_that_are_not_objects_are_skipped() {
        let injuries = map_injuries(&json!([{"name": "X", "status": "Out"}, 42, "bad"]));
        assert_eq!(injuries.map(|v| v.len()), Some(1));
        assert_eq!(map_injuries(&json!({"name": "X"})), None);
    }

    #[test]
    fn matches_keep_feed_order() {
        let feed = parse_feed(&sample_body()).unwrap();
        let homes: Vec<&str> = feed.matches.iter().map(|m| m.home_team.as_str()).collect();
        assert_eq!(homes, vec!["A", "C"]);
    }

    #[test]
    fn feed_without_matches_is_rejected() {
        assert!(parse_feed("{}").is_err());
        assert!(parse_feed(r#"{"matches": null}"#).is_err());
        assert_eq!(parse_feed(r#"{"matches": []}"#).unwrap().matches.len(), 0);
    }

    #[test]
    fn games_url_joins_fixed_path() {
        assert_eq!(OddsApi::new("http://host:8080/").games_url(), "http://host:8080/api/games");
        assert_eq!(OddsApi::new("http://host").games_url(), "http://host/api/games");
    }

    #[tokio::test]
    async fn fetch_feed_reads_games_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", GAMES_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(sample_body())
            .create_async()
            .await;

        let feed = OddsApi::new(server.url()).fetch_feed().await.expect("feed should load");
        mock.assert_async().await;
        assert_eq!(feed.matches.len(), 2);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", GAMES_PATH)
            .with_status(500)
            .with_body(r#"{"error":"boom"}"#)
            .create_async()
            .await;

        let err = OddsApi::new(server.url()).fetch_feed().await.unwrap_err();
        assert!(matches!(err, FeedError::Status(s, _) if s == StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn client_errors_are_not_swallowed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", GAMES_PATH).with_status(404).create_async().await;

        let err = OddsApi::new(server.url()).fetch_feed().await.unwrap_err();
        assert!(err.to_string().contains("404"), "got: {err}");
    }

    #[tokio::test]
    async fn undecodable_body_is_a_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", GAMES_PATH)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let err = OddsApi::new(server.url()).fetch_feed().await.unwrap_err();
        assert!(matches!(err, FeedError::Parsing(_, _)));
    }

    #[tokio::test]
    async fn transport_failure_is_a_network_error() {
        // Nothing listens on port 1.
        let err = OddsApi::new("http://127.0.0.1:1").fetch_feed().await.unwrap_err();
        assert!(matches!(err, FeedError::Network(_, _)));
        assert!(err.to_string().starts_with("Network error for http://127.0.0.1:1/api/games"));
    }

    #[tokio::test]
    async fn snapshot_file_replaces_network() {
        let path = std::env::temp_dir().join(format!("oddsboard-feed-{}.json", std::process::id()));
        std::fs::write(&path, sample_body()).unwrap();

        let api = OddsApi::new("http://127.0.0.1:1").with_snapshot(Some(path.clone()));
        let feed = api.fetch_feed().await.expect("snapshot should load");
        assert_eq!(feed.matches.len(), 2);

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn missing_snapshot_is_reported() {
        let api = OddsApi::default().with_snapshot(Some(PathBuf::from("/nonexistent/feed.json")));
        let err = api.fetch_feed().await.unwrap_err();
        assert!(matches!(err, FeedError::Snapshot(_)));
    }
}
