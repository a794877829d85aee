use log::LevelFilter;
use odds_feed::client::{DEFAULT_BASE_URL, OddsApi, games_url};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_URL: &str = "ODDSBOARD_URL";
pub const ENV_FEED_JSON: &str = "ODDSBOARD_FEED_JSON";
pub const ENV_TIMEOUT: &str = "ODDSBOARD_TIMEOUT_SECS";
pub const ENV_LOG: &str = "ODDSBOARD_LOG";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub base_url: String,
    pub snapshot: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            snapshot: None,
            timeout: None,
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key/value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let defaults = Self::default();
        Self {
            full_screen: false,
            log_level: get(ENV_LOG).and_then(|v| v.parse::<LevelFilter>().ok()),
            base_url: get(ENV_URL).unwrap_or(defaults.base_url),
            snapshot: get(ENV_FEED_JSON).map(PathBuf::from),
            timeout: get(ENV_TIMEOUT)
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }

    pub fn feed_client(&self) -> OddsApi {
        OddsApi::new(self.base_url.clone())
            .with_timeout(self.timeout)
            .with_snapshot(self.snapshot.clone())
    }

    /// Where the feed comes from, for the status line.
    pub fn source_label(&self) -> String {
        match &self.snapshot {
            Some(path) => path.display().to_string(),
            None => games_url(&self.base_url),
        }
    }
}
