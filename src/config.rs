use serde::Deserialize;
use std::time::Duration;

/// How the query box resolves text into movies
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchVariant {
    /// Filter the cached catalog on every keystroke, no network
    LiveFilter,
    /// Ask the movie service on submit
    RemoteSearch,
}

/// Which field of the selected movie keys the recommend call
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendBy {
    Title,
    Id,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Movie service base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Live local filtering or remote search on submit
    #[serde(default = "default_search_variant")]
    pub search_variant: SearchVariant,

    /// Key used for `/recommend`
    #[serde(default = "default_recommend_by")]
    pub recommend_by: RecommendBy,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_search_variant() -> SearchVariant {
    SearchVariant::LiveFilter
}

fn default_recommend_by() -> RecommendBy {
    RecommendBy::Title
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
