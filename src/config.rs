use serde::Deserialize;
use std::time::Duration;

use crate::services::bgg::RetryPolicy;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// BoardGameGeek XML API v2 base URL
    #[serde(default = "default_bgg_api_url")]
    pub bgg_api_url: String,

    /// Timeout for a single HTTP attempt
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Delay before re-issuing a request that came back 202
    #[serde(default = "default_queued_retry_delay_secs")]
    pub queued_retry_delay_secs: u64,

    /// Upper bound on 202 retries; unset means poll until BGG answers
    #[serde(default)]
    pub max_queued_retries: Option<u32>,

    /// How many collection items per user take part in a comparison
    #[serde(default = "default_top_games_limit")]
    pub top_games_limit: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bgg_api_url() -> String {
    "https://boardgamegeek.com/xmlapi2/".to_string()
}

fn default_request_timeout_secs() -> u64 {
    5
}

fn default_queued_retry_delay_secs() -> u64 {
    5
}

fn default_top_games_limit() -> usize {
    100
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bgg_api_url: default_bgg_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            queued_retry_delay_secs: default_queued_retry_delay_secs(),
            max_queued_retries: None,
            top_games_limit: default_top_games_limit(),
            host: default_host(),
            port: default_port(),
        }
    }
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

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            queued_delay: Duration::from_secs(self.queued_retry_delay_secs),
            max_queued_retries: self.max_queued_retries,
        }
    }
}
