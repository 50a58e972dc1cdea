//! RedisQ feed configuration.

use serde::Deserialize;

/// Default RedisQ listen endpoint.
pub const DEFAULT_FEED_URL: &str = "https://zkillredisq.stream/listen.php";

/// Minimum slack between the long-poll wait hint and the local timeout.
pub const MIN_TIMEOUT_SLACK_SECS: u64 = 5;

/// Long-poll feed settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Listen endpoint. May already carry `queueID` and/or `ttw`.
    #[serde(default = "default_url")]
    pub url: String,
    /// Requested long-poll wait (`ttw`), in seconds.
    #[serde(default = "default_ttw_secs")]
    pub ttw_secs: u64,
    /// Added to `ttw_secs` to form the hard request timeout.
    #[serde(default = "default_timeout_slack_secs")]
    pub timeout_slack_secs: u64,
    /// TCP connect timeout (milliseconds).
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Prefix of the generated queue token.
    #[serde(default = "default_queue_prefix")]
    pub queue_prefix: String,
}

fn default_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

const fn default_ttw_secs() -> u64 {
    10
}

const fn default_timeout_slack_secs() -> u64 {
    MIN_TIMEOUT_SLACK_SECS
}

const fn default_connect_timeout_ms() -> u64 {
    5000
}

fn default_user_agent() -> String {
    format!("killfeed/{} (zKillboard RedisQ)", env!("CARGO_PKG_VERSION"))
}

fn default_queue_prefix() -> String {
    "killfeed".to_string()
}

impl FeedConfig {
    /// Hard timeout for one request: the wait hint plus slack.
    #[must_use]
    pub fn request_timeout_secs(&self) -> u64 {
        self.ttw_secs + self.timeout_slack_secs
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            ttw_secs: default_ttw_secs(),
            timeout_slack_secs: default_timeout_slack_secs(),
            connect_timeout_ms: default_connect_timeout_ms(),
            user_agent: default_user_agent(),
            queue_prefix: default_queue_prefix(),
        }
    }
}
