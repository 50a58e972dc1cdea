//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from an optional TOML file and then overridden from
//! the environment. Bot tokens are only ever read from the environment.
//!
//! # Example
//!
//! ```no_run
//! use killfeed::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use super::discord::DiscordAppConfig;
use super::logging::LoggingConfig;
use super::telegram::TelegramAppConfig;
use crate::adapter::outbound::redisq::settings::{FeedConfig, MIN_TIMEOUT_SLACK_SECS};
use crate::application::backoff::BackoffConfig;
use crate::application::dedup::DEFAULT_DEDUP_CAPACITY;
use crate::application::engine::EngineConfig;
use crate::application::policy::DispatchPolicy;
use crate::domain::CharacterId;
use crate::error::{ConfigError, Result};

/// Character tracked when nothing else is configured.
pub const DEFAULT_CHARACTER_ID: u64 = 1_761_654_327;

/// Which character to follow.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackingConfig {
    /// `EVE_CHAR_ID` overrides.
    #[serde(default = "default_character_id")]
    pub character_id: u64,
}

const fn default_character_id() -> u64 {
    DEFAULT_CHARACTER_ID
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            character_id: default_character_id(),
        }
    }
}

/// Dedup cache sizing.
#[derive(Debug, Clone, Deserialize)]
pub struct DedupConfig {
    #[serde(default = "default_dedup_capacity")]
    pub capacity: usize,
}

const fn default_dedup_capacity() -> usize {
    DEFAULT_DEDUP_CAPACITY
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            capacity: default_dedup_capacity(),
        }
    }
}

/// Dispatch limits.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    /// Upper bound on one dispatch attempt (milliseconds).
    #[serde(default = "default_dispatch_timeout_ms")]
    pub timeout_ms: u64,
}

const fn default_dispatch_timeout_ms() -> u64 {
    10_000
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_dispatch_timeout_ms(),
        }
    }
}

/// Main application configuration.
///
/// Every section is optional. Load from a TOML file using [`Config::load`],
/// or parse directly with [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tracking: TrackingConfig,

    /// RedisQ endpoint and long-poll timing.
    #[serde(default)]
    pub feed: FeedConfig,

    /// Delays between feed requests.
    #[serde(default)]
    pub backoff: BackoffConfig,

    #[serde(default)]
    pub dedup: DedupConfig,

    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Which categories are announced.
    #[serde(default)]
    pub policy: DispatchPolicy,

    #[serde(default)]
    pub discord: DiscordAppConfig,

    #[serde(default)]
    pub telegram: TelegramAppConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Announce every killmail to the debug channel. `ZKILL_DEBUG` overrides.
    #[serde(default)]
    pub debug: bool,
}

impl Config {
    /// Parse configuration from TOML content, apply the process environment
    /// and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - An environment override does not parse
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with_env(content, |key| std::env::var(key).ok())
    }

    /// Like [`Config::parse_toml`] with an explicit variable lookup.
    ///
    /// # Errors
    ///
    /// See [`Config::parse_toml`].
    #[allow(clippy::result_large_err)]
    pub fn parse_toml_with_env<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or [`Config::parse_toml`] fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load the file if it exists, otherwise start from defaults plus the
    /// environment.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a numeric variable does not parse.
    #[allow(clippy::result_large_err)]
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(raw) = var("EVE_CHAR_ID") {
            self.tracking.character_id = parse_number("EVE_CHAR_ID", &raw)?;
        }
        if let Some(raw) = var("ZKILL_CHANNEL_ID") {
            self.discord.channel_id = Some(parse_number("ZKILL_CHANNEL_ID", &raw)?);
        }
        if let Some(raw) = var("ZKILL_DEBUG_CHANNEL_ID") {
            self.discord.debug_channel_id = Some(parse_number("ZKILL_DEBUG_CHANNEL_ID", &raw)?);
        }
        if let Some(url) = var("ZKILL_REDISQ_URL") {
            self.feed.url = url;
        }
        if let Some(raw) = var("ZKILL_DEBUG") {
            self.debug = matches!(raw.to_ascii_lowercase().as_str(), "1" | "true");
        }
        if let Some(raw) = var("TELEGRAM_CHAT_ID") {
            self.telegram.chat_id = Some(parse_number("TELEGRAM_CHAT_ID", &raw)?);
        }

        // Never from the file.
        self.discord.token = var("WOPR_TOKEN").or_else(|| var("DISCORD_TOKEN"));
        self.telegram.token = var("TELEGRAM_BOT_TOKEN");

        Ok(())
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.tracking.character_id == 0 {
            return Err(ConfigError::InvalidValue {
                field: "character_id",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if let Err(e) = Url::parse(&self.feed.url) {
            return Err(ConfigError::InvalidValue {
                field: "feed_url",
                reason: e.to_string(),
            }
            .into());
        }
        if self.feed.ttw_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ttw_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.feed.timeout_slack_secs < MIN_TIMEOUT_SLACK_SECS {
            return Err(ConfigError::InvalidValue {
                field: "timeout_slack_secs",
                reason: format!("must be at least {MIN_TIMEOUT_SLACK_SECS}"),
            }
            .into());
        }
        if self.feed.queue_prefix.is_empty() {
            return Err(ConfigError::MissingField {
                field: "queue_prefix",
            }
            .into());
        }
        if self.backoff.min_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "min_interval_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.dedup.capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "capacity",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.dispatch.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dispatch_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Policy in effect: debug mode turns on `everything`.
    #[must_use]
    pub fn effective_policy(&self) -> DispatchPolicy {
        if self.debug {
            DispatchPolicy {
                everything: true,
                ..self.policy.clone()
            }
        } else {
            self.policy.clone()
        }
    }

    /// Engine settings derived from this configuration.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            tracked: CharacterId::new(self.tracking.character_id),
            policy: self.effective_policy(),
            backoff: self.backoff.clone(),
            dedup_capacity: self.dedup.capacity,
            dispatch_timeout: Duration::from_millis(self.dispatch.timeout_ms),
        }
    }
}

#[allow(clippy::result_large_err)]
fn parse_number<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T> {
    raw.parse().map_err(|_| {
        ConfigError::InvalidValue {
            field,
            reason: format!("`{raw}` is not a valid number"),
        }
        .into()
    })
}
