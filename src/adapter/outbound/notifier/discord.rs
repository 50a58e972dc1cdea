//! Discord channel dispatcher.
//!
//! Posts each notification as a single embed through the REST API, using a
//! bot token. No gateway session is opened; the bot only needs permission to
//! send messages in the target channel.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::port::outbound::dispatcher::{Dispatcher, Notification};

/// Default Discord REST base.
pub const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Settings for the Discord dispatcher.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    /// Bot token, without the `Bot ` prefix.
    pub token: String,
    pub channel_id: u64,
    pub api_base: String,
    /// Per-request timeout (milliseconds).
    pub timeout_ms: u64,
}

impl DiscordConfig {
    pub fn new(token: impl Into<String>, channel_id: u64) -> Self {
        Self {
            token: token.into(),
            channel_id,
            api_base: DISCORD_API_BASE.to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Sends notifications to one Discord channel.
pub struct DiscordDispatcher {
    http: HttpClient,
    config: DiscordConfig,
}

impl DiscordDispatcher {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: DiscordConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self { http, config })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/channels/{}/messages",
            self.config.api_base.trim_end_matches('/'),
            self.config.channel_id
        )
    }
}

#[async_trait]
impl Dispatcher for DiscordDispatcher {
    async fn dispatch(&self, notification: &Notification) -> Result<()> {
        let response = self
            .http
            .post(self.messages_url())
            .header("Authorization", format!("Bot {}", self.config.token))
            .json(&embed_payload(notification))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Dispatch(format!(
                "discord returned {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        debug!(channel_id = self.config.channel_id, "Discord message sent");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "discord"
    }
}

/// Message body with one embed.
#[must_use]
pub fn embed_payload(notification: &Notification) -> Value {
    let mut embed = json!({
        "title": notification.title,
        "url": notification.url,
        "description": notification.description,
        "color": notification.color,
        "fields": notification
            .fields
            .iter()
            .map(|f| json!({ "name": f.name, "value": f.value, "inline": f.inline }))
            .collect::<Vec<_>>(),
    });

    if let Some(thumbnail) = &notification.thumbnail_url {
        embed["thumbnail"] = json!({ "url": thumbnail });
    }
    if let Some(timestamp) = notification.timestamp {
        embed["timestamp"] = json!(timestamp.to_rfc3339());
    }

    json!({ "embeds": [embed] })
}
