//! Discord notification configuration.

use serde::Deserialize;

use crate::adapter::outbound::notifier::discord::DISCORD_API_BASE;

/// Discord section. The bot token is only read from the environment
/// (`WOPR_TOKEN`, then `DISCORD_TOKEN`).
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordAppConfig {
    /// Channel that receives announcements.
    #[serde(default)]
    pub channel_id: Option<u64>,
    /// Channel used instead while debug mode is on.
    #[serde(default)]
    pub debug_channel_id: Option<u64>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(skip)]
    pub token: Option<String>,
}

fn default_api_base() -> String {
    DISCORD_API_BASE.to_string()
}

impl Default for DiscordAppConfig {
    fn default() -> Self {
        Self {
            channel_id: None,
            debug_channel_id: None,
            api_base: default_api_base(),
            token: None,
        }
    }
}

impl DiscordAppConfig {
    /// Channel to post to. Debug mode prefers the debug channel and falls
    /// back to the regular one.
    #[must_use]
    pub fn target_channel(&self, debug: bool) -> Option<u64> {
        if debug {
            self.debug_channel_id.or(self.channel_id)
        } else {
            self.channel_id
        }
    }
}
