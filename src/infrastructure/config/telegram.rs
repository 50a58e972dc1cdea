//! Telegram notification configuration.

use serde::Deserialize;

/// Telegram section. The bot token is only read from `TELEGRAM_BOT_TOKEN`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramAppConfig {
    /// Target chat. `TELEGRAM_CHAT_ID` overrides.
    #[serde(default)]
    pub chat_id: Option<i64>,
    #[serde(skip)]
    pub token: Option<String>,
}

impl TelegramAppConfig {
    /// True when both a token and a chat are known.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.token.is_some() && self.chat_id.is_some()
    }
}
