//! Sends killmail notifications to a Telegram chat.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::debug;

use crate::error::{Error, Result};
use crate::port::outbound::dispatcher::{Dispatcher, Notification};

use super::format::format_notification;

/// Configuration for the Telegram dispatcher.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
    /// Target chat ID for notifications.
    pub chat_id: i64,
}

/// Telegram implementation of [`Dispatcher`].
///
/// Each dispatch is a single awaited `sendMessage` call; the engine bounds
/// it with its own timeout.
pub struct TelegramDispatcher {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramDispatcher {
    #[must_use]
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            bot: Bot::new(config.bot_token),
            chat_id: ChatId(config.chat_id),
        }
    }
}

#[async_trait]
impl Dispatcher for TelegramDispatcher {
    async fn dispatch(&self, notification: &Notification) -> Result<()> {
        let text = format_notification(notification);
        self.bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .map_err(|e| Error::Dispatch(format!("telegram: {e}")))?;

        debug!(chat_id = self.chat_id.0, "Telegram message sent");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}
