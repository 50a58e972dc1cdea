//! Composition root: configuration in, running engine out.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::notifier::discord::{DiscordConfig, DiscordDispatcher};
use crate::adapter::outbound::notifier::log::LogDispatcher;
#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::telegram::{TelegramConfig, TelegramDispatcher};
use crate::adapter::outbound::redisq::RedisqClient;
use crate::application::engine::Engine;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::dispatcher::Dispatcher;
use crate::port::outbound::feed::QueueId;

/// Pick the dispatcher for this configuration.
///
/// Discord when a token and a target channel are known, else Telegram (when
/// compiled in and configured), else the log.
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be built.
pub fn build_dispatcher(config: &Config) -> Result<Arc<dyn Dispatcher>> {
    let discord = &config.discord;
    match (&discord.token, discord.target_channel(config.debug)) {
        (Some(token), Some(channel_id)) => {
            let dispatcher = DiscordDispatcher::new(DiscordConfig {
                token: token.clone(),
                channel_id,
                api_base: discord.api_base.clone(),
                timeout_ms: config.dispatch.timeout_ms,
            })?;
            info!(channel_id, debug = config.debug, "Discord dispatcher enabled");
            return Ok(Arc::new(dispatcher));
        }
        (Some(_), None) => warn!("Discord token set but no channel configured"),
        (None, Some(_)) => warn!("Discord channel configured but WOPR_TOKEN/DISCORD_TOKEN not set"),
        (None, None) => {}
    }

    if let Some(dispatcher) = telegram_dispatcher(config) {
        return Ok(dispatcher);
    }

    warn!("No notification channel configured, killmails will only be logged");
    Ok(Arc::new(LogDispatcher))
}

#[cfg(feature = "telegram")]
fn telegram_dispatcher(config: &Config) -> Option<Arc<dyn Dispatcher>> {
    let bot_token = config.telegram.token.clone()?;
    let chat_id = config.telegram.chat_id?;
    info!(chat_id, "Telegram dispatcher enabled");
    Some(Arc::new(TelegramDispatcher::new(TelegramConfig { bot_token, chat_id })))
}

#[cfg(not(feature = "telegram"))]
fn telegram_dispatcher(config: &Config) -> Option<Arc<dyn Dispatcher>> {
    if config.telegram.is_configured() {
        warn!("Telegram configured but the `telegram` feature is not compiled in");
    }
    None
}

/// Queue token for this process: the one pinned in the feed URL, or a fresh one.
#[must_use]
pub fn queue_id(client: &RedisqClient, config: &Config) -> QueueId {
    client
        .pinned_queue_id()
        .unwrap_or_else(|| QueueId::generate(&config.feed.queue_prefix))
}

/// Build the feed client.
///
/// # Errors
///
/// Returns an error if the feed URL does not parse or the HTTP client cannot
/// be built.
pub fn build_feed(config: &Config) -> Result<RedisqClient> {
    RedisqClient::from_config(&config.feed)
}

/// Wire the production engine.
///
/// # Errors
///
/// Returns an error if any adapter cannot be constructed.
pub fn build_engine(config: &Config) -> Result<Engine<RedisqClient>> {
    let feed = build_feed(config)?;
    let queue_id = queue_id(&feed, config);
    let dispatcher = build_dispatcher(config)?;

    info!(
        queue_id = %queue_id,
        ttw_secs = config.feed.ttw_secs,
        request_timeout_ms = feed.request_timeout().as_millis() as u64,
        floor_ms = config.backoff.min_interval_ms,
        "Feed client ready"
    );

    Ok(Engine::new(feed, dispatcher, config.engine_config(), queue_id))
}

/// Build the engine and run it until the future is dropped.
///
/// # Errors
///
/// Returns an error only if wiring fails; the loop itself never returns.
pub async fn run(config: Config) -> Result<()> {
    let engine = build_engine(&config)?;
    engine.run().await;
    Ok(())
}
