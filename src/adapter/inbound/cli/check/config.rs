use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Validate configuration without starting the loop.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = Config::load_or_default(path)?;

    output::section("Configuration Check");
    if path.exists() {
        output::field("Config", path.display());
    } else {
        output::field("Config", "defaults (file not found)");
    }
    output::success("Configuration is valid");

    output::section("Summary");
    output::field("Character", config.tracking.character_id);
    output::field("Feed", &config.feed.url);
    output::field(
        "Request timeout",
        format!("{}s", config.feed.request_timeout_secs()),
    );
    output::field("Dedup capacity", config.dedup.capacity);
    output::field("Debug", config.debug);

    let policy = config.effective_policy();
    output::field(
        "Announce",
        format!(
            "kills={} solo={} losses={} pods={} everything={}",
            policy.kills, policy.solo_kills, policy.losses, policy.pod_losses, policy.everything
        ),
    );

    match (
        config.discord.token.is_some(),
        config.discord.target_channel(config.debug),
    ) {
        (true, Some(channel)) => {
            output::success("Discord integration configured");
            output::field("Channel", channel);
        }
        (true, None) => output::warning("Discord token set but ZKILL_CHANNEL_ID is missing"),
        (false, Some(_)) => {
            output::warning("Discord channel set but WOPR_TOKEN/DISCORD_TOKEN is missing");
        }
        (false, None) => output::field("Discord", "disabled"),
    }

    if config.telegram.is_configured() {
        output::success("Telegram integration configured");
    } else if config.telegram.token.is_some() || config.telegram.chat_id.is_some() {
        output::warning("Telegram needs both TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID");
    } else {
        output::field("Telegram", "disabled");
    }

    output::success("Configuration check complete");
    Ok(())
}
