use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::application::policy::Decision;
use crate::domain::{evaluate, CharacterId};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::feed::{KillFeed, PollResult};

/// Issue one request against the feed and print how it was classified.
pub async fn execute_feed<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let mut feed = bootstrap::build_feed(&config)?;
    let queue_id = bootstrap::queue_id(&feed, &config);

    output::section("Feed Check");
    output::field("URL", feed.listen_url(&queue_id));
    output::field(
        "Timeout",
        format!("{}s", feed.request_timeout().as_secs()),
    );

    let result = feed.poll(&queue_id).await?;
    output::field("Result", result.kind());

    match &result {
        PollResult::Event(killmail) => {
            let tracked = CharacterId::new(config.tracking.character_id);
            let verdict = evaluate(killmail, tracked);
            output::field(
                "Killmail",
                killmail
                    .id
                    .map_or_else(|| "missing id".to_string(), |id| id.to_string()),
            );
            output::field("Attackers", killmail.attackers.len());
            output::field("Verdict", describe(config.effective_policy().decide(&verdict)));
            output::success("Feed delivered a killmail");
        }
        PollResult::Empty => output::success("Feed reachable (no package within wait window)"),
        PollResult::RateLimited(retry_after) => {
            let hint = retry_after.map_or_else(|| "none".to_string(), |s| format!("{s}s"));
            output::warning(&format!("Rate limited (Retry-After: {hint})"));
        }
        PollResult::HttpError(status) => output::warning(&format!("Feed returned HTTP {status}")),
        PollResult::Timeout => output::warning("Request timed out"),
        PollResult::MalformedResponse => output::warning("Feed returned an unrecognised body"),
    }

    Ok(())
}

fn describe(decision: Decision) -> String {
    match decision {
        Decision::Dispatch(category) => format!("would announce ({})", category.title()),
        Decision::Suppress(category) => format!("involved, suppressed ({})", category.title()),
        Decision::Ignore => "not involved".to_string(),
    }
}
