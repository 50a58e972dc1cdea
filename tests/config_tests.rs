mod support;

use killfeed::error::{ConfigError, Error};
use killfeed::infrastructure::config::settings::Config;

use support::config::write_temp_config;

fn no_env(_: &str) -> Option<String> {
    None
}

fn load(contents: &str) -> killfeed::error::Result<Config> {
    let file = write_temp_config(contents);
    let content = std::fs::read_to_string(file.path()).expect("read temp config");
    Config::parse_toml_with_env(&content, no_env)
}

fn assert_invalid(result: killfeed::error::Result<Config>, expected: &'static str) {
    match result {
        Err(Error::Config(ConfigError::InvalidValue { field, .. })) if field == expected => {}
        Err(err) => panic!("expected invalid {expected}, got {err}"),
        Ok(_) => panic!("expected invalid {expected}, config was accepted"),
    }
}

#[test]
fn full_config_round_trips() {
    let config = load(
        r#"
debug = false

[tracking]
character_id = 90000001

[feed]
url = "https://zkillredisq.stream/listen.php"
ttw_secs = 5
timeout_slack_secs = 7
queue_prefix = "corp-feed"

[backoff]
min_interval_ms = 1500
rate_limit_default_ms = 60000

[dedup]
capacity = 1000

[dispatch]
timeout_ms = 3000

[policy]
losses = true
pod_losses = true

[discord]
channel_id = 405503298951446528

[logging]
level = "debug"
format = "json"
"#,
    )
    .unwrap();

    assert_eq!(config.tracking.character_id, 90_000_001);
    assert_eq!(config.feed.request_timeout_secs(), 12);
    assert_eq!(config.feed.queue_prefix, "corp-feed");
    assert_eq!(config.backoff.min_interval_ms, 1500);
    assert_eq!(config.backoff.error_delay_ms, 2500);
    assert_eq!(config.dedup.capacity, 1000);
    assert!(config.policy.losses && config.policy.pod_losses && config.policy.kills);
    assert_eq!(config.discord.channel_id, Some(405_503_298_951_446_528));
    assert!(config.logging.is_json());
}

#[test]
fn token_in_file_is_ignored() {
    let config = load(
        r#"
[discord]
channel_id = 1
token = "from-file"
"#,
    )
    .unwrap();
    assert!(config.discord.token.is_none());
}

#[test]
fn config_rejects_zero_dedup_capacity() {
    assert_invalid(load("[dedup]\ncapacity = 0\n"), "capacity");
}

#[test]
fn config_rejects_zero_ttw() {
    assert_invalid(load("[feed]\nttw_secs = 0\n"), "ttw_secs");
}

#[test]
fn config_rejects_short_timeout_slack() {
    assert_invalid(load("[feed]\ntimeout_slack_secs = 4\n"), "timeout_slack_secs");
}

#[test]
fn config_rejects_zero_floor() {
    assert_invalid(load("[backoff]\nmin_interval_ms = 0\n"), "min_interval_ms");
}

#[test]
fn config_rejects_bad_feed_url() {
    assert_invalid(load("[feed]\nurl = \"not a url\"\n"), "feed_url");
}

#[test]
fn config_rejects_malformed_toml() {
    assert!(matches!(
        load("[feed\nttw_secs = 1"),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn missing_file_is_a_read_error() {
    assert!(matches!(
        Config::load("/nonexistent/killfeed.toml"),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}
