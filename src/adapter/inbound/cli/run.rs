//! Handler for the `run` command.

use tracing::info;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Execute the run command. Returns only on a wiring error; the caller
/// races it against Ctrl-C.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let config = load_config(args)?;
    config.init_logging();

    if !config.logging.is_json() {
        print_startup(&config);
    }

    info!(
        tracked = config.tracking.character_id,
        debug = config.debug,
        feed_url = %config.feed.url,
        "killfeed starting"
    );

    bootstrap::run(config).await
}

/// Load configuration and apply command-line overrides.
///
/// Debug mode raises the log level to `debug` unless `--log-level` names
/// one; `RUST_LOG` still wins over both.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded.
pub fn load_config(args: &RunArgs) -> Result<Config> {
    let mut config = Config::load_or_default(&args.config)?;
    if args.debug {
        config.debug = true;
    }
    match &args.log_level {
        Some(level) => config.logging.level.clone_from(level),
        None if config.debug => config.logging.level = "debug".to_string(),
        None => {}
    }
    if args.json_logs || output::is_json() {
        config.logging.format = "json".to_string();
    }
    Ok(config)
}

fn print_startup(config: &Config) {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Character", config.tracking.character_id);
    output::field("Feed", &config.feed.url);
    if config.debug {
        output::warning("Debug mode: every killmail is announced");
    }
}
