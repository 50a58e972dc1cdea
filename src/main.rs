use clap::Parser;
use tokio::signal;
use tracing::info;

use killfeed::adapter::inbound::cli::check;
use killfeed::adapter::inbound::cli::command::{CheckCommand, Cli, Commands};
use killfeed::adapter::inbound::cli::output::{self, OutputConfig};
use killfeed::adapter::inbound::cli::run;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    let result = match cli.command {
        Commands::Run(args) => {
            tokio::select! {
                result = run::execute(&args) => result,
                _ = signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    Ok(())
                }
            }
        }
        Commands::Check(CheckCommand::Config(arg)) => check::config::execute_config(&arg.config),
        Commands::Check(CheckCommand::Feed(arg)) => check::feed::execute_feed(&arg.config).await,
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
