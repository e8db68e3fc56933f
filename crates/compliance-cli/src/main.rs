mod cli;
mod commands;
mod completions;
mod config;
mod error;
mod output;
mod setup;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use compliance_storage::paths;
use config::CliConfig;
use setup::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        completions::generate_completions(shell);
        return;
    }

    let config = CliConfig::load();
    let _guard = init_logging(&config, cli.verbose);

    if let Err(err) = run(cli, &config).await {
        let detail = format!("{err:#}");
        tracing::error!(error = %detail, "Command failed");
        error::handle_error(err);
    }
}

async fn run(cli: Cli, config: &CliConfig) -> Result<()> {
    let ctx = Context::prepare()?;
    let format = cli.format;

    match cli.command {
        Commands::Login(args) => commands::login::run(&ctx, config, args, format).await,
        Commands::LoginAutomate(args) => {
            commands::login::run_automate(&ctx, config, args, format).await
        }
        Commands::Profiles => commands::profiles::run(&ctx, format).await,
        Commands::Version => commands::version::run(&ctx, format).await,
        Commands::Upload(args) => commands::upload::run(&ctx, args, format).await,
        Commands::Status => commands::status::run(&ctx, format).await,
        Commands::Logout => commands::logout::run(&ctx, format).await,
        Commands::Completions { .. } => Ok(()),
    }
}

/// Log to a daily rolling file under the data directory. Logging is skipped
/// when the directory cannot be created.
fn init_logging(config: &CliConfig, verbose: bool) -> Option<WorkerGuard> {
    let log_dir = paths::ensure_log_dir().ok()?;

    let file_appender = tracing_appender::rolling::daily(log_dir, "compliance.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .init();

    Some(guard)
}
