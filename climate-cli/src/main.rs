//! climate-cli - serve and query the station climate observations dataset.

use clap::Parser;
use climate_api::Settings;

#[derive(Parser)]
#[command(
    name = "climate-cli",
    version,
    about = "Read-only reporting API over station climate observations"
)]
struct Cli {
    /// Path to a configuration file (toml, yaml or json)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: climate_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from_file(path)?,
        None => Settings::load()?,
    };

    // RUST_LOG takes precedence over the configured level.
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.logging.level.as_str()),
    )
    .init();
    log::debug!("Loaded settings: {:?}", settings);

    climate_cmd::run(cli.command, settings).await
}
