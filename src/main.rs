/// Site Builder: affiliate site generation and deployment
///
/// Entry point for the `site-builder` CLI. Loads `.env`, parses arguments,
/// resolves configuration, installs logging and runs the selected command.
/// This is the only place the process exits with a non-zero status.

use clap::Parser;
use site_builder::{
    cli::{self, Cli},
    config::Config,
    telemetry,
};

#[tokio::main]
async fn main() {
    // .env is optional; real environment variables take precedence
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    telemetry::init(cli.debug, &config.paths.log_dir)?;

    tracing::info!("🚀 Site builder starting");
    let result = cli::run(cli, config).await;
    if let Err(e) = &result {
        tracing::error!("❌ {:#}", e);
    }
    result
}
