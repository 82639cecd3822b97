use anyhow::Context;
use clap::Parser;
use gasbot::domain::ports::ConfigProvider;
use gasbot::utils::{logger, validation::Validate};
use gasbot::{BotEngine, CliConfig, GeoportalClient, TelegramClient, TomlConfig};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting gasbot");

    match cli.config.clone() {
        Some(path) => {
            let config = TomlConfig::from_file(&path)
                .with_context(|| format!("failed to load config file {}", path.display()))?;
            run(config).await
        }
        None => run(cli).await,
    }
}

async fn run<C: ConfigProvider + Validate>(config: C) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let source = GeoportalClient::new(
        config.source_endpoint(),
        Duration::from_secs(config.timeout_seconds()),
        config.retry_attempts(),
    )
    .context("failed to build price source client")?;

    let chat = TelegramClient::new(
        config.telegram_api_base(),
        config.bot_token(),
        config.poll_timeout_seconds(),
    )
    .context("failed to build Telegram client")?;

    let mut engine = BotEngine::new(source, chat, config);
    engine.run().await.context("bot loop terminated")?;
    Ok(())
}
