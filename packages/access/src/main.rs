use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{Level, info};

use access::driver::handle_line;
use access::seed::seed_organizer;
use access::{AccessService, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    let level: Level = config
        .log
        .level
        .parse()
        .with_context(|| format!("Invalid log level '{}'", config.log.level))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let service = AccessService::new(&config).context("Failed to build access service")?;
    seed_organizer(&service, &config.seed)
        .await
        .context("Failed to seed organizer")?;

    info!("Reading commands from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let mut reply = handle_line(&service, &line).await;
        reply.push('\n');
        stdout.write_all(reply.as_bytes()).await?;
        stdout.flush().await?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}
