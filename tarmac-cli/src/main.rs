use anyhow::Context;
use tarmac_store::app_config::{BackendKind, Config};
use tarmac_store::{DynamoBackend, MemoryBackend};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tarmac_cli=info,tarmac_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!(
        "Starting demo against {} / {} ({:?} backend)",
        config.tables.flights,
        config.tables.bookings,
        config.store.backend
    );

    match config.store.backend {
        BackendKind::Dynamodb => {
            let backend = DynamoBackend::connect(&config.aws).await;
            tarmac_cli::run(backend, &config).await?;
        }
        BackendKind::Memory => {
            // A fresh process has nothing to persist, so start with both tables in place
            let backend = MemoryBackend::with_tables([config.tables.flights.clone(), config.tables.bookings.clone()]);
            tarmac_cli::run(backend, &config).await?;
        }
    }

    tracing::info!("Demo finished");
    Ok(())
}
