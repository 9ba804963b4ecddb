use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use quote_api::{app, AppState};
use quote_core::notifier::SalesNotifier;
use quote_core::repository::{CatalogRepository, QuoteRepository};
use quote_core::QuoteService;
use quote_store::{
    Config, DbClient, LogNotifier, MemoryCatalogRepository, MemoryQuoteRepository,
    PgCatalogRepository, PgQuoteRepository, WebhookNotifier,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quote_api=debug,quote_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting quote API on port {}", config.server.port);

    let (catalog, quotes): (Arc<dyn CatalogRepository>, Arc<dyn QuoteRepository>) =
        match &config.database {
            Some(db_config) => {
                let db = DbClient::new(db_config)
                    .await
                    .context("Failed to connect to Postgres")?;
                db.migrate().await.context("Failed to run migrations")?;
                (
                    Arc::new(PgCatalogRepository::new(db.pool.clone())),
                    Arc::new(PgQuoteRepository::new(db.pool.clone())),
                )
            }
            None => {
                tracing::warn!("No database configured, quotes are kept in memory only");
                let catalog = match &config.catalog.seed_file {
                    Some(path) => MemoryCatalogRepository::from_json_file(path)
                        .await
                        .context("Failed to load catalog seed")?,
                    None => MemoryCatalogRepository::new(),
                };
                (Arc::new(catalog), Arc::new(MemoryQuoteRepository::new()))
            }
        };

    let recipient = config.notifications.sales_recipient.clone();
    let notifier: Arc<dyn SalesNotifier> = match &config.notifications.webhook_url {
        Some(url) => {
            tracing::info!("Sales alerts go to webhook {}", url);
            Arc::new(WebhookNotifier::new(url.clone(), recipient)?)
        }
        None => Arc::new(LogNotifier::new(recipient.unwrap_or_else(|| "sales".to_string()))),
    };

    let state = AppState::new(QuoteService::new(catalog, quotes, notifier));
    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
