//! Book API server

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use book_api::{
    api,
    config::AppConfig,
    repository::{memory::MemoryStore, mysql::MySqlStore, BookStore},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("book_api={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Book API v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn BookStore> = if config.database.is_configured() {
        Arc::new(MySqlStore::connect(&config.database).await?)
    } else {
        tracing::info!("No database configured, serving fixture data from memory");
        Arc::new(MemoryStore::with_fixtures())
    };

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let state = AppState { store };

    let app = api::router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
