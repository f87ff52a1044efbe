use anyhow::Result;
use dotenvy::dotenv;
use sinema::config::Settings;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv_result = dotenv();
    init_tracing();
    match dotenv_result {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => warn!("No .env file loaded ({}) - relying on environment", e),
    }
    let settings = Settings::from_env()?;
    if settings.api_key.is_empty() {
        warn!("TMDB_API_KEY is empty; relying on the proxy to supply a key");
    }
    sinema::app::run_server(settings).await
}
