use tracing_subscriber::EnvFilter;

use movie_rec_api::{
    api::{create_router, AppState, RecommendationLimits},
    config::Config,
    services::{initialize, JsonFileSource},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    // Catalog load and vectorizer fitting finish before the listener opens
    let source = JsonFileSource::new(&config.catalog_path);
    let engine = initialize(&source).await?;

    let state = AppState::new(engine, RecommendationLimits::from(&config));
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
