use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use megaphone::{config::ServerConfig, routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    if config.image_generation_api_url.is_some() {
        info!("Image generation upstream configured");
    } else {
        info!("IMAGE_GENERATION_API_URL not set: /generate-image disabled");
    }

    let addr = format!("{}:{}", config.host, config.port);
    let app = routes::router(AppState::new(config)?);

    info!("megaphone broadcast server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
