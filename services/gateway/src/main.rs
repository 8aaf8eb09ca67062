use gateway::{AppState, GatewayConfig, create_router};
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // .env is optional
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from_env()?;
    tracing::info!(
        default_policy = %config.default_policy,
        alert_threshold = config.alert_threshold.value(),
        webhook = config.webhook_url.is_some(),
        "Starting Gateway API service"
    );

    let addr = config.bind_addr();
    let state = AppState::new(config);
    let app = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
