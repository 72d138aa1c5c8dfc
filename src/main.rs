use std::env;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use txtify::config::Config;
use txtify::handlers::{create_router, AppState};
use txtify::services::Storage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "txtify=debug,tower_http=debug,axum::rejection=trace".into());
    let json_logs = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }

    let config = Config::from_env()?;

    tracing::info!("Starting txtify conversion service");
    tracing::info!("Max file size: {}MB", config.max_file_size_mb);

    let storage = Storage::open(config.upload_dir.clone()).await?;
    let app = create_router(&config, AppState::new(storage, &config));

    let addr = config.bind_address();
    tracing::info!("Server listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
