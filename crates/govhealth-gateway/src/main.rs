use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use govhealth_engine::directory::InMemoryDirectory;
use govhealth_gateway::{build_router, AppState, GatewayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = GatewayConfig::from_env();
    let directory = InMemoryDirectory::from_json_file(Path::new(&config.data_path))
        .with_context(|| format!("loading organization export from {}", config.data_path))?;
    tracing::info!(
        environment = ?config.environment,
        organizations = directory.len(),
        addr = %config.listen_addr,
        "gateway starting"
    );

    let state = AppState::new(
        Arc::new(directory),
        config.environment,
        config.admin_token.clone(),
    );
    let app = build_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
