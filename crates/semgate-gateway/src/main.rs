//! semgate gateway
//!
//! - `POST /query`: resolve group_by aliases, run the metric query
//! - `GET /`: health
//! - `GET /metrics`: Prometheus text
//!
//! Config from `SEMGATE_CONFIG` (default `semgate.yaml`).

use tracing_subscriber::{fmt, EnvFilter};

use semgate_gateway::{app_state, config, router, shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let path = config::config_path();
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "semgate-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::signal())
        .await?;
    Ok(())
}
