use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use travel_dashboard::{router, AppState, Board, Dashboard, FileSource, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let settings = Settings::from_env();
    let source = FileSource::new(settings.data_path.clone());
    let state = AppState::new(Dashboard::new(Board::default(), settings.timings));

    // Held until the load finishes, so API requests wait out the intro instead of
    // seeing an unstarted dashboard.
    let mut dashboard = Arc::clone(&state.dashboard).lock_owned().await;
    tokio::spawn(async move {
        if let Err(err) = dashboard.start(&source).await {
            error!(path = %source.path().display(), "dashboard unavailable: {err}");
        }
    });

    let app = router(state);
    let addr = settings.addr();

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
