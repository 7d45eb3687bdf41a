use chrono::Local;
use smart_challenge::{
    AppState, ChallengeStore, Config, FileStore, load_challenge, remote::RemoteSource, router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    fs::create_dir_all(&config.data_dir).await?;

    let remote = match config.remote_url.as_deref() {
        Some(url) => match RemoteSource::new(url, config.remote_timeout) {
            Ok(remote) => Some(remote),
            Err(err) => {
                warn!(url, error = %err, "remote source disabled");
                None
            }
        },
        None => None,
    };

    let persistence = Arc::new(FileStore::new(&config.data_dir));
    let outcome = load_challenge(
        persistence.as_ref(),
        remote.as_ref(),
        Local::now().date_naive(),
    )
    .await;
    info!(
        source = ?outcome.source,
        start_date = %outcome.data.start_date,
        entries = outcome.data.entries.len(),
        "challenge loaded"
    );

    let state = AppState::new(ChallengeStore::new(outcome.data, persistence));
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
