use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use bookbin::storage::{s3::S3Storage, ObjectStore};
use bookbin::{config, db, logging, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (embedded defaults -> bookbin.toml -> env/.env)
    let app_cfg = config::load()?;
    logging::init(&app_cfg.log);

    let pool = db::connect(&app_cfg.database.url).await?;
    db::init_db(&pool).await?;

    let public_store: Arc<dyn ObjectStore> = Arc::new(S3Storage::new(&app_cfg.storage.public)?);
    let private_store: Arc<dyn ObjectStore> = Arc::new(S3Storage::new(&app_cfg.storage.private)?);

    let config = Arc::new(app_cfg);
    let state = AppState::new(pool, config.clone(), public_store, private_store);
    let app = routes::router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| {
            anyhow::anyhow!(
                "invalid listen addr {}:{} - {}",
                config.server.host,
                config.server.port,
                e
            )
        })?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(name = %config.server.name, "listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut term = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received. Stopping server...");
}
