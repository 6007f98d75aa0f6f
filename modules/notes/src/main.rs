//! Notes Service — in-memory note taking HTTP API.
//!
//! Notes live only for the lifetime of the process.
//!
//! Default: http://0.0.0.0:8000/

mod config;
mod error;
mod routes;
mod store;

use config::Config;
use routes::AppState;
use std::sync::Arc;
use store::NoteStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();

    let state = Arc::new(AppState::new(NoteStore::new()));

    let cors = tower_http::cors::CorsLayer::permissive();

    let app = routes::router(state.clone()).layer(cors);

    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    log::info!("Notes Service listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        log::error!("Server error: {}", e);
        std::process::exit(1);
    }

    if !state.store.is_empty() {
        log::info!("Discarding {} in-memory notes", state.store.len());
    }
    log::info!("Notes Service stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
