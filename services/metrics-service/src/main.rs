mod app;
mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod service;
mod state;

use std::sync::Arc;

use uxmetrics_common::{bind_listener, env_or, init_tracing, shutdown_signal};

use crate::config::DbConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    let _guard = init_tracing("metrics-service");

    let port = env_or("PORT", 8080u16);
    let db = DbConfig::from_env().expect("database configuration");
    tracing::info!(
        host = db.host.as_str(),
        dbname = db.dbname.as_str(),
        table = db.table.as_str(),
        "metrics store configured"
    );

    let state = AppState { db: Arc::new(db) };
    let app = app::build_router(state);
    let listener = bind_listener(port).await;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("serve");
}
