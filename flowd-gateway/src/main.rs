//! Entry point for the `flowd-gateway` HTTP server.

use std::sync::Arc;

use flowd_gateway::{
    config::GatewayConfig,
    routes::{create_router, AppState},
};
use flowd_sandbox::ProgramRunner;
use flowd_store::FlowStore;
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match GatewayConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let store = match FlowStore::new(&config.store_endpoint) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(endpoint = %config.store_endpoint, error = %e, "invalid store endpoint");
            std::process::exit(1);
        }
    };

    let runner = Arc::new(ProgramRunner::new(config.sandbox()));
    let state = Arc::new(AppState { store, runner });
    let app = create_router(state, &config);

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %config.listen_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(
        addr = %config.listen_addr,
        store = %config.store_endpoint,
        interpreter = %config.interpreter.display(),
        "flowd-gateway listening"
    );

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
