//! Application startup and server initialization.
//!
//! Builds the shared state from a validated configuration, sets up the
//! routes and serves them on the configured address.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigV1;
use crate::routes;
use crate::state::AppState;

/// Initializes and runs the application server.
///
/// # Errors
///
/// Returns an error if the server fails to bind to the specified address
/// or encounters a runtime error during execution.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(config.clone());
    info!(
        "Starting server on {} with '{}' user store",
        config.bind_address,
        state.store.get_name()
    );

    let app = routes::create_router(state);
    let listener = TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
