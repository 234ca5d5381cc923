pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use rfbridge_core::link::BoxedLink;
use rfbridge_core::Transceiver;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the axum Router with all command routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(radio: Arc<Transceiver<BoxedLink>>) -> Router {
    let app_state = AppState::new(radio);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::status::root))
        .route("/on", get(routes::commands::turn_on))
        .route("/off", get(routes::commands::turn_off))
        .route("/servo/{angle}", get(routes::commands::move_servo))
        .route("/btlvl", get(routes::commands::battery_level))
        .route("/rdoff/{minutes}", get(routes::commands::radio_off))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the HTTP command façade on `port`.
///
/// The transceiver must already be initialized; the radio is powered down
/// before this returns, on the signal path and on every error path alike.
pub async fn serve(radio: Arc<Transceiver<BoxedLink>>, port: u16) -> anyhow::Result<()> {
    let result = run_server(radio.clone(), port).await;
    radio.shutdown();
    result
}

async fn run_server(radio: Arc<Transceiver<BoxedLink>>, port: u16) -> anyhow::Result<()> {
    let app = build_router(radio);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("rfbridge listening on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
}
