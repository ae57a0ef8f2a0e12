use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    config::Config,
    handlers::{self, energy_cost::AppState},
    metrics,
    pricing::AwattarClient,
    signals::setup_signal_handlers,
};

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Start the energy cost server
///
/// This function:
/// 1. Initializes metrics (when enabled)
/// 2. Sets up signal handlers for graceful shutdown
/// 3. Builds the price source and the Axum application
/// 4. Binds to the configured address
/// 5. Serves requests until a shutdown signal arrives
pub async fn start_server(config: Config) -> Result<()> {
    let metrics_handle = if config.metrics.enabled {
        info!("Initializing Prometheus metrics...");
        Some(Arc::new(metrics::init_metrics()?))
    } else {
        None
    };

    let (shutdown_tx, signal_handle) = setup_signal_handlers()?;
    let mut shutdown_rx = shutdown_tx.subscribe();

    let app_state = build_app_state(&config);
    let app = create_router(&config, app_state, metrics_handle);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting energy cost service on {}", addr);
    info!(
        "Price source: {} (timeout {}s, reject unpriced intervals: {})",
        config.pricing.base_url,
        config.pricing.timeout_seconds,
        config.pricing.reject_unpriced_intervals
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Build the shared state handed to every request
pub fn build_app_state(config: &Config) -> AppState {
    let source = AwattarClient::new(reqwest::Client::new(), &config.pricing);

    AppState::new(Arc::new(source), config.pricing.reject_unpriced_intervals)
}

/// Create the Axum router with all routes and middleware
pub fn create_router(
    config: &Config,
    app_state: AppState,
    metrics_handle: Option<Arc<PrometheusHandle>>,
) -> Router {
    let mut router = Router::new()
        .route(
            "/energy_cost",
            post(handlers::energy_cost::handle_energy_cost),
        )
        .with_state(app_state)
        .route("/health", get(handlers::health::health_check));

    if let Some(handle) = metrics_handle {
        let metrics_routes = Router::new()
            .route(
                &config.metrics.endpoint,
                get(handlers::metrics_handler::metrics),
            )
            .with_state(handle);
        router = router.merge(metrics_routes);
    }

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
    )
}
