//! HTTP API server for the food-ordering backend.
//!
//! Thin route handlers over the [`store::Store`] seam: registration, login,
//! menu listing, order placement, and order summary, with bearer-token
//! authentication on the protected routes and structured logging plus
//! Prometheus metrics throughout.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;

use std::sync::Arc;

use auth::TokenService;
use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use store::Store;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState<S: Store> {
    pub store: S,
    pub tokens: TokenService,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: Store + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/ping", get(routes::health::ping::<S>))
        .route("/auth/register", post(routes::auth::register::<S>))
        .route("/auth/login", post(routes::auth::login::<S>))
        .route("/customers", get(routes::customers::list::<S>))
        .route("/menus", get(routes::menus::list::<S>))
        .route("/orders", post(routes::orders::create::<S>))
        .route("/orders/summary", get(routes::orders::summary::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
