//! Route table for the acquisition service.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::service::ScaleService;

pub fn router(service: Arc<ScaleService>) -> Router {
    Router::new()
        .route("/", get(handlers::service_status))
        .route("/scale/:id", get(handlers::read_scale))
        .route("/scale/:id/health", get(handlers::scale_health))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
