use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::domain::service::Service;

use super::handlers;

/// Calculator routes with the service attached as an extension.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/history", get(handlers::history))
        .route("/calculate", post(handlers::calculate))
        .route("/static/calculator.js", get(handlers::calculator_js))
        .route("/healthz", get(handlers::healthz))
        .layer(Extension(service))
}
