//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: startup wiring (profile, model, upload store, templates)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: template contexts and JSON response bodies
//! - `errors.rs`: consistent error pages / JSON errors

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::{AppServices, build_services};

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: AppServices) -> Router {
    let body_limit = services.max_upload_bytes;
    let display = services.display;
    let services = Arc::new(services);

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router(display))
        .fallback(routes::system::not_found)
        .layer(Extension(services))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
