use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::Response};

use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn not_found(Extension(services): Extension<Arc<AppServices>>) -> Response {
    ApiError::NotFound.into_page(&services.templates, services.display.account_pages)
}
