use axum::{
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;

use leafscan_core::DisplayOptions;

use crate::app::errors;
use crate::templates::Templates;

pub mod pages;
pub mod predict;
pub mod system;
pub mod uploads;

/// Router for all page, upload and prediction endpoints.
///
/// `/login` and `/register` exist only when the profile enables them.
pub fn router(display: DisplayOptions) -> Router {
    let router = Router::new()
        .route("/", get(pages::index))
        .route("/predict", post(predict::predict))
        .route("/api/predict", post(predict::api_predict))
        .route("/uploads/:filename", get(uploads::serve_upload))
        .route("/static/js/nav-hover.js", get(pages::nav_hover_js));

    if display.account_pages {
        router
            .route("/login", get(pages::login))
            .route("/register", get(pages::register))
    } else {
        router
    }
}

/// Render `name` as a 200 HTML page.
pub(crate) fn render_page(templates: &Templates, name: &str, ctx: impl Serialize) -> Response {
    match templates.render(name, ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => errors::render_failure(e),
    }
}
