use std::sync::Arc;

use axum::{
    extract::Extension,
    http::header,
    response::{IntoResponse, Response},
};

use crate::app::dto::{AccountPage, IndexPage};
use crate::app::services::AppServices;

const NAV_HOVER_JS: &str = include_str!("../../../static/js/nav-hover.js");

pub async fn index(Extension(services): Extension<Arc<AppServices>>) -> Response {
    let page = IndexPage {
        profile: &services.profile_name,
        classes: &services.class_names,
        account_pages: services.display.account_pages,
    };
    super::render_page(&services.templates, "index.html", page)
}

pub async fn login(Extension(services): Extension<Arc<AppServices>>) -> Response {
    super::render_page(&services.templates, "login.html", AccountPage { account_pages: true })
}

pub async fn register(Extension(services): Extension<Arc<AppServices>>) -> Response {
    super::render_page(&services.templates, "register.html", AccountPage { account_pages: true })
}

pub async fn nav_hover_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        NAV_HOVER_JS,
    )
}
