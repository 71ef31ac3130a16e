use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::header,
    response::{IntoResponse, Response},
};

use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::uploads::content_type_for;

/// `GET /uploads/:filename`: a previously stored upload.
pub async fn serve_upload(
    Extension(services): Extension<Arc<AppServices>>,
    Path(filename): Path<String>,
) -> Response {
    match services.uploads.read(&filename).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type_for(&filename))], bytes).into_response(),
        Err(e) => ApiError::from(e).into_page(&services.templates, services.display.account_pages),
    }
}
