use axum::extract::multipart::MultipartError;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use serde_json::json;
use thiserror::Error;

use leafscan_vision::{ClassifierError, PipelineError};

use crate::templates::Templates;
use crate::uploads::UploadError;

/// Request-path failures. Each maps to a status code and a stable code string.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no file was uploaded (expected multipart field `file`)")]
    MissingFile,

    #[error("malformed upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("prediction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("page not found")]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFile => StatusCode::BAD_REQUEST,
            ApiError::Multipart(e) => e.status(),
            ApiError::Upload(UploadError::InvalidFilename(_)) => StatusCode::BAD_REQUEST,
            ApiError::Upload(UploadError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Upload(UploadError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Pipeline(PipelineError::Decode(_)) => StatusCode::BAD_REQUEST,
            ApiError::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingFile => "missing_file",
            ApiError::Multipart(_) => "malformed_upload",
            ApiError::Upload(UploadError::InvalidFilename(_)) => "invalid_filename",
            ApiError::Upload(UploadError::NotFound(_)) | ApiError::NotFound => "not_found",
            ApiError::Upload(UploadError::Io(_)) => "storage_error",
            ApiError::Pipeline(PipelineError::Decode(_)) => "decode_error",
            ApiError::Pipeline(PipelineError::Classifier(ClassifierError::ShapeMismatch { .. })) => {
                "shape_mismatch"
            }
            ApiError::Pipeline(PipelineError::Classifier(_)) => "inference_error",
            ApiError::Pipeline(PipelineError::Probability(_)) => "invalid_model_output",
            ApiError::Pipeline(PipelineError::Catalog(_)) => "unknown_label",
            ApiError::Task(_) => "internal_error",
        }
    }

    /// Title shown on the failure page.
    fn title(&self) -> &'static str {
        match self.status() {
            StatusCode::NOT_FOUND => "Not found",
            StatusCode::PAYLOAD_TOO_LARGE => "Upload too large",
            s if s.is_client_error() => "Could not process the upload",
            _ => "Prediction failed",
        }
    }

    fn log(&self) {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        } else {
            tracing::info!(code = self.code(), status = status.as_u16(), error = %self, "request rejected");
        }
    }

    /// Render as the HTML failure page. `account_pages` keeps the nav in step
    /// with the rest of the site.
    pub fn into_page(self, templates: &Templates, account_pages: bool) -> axum::response::Response {
        self.log();
        html_error(templates, account_pages, self.status(), self.title(), self.to_string())
    }

    /// Render as `{error, message}` JSON.
    pub fn into_json(self) -> axum::response::Response {
        self.log();
        json_error(self.status(), self.code(), self.to_string())
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn html_error(
    templates: &Templates,
    account_pages: bool,
    status: StatusCode,
    title: &str,
    message: impl Into<String>,
) -> axum::response::Response {
    let message = message.into();
    let ctx = json!({
        "status": status.as_u16(),
        "title": title,
        "message": message,
        "account_pages": account_pages,
    });
    match templates.render("error.html", ctx) {
        Ok(page) => (status, Html(page)).into_response(),
        Err(e) => render_failure(e),
    }
}

/// Last resort when a template itself fails.
pub fn render_failure(err: minijinja::Error) -> axum::response::Response {
    tracing::error!(error = %err, "template rendering failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "internal error: page could not be rendered",
    )
        .into_response()
}
