use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Multipart},
    response::{IntoResponse, Response},
    Json,
};

use leafscan_core::PredictionResult;

use crate::app::dto::{PredictResponse, ResultPage};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

/// The `file` part of a multipart upload.
struct Upload {
    filename: String,
    bytes: Bytes,
}

/// `POST /predict`: store the upload, classify it, render the result page.
pub async fn predict(
    Extension(services): Extension<Arc<AppServices>>,
    multipart: Multipart,
) -> Response {
    match predict_page(&services, multipart).await {
        Ok(resp) => resp,
        Err(e) => e.into_page(&services.templates, services.display.account_pages),
    }
}

/// `POST /api/predict`: classify the upload and answer with JSON. Nothing is stored.
pub async fn api_predict(
    Extension(services): Extension<Arc<AppServices>>,
    multipart: Multipart,
) -> Response {
    let outcome = async {
        let upload = read_upload(multipart).await?;
        run_prediction(&services, upload.bytes).await
    }
    .await;

    match outcome {
        Ok(result) => Json(PredictResponse {
            profile: services.profile_name.clone(),
            result,
        })
        .into_response(),
        Err(e) => e.into_json(),
    }
}

async fn predict_page(services: &AppServices, multipart: Multipart) -> Result<Response, ApiError> {
    let upload = read_upload(multipart).await?;
    let stored = services.uploads.save(&upload.filename, &upload.bytes).await?;
    tracing::info!(file = %stored.filename, bytes = upload.bytes.len(), "upload received");

    let result = run_prediction(services, upload.bytes).await?;
    let page = ResultPage::new(result, services.display, stored.url_path());
    Ok(super::render_page(&services.templates, "result.html", page))
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;

        // Browsers submit an empty, unnamed part when no file was chosen.
        if filename.is_empty() && bytes.is_empty() {
            return Err(ApiError::MissingFile);
        }
        return Ok(Upload { filename, bytes });
    }
    Err(ApiError::MissingFile)
}

/// Run the CPU-bound pipeline off the async executor.
async fn run_prediction(services: &AppServices, bytes: Bytes) -> Result<PredictionResult, ApiError> {
    let predictor = services.predictor.clone();
    let result = tokio::task::spawn_blocking(move || predictor.predict(&bytes)).await??;
    Ok(result)
}
