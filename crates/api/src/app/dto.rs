use serde::Serialize;

use leafscan_core::{DisplayOptions, PredictionResult};

// -------------------------
// Page contexts
// -------------------------

#[derive(Debug, Serialize)]
pub struct IndexPage<'a> {
    pub profile: &'a str,
    pub classes: &'a [String],
    pub account_pages: bool,
}

#[derive(Debug, Serialize)]
pub struct AccountPage {
    pub account_pages: bool,
}

#[derive(Debug, Serialize)]
pub struct RunnerUpView {
    pub label: String,
    pub confidence: f64,
}

#[derive(Debug, Serialize)]
pub struct ResultPage {
    pub prediction: String,
    pub confidence: f64,
    pub band: &'static str,
    pub confidence_message: Option<&'static str>,
    pub runner_up: Option<RunnerUpView>,
    pub description: String,
    pub cure: String,
    pub image_path: String,
    pub account_pages: bool,
}

impl ResultPage {
    /// Flatten a prediction for the result template, hiding what the profile
    /// does not display.
    pub fn new(result: PredictionResult, display: DisplayOptions, image_path: String) -> Self {
        Self {
            prediction: result.top.label,
            confidence: result.top.confidence_pct,
            band: result.confidence.as_str(),
            confidence_message: display
                .show_confidence_message
                .then_some(result.confidence_message),
            runner_up: result
                .runner_up
                .filter(|_| display.report_runner_up)
                .map(|r| RunnerUpView {
                    label: r.label,
                    confidence: r.confidence_pct,
                }),
            description: result.advisory.description,
            cure: result.advisory.cure,
            image_path,
            account_pages: display.account_pages,
        }
    }
}

// -------------------------
// JSON responses
// -------------------------

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub profile: String,
    #[serde(flatten)]
    pub result: PredictionResult,
}
