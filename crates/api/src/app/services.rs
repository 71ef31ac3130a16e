//! Startup wiring: profile + model + upload store + templates.
//!
//! Everything in [`AppServices`] is built once and never mutated afterwards;
//! handlers receive it as `Extension<Arc<AppServices>>`.

use std::sync::Arc;

use anyhow::Context;

use leafscan_core::{DeploymentProfile, DisplayOptions};
use leafscan_vision::{Classifier, OnnxClassifier, Predictor};

use crate::config::{DEFAULT_MAX_UPLOAD_BYTES, ServerConfig};
use crate::templates::Templates;
use crate::uploads::UploadStore;

#[derive(Debug)]
pub struct AppServices {
    pub profile_name: String,
    pub class_names: Vec<String>,
    pub display: DisplayOptions,
    pub predictor: Predictor,
    pub uploads: UploadStore,
    pub templates: Templates,
    pub max_upload_bytes: usize,
}

impl AppServices {
    /// Assemble services around an already-loaded classifier.
    pub fn new(
        profile: &DeploymentProfile,
        classifier: Arc<dyn Classifier>,
        uploads: UploadStore,
    ) -> anyhow::Result<Self> {
        let predictor = Predictor::new(classifier, profile).with_context(|| {
            format!("model does not match deployment profile {}", profile.name())
        })?;
        let templates = Templates::new().context("failed to compile page templates")?;

        Ok(Self {
            profile_name: profile.name().to_string(),
            class_names: profile.catalog().labels().iter().map(str::to_string).collect(),
            display: profile.display(),
            predictor,
            uploads,
            templates,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        })
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}

/// Production wiring from [`ServerConfig`].
pub async fn build_services(config: &ServerConfig) -> anyhow::Result<AppServices> {
    let profile = DeploymentProfile::load(&config.profile)
        .with_context(|| format!("failed to load deployment profile {}", config.profile))?;
    tracing::info!(
        profile = profile.name(),
        classes = profile.catalog().class_count(),
        "deployment profile loaded"
    );

    let model_path = config.model_path.clone();
    let input_size = profile.input_size();
    let classifier = tokio::task::spawn_blocking(move || OnnxClassifier::load(model_path, input_size))
        .await
        .context("model loading task failed")?
        .with_context(|| format!("failed to load model {}", config.model_path.display()))?;

    let uploads = UploadStore::open(&config.upload_dir)
        .await
        .with_context(|| format!("failed to prepare upload directory {}", config.upload_dir.display()))?;

    Ok(AppServices::new(&profile, Arc::new(classifier), uploads)?
        .with_max_upload_bytes(config.max_upload_bytes))
}
