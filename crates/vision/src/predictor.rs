use std::sync::Arc;

use leafscan_core::{
    DeploymentProfile, DiseaseCatalog, PredictionResult, ProbabilityVector, ResolveOptions, resolve,
};

use crate::classifier::Classifier;
use crate::error::{ClassifierError, PipelineError};
use crate::loader::load_image;

/// Loader → classifier → ranking → advisory, for one upload at a time.
///
/// Built once at startup and shared read-only between requests.
#[derive(Clone)]
pub struct Predictor {
    classifier: Arc<dyn Classifier>,
    catalog: Arc<DiseaseCatalog>,
    options: ResolveOptions,
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("input_size", &self.classifier.input_size())
            .field("classes", &self.catalog.class_count())
            .field("options", &self.options)
            .finish()
    }
}

impl Predictor {
    /// Pair a classifier with a profile, rejecting a model whose input size or
    /// class count disagrees with the profile.
    pub fn new(
        classifier: Arc<dyn Classifier>,
        profile: &DeploymentProfile,
    ) -> Result<Self, ClassifierError> {
        let input_size = classifier.input_size();
        if input_size != profile.input_size() {
            return Err(ClassifierError::ShapeMismatch {
                expected: vec![profile.input_size() as usize],
                actual: vec![input_size as usize],
            });
        }

        let classes = profile.catalog().class_count();
        if let Some(outputs) = classifier.output_classes() {
            if outputs != classes {
                return Err(ClassifierError::ShapeMismatch {
                    expected: vec![classes],
                    actual: vec![outputs],
                });
            }
        }

        Ok(Self {
            classifier,
            catalog: Arc::new(profile.catalog().clone()),
            options: profile.display().resolve_options(),
        })
    }

    /// Run the full pipeline on raw upload bytes. CPU-bound; async callers
    /// should run it on a blocking thread.
    pub fn predict(&self, bytes: &[u8]) -> Result<PredictionResult, PipelineError> {
        let tensor = load_image(bytes, self.classifier.input_size())?;
        tracing::debug!(width = tensor.width(), height = tensor.height(), "image decoded");

        let raw = self.classifier.classify(&tensor)?;
        let probs = ProbabilityVector::for_classes(raw, self.catalog.class_count())?;

        let result = resolve(&self.catalog, &probs, self.options)?;
        tracing::info!(
            label = %result.top.label,
            confidence_pct = result.top.confidence_pct,
            band = result.confidence.as_str(),
            "prediction resolved"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::FixedClassifier;
    use image::{ImageFormat, Rgb, RgbImage};
    use leafscan_core::{ConfidenceBand, ProbabilityError};
    use std::io::Cursor;

    fn leaf_png() -> Vec<u8> {
        let img = RgbImage::from_pixel(32, 32, Rgb([40, 160, 60]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn predictor(profile: &str, probs: Vec<f32>) -> Predictor {
        let profile = DeploymentProfile::builtin(profile).unwrap();
        let classifier = Arc::new(FixedClassifier::new(224, probs));
        Predictor::new(classifier, &profile).unwrap()
    }

    #[test]
    fn predicts_label_confidence_and_advisory() {
        let p = predictor("leaf-disease-3", vec![0.1, 0.05, 0.85]);
        let result = p.predict(&leaf_png()).unwrap();

        assert_eq!(result.top.label, "Rust");
        assert_eq!(result.top.confidence_pct, 85.0);
        assert_eq!(result.confidence, ConfidenceBand::High);
        assert_eq!(result.runner_up.unwrap().label, "Healthy");
        assert!(result.advisory.cure.contains("fungicides"));
    }

    #[test]
    fn sixteen_class_profile_has_no_runner_up() {
        let mut probs = vec![0.0; 16];
        probs[13] = 0.9;
        probs[4] = 0.1;
        let result = predictor("plant-village-16", probs).predict(&leaf_png()).unwrap();

        assert_eq!(result.top.label, "Rust");
        assert!(result.runner_up.is_none());
    }

    #[test]
    fn corrupt_upload_is_a_decode_error() {
        let p = predictor("leaf-disease-3", vec![0.2, 0.3, 0.5]);
        let err = p.predict(b"GIF89a but not really").unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)));
    }

    #[test]
    fn class_count_mismatch_is_rejected_at_construction() {
        let profile = DeploymentProfile::builtin("leaf-disease-3").unwrap();
        let classifier = Arc::new(FixedClassifier::new(224, vec![0.5, 0.5]));

        let err = Predictor::new(classifier, &profile).unwrap_err();
        assert_eq!(
            err,
            ClassifierError::ShapeMismatch {
                expected: vec![3],
                actual: vec![2]
            }
        );
    }

    #[test]
    fn input_size_mismatch_is_rejected_at_construction() {
        let profile = DeploymentProfile::builtin("leaf-disease-3").unwrap();
        let classifier = Arc::new(FixedClassifier::new(160, vec![0.2, 0.3, 0.5]));

        assert!(Predictor::new(classifier, &profile).is_err());
    }

    /// Classifier that declares nothing up front and returns a bad vector.
    struct Misbehaving;

    impl Classifier for Misbehaving {
        fn input_size(&self) -> u32 {
            224
        }

        fn classify(&self, _tensor: &crate::ImageTensor) -> Result<Vec<f32>, ClassifierError> {
            Ok(vec![0.5, 0.5])
        }
    }

    #[test]
    fn undeclared_output_width_is_caught_per_request() {
        let profile = DeploymentProfile::builtin("leaf-disease-3").unwrap();
        let p = Predictor::new(Arc::new(Misbehaving), &profile).unwrap();

        match p.predict(&leaf_png()).unwrap_err() {
            PipelineError::Probability(ProbabilityError::LengthMismatch { expected, actual }) => {
                assert_eq!((expected, actual), (3, 2));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
