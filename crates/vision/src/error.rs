use thiserror::Error;

use leafscan_core::{CatalogError, ProbabilityError};

/// The upload is not a decodable image.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("could not decode image: {0}")]
pub struct DecodeError(pub String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    /// Tensor or output dimensions differ from what the model was trained on.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("failed to load model: {0}")]
    Load(String),

    #[error("inference failed: {0}")]
    Inference(String),
}

/// Any failure between raw upload bytes and a prediction.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error("invalid classifier output: {0}")]
    Probability(#[from] ProbabilityError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
