//! `leafscan-vision`
//!
//! **Responsibility:** turning uploaded image bytes into a prediction.
//!
//! - `loader`: decode + resize + scale into a model input tensor
//! - `classifier`: the model boundary (`Classifier` trait)
//! - `onnx`: the production classifier (tract-onnx)
//! - `predictor`: the end-to-end pipeline, shared read-only across requests
//!
//! Ranking, confidence and advisory rules live in `leafscan-core`.

pub mod classifier;
pub mod error;
pub mod loader;
pub mod onnx;
pub mod predictor;

pub use classifier::{Classifier, FixedClassifier};
pub use error::{ClassifierError, DecodeError, PipelineError};
pub use loader::{ImageTensor, load_image};
pub use onnx::OnnxClassifier;
pub use predictor::Predictor;
