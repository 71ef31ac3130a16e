//! ONNX model runtime (pure Rust, via `tract-onnx`).
//!
//! Expects a Keras-style export: NHWC `f32` input `[1, size, size, 3]` with
//! values in `[0, 1]`, and a softmax output `[1, classes]`.

use std::path::Path;

use tract_onnx::prelude::*;

use crate::classifier::{Classifier, check_input_shape};
use crate::error::ClassifierError;
use crate::loader::ImageTensor;

pub struct OnnxClassifier {
    plan: TypedRunnableModel<TypedModel>,
    input_size: u32,
    output_classes: Option<usize>,
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("input_size", &self.input_size)
            .field("output_classes", &self.output_classes)
            .finish_non_exhaustive()
    }
}

impl OnnxClassifier {
    /// Load, pin the input shape, and optimize. Expensive; call once at startup.
    pub fn load(path: impl AsRef<Path>, input_size: u32) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let side = input_size as usize;

        tracing::info!(model = %path.display(), input_size, "loading onnx model");

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(load_error)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, side, side, 3)),
            )
            .map_err(load_error)?
            .into_optimized()
            .map_err(load_error)?
            .into_runnable()
            .map_err(load_error)?;

        let output_classes = plan
            .model()
            .output_fact(0)
            .ok()
            .and_then(|fact| fact.shape.as_concrete().and_then(|dims| dims.last().copied()));

        tracing::info!(?output_classes, "onnx model ready");

        Ok(Self {
            plan,
            input_size,
            output_classes,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn input_size(&self) -> u32 {
        self.input_size
    }

    fn output_classes(&self) -> Option<usize> {
        self.output_classes
    }

    fn classify(&self, tensor: &ImageTensor) -> Result<Vec<f32>, ClassifierError> {
        check_input_shape(tensor, self.input_size)?;

        let [h, w, c] = tensor.shape();
        let input = Tensor::from_shape(&[1, h, w, c], tensor.as_slice()).map_err(inference_error)?;

        let outputs = self.plan.run(tvec!(input.into())).map_err(inference_error)?;
        let first = outputs
            .first()
            .ok_or_else(|| ClassifierError::Inference("model produced no outputs".to_string()))?;
        let view = first.to_array_view::<f32>().map_err(inference_error)?;

        Ok(view.iter().copied().collect())
    }
}

fn load_error(e: TractError) -> ClassifierError {
    ClassifierError::Load(format!("{e:#}"))
}

fn inference_error(e: TractError) -> ClassifierError {
    ClassifierError::Inference(format!("{e:#}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_model_file_is_a_load_error() {
        let err = OnnxClassifier::load("/nonexistent/leafscan/model.onnx", 224).unwrap_err();
        assert!(matches!(err, ClassifierError::Load(_)));
    }
}
