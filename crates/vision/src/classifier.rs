use crate::error::ClassifierError;
use crate::loader::ImageTensor;

/// A pretrained image classifier.
///
/// Implementations are loaded once and shared across requests, so
/// `classify` must be safe to call concurrently and must not mutate state.
pub trait Classifier: Send + Sync + 'static {
    /// Side length of the square input the model was trained on.
    fn input_size(&self) -> u32;

    /// Number of output classes, when the model declares it up front.
    fn output_classes(&self) -> Option<usize> {
        None
    }

    /// Run inference and return one probability per class, in model order.
    fn classify(&self, tensor: &ImageTensor) -> Result<Vec<f32>, ClassifierError>;
}

/// Check that `tensor` is exactly `size`×`size`×3.
pub fn check_input_shape(tensor: &ImageTensor, size: u32) -> Result<(), ClassifierError> {
    let expected = [size as usize, size as usize, ImageTensor::CHANNELS];
    let actual = tensor.shape();
    if actual != expected {
        return Err(ClassifierError::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        });
    }
    Ok(())
}

/// Classifier that ignores the pixels and always answers with the same
/// probabilities. Used for wiring tests and smoke runs without a model file.
#[derive(Debug, Clone)]
pub struct FixedClassifier {
    input_size: u32,
    probabilities: Vec<f32>,
}

impl FixedClassifier {
    pub fn new(input_size: u32, probabilities: Vec<f32>) -> Self {
        Self {
            input_size,
            probabilities,
        }
    }
}

impl Classifier for FixedClassifier {
    fn input_size(&self) -> u32 {
        self.input_size
    }

    fn output_classes(&self) -> Option<usize> {
        Some(self.probabilities.len())
    }

    fn classify(&self, tensor: &ImageTensor) -> Result<Vec<f32>, ClassifierError> {
        check_input_shape(tensor, self.input_size)?;
        Ok(self.probabilities.clone())
    }
}
