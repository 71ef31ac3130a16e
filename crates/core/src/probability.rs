//! Classifier output, validated against the class list.

use crate::error::ProbabilityError;

/// Softmax output can land a hair outside [0, 1]; anything within this slack
/// is clamped instead of rejected.
const RANGE_SLACK: f32 = 1e-4;

/// Per-class probabilities, index-aligned with [`crate::ClassLabels`].
///
/// Every value is finite and in `[0, 1]`. The sum is not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityVector {
    values: Vec<f32>,
}

impl ProbabilityVector {
    /// Validate raw model output.
    pub fn new(values: Vec<f32>) -> Result<Self, ProbabilityError> {
        if values.is_empty() {
            return Err(ProbabilityError::Empty);
        }

        let mut values = values;
        for (index, value) in values.iter_mut().enumerate() {
            if !value.is_finite() {
                return Err(ProbabilityError::NotFinite { index });
            }
            if *value < -RANGE_SLACK || *value > 1.0 + RANGE_SLACK {
                return Err(ProbabilityError::OutOfRange { index, value: *value });
            }
            *value = value.clamp(0.0, 1.0);
        }

        Ok(Self { values })
    }

    /// Validate raw model output and require exactly `expected` classes.
    pub fn for_classes(values: Vec<f32>, expected: usize) -> Result<Self, ProbabilityError> {
        if values.len() != expected {
            return Err(ProbabilityError::LengthMismatch {
                expected,
                actual: values.len(),
            });
        }
        Self::new(values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}
