use crate::config::PreprocessorOptions;
use crate::core::normalizer::LandmarkNormalizer;
use crate::domain::model::Tensor;
use crate::utils::error::{PrepError, Result};

/// Pipeline stage turning a landmark tensor collection into a single
/// `[1, 2 * num_landmarks]` feature tensor.
///
/// Only the first tensor of a collection is read; the rest are ignored.
#[derive(Debug, Clone, Copy)]
pub struct GesturePreprocessor {
    normalizer: LandmarkNormalizer,
}

impl GesturePreprocessor {
    pub fn open(options: &PreprocessorOptions) -> Result<Self> {
        let normalizer = LandmarkNormalizer::from_options(options)?;
        tracing::debug!(
            num_landmarks = normalizer.num_landmarks(),
            degenerate_scale = ?normalizer.degenerate_scale(),
            "gesture preprocessor opened"
        );
        Ok(Self { normalizer })
    }

    pub fn normalizer(&self) -> &LandmarkNormalizer {
        &self.normalizer
    }

    /// Returns `None` when the collection is empty, nothing is emitted then.
    pub fn process(&self, tensors: &[Tensor]) -> Result<Option<Vec<Tensor>>> {
        let Some(input) = tensors.first() else {
            return Ok(None);
        };

        let Some(num_values) = input.num_elements() else {
            return Err(PrepError::ShapeMismatch {
                num_values: input.data.len(),
                num_landmarks: self.normalizer.num_landmarks(),
                reason: format!("declared shape {:?} overflows", input.shape),
            });
        };
        if input.data.len() != num_values {
            return Err(PrepError::ShapeMismatch {
                num_values: input.data.len(),
                num_landmarks: self.normalizer.num_landmarks(),
                reason: format!(
                    "declared shape {:?} holds {} values",
                    input.shape, num_values
                ),
            });
        }

        let features = self.normalizer.normalize(&input.data)?;
        let output = Tensor::new(vec![1, self.normalizer.output_len()], features);

        Ok(Some(vec![output]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preprocessor(num_landmarks: usize) -> GesturePreprocessor {
        GesturePreprocessor::open(&PreprocessorOptions::with_landmarks(num_landmarks)).unwrap()
    }

    #[test]
    fn test_open_without_num_landmarks_fails() {
        let err = GesturePreprocessor::open(&PreprocessorOptions::default()).unwrap_err();
        assert!(matches!(err, PrepError::MissingConfigError { .. }));
    }

    #[test]
    fn test_empty_collection_emits_nothing() {
        assert_eq!(preprocessor(3).process(&[]).unwrap(), None);
    }

    #[test]
    fn test_emits_single_row_tensor() {
        let input = Tensor::new(vec![3, 3], vec![0.0, 0.0, 0.5, 2.0, 0.0, 0.5, 0.0, 4.0, 0.5]);
        let output = preprocessor(3).process(&[input]).unwrap().unwrap();

        assert_eq!(output.len(), 1);
        assert_eq!(output[0].shape, vec![1, 6]);
        assert_eq!(output[0].data, vec![0.0, 0.0, 0.5, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_only_first_tensor_is_used() {
        let first = Tensor::new(vec![2, 2], vec![0.0, 0.0, 1.0, 1.0]);
        let second = Tensor::new(vec![5], vec![9.0; 5]);
        let output = preprocessor(2).process(&[first, second]).unwrap().unwrap();

        assert_eq!(output.len(), 1);
        assert_eq!(output[0].data, vec![0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_declared_shape_must_match_data() {
        let input = Tensor::new(vec![3, 3], vec![0.0; 6]);
        let err = preprocessor(3).process(&[input]).unwrap_err();
        assert!(matches!(err, PrepError::ShapeMismatch { num_values: 6, .. }));
    }

    #[test]
    fn test_overflowing_shape_is_frame_error() {
        // 2^32 * 2^32 * 2 wraps to 0 on 64-bit targets
        let input: Tensor =
            serde_json::from_str(r#"{"shape":[4294967296,4294967296,2],"data":[]}"#).unwrap();
        let err = preprocessor(3).process(&[input]).unwrap_err();
        assert!(err.is_frame_error());
        assert!(matches!(err, PrepError::ShapeMismatch { num_values: 0, .. }));

        let input = Tensor::new(vec![usize::MAX, usize::MAX], vec![0.0; 6]);
        assert!(preprocessor(3).process(&[input]).is_err());
    }

    #[test]
    fn test_shape_not_divisible_by_landmarks() {
        let input = Tensor::new(vec![1, 10], vec![1.0; 10]);
        let err = preprocessor(3).process(&[input]).unwrap_err();
        assert!(err.is_frame_error());
    }
}
