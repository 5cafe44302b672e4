//! Translation- and scale-invariant landmark normalization.
//!
//! A landmark set arrives as a flat buffer of `num_landmarks × num_dimensions`
//! values. Every landmark is re-anchored to landmark 0 and the whole set is
//! divided by the largest absolute deviation on either axis, giving an
//! interleaved `[x0, y0, x1, y1, ...]` feature vector in `[-1, 1]`.
//! Dimensions past x and y (z, visibility, presence) are dropped.

use crate::config::PreprocessorOptions;
use crate::utils::error::{PrepError, Result};
use crate::utils::validation;
use serde::{Deserialize, Serialize};

/// What to do when every landmark coincides with the reference landmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegenerateScalePolicy {
    /// Divide by zero anyway; every output component is NaN.
    #[default]
    Propagate,
    /// Fail the call with [`PrepError::DegenerateScale`].
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandmarkNormalizer {
    num_landmarks: usize,
    degenerate_scale: DegenerateScalePolicy,
}

impl LandmarkNormalizer {
    pub fn configure(num_landmarks: usize) -> Result<Self> {
        validation::validate_positive_number("num_landmarks", num_landmarks, 1)?;
        Ok(Self {
            num_landmarks,
            degenerate_scale: DegenerateScalePolicy::default(),
        })
    }

    pub fn from_options(options: &PreprocessorOptions) -> Result<Self> {
        let num_landmarks = *validation::validate_required_field(
            "preprocessor.num_landmarks",
            &options.num_landmarks,
        )?;
        Ok(Self::configure(num_landmarks)?.with_degenerate_scale(options.degenerate_scale))
    }

    pub fn with_degenerate_scale(mut self, policy: DegenerateScalePolicy) -> Self {
        self.degenerate_scale = policy;
        self
    }

    pub fn num_landmarks(&self) -> usize {
        self.num_landmarks
    }

    pub fn degenerate_scale(&self) -> DegenerateScalePolicy {
        self.degenerate_scale
    }

    /// Length of every feature vector this normalizer produces.
    pub fn output_len(&self) -> usize {
        self.num_landmarks * 2
    }

    /// Derives the per-landmark dimension count from a flat buffer length.
    pub fn num_dimensions(&self, num_values: usize) -> Result<usize> {
        if num_values % self.num_landmarks != 0 {
            return Err(self.shape_mismatch(
                num_values,
                format!("not a multiple of {}", self.num_landmarks),
            ));
        }

        let num_dimensions = num_values / self.num_landmarks;
        if num_dimensions < 2 {
            return Err(self.shape_mismatch(
                num_values,
                format!("{} dimension(s) per landmark, need at least x and y", num_dimensions),
            ));
        }

        Ok(num_dimensions)
    }

    pub fn normalize(&self, raw_landmarks: &[f32]) -> Result<Vec<f32>> {
        let num_dimensions = self.num_dimensions(raw_landmarks.len())?;

        let base_x = raw_landmarks[0];
        let base_y = raw_landmarks[1];

        let mut deviations = Vec::with_capacity(self.output_len());
        let mut max_abs = 0.0f32;
        for landmark in raw_landmarks.chunks_exact(num_dimensions) {
            let dx = landmark[0] - base_x;
            let dy = landmark[1] - base_y;
            max_abs = max_abs.max(dx.abs()).max(dy.abs());
            deviations.push(dx);
            deviations.push(dy);
        }

        if max_abs == 0.0 {
            match self.degenerate_scale {
                DegenerateScalePolicy::Reject => {
                    return Err(PrepError::DegenerateScale {
                        num_landmarks: self.num_landmarks,
                    });
                }
                DegenerateScalePolicy::Propagate => {
                    tracing::debug!(
                        num_landmarks = self.num_landmarks,
                        "all landmarks coincide with the reference, features will be NaN"
                    );
                }
            }
        }

        tracing::trace!(
            num_landmarks = self.num_landmarks,
            num_dimensions,
            max_abs,
            "normalized landmark set"
        );

        Ok(deviations.iter().map(|d| d / max_abs).collect())
    }

    fn shape_mismatch(&self, num_values: usize, reason: String) -> PrepError {
        PrepError::ShapeMismatch {
            num_values,
            num_landmarks: self.num_landmarks,
            reason,
        }
    }
}
