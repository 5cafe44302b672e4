use crate::utils::stats::StatsSnapshot;
use serde::{Deserialize, Serialize};

/// Dense f32 tensor with its declared shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

impl Tensor {
    pub fn new(shape: Vec<usize>, data: Vec<f32>) -> Self {
        Self { shape, data }
    }

    /// Product of the declared dimensions. An empty shape is a scalar.
    /// `None` when the product does not fit in `usize`.
    pub fn num_elements(&self) -> Option<usize> {
        self.shape
            .iter()
            .try_fold(1usize, |acc, dim| acc.checked_mul(*dim))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub frame: u64,
    #[serde(default)]
    pub tensors: Vec<Tensor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub frame: u64,
    #[serde(with = "crate::domain::serde_features")]
    pub features: Vec<f32>,
}

impl FeatureRecord {
    pub fn is_degenerate(&self) -> bool {
        self.features.iter().any(|v| v.is_nan())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub score: f32,
}

pub type ClassificationList = Vec<Classification>;

#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub records: Vec<FeatureRecord>,
    pub skipped_frames: Vec<u64>,
    pub stats: StatsSnapshot,
}
