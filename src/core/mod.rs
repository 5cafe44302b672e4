pub mod engine;
pub mod labels;
pub mod normalizer;
pub mod pipeline;
pub mod preprocessor;

pub use crate::domain::model::{
    Classification, ClassificationList, FeatureRecord, Frame, Tensor, TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, FrameErrorPolicy, InputFormat, Pipeline, Storage};
pub use crate::utils::error::Result;
