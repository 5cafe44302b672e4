pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::storage::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliArgs;
pub use config::{PrepConfig, PreprocessorOptions};

pub use core::{
    engine::PrepEngine,
    labels::LabelExtractor,
    normalizer::{DegenerateScalePolicy, LandmarkNormalizer},
    pipeline::FramePipeline,
    preprocessor::GesturePreprocessor,
};
pub use utils::error::{PrepError, Result};
