use crate::core::preprocessor::GesturePreprocessor;
use crate::core::{
    ConfigProvider, FeatureRecord, Frame, FrameErrorPolicy, InputFormat, Pipeline, Storage,
    Tensor, TransformResult,
};
use crate::utils::error::{PrepError, Result};
use crate::utils::stats::RunStats;
use std::path::Path;

pub const JSON_OUTPUT_FILE: &str = "features.json";
pub const CSV_OUTPUT_FILE: &str = "features.csv";

/// Batch pipeline: reads landmark frames, runs each through the
/// preprocessor and writes the resulting feature vectors.
pub struct FramePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    preprocessor: GesturePreprocessor,
    input_format: InputFormat,
}

impl<S: Storage, C: ConfigProvider> FramePipeline<S, C> {
    /// Fails when the config cannot name an input format.
    pub fn new(storage: S, config: C, preprocessor: GesturePreprocessor) -> Result<Self> {
        let input_format = config.input_format()?;
        Ok(Self {
            storage,
            config,
            preprocessor,
            input_format,
        })
    }

    fn parse_json(&self, bytes: &[u8]) -> Result<Vec<Frame>> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Each headerless CSV row is one frame holding a single flat tensor.
    fn parse_csv(&self, bytes: &[u8]) -> Result<Vec<Frame>> {
        let num_landmarks = self.preprocessor.normalizer().num_landmarks();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(bytes);

        let mut frames = Vec::new();
        for (row, values) in reader.deserialize::<Vec<f32>>().enumerate() {
            let values = values?;
            let num_values = values.len();
            // A shape that does not factor is kept flat so the stage rejects it.
            let shape = if num_values > 0 && num_values % num_landmarks == 0 {
                vec![num_landmarks, num_values / num_landmarks]
            } else {
                vec![num_values]
            };
            frames.push(Frame {
                frame: row as u64,
                tensors: vec![Tensor::new(shape, values)],
            });
        }

        Ok(frames)
    }

    fn render_csv(&self, records: &[FeatureRecord]) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header = vec!["frame".to_string()];
        for i in 0..self.preprocessor.normalizer().num_landmarks() {
            header.push(format!("x{}", i));
            header.push(format!("y{}", i));
        }
        writer.write_record(&header)?;

        for record in records {
            let mut row = Vec::with_capacity(record.features.len() + 1);
            row.push(record.frame.to_string());
            row.extend(record.features.iter().map(|v| v.to_string()));
            writer.write_record(&row)?;
        }

        writer
            .into_inner()
            .map_err(|e| PrepError::IoError(e.into_error()))
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for FramePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Frame>> {
        tracing::debug!("Reading frames from: {}", self.config.input_path());
        let bytes = self.storage.read_file(self.config.input_path()).await?;

        let frames = match self.input_format {
            InputFormat::Json => self.parse_json(&bytes)?,
            InputFormat::Csv => self.parse_csv(&bytes)?,
        };

        tracing::debug!("Parsed {} frames ({} bytes)", frames.len(), bytes.len());
        Ok(frames)
    }

    async fn transform(&self, frames: Vec<Frame>) -> Result<TransformResult> {
        let policy = self.config.frame_error_policy();
        let mut stats = RunStats::new();
        let mut records = Vec::with_capacity(frames.len());
        let mut skipped_frames = Vec::new();

        for frame in frames {
            stats.record_read();

            match self.preprocessor.process(&frame.tensors) {
                Ok(Some(mut output)) => {
                    let features = output.swap_remove(0).data;
                    let record = FeatureRecord {
                        frame: frame.frame,
                        features,
                    };
                    let degenerate = record.is_degenerate();
                    if degenerate {
                        tracing::warn!("⚠️ Frame {} produced NaN features", frame.frame);
                    }
                    stats.record_emitted(degenerate);
                    records.push(record);
                }
                Ok(None) => {
                    tracing::debug!("Frame {} has no tensors, nothing emitted", frame.frame);
                    stats.record_empty();
                }
                Err(e) if e.is_frame_error() && policy == FrameErrorPolicy::Skip => {
                    tracing::warn!("⚠️ Skipping frame {}: {}", frame.frame, e);
                    stats.record_skipped();
                    skipped_frames.push(frame.frame);
                }
                Err(e) => {
                    tracing::error!("❌ Frame {} failed: {}", frame.frame, e);
                    return Err(e);
                }
            }
        }

        stats.log_summary("Transform");

        Ok(TransformResult {
            records,
            skipped_frames,
            stats: stats.snapshot(),
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_dir = Path::new(self.config.output_path());

        for format in self.config.output_formats() {
            let (file_name, data) = match format.as_str() {
                "json" => (
                    JSON_OUTPUT_FILE,
                    serde_json::to_vec_pretty(&result.records)?,
                ),
                "csv" => (CSV_OUTPUT_FILE, self.render_csv(&result.records)?),
                other => {
                    return Err(PrepError::InvalidConfigValueError {
                        field: "output.formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported output format".to_string(),
                    });
                }
            };

            let path = output_dir.join(file_name);
            tracing::debug!("Writing {} ({} bytes)", path.display(), data.len());
            self.storage
                .write_file(&path.to_string_lossy(), &data)
                .await?;
        }

        Ok(output_dir.to_string_lossy().into_owned())
    }
}
