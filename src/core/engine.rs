use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct PrepEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> PrepEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting landmark preprocessing");

        let frames = self.pipeline.extract().await?;
        tracing::info!("📥 Extracted {} frames", frames.len());

        let result = self.pipeline.transform(frames).await?;
        tracing::info!(
            "🛠️ Normalized {} frames ({} skipped)",
            result.records.len(),
            result.skipped_frames.len()
        );

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("💾 Features saved to: {}", output_path);

        Ok(output_path)
    }
}
