use crate::domain::model::{Frame, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameErrorPolicy {
    #[default]
    Skip,
    Abort,
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn input_format(&self) -> Result<InputFormat>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn frame_error_policy(&self) -> FrameErrorPolicy;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Frame>>;
    async fn transform(&self, frames: Vec<Frame>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
