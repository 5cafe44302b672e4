use crate::config::toml_config::PrepConfig;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "landmark-prep")]
#[command(about = "Normalize landmark regression tensors into classifier feature vectors")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "landmark-prep.toml")]
    pub config: String,

    /// Override preprocessor.num_landmarks
    #[arg(long)]
    pub num_landmarks: Option<usize>,

    /// Override input.path
    #[arg(long)]
    pub input: Option<String>,

    /// Override output.path
    #[arg(long)]
    pub output: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Show the resolved configuration without processing any frames
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// 應用命令列覆蓋設定
    pub fn apply_overrides(&self, config: &mut PrepConfig) {
        if let Some(n) = self.num_landmarks {
            config.preprocessor.num_landmarks = Some(n);
            tracing::info!("🔧 num_landmarks overridden to: {}", n);
        }
        if let Some(input) = &self.input {
            config.input.path = input.clone();
            tracing::info!("🔧 input path overridden to: {}", input);
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
            tracing::info!("🔧 output path overridden to: {}", output);
        }
    }
}
