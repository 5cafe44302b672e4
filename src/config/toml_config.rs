use crate::core::normalizer::DegenerateScalePolicy;
use crate::domain::ports::{ConfigProvider, FrameErrorPolicy, InputFormat};
use crate::utils::error::{PrepError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SUPPORTED_OUTPUT_FORMATS: [&str; 2] = ["csv", "json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepConfig {
    pub preprocessor: PreprocessorOptions,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub error_handling: Option<ErrorHandlingConfig>,
}

/// Options consumed by the preprocessing stage itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreprocessorOptions {
    pub num_landmarks: Option<usize>,
    #[serde(default)]
    pub degenerate_scale: DegenerateScalePolicy,
}

impl PreprocessorOptions {
    pub fn with_landmarks(num_landmarks: usize) -> Self {
        Self {
            num_landmarks: Some(num_landmarks),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
    pub format: Option<InputFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default = "default_output_formats")]
    pub formats: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    #[serde(default)]
    pub on_frame_error: FrameErrorPolicy,
}

fn default_output_formats() -> Vec<String> {
    vec!["json".to_string()]
}

impl PrepConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PrepError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${FRAMES_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PrepError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn num_landmarks(&self) -> Result<usize> {
        let n = *validation::validate_required_field(
            "preprocessor.num_landmarks",
            &self.preprocessor.num_landmarks,
        )?;
        validation::validate_positive_number("preprocessor.num_landmarks", n, 1)?;
        Ok(n)
    }

    /// Width of each emitted feature row, saturating for absurd landmark counts.
    pub fn features_per_frame(&self) -> Result<usize> {
        Ok(self.num_landmarks()?.saturating_mul(2))
    }

    /// Explicit `input.format`, otherwise inferred from the file extension.
    pub fn resolved_input_format(&self) -> Result<InputFormat> {
        if let Some(format) = self.input.format {
            return Ok(format);
        }

        let extension = Path::new(&self.input.path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(InputFormat::Json),
            Some("csv") => Ok(InputFormat::Csv),
            _ => Err(PrepError::InvalidConfigValueError {
                field: "input.format".to_string(),
                value: self.input.path.clone(),
                reason: "Cannot infer format from extension; set input.format to json or csv"
                    .to_string(),
            }),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        self.num_landmarks()?;

        validation::validate_path("input.path", &self.input.path)?;
        validation::validate_path("output.path", &self.output.path)?;
        self.resolved_input_format()?;

        for format in &self.output.formats {
            validation::validate_one_of("output.formats", format, &SUPPORTED_OUTPUT_FORMATS)?;
        }

        Ok(())
    }
}

impl ConfigProvider for PrepConfig {
    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn input_format(&self) -> Result<InputFormat> {
        self.resolved_input_format()
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn frame_error_policy(&self) -> FrameErrorPolicy {
        self.error_handling
            .as_ref()
            .map(|e| e.on_frame_error)
            .unwrap_or_default()
    }
}

impl Validate for PrepConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_config() {
        let toml_content = r#"
[preprocessor]
num_landmarks = 21

[input]
path = "frames.json"

[output]
path = "./output"
formats = ["csv", "json"]
"#;

        let config = PrepConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.num_landmarks().unwrap(), 21);
        assert_eq!(
            config.preprocessor.degenerate_scale,
            DegenerateScalePolicy::Propagate
        );
        assert_eq!(config.input_format().unwrap(), InputFormat::Json);
        assert_eq!(config.frame_error_policy(), FrameErrorPolicy::Skip);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_policies_and_defaults() {
        let toml_content = r#"
[preprocessor]
num_landmarks = 33
degenerate_scale = "reject"

[input]
path = "frames.dat"
format = "csv"

[output]
path = "./output"

[error_handling]
on_frame_error = "abort"
"#;

        let config = PrepConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.preprocessor.degenerate_scale, DegenerateScalePolicy::Reject);
        assert_eq!(config.input_format().unwrap(), InputFormat::Csv);
        assert_eq!(config.output_formats(), &["json".to_string()]);
        assert_eq!(config.frame_error_policy(), FrameErrorPolicy::Abort);
    }

    #[test]
    fn test_missing_num_landmarks_is_config_error() {
        let toml_content = r#"
[preprocessor]

[input]
path = "frames.json"

[output]
path = "./output"
"#;

        let config = PrepConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(PrepError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_zero_num_landmarks_is_rejected() {
        let toml_content = r#"
[preprocessor]
num_landmarks = 0

[input]
path = "frames.json"

[output]
path = "./output"
"#;

        let config = PrepConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(PrepError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_unknown_output_format_is_rejected() {
        let toml_content = r#"
[preprocessor]
num_landmarks = 21

[input]
path = "frames.json"

[output]
path = "./output"
formats = ["parquet"]
"#;

        let config = PrepConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_features_per_frame_saturates() {
        let mut config = PrepConfig::from_toml_str(
            r#"
[preprocessor]
num_landmarks = 21

[input]
path = "frames.json"

[output]
path = "out"
"#,
        )
        .unwrap();
        assert_eq!(config.features_per_frame().unwrap(), 42);

        config.preprocessor.num_landmarks = Some(usize::MAX);
        assert_eq!(config.features_per_frame().unwrap(), usize::MAX);
    }

    #[test]
    fn test_uninferable_input_format_is_rejected() {
        let toml_content = r#"
[preprocessor]
num_landmarks = 21

[input]
path = "frames.bin"

[output]
path = "./output"
"#;

        let config = PrepConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LANDMARK_PREP_TEST_FRAMES", "/data/hand_frames.csv");

        let toml_content = r#"
[preprocessor]
num_landmarks = 21

[input]
path = "${LANDMARK_PREP_TEST_FRAMES}"

[output]
path = "${LANDMARK_PREP_TEST_UNSET}"
"#;

        let config = PrepConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input.path, "/data/hand_frames.csv");
        assert_eq!(config.output.path, "${LANDMARK_PREP_TEST_UNSET}");

        std::env::remove_var("LANDMARK_PREP_TEST_FRAMES");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[preprocessor]
num_landmarks = 5

[input]
path = "frames.json"

[output]
path = "./output"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = PrepConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.num_landmarks().unwrap(), 5);
    }

    #[test]
    fn test_malformed_toml_is_toml_error() {
        let err = PrepConfig::from_toml_str("[preprocessor\nnum_landmarks = ").unwrap_err();
        assert!(matches!(err, PrepError::TomlError(_)));
    }
}
