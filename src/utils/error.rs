use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrepError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Shape mismatch: {num_values} values for {num_landmarks} landmarks ({reason})")]
    ShapeMismatch {
        num_values: usize,
        num_landmarks: usize,
        reason: String,
    },

    #[error("Degenerate scale: all {num_landmarks} landmarks coincide with the reference landmark")]
    DegenerateScale { num_landmarks: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Numeric,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PrepError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PrepError::ConfigError { .. }
            | PrepError::MissingConfigError { .. }
            | PrepError::InvalidConfigValueError { .. }
            | PrepError::TomlError(_) => ErrorCategory::Configuration,
            PrepError::ShapeMismatch { .. }
            | PrepError::CsvError(_)
            | PrepError::SerializationError(_) => ErrorCategory::Input,
            PrepError::DegenerateScale { .. } => ErrorCategory::Numeric,
            PrepError::IoError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Per-frame errors: the caller may drop the frame and continue.
            PrepError::ShapeMismatch { .. } | PrepError::DegenerateScale { .. } => {
                ErrorSeverity::Medium
            }
            PrepError::ConfigError { .. }
            | PrepError::MissingConfigError { .. }
            | PrepError::InvalidConfigValueError { .. }
            | PrepError::TomlError(_)
            | PrepError::CsvError(_)
            | PrepError::SerializationError(_) => ErrorSeverity::High,
            PrepError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// True for errors scoped to a single frame, which never invalidate the stage.
    pub fn is_frame_error(&self) -> bool {
        matches!(
            self,
            PrepError::ShapeMismatch { .. } | PrepError::DegenerateScale { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PrepError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration file or pass it on the command line", field)
            }
            PrepError::InvalidConfigValueError { field, .. } => {
                format!("Check the value of '{}' in the configuration", field)
            }
            PrepError::ConfigError { .. } | PrepError::TomlError(_) => {
                "Check the configuration file syntax and required sections".to_string()
            }
            PrepError::ShapeMismatch { .. } => {
                "Make sure num_landmarks matches the model output and each landmark has at least x and y"
                    .to_string()
            }
            PrepError::DegenerateScale { .. } => {
                "Drop the frame, or set degenerate_scale = \"propagate\" to emit NaN features"
                    .to_string()
            }
            PrepError::CsvError(_) => {
                "Each CSV row must be a flat list of float values without a header".to_string()
            }
            PrepError::SerializationError(_) => {
                "The JSON input must be an array of {frame, tensors} objects".to_string()
            }
            PrepError::IoError(_) => "Check that the paths exist and are accessible".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Input => format!("Invalid landmark input: {}", self),
            ErrorCategory::Numeric => format!("Cannot normalize frame: {}", self),
            ErrorCategory::Io => format!("File access failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PrepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_errors_are_medium_severity() {
        let err = PrepError::ShapeMismatch {
            num_values: 7,
            num_landmarks: 3,
            reason: "not divisible".to_string(),
        };
        assert!(err.is_frame_error());
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.category(), ErrorCategory::Input);

        let err = PrepError::DegenerateScale { num_landmarks: 2 };
        assert!(err.is_frame_error());
        assert_eq!(err.category(), ErrorCategory::Numeric);
    }

    #[test]
    fn test_severity_maps_to_distinct_exit_levels() {
        let frame = PrepError::DegenerateScale { num_landmarks: 1 };
        let config = PrepError::ConfigError {
            message: "bad".to_string(),
        };
        let io = PrepError::IoError(std::io::Error::other("disk"));

        assert!(frame.severity() < config.severity());
        assert!(config.severity() < io.severity());
        assert_eq!(io.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_missing_config_message_names_field() {
        let err = PrepError::MissingConfigError {
            field: "preprocessor.num_landmarks".to_string(),
        };
        assert!(!err.is_frame_error());
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("preprocessor.num_landmarks"));
        assert!(err.recovery_suggestion().contains("preprocessor.num_landmarks"));
        assert!(err.user_friendly_message().starts_with("Invalid configuration"));
    }
}
