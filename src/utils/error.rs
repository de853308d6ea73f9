use thiserror::Error;

/// Shown to the user for every inference failure, whatever the cause.
pub const INFERENCE_FAILURE_MESSAGE: &str = "Sorry, there was a problem calculating your bedtime.";

#[derive(Error, Debug)]
pub enum BedtimeError {
    #[error("Inference failed: {reason}")]
    InferenceFailure { reason: String },

    #[error("Invalid input for {field}: '{value}' ({reason})")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Inference,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BedtimeError {
    pub fn inference(reason: impl Into<String>) -> Self {
        Self::InferenceFailure {
            reason: reason.into(),
        }
    }

    pub fn is_inference_failure(&self) -> bool {
        matches!(self, Self::InferenceFailure { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InferenceFailure { .. } => ErrorCategory::Inference,
            Self::InvalidInput { .. } => ErrorCategory::Input,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::TomlParseError(_) => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    /// Inference failures are always recoverable by submitting the form again.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InferenceFailure { .. } => ErrorSeverity::Medium,
            Self::InvalidInput { .. } => ErrorSeverity::Low,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::TomlParseError(_) => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InferenceFailure { .. } => INFERENCE_FAILURE_MESSAGE.to_string(),
            Self::InvalidInput { field, reason, .. } => {
                format!("The value entered for {} is not valid: {}", field, reason)
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            Self::TomlParseError(_) => "The configuration file is not valid TOML".to_string(),
            Self::IoError(e) => format!("A file could not be read or written: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InferenceFailure { .. } => {
                "Check that the model file exists and is a valid sleep model, then try again"
            }
            Self::InvalidInput { .. } => {
                "Use 4 to 12 hours of sleep in half-hour steps and 0 to 3 cups of coffee"
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the value in the config file or override it on the command line"
            }
            Self::TomlParseError(_) => "Check the config file syntax",
            Self::IoError(_) => "Check that the path exists and is readable",
        }
    }
}

pub type Result<T> = std::result::Result<T, BedtimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inference_failure_hides_cause() {
        let err = BedtimeError::inference("model file missing: /tmp/nope.json");
        assert!(err.is_inference_failure());
        assert_eq!(err.user_friendly_message(), INFERENCE_FAILURE_MESSAGE);
        assert!(!err.user_friendly_message().contains("nope.json"));
    }

    #[test]
    fn test_severity_ordering() {
        let input = BedtimeError::InvalidInput {
            field: "coffee_cups".to_string(),
            value: "4".to_string(),
            reason: "out of range".to_string(),
        };
        let config = BedtimeError::ConfigError {
            message: "bad".to_string(),
        };
        assert!(input.severity() < config.severity());
        assert_eq!(input.category(), ErrorCategory::Input);
        assert_eq!(config.category(), ErrorCategory::Configuration);
    }
}
