use crate::utils::error::{BedtimeError, Result};
use crate::utils::validation::{self, Validate};
use crate::domain::model::{MAX_COFFEE_CUPS, MAX_SLEEP_HOURS, MIN_SLEEP_HOURS, SLEEP_STEP_HOURS};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub form: FormConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    pub path: Option<String>,
}

/// Initial widget values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormConfig {
    pub sleep_hours: Option<f64>,
    pub wake_time: Option<String>,
    pub coffee_cups: Option<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BedtimeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML after substituting `${VAR}` references from the environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed)?)
    }

    // Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BedtimeError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.model.path {
            validation::validate_path("model.path", path)?;
        }

        if let Some(hours) = self.form.sleep_hours {
            validation::validate_range("form.sleep_hours", hours, MIN_SLEEP_HOURS, MAX_SLEEP_HOURS)?;
            validation::validate_step("form.sleep_hours", hours, SLEEP_STEP_HOURS)?;
        }

        if let Some(wake) = &self.form.wake_time {
            validation::parse_wake_time("form.wake_time", wake)?;
        }

        if let Some(cups) = self.form.coffee_cups {
            validation::validate_range("form.coffee_cups", cups, 0, MAX_COFFEE_CUPS)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let content = r#"
[model]
path = "models/sleep_calculator.json"

[form]
sleep_hours = 7.5
wake_time = "06:45"
coffee_cups = 2

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(content).unwrap();
        assert_eq!(config.model.path.as_deref(), Some("models/sleep_calculator.json"));
        assert_eq!(config.form.sleep_hours, Some(7.5));
        assert_eq!(config.form.wake_time.as_deref(), Some("06:45"));
        assert_eq!(config.form.coffee_cups, Some(2));
        assert!(config.verbose());
        assert!(!config.json_logging());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.model.path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BETTER_REST_TEST_MODEL_DIR", "/opt/models");

        let content = r#"
[model]
path = "${BETTER_REST_TEST_MODEL_DIR}/sleep.json"
"#;
        let config = TomlConfig::from_toml_str(content).unwrap();
        assert_eq!(config.model.path.as_deref(), Some("/opt/models/sleep.json"));

        std::env::remove_var("BETTER_REST_TEST_MODEL_DIR");
    }

    #[test]
    fn test_unset_env_var_left_alone() {
        let content = r#"
[model]
path = "${BETTER_REST_SURELY_UNSET_VAR}/sleep.json"
"#;
        let config = TomlConfig::from_toml_str(content).unwrap();
        assert_eq!(
            config.model.path.as_deref(),
            Some("${BETTER_REST_SURELY_UNSET_VAR}/sleep.json")
        );
    }

    #[test]
    fn test_validation_rejects_out_of_range() {
        let config = TomlConfig::from_toml_str("[form]\nsleep_hours = 13.0\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[form]\nsleep_hours = 8.2\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[form]\ncoffee_cups = 4\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[form]\nwake_time = \"25:00\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[form\nsleep_hours = ").unwrap_err();
        assert!(matches!(err, BedtimeError::TomlParseError(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[form]\ncoffee_cups = 0\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.form.coffee_cups, Some(0));
    }
}
