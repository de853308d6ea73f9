#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::app::form::{default_wake_time, BedtimeForm, DEFAULT_COFFEE_CUPS, DEFAULT_SLEEP_HOURS};
use crate::core::model::ConfiguredModelSource;
use crate::domain::model::{MAX_COFFEE_CUPS, MAX_SLEEP_HOURS, MIN_SLEEP_HOURS, SLEEP_STEP_HOURS};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use chrono::NaiveTime;
use toml_config::TomlConfig;

/// Values typed on the command line; each one beats the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub sleep_hours: Option<f64>,
    pub wake_time: Option<String>,
    pub coffee_cups: Option<u8>,
    pub model_path: Option<String>,
}

/// Fully resolved form values: command line, then config file, then built-in defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSettings {
    pub sleep_hours: f64,
    pub wake_time: NaiveTime,
    pub coffee_cups: u8,
    /// `None` selects the model compiled into the binary.
    pub model_path: Option<String>,
}

impl FormSettings {
    pub fn resolve(file: &TomlConfig, overrides: &Overrides) -> Result<Self> {
        let wake_time = match overrides.wake_time.as_deref() {
            Some(wake) => validation::parse_wake_time("wake", wake)?,
            None => match file.form.wake_time.as_deref() {
                Some(wake) => validation::parse_wake_time("form.wake_time", wake)?,
                None => default_wake_time(),
            },
        };

        let settings = Self {
            sleep_hours: overrides
                .sleep_hours
                .or(file.form.sleep_hours)
                .unwrap_or(DEFAULT_SLEEP_HOURS),
            wake_time,
            coffee_cups: overrides
                .coffee_cups
                .or(file.form.coffee_cups)
                .unwrap_or(DEFAULT_COFFEE_CUPS),
            model_path: overrides
                .model_path
                .clone()
                .or_else(|| file.model.path.clone()),
        };

        tracing::debug!("Resolved form settings: {:?}", settings);
        Ok(settings)
    }

    pub fn form(&self) -> BedtimeForm {
        BedtimeForm::new(self.wake_time, self.sleep_hours, self.coffee_cups)
    }

    pub fn model_source(&self) -> ConfiguredModelSource {
        ConfiguredModelSource::from_path(self.model_path.as_deref())
    }
}

impl Validate for FormSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_range("sleep_hours", self.sleep_hours, MIN_SLEEP_HOURS, MAX_SLEEP_HOURS)?;
        validation::validate_step("sleep_hours", self.sleep_hours, SLEEP_STEP_HOURS)?;
        validation::validate_range("coffee_cups", self.coffee_cups, 0, MAX_COFFEE_CUPS)?;
        if let Some(path) = &self.model_path {
            validation::validate_path("model_path", path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults() {
        let settings = FormSettings::resolve(&TomlConfig::default(), &Overrides::default()).unwrap();
        assert_eq!(settings.sleep_hours, 8.0);
        assert_eq!(settings.wake_time, NaiveTime::from_hms_opt(7, 0, 0).unwrap());
        assert_eq!(settings.coffee_cups, 1);
        assert!(settings.model_path.is_none());
        assert!(settings.model_source().path().is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_overrides_beat_file() {
        let file = TomlConfig::from_toml_str(
            "[model]\npath = \"from-file.json\"\n[form]\nsleep_hours = 9.0\nwake_time = \"06:00\"\ncoffee_cups = 2\n",
        )
        .unwrap();
        let overrides = Overrides {
            sleep_hours: Some(6.5),
            wake_time: None,
            coffee_cups: Some(0),
            model_path: None,
        };

        let settings = FormSettings::resolve(&file, &overrides).unwrap();
        assert_eq!(settings.sleep_hours, 6.5);
        assert_eq!(settings.wake_time, NaiveTime::from_hms_opt(6, 0, 0).unwrap());
        assert_eq!(settings.coffee_cups, 0);
        assert_eq!(settings.model_path.as_deref(), Some("from-file.json"));
    }

    #[test]
    fn test_bad_wake_override() {
        let overrides = Overrides {
            wake_time: Some("noon".to_string()),
            ..Overrides::default()
        };
        assert!(FormSettings::resolve(&TomlConfig::default(), &overrides).is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_override() {
        let overrides = Overrides {
            sleep_hours: Some(3.0),
            ..Overrides::default()
        };
        let settings = FormSettings::resolve(&TomlConfig::default(), &overrides).unwrap();
        assert!(settings.validate().is_err());
    }
}
