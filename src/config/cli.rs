use crate::config::toml_config::TomlConfig;
use crate::config::{FormSettings, Overrides};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "better-rest")]
#[command(about = "Recommends a bedtime from your wake time, sleep goal and coffee intake")]
pub struct CliConfig {
    /// Desired amount of sleep in hours (4 to 12, half-hour steps)
    #[arg(long)]
    pub sleep_hours: Option<f64>,

    /// Time you want to wake up, as HH:MM
    #[arg(long, value_name = "HH:MM")]
    pub wake: Option<String>,

    /// Daily coffee intake in cups (0 to 3)
    #[arg(long)]
    pub coffee: Option<u8>,

    /// Path to the sleep model artifact
    #[arg(long, value_name = "PATH")]
    pub model: Option<String>,

    /// Optional TOML config file with form defaults
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            sleep_hours: self.sleep_hours,
            wake_time: self.wake.clone(),
            coffee_cups: self.coffee,
            model_path: self.model.clone(),
        }
    }

    pub fn load_file(&self) -> Result<TomlConfig> {
        match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Ok(file)
            }
            None => Ok(TomlConfig::default()),
        }
    }

    pub fn settings(&self, file: &TomlConfig) -> Result<FormSettings> {
        let settings = FormSettings::resolve(file, &self.overrides())?;
        settings.validate()?;
        Ok(settings)
    }
}
