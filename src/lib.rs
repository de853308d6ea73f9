pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, OutputFormat};

pub use app::BedtimeForm;
pub use config::{toml_config::TomlConfig, FormSettings, Overrides};
pub use crate::core::{
    estimator::BedtimeEstimator,
    model::{ConfiguredModelSource, EmbeddedModelSource, FileModelSource, LinearRegressionModel},
};
pub use domain::model::{BedtimeRecommendation, PredictionResult, SleepFeatures, UserInput};
pub use domain::ports::{ModelSource, SleepModel};
pub use utils::error::{BedtimeError, Result};
