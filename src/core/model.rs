use crate::core::{ModelSource, PredictionResult, SleepFeatures, SleepModel};
use crate::utils::error::{BedtimeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The model shipped inside the binary, used when no artifact path is configured.
pub const BUNDLED_MODEL_JSON: &str = include_str!("../../models/sleep_calculator.json");

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Coefficients {
    pub wake: f64,
    pub estimated_sleep: f64,
    pub coffee: f64,
}

/// Linear regressor exported as JSON: `intercept + Σ coefficient * feature`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressionModel {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    pub intercept: f64,
    pub coefficients: Coefficients,
}

impl LinearRegressionModel {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BedtimeError::inference(format!("cannot read model '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(content)
            .map_err(|e| BedtimeError::inference(format!("malformed model artifact: {}", e)))?;
        model.check_weights()?;
        Ok(model)
    }

    fn check_weights(&self) -> Result<()> {
        let weights = [
            ("intercept", self.intercept),
            ("wake", self.coefficients.wake),
            ("estimatedSleep", self.coefficients.estimated_sleep),
            ("coffee", self.coefficients.coffee),
        ];
        for (name, value) in weights {
            if !value.is_finite() {
                return Err(BedtimeError::inference(format!(
                    "model '{}' has a non-finite {} weight",
                    self.name, name
                )));
            }
        }
        Ok(())
    }
}

impl SleepModel for LinearRegressionModel {
    fn prediction(&self, features: &SleepFeatures) -> Result<PredictionResult> {
        let c = &self.coefficients;
        let estimated_sleep_seconds = self.intercept
            + c.wake * features.wake
            + c.estimated_sleep * features.estimated_sleep
            + c.coffee * features.coffee;

        if !estimated_sleep_seconds.is_finite() {
            return Err(BedtimeError::inference(format!(
                "model '{}' produced a non-finite prediction",
                self.name
            )));
        }

        Ok(PredictionResult {
            estimated_sleep_seconds,
        })
    }
}

/// Reads the model artifact from disk on every load.
#[derive(Debug, Clone)]
pub struct FileModelSource {
    path: PathBuf,
}

impl FileModelSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelSource for FileModelSource {
    type Model = LinearRegressionModel;

    fn load(&self) -> Result<Self::Model> {
        tracing::debug!("Loading sleep model from {}", self.path.display());
        let model = LinearRegressionModel::from_file(&self.path)?;
        tracing::debug!(
            "Loaded model '{}' (version {})",
            model.name,
            model.version.as_deref().unwrap_or("unknown")
        );
        Ok(model)
    }
}

/// Parses the compiled-in artifact on every load; independent of the working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedModelSource;

impl ModelSource for EmbeddedModelSource {
    type Model = LinearRegressionModel;

    fn load(&self) -> Result<Self::Model> {
        tracing::debug!("Loading bundled sleep model");
        LinearRegressionModel::from_json_str(BUNDLED_MODEL_JSON)
    }
}

/// Either the bundled model or an artifact on disk, picked from configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredModelSource {
    Bundled(EmbeddedModelSource),
    File(FileModelSource),
}

impl ConfiguredModelSource {
    pub fn from_path(path: Option<&str>) -> Self {
        match path {
            Some(path) => Self::File(FileModelSource::new(path)),
            None => Self::Bundled(EmbeddedModelSource),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Bundled(_) => None,
            Self::File(source) => Some(source.path()),
        }
    }
}

impl ModelSource for ConfiguredModelSource {
    type Model = LinearRegressionModel;

    fn load(&self) -> Result<Self::Model> {
        match self {
            Self::Bundled(source) => source.load(),
            Self::File(source) => source.load(),
        }
    }
}
