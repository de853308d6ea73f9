pub mod estimator;
pub mod model;

pub use crate::domain::model::{BedtimeRecommendation, PredictionResult, SleepFeatures, UserInput};
pub use crate::domain::ports::{ModelSource, SleepModel};
pub use crate::utils::error::Result;
