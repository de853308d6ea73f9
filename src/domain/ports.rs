use crate::domain::model::{PredictionResult, SleepFeatures};
use crate::utils::error::Result;

/// A trained sleep regressor: three numeric features in, predicted sleep seconds out.
pub trait SleepModel {
    fn prediction(&self, features: &SleepFeatures) -> Result<PredictionResult>;
}

impl<M: SleepModel + ?Sized> SleepModel for &M {
    fn prediction(&self, features: &SleepFeatures) -> Result<PredictionResult> {
        (**self).prediction(features)
    }
}

impl<M: SleepModel + ?Sized> SleepModel for Box<M> {
    fn prediction(&self, features: &SleepFeatures) -> Result<PredictionResult> {
        (**self).prediction(features)
    }
}

/// Produces a ready model. Called once per calculation, so load failures surface per request.
pub trait ModelSource {
    type Model: SleepModel;

    fn load(&self) -> Result<Self::Model>;
}
