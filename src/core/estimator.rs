use crate::core::{BedtimeRecommendation, SleepFeatures, SleepModel, UserInput};
use crate::domain::model::SECONDS_PER_DAY;
use crate::utils::error::{BedtimeError, Result};
use chrono::{NaiveTime, TimeDelta};

const NANOS_PER_SECOND: f64 = 1e9;

// Keeps the nanosecond count inside i64.
const MAX_SLEEP_SECONDS: f64 = 1e9;

pub struct BedtimeEstimator<M: SleepModel> {
    model: M,
}

impl<M: SleepModel> BedtimeEstimator<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn estimate(
        &self,
        wake_time: NaiveTime,
        desired_sleep_hours: f64,
        coffee_cups: u8,
    ) -> Result<BedtimeRecommendation> {
        let features = SleepFeatures::new(wake_time, desired_sleep_hours, coffee_cups);
        tracing::debug!(
            wake = features.wake,
            estimated_sleep = features.estimated_sleep,
            coffee = features.coffee,
            "Running sleep model"
        );

        let prediction = self.model.prediction(&features).map_err(|e| {
            if e.is_inference_failure() {
                e
            } else {
                BedtimeError::inference(e.to_string())
            }
        })?;

        let seconds = prediction.estimated_sleep_seconds;
        tracing::debug!(estimated_sleep_seconds = seconds, "Model prediction received");

        let bedtime = subtract_sleep(wake_time, seconds).ok_or_else(|| {
            BedtimeError::inference(format!("model returned an unusable sleep duration: {}", seconds))
        })?;

        if seconds <= 0.0 {
            tracing::warn!(
                estimated_sleep_seconds = seconds,
                "Model predicted no sleep; bedtime is not before wake time"
            );
        }

        Ok(bedtime)
    }

    pub fn estimate_input(&self, input: &UserInput) -> Result<BedtimeRecommendation> {
        self.estimate(input.wake_time, input.desired_sleep_hours, input.coffee_cups)
    }
}

/// Wake time minus `sleep_seconds`, wrapping across midnight at nanosecond precision.
///
/// A nonzero duration always moves the bedtime by at least one nanosecond.
/// Returns `None` for non-finite or absurdly large durations.
pub fn subtract_sleep(wake_time: NaiveTime, sleep_seconds: f64) -> Option<BedtimeRecommendation> {
    if !sleep_seconds.is_finite() || sleep_seconds.abs() > MAX_SLEEP_SECONDS {
        return None;
    }

    let mut nanos = (sleep_seconds * NANOS_PER_SECOND).round() as i64;
    if nanos == 0 && sleep_seconds != 0.0 {
        nanos = if sleep_seconds > 0.0 { 1 } else { -1 };
    }

    // overflow is the discarded span in seconds, positive when we crossed into an earlier day
    let (time, overflow) = wake_time.overflowing_sub_signed(TimeDelta::nanoseconds(nanos));

    Some(BedtimeRecommendation {
        time,
        day_offset: -overflow / SECONDS_PER_DAY,
        wake_time,
    })
}
