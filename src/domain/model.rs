use crate::utils::error::{BedtimeError, Result};
use chrono::{NaiveTime, TimeDelta, Timelike};

pub const MIN_SLEEP_HOURS: f64 = 4.0;
pub const MAX_SLEEP_HOURS: f64 = 12.0;
pub const SLEEP_STEP_HOURS: f64 = 0.5;
pub const MAX_COFFEE_CUPS: u8 = 3;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// One submission of the form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserInput {
    pub wake_time: NaiveTime,
    pub desired_sleep_hours: f64,
    pub coffee_cups: u8,
}

impl UserInput {
    pub fn new(wake_time: NaiveTime, desired_sleep_hours: f64, coffee_cups: u8) -> Result<Self> {
        if !(MIN_SLEEP_HOURS..=MAX_SLEEP_HOURS).contains(&desired_sleep_hours) {
            return Err(BedtimeError::InvalidInput {
                field: "desired_sleep_hours".to_string(),
                value: desired_sleep_hours.to_string(),
                reason: format!(
                    "must be between {} and {} hours",
                    MIN_SLEEP_HOURS, MAX_SLEEP_HOURS
                ),
            });
        }
        if coffee_cups > MAX_COFFEE_CUPS {
            return Err(BedtimeError::InvalidInput {
                field: "coffee_cups".to_string(),
                value: coffee_cups.to_string(),
                reason: format!("must be between 0 and {} cups", MAX_COFFEE_CUPS),
            });
        }

        Ok(Self {
            wake_time,
            desired_sleep_hours,
            coffee_cups,
        })
    }
}

/// Model input record. Field names follow the model's feature names.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepFeatures {
    pub wake: f64,
    pub estimated_sleep: f64,
    pub coffee: f64,
}

impl SleepFeatures {
    pub fn new(wake_time: NaiveTime, desired_sleep_hours: f64, coffee_cups: u8) -> Self {
        Self {
            wake: wake_seconds(wake_time) as f64,
            estimated_sleep: desired_sleep_hours,
            coffee: f64::from(coffee_cups),
        }
    }
}

/// Seconds since midnight from the hour and minute only.
pub fn wake_seconds(wake_time: NaiveTime) -> u32 {
    wake_time.hour() * 3600 + wake_time.minute() * 60
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub estimated_sleep_seconds: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BedtimeRecommendation {
    pub time: NaiveTime,
    /// Calendar days relative to the wake time: 0 is the same day, -1 the day before.
    pub day_offset: i64,
    pub wake_time: NaiveTime,
}

impl BedtimeRecommendation {
    /// Signed distance from the wake time; negative when the bedtime comes first.
    pub fn offset_from_wake_seconds(&self) -> f64 {
        let delta =
            TimeDelta::days(self.day_offset) + self.time.signed_duration_since(self.wake_time);
        delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9
    }

    /// Short 12-hour time, e.g. `10:30 PM`.
    pub fn formatted(&self) -> String {
        self.time.format("%-I:%M %p").to_string()
    }
}
