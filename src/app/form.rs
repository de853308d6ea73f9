//! View state for the bedtime form and its "Calculate" action.
//!
//! The form owns the widget values and the alert shown after a calculation.
//! Estimation itself lives in [`crate::core::estimator`] and never sees this state.

use crate::core::estimator::BedtimeEstimator;
use crate::core::{BedtimeRecommendation, ModelSource, UserInput};
use crate::domain::model::{MAX_COFFEE_CUPS, MAX_SLEEP_HOURS, MIN_SLEEP_HOURS, SLEEP_STEP_HOURS};
use crate::utils::error::{BedtimeError, Result, INFERENCE_FAILURE_MESSAGE};
use chrono::NaiveTime;

pub const FORM_TITLE: &str = "BetterRest";
pub const SUCCESS_TITLE: &str = "Your ideal bedtime is...";
pub const ERROR_TITLE: &str = "Error";
pub const DISMISS_LABEL: &str = "Understood";

pub const DEFAULT_SLEEP_HOURS: f64 = 8.0;
pub const DEFAULT_COFFEE_CUPS: u8 = 1;

pub fn default_wake_time() -> NaiveTime {
    NaiveTime::from_num_seconds_from_midnight_opt(7 * 3600, 0).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BedtimeForm {
    pub sleep_amount: f64,
    pub wake_up: NaiveTime,
    pub coffee_amount: u8,
    pub alert_title: String,
    pub alert_message: String,
    pub showing_alert: bool,
    last_bedtime: Option<BedtimeRecommendation>,
}

impl Default for BedtimeForm {
    fn default() -> Self {
        Self::new(default_wake_time(), DEFAULT_SLEEP_HOURS, DEFAULT_COFFEE_CUPS)
    }
}

impl BedtimeForm {
    pub fn new(wake_up: NaiveTime, sleep_amount: f64, coffee_amount: u8) -> Self {
        let mut form = Self {
            sleep_amount: DEFAULT_SLEEP_HOURS,
            wake_up,
            coffee_amount: DEFAULT_COFFEE_CUPS,
            alert_title: String::new(),
            alert_message: String::new(),
            showing_alert: false,
            last_bedtime: None,
        };
        form.set_sleep_amount(sleep_amount);
        form.coffee_amount = coffee_amount.min(MAX_COFFEE_CUPS);
        form
    }

    /// Clamps to the stepper bounds and snaps to the nearest half hour.
    pub fn set_sleep_amount(&mut self, hours: f64) {
        if hours.is_nan() {
            tracing::warn!("Ignoring NaN sleep amount");
            return;
        }
        let clamped = hours.clamp(MIN_SLEEP_HOURS, MAX_SLEEP_HOURS);
        self.sleep_amount = (clamped / SLEEP_STEP_HOURS).round() * SLEEP_STEP_HOURS;
    }

    pub fn increment_sleep(&mut self) {
        self.set_sleep_amount(self.sleep_amount + SLEEP_STEP_HOURS);
    }

    pub fn decrement_sleep(&mut self) {
        self.set_sleep_amount(self.sleep_amount - SLEEP_STEP_HOURS);
    }

    /// Any time of day is selectable.
    pub fn set_wake_up(&mut self, wake_up: NaiveTime) {
        self.wake_up = wake_up;
    }

    pub fn select_coffee(&mut self, cups: u8) -> Result<()> {
        if cups > MAX_COFFEE_CUPS {
            return Err(BedtimeError::InvalidInput {
                field: "coffee_cups".to_string(),
                value: cups.to_string(),
                reason: format!("the picker offers 0 to {} cups", MAX_COFFEE_CUPS),
            });
        }
        self.coffee_amount = cups;
        Ok(())
    }

    pub fn sleep_label(&self) -> String {
        format!("{} hours", format_hours(self.sleep_amount))
    }

    pub fn coffee_options() -> impl Iterator<Item = u8> {
        0..=MAX_COFFEE_CUPS
    }

    pub fn input(&self) -> Result<UserInput> {
        UserInput::new(self.wake_up, self.sleep_amount, self.coffee_amount)
    }

    pub fn last_bedtime(&self) -> Option<&BedtimeRecommendation> {
        self.last_bedtime.as_ref()
    }

    /// Runs the "Calculate" button: loads the model, estimates, and fills the alert.
    ///
    /// Every failure shows the same generic message; the cause is only logged.
    pub fn calculate_bedtime<S: ModelSource>(&mut self, source: &S) -> Result<BedtimeRecommendation> {
        let outcome = self.input().and_then(|input| {
            let estimator = BedtimeEstimator::new(source.load()?);
            estimator.estimate_input(&input)
        });

        match &outcome {
            Ok(bedtime) => {
                tracing::info!(
                    "Recommended bedtime {} for wake time {}",
                    bedtime.formatted(),
                    self.wake_up.format("%H:%M")
                );
                self.alert_title = SUCCESS_TITLE.to_string();
                self.alert_message = bedtime.formatted();
                self.last_bedtime = Some(*bedtime);
            }
            Err(e) => {
                tracing::error!(
                    "Bedtime calculation failed: {} (Category: {:?})",
                    e,
                    e.category()
                );
                self.alert_title = ERROR_TITLE.to_string();
                self.alert_message = INFERENCE_FAILURE_MESSAGE.to_string();
                self.last_bedtime = None;
            }
        }
        self.showing_alert = true;

        outcome
    }

    pub fn dismiss_alert(&mut self) {
        self.showing_alert = false;
    }
}

/// Renders `1 cup`, `2 cups`, `0 cups`.
pub fn coffee_label(cups: u8) -> String {
    if cups == 1 {
        "1 cup".to_string()
    } else {
        format!("{} cups", cups)
    }
}

fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{:.0}", hours)
    } else {
        format!("{}", hours)
    }
}
