//! Health risk score
//!
//! The score scales the AQI to 0..100 and then weights it by the most
//! serious condition in the profile and by the user's declared sensitivity.

use crate::profile::{ConditionSet, HealthCondition, PollutionSensitivity};
use crate::AQI_MAX;

/// Highest risk score reported.
pub const RISK_MAX: u8 = 100;

impl HealthCondition {
    /// Weight applied to the base risk for someone with this condition.
    pub fn risk_multiplier(self) -> f64 {
        match self {
            HealthCondition::Asthma => 1.5,
            HealthCondition::Allergies => 1.2,
            HealthCondition::Copd => 1.8,
            HealthCondition::HeartDisease => 1.6,
            HealthCondition::WeakImmunity => 1.3,
            HealthCondition::Elderly => 1.4,
        }
    }
}

impl PollutionSensitivity {
    pub fn risk_factor(self) -> f64 {
        match self {
            PollutionSensitivity::Low => 0.8,
            PollutionSensitivity::Medium => 1.0,
            PollutionSensitivity::High => 1.3,
        }
    }
}

/// Largest multiplier among `conditions`, or 1 with no conditions.
/// Multipliers never compound across conditions.
pub fn condition_multiplier(conditions: ConditionSet) -> f64 {
    conditions
        .iter()
        .map(HealthCondition::risk_multiplier)
        .fold(1.0, f64::max)
}

/// Calculates the 0 to 100 health risk score for an AQI value.
///
/// # Arguments
///
/// * `aqi` - AQI value, normally from [`compute_aqi`](crate::compute_aqi)
/// * `conditions` - The user's health conditions
/// * `sensitivity` - The user's declared pollution sensitivity
///
/// # Examples
///
/// ```
/// use aqi::{compute_risk, ConditionSet, HealthCondition, PollutionSensitivity};
///
/// let conditions = ConditionSet::from([HealthCondition::Asthma, HealthCondition::Copd]);
/// assert_eq!(compute_risk(250, conditions, PollutionSensitivity::Medium), 90);
/// ```
pub fn compute_risk(aqi: u16, conditions: ConditionSet, sensitivity: PollutionSensitivity) -> u8 {
    let base_risk = f64::from(aqi) / f64::from(AQI_MAX) * 100.0;
    let weight = condition_multiplier(conditions) * sensitivity.risk_factor();
    let risk = libm::round(base_risk * weight);

    if risk >= f64::from(RISK_MAX) {
        RISK_MAX
    } else {
        risk as u8
    }
}
