//! AQI library
//!
//! This library provides the air quality calculations behind the advisor:
//! PM2.5 to AQI conversion using EPA breakpoints, AQI status classification,
//! personalized advice rules and a health risk score that combines AQI with a
//! user's health profile. It supports both std and no_std environments, and
//! every operation is a pure function over its inputs.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

/// Declares a closed enumeration with a fixed snake_case name per variant,
/// plus `Display`, `FromStr` and (with the `serde` feature) serde support
/// using those names.
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[cfg_attr(feature = "serde", serde(rename = $text))]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err($crate::Error::UnknownVariant { kind: $kind }),
                }
            }
        }
    };
}

pub mod advice;
pub mod assessment;
pub mod error;
pub mod profile;
pub mod reading;
pub mod risk;
pub mod status;

pub use advice::{derive_advice, AdviceList, AdviceRule, Audience, ADVICE_RULES, GOOD_AIR_ADVICE};
pub use assessment::Assessment;
pub use error::{Error, Result};
pub use profile::{
    ActivityLevel, ConditionSet, Gender, HealthCondition, HealthProfile, PollutionSensitivity,
};
pub use reading::{Measurement, Pollutant, PollutantReading};
pub use risk::{compute_risk, condition_multiplier, RISK_MAX};
pub use status::{classify_status, AqiStatus};

/// Highest AQI value the scale reports.
pub const AQI_MAX: u16 = 500;

/// PM2.5 concentration breakpoints in µg/m³, ascending.
///
/// This is the EPA table used by the advisor since launch (pre-2024 revision):
/// https://document.airnow.gov/technical-assistance-document-for-the-reporting-of-daily-air-quailty.pdf
pub const PM25_BREAKPOINTS: [(f64, f64); 6] = [
    (0.0, 12.0),    // Good
    (12.1, 35.4),   // Moderate
    (35.5, 55.4),   // Unhealthy for Sensitive Groups
    (55.5, 150.4),  // Unhealthy
    (150.5, 250.4), // Very Unhealthy
    (250.5, 500.4), // Hazardous
];

/// AQI values corresponding to `PM25_BREAKPOINTS`
pub const AQI_BREAKPOINTS: [(u16, u16); 6] = [
    (0, 50),    // Good
    (51, 100),  // Moderate
    (101, 150), // Unhealthy for Sensitive Groups
    (151, 200), // Unhealthy
    (201, 300), // Very Unhealthy
    (301, 500), // Hazardous
];

/// Calculate the AQI for the provided PM2.5 value.
///
/// # Arguments
///
/// * `pm25` - PM2.5 concentration in µg/m³
///
/// # Returns
///
/// The calculated AQI value using breakpoints and a formula
/// provided by the EPA, in the range 0 to 500. Concentrations above the
/// table clamp to 500. Negative and NaN concentrations clamp to 0; use
/// [`compute_aqi_checked`] to reject them instead. A concentration that
/// falls in the 0.1 µg/m³ gap between two segments (for example 12.05)
/// takes the lowest AQI of the segment above it, which keeps the result
/// non-decreasing in `pm25`.
///
/// # Examples
///
/// ```
/// use aqi::compute_aqi;
///
/// let pm25_concentration = 41;
/// let aqi = compute_aqi(pm25_concentration as f64);
/// assert_eq!(115, aqi);
///
/// let pm25_concentration = 7;
/// let aqi = compute_aqi(pm25_concentration as f64);
/// assert_eq!(29, aqi);
/// ```
pub fn compute_aqi(pm25: f64) -> u16 {
    if pm25.is_nan() || pm25 < 0.0 {
        log::warn!("PM2.5 concentration {} is not a valid reading, reporting AQI 0", pm25);
        return 0;
    }

    // Find the appropriate breakpoint range
    for (&(pm_low, pm_high), &(aqi_low, aqi_high)) in
        PM25_BREAKPOINTS.iter().zip(AQI_BREAKPOINTS.iter())
    {
        if pm25 > pm_high {
            continue;
        }

        // Between the previous segment's high and this one's low.
        if pm25 < pm_low {
            return aqi_low;
        }

        // Linear interpolation formula transcribed from EPA documentation
        // AQI = ((AQIhigh - AQIlow) / (PMhigh - PMlow)) * (PMactual - PMlow) + AQIlow
        let aqi = (f64::from(aqi_high - aqi_low) / (pm_high - pm_low)) * (pm25 - pm_low)
            + f64::from(aqi_low);
        return libm::round(aqi) as u16;
    }

    log::debug!("PM2.5 concentration {} is beyond the AQI scale", pm25);
    AQI_MAX
}

/// Same as [`compute_aqi`], but rejects negative and non-finite
/// concentrations instead of clamping them.
///
/// # Examples
///
/// ```
/// use aqi::{compute_aqi_checked, Error, Pollutant};
///
/// assert_eq!(compute_aqi_checked(12.0), Ok(50));
/// assert_eq!(
///     compute_aqi_checked(-3.0),
///     Err(Error::InvalidConcentration { pollutant: Pollutant::Pm25, value: -3.0 })
/// );
/// ```
pub fn compute_aqi_checked(pm25: f64) -> Result<u16> {
    if pm25.is_nan() {
        return Err(Error::NonFinite {
            pollutant: Pollutant::Pm25,
        });
    }
    if pm25 < 0.0 {
        return Err(Error::InvalidConcentration {
            pollutant: Pollutant::Pm25,
            value: pm25,
        });
    }
    Ok(compute_aqi(pm25))
}
