//! Error type for input validation.
//!
//! The calculations themselves are total. Errors only come out of the
//! validating entry points ([`PollutantReading::validate`],
//! [`compute_aqi_checked`], string parsing of the enumerations and
//! [`HealthProfile::new`]).
//!
//! [`PollutantReading::validate`]: crate::PollutantReading::validate
//! [`compute_aqi_checked`]: crate::compute_aqi_checked
//! [`HealthProfile::new`]: crate::HealthProfile::new

use crate::reading::Pollutant;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("{pollutant} concentration must be zero or greater, got {value}")]
    InvalidConcentration { pollutant: Pollutant, value: f64 },

    #[error("{pollutant} value is not a finite number")]
    NonFinite { pollutant: Pollutant },

    #[error("humidity must be between 0 and 100 %, got {0}")]
    InvalidHumidity(f64),

    #[error("age must be a positive number of years")]
    InvalidAge,

    #[error("unrecognized {kind} name")]
    UnknownVariant { kind: &'static str },
}

pub type Result<T> = core::result::Result<T, Error>;
