//! AQI status categories and their presentation strings.

named_enum! {
    /// Coarse air quality category shown to the user.
    ///
    /// Variants are ordered from best to worst, so comparisons follow the
    /// AQI thresholds.
    pub enum AqiStatus as "AQI status" {
        Good => "good",
        Moderate => "moderate",
        Unhealthy => "unhealthy",
        Hazardous => "hazardous",
    }
}

impl AqiStatus {
    pub fn label(self) -> &'static str {
        match self {
            AqiStatus::Good => "Good",
            AqiStatus::Moderate => "Moderate",
            AqiStatus::Unhealthy => "Unhealthy",
            AqiStatus::Hazardous => "Hazardous",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AqiStatus::Good => "Air quality is satisfactory with minimal health risk.",
            AqiStatus::Moderate => {
                "Air quality is acceptable. Some pollutants may pose a moderate health concern."
            }
            AqiStatus::Unhealthy => {
                "Members of sensitive groups may experience health effects. General public less likely affected."
            }
            AqiStatus::Hazardous => "Health alert: everyone may experience serious health effects.",
        }
    }

    /// Hex color used for the status badge.
    pub fn color(self) -> &'static str {
        match self {
            AqiStatus::Good => "#43A047",
            AqiStatus::Moderate => "#FFD700",
            AqiStatus::Unhealthy => "#FB8C00",
            AqiStatus::Hazardous => "#E53935",
        }
    }
}

/// Provides an AqiStatus variant based on the specified AQI value.
///
/// # Arguments
///
/// * `aqi` - The calculated AQI
///
/// # Examples
///
/// ```
/// use aqi::{classify_status, compute_aqi, AqiStatus};
///
/// let aqi = compute_aqi(41.0);
/// assert_eq!(classify_status(aqi), AqiStatus::Unhealthy);
/// ```
pub fn classify_status(aqi: u16) -> AqiStatus {
    match aqi {
        0..=50 => AqiStatus::Good,
        51..=100 => AqiStatus::Moderate,
        101..=150 => AqiStatus::Unhealthy,
        _ => AqiStatus::Hazardous,
    }
}
