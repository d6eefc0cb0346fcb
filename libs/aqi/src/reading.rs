//! Pollutant readings
//!
//! A [`PollutantReading`] is one snapshot of every value a monitoring
//! station reports. Readings are plain values: the engine only reads them.

use core::fmt;

use crate::error::{Error, Result};

/// Every quantity carried by a [`PollutantReading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Pollutant {
    Pm25,
    Pm10,
    Co2,
    Co,
    No2,
    O3,
    So2,
    Temperature,
    Humidity,
}

impl Pollutant {
    pub const ALL: [Pollutant; 9] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::Co2,
        Pollutant::Co,
        Pollutant::No2,
        Pollutant::O3,
        Pollutant::So2,
        Pollutant::Temperature,
        Pollutant::Humidity,
    ];

    /// Display name, e.g. "PM2.5".
    pub fn label(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::Co2 => "CO₂",
            Pollutant::Co => "CO",
            Pollutant::No2 => "NO₂",
            Pollutant::O3 => "O₃",
            Pollutant::So2 => "SO₂",
            Pollutant::Temperature => "Temperature",
            Pollutant::Humidity => "Humidity",
        }
    }

    /// Unit the value is reported in.
    pub fn unit(self) -> &'static str {
        match self {
            Pollutant::Pm25 | Pollutant::Pm10 => "µg/m³",
            Pollutant::Co2 | Pollutant::Co => "ppm",
            Pollutant::No2 | Pollutant::O3 | Pollutant::So2 => "ppb",
            Pollutant::Temperature => "°C",
            Pollutant::Humidity => "%",
        }
    }

    /// Concentrations can't be negative. Temperature can.
    fn is_concentration(self) -> bool {
        !matches!(self, Pollutant::Temperature | Pollutant::Humidity)
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A value paired with its unit, displayed as e.g. `12 µg/m³`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub pollutant: Pollutant,
    pub value: f64,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.pollutant.unit())
    }
}

/// One snapshot of station data.
///
/// Particulates are in µg/m³, CO₂ and CO in ppm, NO₂, O₃ and SO₂ in ppb,
/// temperature in °C and relative humidity in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PollutantReading {
    pub pm25: f64,
    pub pm10: f64,
    pub co2: f64,
    pub co: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub temperature: f64,
    pub humidity: f64,
}

impl PollutantReading {
    pub fn get(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::Co2 => self.co2,
            Pollutant::Co => self.co,
            Pollutant::No2 => self.no2,
            Pollutant::O3 => self.o3,
            Pollutant::So2 => self.so2,
            Pollutant::Temperature => self.temperature,
            Pollutant::Humidity => self.humidity,
        }
    }

    pub fn measurement(&self, pollutant: Pollutant) -> Measurement {
        Measurement {
            pollutant,
            value: self.get(pollutant),
        }
    }

    /// Checks the reading against the physical ranges the engine assumes.
    ///
    /// # Returns
    ///
    /// `Ok(())`, or the first offending field in [`Pollutant::ALL`] order.
    ///
    /// # Examples
    ///
    /// ```
    /// use aqi::{Error, Pollutant, PollutantReading};
    ///
    /// let reading = PollutantReading { pm25: -1.0, ..Default::default() };
    /// assert_eq!(
    ///     reading.validate(),
    ///     Err(Error::InvalidConcentration { pollutant: Pollutant::Pm25, value: -1.0 })
    /// );
    /// ```
    pub fn validate(&self) -> Result<()> {
        for pollutant in Pollutant::ALL {
            let value = self.get(pollutant);
            if !value.is_finite() {
                return Err(Error::NonFinite { pollutant });
            }
            if pollutant.is_concentration() && value < 0.0 {
                return Err(Error::InvalidConcentration { pollutant, value });
            }
        }

        if !(0.0..=100.0).contains(&self.humidity) {
            return Err(Error::InvalidHumidity(self.humidity));
        }

        Ok(())
    }
}
