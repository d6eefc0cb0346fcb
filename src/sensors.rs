//! Sensor module
//!
//! This module provides the monitoring stations the advisor reports on:
//! the built-in sample network and loading and validation of JSON
//! snapshots. AQI and status are always derived from the readings, never
//! taken from the snapshot.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use aqi::{
    classify_status, compute_aqi, AqiStatus, Assessment, ConditionSet, PollutantReading,
    PollutionSensitivity,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

/// A monitoring station and its latest reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: String,
    pub name: String,
    pub location: Location,
    pub readings: PollutantReading,
}

impl Sensor {
    pub fn aqi(&self) -> u16 {
        compute_aqi(self.readings.pm25)
    }

    pub fn status(&self) -> AqiStatus {
        classify_status(self.aqi())
    }

    pub fn assess(
        &self,
        conditions: ConditionSet,
        sensitivity: PollutionSensitivity,
    ) -> aqi::Result<Assessment> {
        Assessment::evaluate(&self.readings, conditions, sensitivity)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot is not a valid list of sensors")]
    Parse(#[from] serde_json::Error),

    #[error("snapshot contains no sensors")]
    Empty,

    #[error("sensor id {0} appears more than once")]
    DuplicateId(String),

    #[error("sensor {id} has an invalid reading")]
    InvalidReading {
        id: String,
        #[source]
        source: aqi::Error,
    },
}

/// Parses a JSON array of sensors and validates it.
///
/// # Arguments
///
/// * `json` - Snapshot text, in the same shape `Sensor` serializes to
///
/// # Returns
///
/// The sensors in file order, or the first problem found.
///
/// # Examples
///
/// ```
/// use aqi_advisor::sensors::parse_snapshot;
///
/// let json = r#"[{
///     "id": "sensor_1",
///     "name": "Downtown Central",
///     "location": { "lat": 40.7128, "lng": -74.006, "address": "123 Main St, Downtown" },
///     "readings": { "pm25": 12, "pm10": 25, "co2": 450, "co": 0.5, "no2": 15,
///                   "o3": 30, "so2": 5, "temperature": 22, "humidity": 55 }
/// }]"#;
///
/// let sensors = parse_snapshot(json).unwrap();
/// assert_eq!(sensors[0].aqi(), 50);
/// ```
pub fn parse_snapshot(json: &str) -> Result<Vec<Sensor>, SnapshotError> {
    let sensors: Vec<Sensor> = serde_json::from_str(json)?;
    validate_snapshot(&sensors)?;
    Ok(sensors)
}

/// Validates a list of sensors: it must be non-empty, ids must be unique
/// and every reading must pass [`PollutantReading::validate`].
pub fn validate_snapshot(sensors: &[Sensor]) -> Result<(), SnapshotError> {
    if sensors.is_empty() {
        return Err(SnapshotError::Empty);
    }

    let mut seen = HashSet::new();
    for sensor in sensors {
        if !seen.insert(sensor.id.as_str()) {
            return Err(SnapshotError::DuplicateId(sensor.id.clone()));
        }

        if let Err(source) = sensor.readings.validate() {
            tracing::warn!(sensor = %sensor.id, error = %source, "rejecting snapshot");
            return Err(SnapshotError::InvalidReading {
                id: sensor.id.clone(),
                source,
            });
        }
    }

    Ok(())
}

/// Reads and validates a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<Vec<Sensor>, SnapshotError> {
    let json = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let sensors = parse_snapshot(&json)?;
    tracing::debug!(count = sensors.len(), path = %path.display(), "loaded snapshot");
    Ok(sensors)
}

pub fn find<'a>(sensors: &'a [Sensor], id: &str) -> Option<&'a Sensor> {
    sensors.iter().find(|sensor| sensor.id == id)
}

fn station(
    id: &str,
    name: &str,
    (lat, lng): (f64, f64),
    address: &str,
    (pm25, pm10, co2): (f64, f64, f64),
    (co, no2, o3, so2): (f64, f64, f64, f64),
    (temperature, humidity): (f64, f64),
) -> Sensor {
    Sensor {
        id: id.to_string(),
        name: name.to_string(),
        location: Location {
            lat,
            lng,
            address: address.to_string(),
        },
        readings: PollutantReading {
            pm25,
            pm10,
            co2,
            co,
            no2,
            o3,
            so2,
            temperature,
            humidity,
        },
    }
}

/// The demo network used when no snapshot file is given.
pub fn sample_network() -> Vec<Sensor> {
    vec![
        station(
            "sensor_1",
            "Downtown Central",
            (40.7128, -74.0060),
            "123 Main St, Downtown",
            (12.0, 25.0, 450.0),
            (0.5, 15.0, 30.0, 5.0),
            (22.0, 55.0),
        ),
        station(
            "sensor_2",
            "Industrial Zone",
            (40.7580, -73.9855),
            "456 Factory Rd, Industrial",
            (55.0, 85.0, 800.0),
            (1.2, 45.0, 55.0, 15.0),
            (24.0, 48.0),
        ),
        station(
            "sensor_3",
            "Residential Park",
            (40.7829, -73.9654),
            "789 Park Ave, Uptown",
            (8.0, 18.0, 380.0),
            (0.3, 10.0, 25.0, 3.0),
            (21.0, 60.0),
        ),
        station(
            "sensor_4",
            "Highway Junction",
            (40.7484, -73.9857),
            "321 Highway Blvd",
            (38.0, 65.0, 650.0),
            (0.9, 35.0, 45.0, 10.0),
            (23.0, 52.0),
        ),
        station(
            "sensor_5",
            "School District",
            (40.7614, -73.9776),
            "555 Education Lane",
            (15.0, 28.0, 520.0),
            (0.4, 18.0, 32.0, 6.0),
            (22.0, 58.0),
        ),
        station(
            "sensor_6",
            "Harbor District",
            (40.6892, -74.0445),
            "888 Waterfront Dr",
            (22.0, 42.0, 420.0),
            (0.6, 22.0, 38.0, 8.0),
            (20.0, 65.0),
        ),
        station(
            "sensor_7",
            "Tech Campus",
            (40.7589, -73.9851),
            "100 Innovation Way",
            (10.0, 20.0, 400.0),
            (0.35, 12.0, 28.0, 4.0),
            (21.0, 55.0),
        ),
        station(
            "sensor_8",
            "Medical Center",
            (40.7794, -73.9632),
            "200 Health Plaza",
            (18.0, 35.0, 480.0),
            (0.5, 20.0, 35.0, 7.0),
            (22.0, 50.0),
        ),
        station(
            "sensor_9",
            "Sports Complex",
            (40.7505, -73.9934),
            "300 Stadium Rd",
            (25.0, 48.0, 550.0),
            (0.7, 25.0, 40.0, 9.0),
            (23.0, 45.0),
        ),
        station(
            "sensor_10",
            "Airport Zone",
            (40.6413, -73.7781),
            "1 Airport Blvd",
            (65.0, 95.0, 750.0),
            (1.5, 55.0, 60.0, 18.0),
            (25.0, 42.0),
        ),
    ]
}
