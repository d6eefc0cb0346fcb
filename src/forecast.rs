//! Hourly forecast generator.
//!
//! There is no forecasting model behind this: the series is a daily sine
//! wave around AQI 45 with random noise, good enough to drive charts.
//! [`forecast_insights`] adds tips for the selected sensor and profile.

use aqi::{classify_status, ActivityLevel, AqiStatus, HealthCondition, HealthProfile};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;

use crate::sensors::Sensor;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub time: DateTime<Utc>,
    pub pm25: f64,
    pub pm10: f64,
    pub aqi: u16,
}

impl ForecastPoint {
    pub fn status(&self) -> AqiStatus {
        classify_status(self.aqi)
    }
}

/// Generates `hours` hourly points starting at `start`.
///
/// For hour `i` the baseline is `45 + 20 * sin(i / 6)`; PM values are
/// proportional to it plus uniform noise and floored at 5 (PM2.5) and 10
/// (PM10), and AQI is the baseline plus noise, floored at 20.
pub fn generate_forecast<R: Rng>(
    hours: u32,
    start: DateTime<Utc>,
    rng: &mut R,
) -> Vec<ForecastPoint> {
    (0..hours)
        .map(|i| {
            let base_aqi = 45.0 + (f64::from(i) / 6.0).sin() * 20.0;

            ForecastPoint {
                time: start + Duration::hours(i64::from(i)),
                pm25: (base_aqi * 0.4 + rng.gen_range(0.0..10.0)).max(5.0),
                pm10: (base_aqi * 0.8 + rng.gen_range(0.0..15.0)).max(10.0),
                aqi: (base_aqi + rng.gen_range(0.0..15.0)).max(20.0).round() as u16,
            }
        })
        .collect()
}

pub const GOOD_DAY_INSIGHT: &str = "Air quality is generally good in your area. Enjoy your day!";

/// Personalized tips shown next to the forecast for `sensor`.
///
/// Without a profile only the ventilation tip can apply. The list is never
/// empty; [`GOOD_DAY_INSIGHT`] is used when nothing else applies.
pub fn forecast_insights(sensor: &Sensor, profile: Option<&HealthProfile>) -> Vec<&'static str> {
    let mut tips = Vec::new();
    let readings = &sensor.readings;

    if let Some(profile) = profile {
        if profile.conditions.contains(HealthCondition::Asthma) {
            tips.push(if readings.pm25 > 35.0 {
                "PM2.5 levels are elevated. As someone with asthma, consider wearing a mask if going outdoors."
            } else {
                "Current PM2.5 levels are safe for moderate outdoor activity."
            });
        }

        if profile
            .conditions
            .contains_any(&[HealthCondition::HeartDisease, HealthCondition::Elderly])
        {
            tips.push("Avoid strenuous outdoor activities during peak pollution hours (typically 7-9 AM and 5-7 PM).");
        }

        if profile.activity == ActivityLevel::Athlete {
            tips.push(if sensor.aqi() > 80 {
                "Consider moving your workout indoors or reducing intensity today."
            } else {
                "Air quality is suitable for outdoor exercise."
            });
        }
    }

    if readings.co2 > 1000.0 {
        tips.push("High CO₂ levels detected. Ensure good ventilation in indoor spaces.");
    }

    if tips.is_empty() {
        tips.push(GOOD_DAY_INSIGHT);
    }

    tips
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::{find, sample_network};
    use aqi::{Gender, PollutionSensitivity};
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap()
    }

    #[test]
    fn test_forecast_shape() {
        let points = generate_forecast(168, start(), &mut StdRng::seed_from_u64(7));
        assert_eq!(points.len(), 168);

        for (i, point) in points.iter().enumerate() {
            assert_eq!(point.time, start() + Duration::hours(i as i64));
            assert!(point.pm25 >= 5.0);
            assert!(point.pm10 >= 10.0);
            // Baseline stays within 25..=65, noise adds under 15.
            assert!((25..=80).contains(&point.aqi), "aqi {}", point.aqi);
        }
    }

    #[test]
    fn test_forecast_is_reproducible_with_seed() {
        let a = generate_forecast(24, start(), &mut StdRng::seed_from_u64(42));
        let b = generate_forecast(24, start(), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_hours() {
        assert!(generate_forecast(0, start(), &mut StdRng::seed_from_u64(1)).is_empty());
    }

    fn profile(conditions: &[HealthCondition], activity: ActivityLevel) -> HealthProfile {
        HealthProfile::new(
            35,
            Gender::Other,
            conditions.iter().copied().collect(),
            activity,
            PollutionSensitivity::Medium,
        )
        .unwrap()
    }

    fn sensor(id: &str) -> Sensor {
        find(&sample_network(), id).unwrap().clone()
    }

    #[test]
    fn test_insights_without_profile() {
        assert_eq!(forecast_insights(&sensor("sensor_2"), None), [GOOD_DAY_INSIGHT]);

        let mut stuffy = sensor("sensor_1");
        stuffy.readings.co2 = 1200.0;
        assert_eq!(
            forecast_insights(&stuffy, None),
            ["High CO₂ levels detected. Ensure good ventilation in indoor spaces."]
        );
    }

    #[test]
    fn test_insights_asthma_follows_pm25() {
        let asthma = profile(&[HealthCondition::Asthma], ActivityLevel::Student);

        let tips = forecast_insights(&sensor("sensor_4"), Some(&asthma));
        assert_eq!(tips.len(), 1);
        assert!(tips[0].contains("consider wearing a mask"));

        let tips = forecast_insights(&sensor("sensor_1"), Some(&asthma));
        assert_eq!(tips, ["Current PM2.5 levels are safe for moderate outdoor activity."]);
    }

    #[test]
    fn test_insights_cardiovascular_once() {
        let both = profile(
            &[HealthCondition::HeartDisease, HealthCondition::Elderly],
            ActivityLevel::IndoorWorker,
        );
        let tips = forecast_insights(&sensor("sensor_3"), Some(&both));
        assert_eq!(tips.len(), 1);
        assert!(tips[0].starts_with("Avoid strenuous outdoor activities during peak pollution hours"));
    }

    #[test]
    fn test_insights_athlete_follows_aqi() {
        let athlete = profile(&[], ActivityLevel::Athlete);

        // Highway Junction is at AQI 107, School District at 57.
        assert_eq!(
            forecast_insights(&sensor("sensor_4"), Some(&athlete)),
            ["Consider moving your workout indoors or reducing intensity today."]
        );
        assert_eq!(
            forecast_insights(&sensor("sensor_5"), Some(&athlete)),
            ["Air quality is suitable for outdoor exercise."]
        );

        // Activity alone never triggers anything for other levels.
        let worker = profile(&[], ActivityLevel::OutdoorWorker);
        assert_eq!(forecast_insights(&sensor("sensor_4"), Some(&worker)), [GOOD_DAY_INSIGHT]);
    }

    #[test]
    fn test_insights_order() {
        let everything = profile(
            &[HealthCondition::Asthma, HealthCondition::Elderly],
            ActivityLevel::Athlete,
        );
        let mut sensor = sensor("sensor_10");
        sensor.readings.co2 = 1500.0;

        let tips = forecast_insights(&sensor, Some(&everything));
        assert_eq!(tips.len(), 4);
        assert!(tips[0].starts_with("PM2.5 levels are elevated."));
        assert!(tips[1].starts_with("Avoid strenuous"));
        assert!(tips[2].starts_with("Consider moving your workout indoors"));
        assert!(tips[3].starts_with("High CO₂"));
        assert!(!tips.contains(&GOOD_DAY_INSIGHT));
    }
}
