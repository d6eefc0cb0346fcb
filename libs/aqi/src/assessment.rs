//! Everything the dashboard shows for one reading, computed in one call.

use crate::advice::{derive_advice, AdviceList};
use crate::error::Result;
use crate::profile::{ConditionSet, PollutionSensitivity};
use crate::reading::PollutantReading;
use crate::risk::compute_risk;
use crate::status::{classify_status, AqiStatus};
use crate::compute_aqi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Assessment {
    pub aqi: u16,
    pub status: AqiStatus,
    pub risk: u8,
    pub advice: AdviceList,
}

impl Assessment {
    /// Validates `reading` and evaluates it for the given conditions and
    /// sensitivity. A reading that fails validation yields the error and no
    /// assessment.
    pub fn evaluate(
        reading: &PollutantReading,
        conditions: ConditionSet,
        sensitivity: PollutionSensitivity,
    ) -> Result<Self> {
        reading.validate()?;

        let aqi = compute_aqi(reading.pm25);
        Ok(Assessment {
            aqi,
            status: classify_status(aqi),
            risk: compute_risk(aqi, conditions, sensitivity),
            advice: derive_advice(reading, conditions),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::HealthCondition;
    use crate::reading::Pollutant;
    use crate::Error;

    fn industrial_zone() -> PollutantReading {
        PollutantReading {
            pm25: 55.0,
            pm10: 85.0,
            co2: 800.0,
            co: 1.2,
            no2: 45.0,
            o3: 55.0,
            so2: 15.0,
            temperature: 24.0,
            humidity: 48.0,
        }
    }

    #[test]
    fn test_evaluate() {
        let conditions = ConditionSet::from([HealthCondition::Asthma]);
        let assessment =
            Assessment::evaluate(&industrial_zone(), conditions, PollutionSensitivity::High)
                .unwrap();

        assert_eq!(assessment.aqi, 149);
        assert_eq!(assessment.status, AqiStatus::Unhealthy);
        // 29.8 * 1.5 * 1.3
        assert_eq!(assessment.risk, 58);
        assert_eq!(assessment.advice.len(), 3);
    }

    #[test]
    fn test_evaluate_rejects_invalid_reading() {
        let reading = PollutantReading {
            co: -1.0,
            ..industrial_zone()
        };
        assert_eq!(
            Assessment::evaluate(&reading, ConditionSet::empty(), PollutionSensitivity::Medium),
            Err(Error::InvalidConcentration {
                pollutant: Pollutant::Co,
                value: -1.0
            })
        );
    }

    #[test]
    fn test_assessment_json() {
        let assessment = Assessment::evaluate(
            &industrial_zone(),
            ConditionSet::empty(),
            PollutionSensitivity::Medium,
        )
        .unwrap();
        let json = serde_json::to_value(assessment).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["risk"], 30);
        assert_eq!(
            json["advice"][0],
            "PM2.5 levels are elevated. Consider limiting outdoor activities."
        );
    }
}
