//! Health alerts shown on the dashboard for a user's conditions.

use aqi::{Audience, ConditionSet, HealthCondition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: &'static str,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub pollutant: &'static str,
    pub message: &'static str,
    pub severity: Severity,
}

struct AlertTemplate {
    id: &'static str,
    audience: Audience,
    pollutant: &'static str,
    message: &'static str,
    severity: Severity,
}

const ALERT_TEMPLATES: [AlertTemplate; 3] = [
    AlertTemplate {
        id: "alert_1",
        audience: Audience::AnyOf(&[HealthCondition::Asthma]),
        pollutant: "PM2.5",
        message: "PM2.5 levels are elevated. As someone with asthma, avoid outdoor activities and use your inhaler if needed.",
        severity: Severity::Warning,
    },
    AlertTemplate {
        id: "alert_2",
        audience: Audience::AnyOf(&[HealthCondition::HeartDisease, HealthCondition::Elderly]),
        pollutant: "PM2.5",
        message: "Air quality may affect cardiovascular health. Consider staying indoors with filtered air.",
        severity: Severity::Warning,
    },
    AlertTemplate {
        id: "alert_3",
        audience: Audience::AnyOf(&[HealthCondition::Allergies]),
        pollutant: "Pollen/PM10",
        message: "High particulate matter detected. Take antihistamines and limit outdoor exposure.",
        severity: Severity::Info,
    },
];

/// Alerts for a user, one per matching template, in template order.
pub fn generate_alerts(user_id: &str, conditions: ConditionSet, now: DateTime<Utc>) -> Vec<Alert> {
    ALERT_TEMPLATES
        .iter()
        .filter(|template| template.audience.includes(conditions))
        .map(|template| Alert {
            id: template.id,
            user_id: user_id.to_string(),
            timestamp: now,
            pollutant: template.pollutant,
            message: template.message,
            severity: template.severity,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqi::HealthCondition::*;

    #[test]
    fn test_generate_alerts() {
        let now = Utc::now();
        assert!(generate_alerts("u1", ConditionSet::empty(), now).is_empty());
        assert!(generate_alerts("u1", ConditionSet::from([Copd, WeakImmunity]), now).is_empty());

        let alerts = generate_alerts("u1", ConditionSet::from([Allergies, Elderly, Asthma]), now);
        let ids: Vec<_> = alerts.iter().map(|a| a.id).collect();
        assert_eq!(ids, ["alert_1", "alert_2", "alert_3"]);
        assert_eq!(alerts[2].severity, Severity::Info);
        assert_eq!(alerts[2].pollutant, "Pollen/PM10");
        assert!(alerts.iter().all(|a| a.user_id == "u1" && a.timestamp == now));
    }

    #[test]
    fn test_heart_disease_and_elderly_share_one_alert() {
        let alerts = generate_alerts("u2", ConditionSet::from([HeartDisease, Elderly]), Utc::now());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, "alert_2");
    }
}
