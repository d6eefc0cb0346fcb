//! Scripted health assistant.
//!
//! There is no language model here. A question is matched against
//! [`TOPICS`] by keyword and the reply is filled in from the primary
//! sensor's reading and the profile's conditions.

use aqi::{ConditionSet, HealthCondition};
use serde::Serialize;

use crate::sensors::Sensor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    GoingOutside,
    Pm25,
    Children,
    Asthma,
    Masks,
    General,
}

/// Matches when every keyword group has at least one keyword that occurs in
/// the lowercased question.
#[derive(Debug, Clone, Copy)]
pub struct TopicRoute {
    pub topic: Topic,
    pub keywords: &'static [&'static [&'static str]],
}

impl TopicRoute {
    fn matches(&self, question: &str) -> bool {
        self.keywords
            .iter()
            .all(|group| group.iter().any(|keyword| question.contains(keyword)))
    }
}

/// Checked in order, first match wins.
pub const TOPICS: [TopicRoute; 5] = [
    TopicRoute {
        topic: Topic::GoingOutside,
        keywords: &[&["safe"], &["outside"]],
    },
    TopicRoute {
        topic: Topic::Pm25,
        keywords: &[&["pm2.5", "pm 2.5"]],
    },
    TopicRoute {
        topic: Topic::Children,
        keywords: &[&["children", "kids"]],
    },
    TopicRoute {
        topic: Topic::Asthma,
        keywords: &[&["asthma"]],
    },
    TopicRoute {
        topic: Topic::Masks,
        keywords: &[&["mask"]],
    },
];

pub const SUGGESTED_QUESTIONS: [&str; 4] = [
    "Is it safe for me to go outside?",
    "Why is PM2.5 high in my area?",
    "Give advice for children during high pollution",
    "What should I do if I have asthma?",
];

const CHILDREN_ADVICE: &str = "For children during elevated pollution:

• Keep windows closed and use air purifiers
• Limit outdoor playtime, especially during peak hours (7-9 AM, 5-7 PM)
• Ensure proper hydration
• Monitor for symptoms like coughing or difficulty breathing
• Schools should consider moving PE classes indoors when AQI exceeds 100";

const ASTHMA_ADVICE: &str = "For asthma management during poor air quality:

• Always carry your rescue inhaler
• Take preventive medication as prescribed
• Monitor air quality before outdoor activities
• Wear an N95 mask when AQI > 50
• Keep windows closed and use HEPA filters
• Stay hydrated and avoid triggers like dust and smoke";

const MASK_ADVICE: &str = "Regarding masks for air pollution:

• N95/KN95 masks filter 95% of particles including PM2.5
• Surgical masks offer limited protection against fine particles
• Cloth masks don't protect against air pollution
• Replace masks when they become damp or dirty
• Ensure a proper seal around your face for maximum protection";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub topic: Topic,
    pub text: String,
}

pub fn classify(question: &str) -> Topic {
    let question = question.to_lowercase();
    TOPICS
        .iter()
        .find(|route| route.matches(&question))
        .map_or(Topic::General, |route| route.topic)
}

/// Answers `question` for someone with `conditions`, quoting `sensor`.
///
/// # Examples
///
/// ```
/// use aqi::ConditionSet;
/// use aqi_advisor::chat::{answer, Topic};
/// use aqi_advisor::sensors::sample_network;
///
/// let sensors = sample_network();
/// let reply = answer("Do I need a MASK?", &sensors[0], ConditionSet::empty());
/// assert_eq!(reply.topic, Topic::Masks);
/// ```
pub fn answer(question: &str, sensor: &Sensor, conditions: ConditionSet) -> Reply {
    let topic = classify(question);
    let aqi = sensor.aqi();
    let readings = &sensor.readings;
    tracing::debug!(?topic, sensor = %sensor.id, aqi, "answering question");

    let text = match topic {
        Topic::GoingOutside if conditions.contains(HealthCondition::Asthma) => {
            if aqi > 50 {
                format!(
                    "Based on current conditions (AQI: {aqi}) and your asthma, I'd recommend \
                     limiting outdoor activities. If you must go out, wear an N95 mask and carry \
                     your inhaler. The air quality is expected to improve in the next few hours."
                )
            } else {
                format!(
                    "Current air quality (AQI: {aqi}) is good! It should be safe for outdoor \
                     activities. However, as someone with asthma, keep your inhaler handy and \
                     avoid areas with heavy traffic."
                )
            }
        }
        Topic::GoingOutside => {
            if aqi > 100 {
                format!(
                    "The current AQI is {aqi}, which is in the unhealthy range. It's best to \
                     limit prolonged outdoor exposure, especially for sensitive groups. Consider \
                     rescheduling outdoor activities."
                )
            } else {
                let level = if aqi > 50 { "moderate" } else { "good" };
                format!(
                    "The air quality is {level} right now (AQI: {aqi}). You can safely go \
                     outside for most activities."
                )
            }
        }
        Topic::Pm25 => {
            let outlook = if readings.pm25 > 35.0 {
                "This is elevated, likely due to traffic emissions, construction, or regional \
                 pollution. Consider using an air purifier indoors."
            } else {
                "This level is within the safe range. Keep monitoring throughout the day as \
                 levels can change."
            };
            format!(
                "PM2.5 refers to fine particulate matter smaller than 2.5 micrometers. Current \
                 PM2.5 in your area is {} µg/m³. {outlook}",
                readings.pm25
            )
        }
        Topic::Children => CHILDREN_ADVICE.to_string(),
        Topic::Asthma => ASTHMA_ADVICE.to_string(),
        Topic::Masks => MASK_ADVICE.to_string(),
        Topic::General => format!(
            "I understand you're asking about \"{question}\". Based on the current air quality \
             data:\n\n• AQI: {aqi} ({})\n• PM2.5: {} µg/m³\n• PM10: {} µg/m³\n\nWould you like \
             specific advice based on your health profile? Feel free to ask about outdoor \
             activities, health precautions, or air quality trends.",
            sensor.status().label(),
            readings.pm25,
            readings.pm10
        ),
    };

    Reply { topic, text }
}

/// Opening message of a conversation.
pub fn greeting(conditions: ConditionSet) -> String {
    let mut text = String::from(
        "Hello! I'm your air quality health assistant. I can help you understand air quality \
         data and provide personalized advice based on your health profile.",
    );

    if !conditions.is_empty() {
        let names: Vec<&str> = conditions.iter().map(HealthCondition::as_str).collect();
        text.push_str(&format!(
            " I see you have {} in your health profile - I'll tailor my recommendations \
             accordingly.",
            names.join(", ")
        ));
    }

    text.push_str("\n\nHow can I help you today?");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::sample_network;
    use aqi::HealthCondition::*;

    fn sensor(id: &str) -> Sensor {
        crate::sensors::find(&sample_network(), id).unwrap().clone()
    }

    #[test]
    fn test_classify_routes_in_table_order() {
        assert_eq!(classify("Is it SAFE to go outside?"), Topic::GoingOutside);
        assert_eq!(classify("is it safe?"), Topic::General);
        assert_eq!(classify("why is PM2.5 high"), Topic::Pm25);
        assert_eq!(classify("what about pm 2.5"), Topic::Pm25);
        assert_eq!(classify("advice for kids"), Topic::Children);
        assert_eq!(classify("my children"), Topic::Children);
        assert_eq!(classify("I have asthma"), Topic::Asthma);
        assert_eq!(classify("which masks work"), Topic::Masks);
        assert_eq!(classify("hello"), Topic::General);

        // Earlier topics win when several match.
        assert_eq!(classify("is it safe outside with asthma and a mask"), Topic::GoingOutside);
        assert_eq!(classify("kids with asthma"), Topic::Children);
    }

    #[test]
    fn test_going_outside_with_asthma() {
        let asthma = ConditionSet::from([Asthma]);

        // Downtown Central sits at AQI 50.
        let reply = answer("Is it safe to go outside?", &sensor("sensor_1"), asthma);
        assert!(reply.text.starts_with("Current air quality (AQI: 50) is good!"));

        let reply = answer("Is it safe to go outside?", &sensor("sensor_5"), asthma);
        assert!(reply.text.starts_with("Based on current conditions (AQI: 57) and your asthma"));
        assert!(reply.text.contains("N95 mask"));
    }

    #[test]
    fn test_going_outside_without_asthma() {
        let none = ConditionSet::from([Allergies]);

        let reply = answer("safe outside?", &sensor("sensor_1"), none);
        assert_eq!(
            reply.text,
            "The air quality is good right now (AQI: 50). You can safely go outside for most activities."
        );

        let reply = answer("safe outside?", &sensor("sensor_5"), none);
        assert!(reply.text.starts_with("The air quality is moderate right now (AQI: 57)."));

        let reply = answer("safe outside?", &sensor("sensor_2"), none);
        assert!(reply.text.starts_with("The current AQI is 149, which is in the unhealthy range."));
    }

    #[test]
    fn test_pm25_reply_quotes_reading() {
        let reply = answer("Why is PM2.5 high?", &sensor("sensor_1"), ConditionSet::empty());
        assert_eq!(reply.topic, Topic::Pm25);
        assert!(reply.text.contains("Current PM2.5 in your area is 12 µg/m³."));
        assert!(reply.text.ends_with("levels can change."));

        let reply = answer("Why is PM2.5 high?", &sensor("sensor_4"), ConditionSet::empty());
        assert!(reply.text.contains("is 38 µg/m³. This is elevated"));
    }

    #[test]
    fn test_fixed_replies() {
        let sensor = sensor("sensor_10");
        let everything: ConditionSet = HealthCondition::ALL.iter().copied().collect();

        for (question, expected) in [
            ("Give advice for children", CHILDREN_ADVICE),
            ("What should I do if I have asthma?", ASTHMA_ADVICE),
            ("Do masks help?", MASK_ADVICE),
        ] {
            assert_eq!(answer(question, &sensor, everything).text, expected);
            assert_eq!(answer(question, &sensor, ConditionSet::empty()).text, expected);
        }
    }

    #[test]
    fn test_general_reply() {
        let reply = answer("What's the trend?", &sensor("sensor_2"), ConditionSet::empty());
        assert_eq!(reply.topic, Topic::General);
        assert!(reply.text.starts_with("I understand you're asking about \"What's the trend?\"."));
        assert!(reply.text.contains("• AQI: 149 (Unhealthy)\n• PM2.5: 55 µg/m³\n• PM10: 85 µg/m³"));
    }

    #[test]
    fn test_suggested_questions_cover_topics() {
        let topics: Vec<Topic> = SUGGESTED_QUESTIONS.iter().map(|q| classify(q)).collect();
        assert_eq!(topics, [Topic::GoingOutside, Topic::Pm25, Topic::Children, Topic::Asthma]);
    }

    #[test]
    fn test_greeting() {
        let text = greeting(ConditionSet::empty());
        assert!(!text.contains("I see you have"));
        assert!(text.ends_with("How can I help you today?"));

        let text = greeting(ConditionSet::from([HeartDisease, Asthma]));
        assert!(text.contains("I see you have asthma, heart_disease in your health profile"));
    }
}
