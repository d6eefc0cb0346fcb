//! Personalized advice rules
//!
//! Advice is produced by walking [`ADVICE_RULES`] in order and collecting
//! the message of every rule that applies. Rules are independent: a severe
//! rule fires in addition to the milder rule for the same condition, not
//! instead of it. When nothing applies the list holds [`GOOD_AIR_ADVICE`].

use core::ops::Deref;

use crate::profile::{ConditionSet, HealthCondition};
use crate::reading::{Pollutant, PollutantReading};

/// Who a rule is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Everyone,
    /// Anyone with at least one of these conditions.
    AnyOf(&'static [HealthCondition]),
}

impl Audience {
    pub fn includes(&self, conditions: ConditionSet) -> bool {
        match self {
            Audience::Everyone => true,
            Audience::AnyOf(wanted) => conditions.contains_any(wanted),
        }
    }
}

/// Fires when `pollutant` is strictly above `threshold` for someone in
/// `audience`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdviceRule {
    pub audience: Audience,
    pub pollutant: Pollutant,
    pub threshold: f64,
    pub message: &'static str,
}

impl AdviceRule {
    pub fn applies(&self, reading: &PollutantReading, conditions: ConditionSet) -> bool {
        self.audience.includes(conditions) && reading.get(self.pollutant) > self.threshold
    }
}

const CARDIOVASCULAR: &[HealthCondition] =
    &[HealthCondition::HeartDisease, HealthCondition::Elderly];

/// Evaluated top to bottom; output order is table order, not severity.
pub const ADVICE_RULES: [AdviceRule; 10] = [
    AdviceRule {
        audience: Audience::Everyone,
        pollutant: Pollutant::Pm25,
        threshold: 35.0,
        message: "PM2.5 levels are elevated. Consider limiting outdoor activities.",
    },
    AdviceRule {
        audience: Audience::AnyOf(&[HealthCondition::Asthma]),
        pollutant: Pollutant::Pm25,
        threshold: 25.0,
        message: "As someone with asthma, avoid strenuous outdoor activities and carry your inhaler.",
    },
    AdviceRule {
        audience: Audience::AnyOf(&[HealthCondition::Asthma]),
        pollutant: Pollutant::Pm25,
        threshold: 50.0,
        message: "HIGH ALERT: PM2.5 is at unsafe levels for asthma. Stay indoors with air filtration.",
    },
    AdviceRule {
        audience: Audience::AnyOf(CARDIOVASCULAR),
        pollutant: Pollutant::Pm25,
        threshold: 35.0,
        message: "Elevated pollution may affect cardiovascular health. Consider staying indoors.",
    },
    AdviceRule {
        audience: Audience::AnyOf(CARDIOVASCULAR),
        pollutant: Pollutant::Pm25,
        threshold: 55.0,
        message: "ALERT: Air quality may pose serious cardiovascular risks. Avoid all outdoor exertion.",
    },
    AdviceRule {
        audience: Audience::AnyOf(&[HealthCondition::Allergies]),
        pollutant: Pollutant::Pm10,
        threshold: 50.0,
        message: "High particulate matter may trigger allergies. Consider taking antihistamines.",
    },
    AdviceRule {
        audience: Audience::AnyOf(&[HealthCondition::Copd]),
        pollutant: Pollutant::Pm25,
        threshold: 20.0,
        message: "COPD patients should avoid outdoor activities when PM2.5 exceeds 20 µg/m³.",
    },
    AdviceRule {
        audience: Audience::AnyOf(&[HealthCondition::WeakImmunity]),
        pollutant: Pollutant::Pm25,
        threshold: 35.0,
        message: "Those with weakened immune systems should limit exposure during elevated pollution.",
    },
    AdviceRule {
        audience: Audience::Everyone,
        pollutant: Pollutant::Co2,
        threshold: 1000.0,
        message: "Indoor CO₂ levels are high. Open windows or improve ventilation.",
    },
    AdviceRule {
        audience: Audience::Everyone,
        pollutant: Pollutant::Co2,
        threshold: 1500.0,
        message: "POOR VENTILATION: CO₂ levels indicate inadequate fresh air. Ventilate immediately.",
    },
];

pub const GOOD_AIR_ADVICE: &str = "Air quality is good. Enjoy your outdoor activities!";

/// Ordered, never empty list of advice messages.
///
/// Backed by a fixed array so it works without an allocator; it can never
/// hold more entries than there are rules.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct AdviceList {
    items: [&'static str; ADVICE_RULES.len()],
    len: usize,
}

impl AdviceList {
    fn new() -> Self {
        AdviceList {
            items: [""; ADVICE_RULES.len()],
            len: 0,
        }
    }

    fn push(&mut self, message: &'static str) {
        self.items[self.len] = message;
        self.len += 1;
    }

    pub fn as_slice(&self) -> &[&'static str] {
        &self.items[..self.len]
    }

    /// True when only the fallback message is present.
    pub fn is_all_clear(&self) -> bool {
        self.as_slice() == [GOOD_AIR_ADVICE]
    }
}

impl Deref for AdviceList {
    type Target = [&'static str];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl core::fmt::Debug for AdviceList {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<'a> IntoIterator for &'a AdviceList {
    type Item = &'a &'static str;
    type IntoIter = core::slice::Iter<'a, &'static str>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AdviceList {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.as_slice())
    }
}

/// Builds the advice for a reading and a set of health conditions.
///
/// # Examples
///
/// ```
/// use aqi::{derive_advice, ConditionSet, PollutantReading, GOOD_AIR_ADVICE};
///
/// let reading = PollutantReading { pm25: 10.0, pm10: 10.0, co2: 400.0, ..Default::default() };
/// let advice = derive_advice(&reading, ConditionSet::empty());
/// assert_eq!(advice.as_slice(), [GOOD_AIR_ADVICE]);
/// ```
pub fn derive_advice(reading: &PollutantReading, conditions: ConditionSet) -> AdviceList {
    let mut advice = AdviceList::new();

    for rule in ADVICE_RULES.iter() {
        if rule.applies(reading, conditions) {
            advice.push(rule.message);
        }
    }

    if advice.is_empty() {
        advice.push(GOOD_AIR_ADVICE);
    }

    advice
}
