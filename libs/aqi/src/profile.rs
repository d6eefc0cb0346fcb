//! Health profile collected during onboarding.
//!
//! The engine only reads profiles. Editing a profile means building a new
//! one and replacing the old value.

use core::fmt;

use crate::advice::{derive_advice, AdviceList};
use crate::assessment::Assessment;
use crate::error::Error;
use crate::reading::PollutantReading;
use crate::risk::compute_risk;

named_enum! {
    /// Pre-existing condition that changes how pollution affects a person.
    pub enum HealthCondition as "health condition" {
        Asthma => "asthma",
        Allergies => "allergies",
        Copd => "copd",
        HeartDisease => "heart_disease",
        WeakImmunity => "weak_immunity",
        Elderly => "elderly",
    }
}

named_enum! {
    pub enum Gender as "gender" {
        Male => "male",
        Female => "female",
        Other => "other",
    }
}

named_enum! {
    /// What a typical day looks like. Athletes get exercise tips in the
    /// forecast insights.
    pub enum ActivityLevel as "activity level" {
        Student => "student",
        IndoorWorker => "indoor_worker",
        OutdoorWorker => "outdoor_worker",
        Athlete => "athlete",
    }
}

named_enum! {
    /// Self-assessed susceptibility to pollution, independent of diagnoses.
    pub enum PollutionSensitivity as "pollution sensitivity" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

impl Default for PollutionSensitivity {
    fn default() -> Self {
        PollutionSensitivity::Medium
    }
}

/// A set of [`HealthCondition`]s.
///
/// Inserting a condition twice has no effect, and iteration always follows
/// declaration order regardless of insertion order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConditionSet(u8);

impl ConditionSet {
    pub const fn empty() -> Self {
        ConditionSet(0)
    }

    fn bit(condition: HealthCondition) -> u8 {
        1 << condition as u8
    }

    /// Adds a condition, returning `false` if it was already present.
    pub fn insert(&mut self, condition: HealthCondition) -> bool {
        let present = self.contains(condition);
        self.0 |= Self::bit(condition);
        !present
    }

    pub fn remove(&mut self, condition: HealthCondition) -> bool {
        let present = self.contains(condition);
        self.0 &= !Self::bit(condition);
        present
    }

    pub fn contains(self, condition: HealthCondition) -> bool {
        self.0 & Self::bit(condition) != 0
    }

    pub fn contains_any(self, conditions: &[HealthCondition]) -> bool {
        conditions.iter().any(|&c| self.contains(c))
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = HealthCondition> {
        HealthCondition::ALL
            .iter()
            .copied()
            .filter(move |&c| self.contains(c))
    }
}

impl fmt::Debug for ConditionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<HealthCondition> for ConditionSet {
    fn from_iter<I: IntoIterator<Item = HealthCondition>>(iter: I) -> Self {
        let mut set = ConditionSet::empty();
        for condition in iter {
            set.insert(condition);
        }
        set
    }
}

impl<const N: usize> From<[HealthCondition; N]> for ConditionSet {
    fn from(conditions: [HealthCondition; N]) -> Self {
        conditions.into_iter().collect()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ConditionSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ConditionSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ConditionSetVisitor;

        impl<'de> serde::de::Visitor<'de> for ConditionSetVisitor {
            type Value = ConditionSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of health conditions")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<ConditionSet, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut set = ConditionSet::empty();
                while let Some(condition) = seq.next_element::<HealthCondition>()? {
                    set.insert(condition);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(ConditionSetVisitor)
    }
}

/// Everything the user told us about their health during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthProfile {
    pub age: u16,
    pub gender: Gender,
    pub conditions: ConditionSet,
    pub activity: ActivityLevel,
    pub sensitivity: PollutionSensitivity,
}

impl HealthProfile {
    pub fn new(
        age: u16,
        gender: Gender,
        conditions: ConditionSet,
        activity: ActivityLevel,
        sensitivity: PollutionSensitivity,
    ) -> Result<Self, Error> {
        let profile = HealthProfile {
            age,
            gender,
            conditions,
            activity,
            sensitivity,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Checks invariants that deserialization can't enforce.
    pub fn validate(&self) -> Result<(), Error> {
        if self.age == 0 {
            return Err(Error::InvalidAge);
        }
        Ok(())
    }

    pub fn risk(&self, aqi: u16) -> u8 {
        compute_risk(aqi, self.conditions, self.sensitivity)
    }

    pub fn advice(&self, reading: &PollutantReading) -> AdviceList {
        derive_advice(reading, self.conditions)
    }

    pub fn assess(&self, reading: &PollutantReading) -> Result<Assessment, Error> {
        Assessment::evaluate(reading, self.conditions, self.sensitivity)
    }
}
