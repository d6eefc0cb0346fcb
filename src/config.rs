//! Profile storage and the settings derived from it.
//!
//! The profile lives in a single JSON file. Saving replaces the whole file;
//! there is no field-level update.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use aqi::{ConditionSet, HealthProfile, PollutionSensitivity};

/// Environment variable consulted when `--profile` isn't given.
pub const PROFILE_ENV: &str = "AQI_ADVISOR_PROFILE";

/// Default profile file name, relative to the working directory.
pub const DEFAULT_PROFILE_PATH: &str = "health_profile.json";

#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ProfileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored profile. A missing file means the user hasn't
    /// completed onboarding yet and is not an error.
    pub fn load(&self) -> Result<Option<HealthProfile>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no stored health profile");
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read profile {}", self.path.display()))?;
        let profile: HealthProfile = serde_json::from_str(&json)
            .with_context(|| format!("profile {} is malformed", self.path.display()))?;
        profile
            .validate()
            .with_context(|| format!("profile {} is invalid", self.path.display()))?;

        Ok(Some(profile))
    }

    pub fn save(&self, profile: &HealthProfile) -> Result<()> {
        profile.validate()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(profile)?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write profile {}", self.path.display()))?;
        tracing::info!(path = %self.path.display(), "saved health profile");
        Ok(())
    }
}

/// The parts of a profile the calculations use. Without a profile the user
/// is treated as having no conditions and medium sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Exposure {
    pub conditions: ConditionSet,
    pub sensitivity: PollutionSensitivity,
}

impl From<Option<&HealthProfile>> for Exposure {
    fn from(profile: Option<&HealthProfile>) -> Self {
        match profile {
            Some(profile) => Exposure {
                conditions: profile.conditions,
                sensitivity: profile.sensitivity,
            },
            None => Exposure::default(),
        }
    }
}
