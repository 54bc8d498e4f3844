//! Structural scoring weights
//!
//! The historical weights (skills 0.3, soft skills 0.2, languages 0.1,
//! domain 0.2) sum to 0.8, so a perfect candidate scores 0.8. Whether to
//! keep that scale or rescale to 1.0 is a configuration choice. By default
//! a domain missing on both sides counts as a match, as it always has.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One structural comparison axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Skills,
    SoftSkills,
    Languages,
    Domain,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Skills, Axis::SoftSkills, Axis::Languages, Axis::Domain];

    pub fn name(self) -> &'static str {
        match self {
            Axis::Skills => "skills",
            Axis::SoftSkills => "soft_skills",
            Axis::Languages => "languages",
            Axis::Domain => "domain",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How configured weights are applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightNormalization {
    /// Use the weights as configured, whatever they sum to
    #[default]
    Preserve,
    /// Rescale the weights to sum to 1.0
    Renormalize,
}

/// Per-axis weights for the structural score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuralWeights {
    pub skills: f32,
    pub soft_skills: f32,
    pub languages: f32,
    pub domain: f32,
    pub normalization: WeightNormalization,
    /// Count a domain absent on both sides as a match
    pub match_missing_domain: bool,
}

impl Default for StructuralWeights {
    fn default() -> Self {
        Self {
            skills: 0.3,
            soft_skills: 0.2,
            languages: 0.1,
            domain: 0.2,
            normalization: WeightNormalization::Preserve,
            match_missing_domain: true,
        }
    }
}

impl StructuralWeights {
    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Skills => self.skills,
            Axis::SoftSkills => self.soft_skills,
            Axis::Languages => self.languages,
            Axis::Domain => self.domain,
        }
    }

    pub fn set(&mut self, axis: Axis, weight: f32) {
        match axis {
            Axis::Skills => self.skills = weight,
            Axis::SoftSkills => self.soft_skills = weight,
            Axis::Languages => self.languages = weight,
            Axis::Domain => self.domain = weight,
        }
    }

    pub fn sum(&self) -> f32 {
        Axis::ALL.iter().map(|a| self.get(*a)).sum()
    }

    /// Check the weights and apply the normalization mode
    ///
    /// The returned weights are what the scorer multiplies by.
    pub fn resolve(&self) -> Result<StructuralWeights, WeightsError> {
        for axis in Axis::ALL {
            let weight = self.get(axis);
            if !weight.is_finite() {
                return Err(WeightsError::NotFinite(axis));
            }
            if weight < 0.0 {
                return Err(WeightsError::NegativeWeight(axis));
            }
        }

        let sum = self.sum();
        if sum <= 0.0 {
            return Err(WeightsError::ZeroTotalWeight);
        }

        let mut resolved = *self;
        if self.normalization == WeightNormalization::Renormalize {
            for axis in Axis::ALL {
                resolved.set(axis, self.get(axis) / sum);
            }
        }
        Ok(resolved)
    }
}

/// Errors that can occur during weight validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightsError {
    #[error("Axis '{0}' has negative weight")]
    NegativeWeight(Axis),

    #[error("Axis '{0}' has a non-finite weight")]
    NotFinite(Axis),

    #[error("Total weight cannot be zero")]
    ZeroTotalWeight,
}
