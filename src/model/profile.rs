use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::constants::GOLDEN_RATIO;
use crate::model::scores::Aggregation;
use crate::model::thresholds::MethodTable;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read profile {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse profile {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid profile: {0}")]
    Invalid(String),
}

/// Scoring configuration shared by every call site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringProfile {
    pub aggregation: Aggregation,
    pub multiplier: f64,
    pub thresholds: MethodTable,
    /// Per-metric weights. Metrics not listed weigh 1.0.
    pub weights: BTreeMap<String, f64>,
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::default_v1()
    }
}

impl ScoringProfile {
    pub fn default_v1() -> Self {
        Self {
            aggregation: Aggregation::Mean,
            multiplier: GOLDEN_RATIO,
            thresholds: MethodTable::default_v1(),
            weights: BTreeMap::new(),
        }
    }

    pub fn optimized_v1() -> Self {
        let mut base = Self::default_v1();
        base.aggregation = Aggregation::GoldenOptimized;
        base
    }

    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let profile: Self = serde_json::from_str(&raw).map_err(|source| ProfileError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if !self.multiplier.is_finite() || self.multiplier <= 0.0 {
            return Err(ProfileError::Invalid(format!(
                "multiplier must be finite and positive, got {}",
                self.multiplier
            )));
        }
        if !self.thresholds.is_finite() {
            return Err(ProfileError::Invalid(
                "thresholds must be finite".to_string(),
            ));
        }
        if !self.thresholds.is_descending() {
            return Err(ProfileError::Invalid(format!(
                "thresholds must be descending (universal {} >= transcendent {} >= consciousness {})",
                self.thresholds.universal, self.thresholds.transcendent, self.thresholds.consciousness
            )));
        }
        for (name, weight) in &self.weights {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(ProfileError::Invalid(format!(
                    "weight for {name} must be finite and non-negative, got {weight}"
                )));
            }
        }
        Ok(())
    }

    pub fn is_weighted(&self) -> bool {
        !self.weights.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/profile.rs"]
mod tests;
