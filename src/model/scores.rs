use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::methods::Method;

/// Named sub-metrics, nominally in [0, 1]. Values are never clamped.
pub type SubScores = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    #[default]
    Mean,
    GoldenOptimized,
}

impl Aggregation {
    pub fn as_str(self) -> &'static str {
        match self {
            Aggregation::Mean => "mean",
            Aggregation::GoldenOptimized => "golden_optimized",
        }
    }
}

/// Output of a single aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    /// Weighted mean before any multiplier.
    pub mean: f64,
    pub value: f64,
    pub n_metrics: usize,
    pub aggregation: Aggregation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub value: f64,
    pub method: Method,
    pub computed_at: DateTime<Utc>,
    pub completed: bool,
}

impl ScoreRecord {
    pub fn at(value: f64, method: Method, computed_at: DateTime<Utc>) -> Self {
        Self {
            value,
            method,
            computed_at,
            completed: true,
        }
    }
}

/// Tags an aggregate with its method label and the current time.
pub fn wrap_result(value: f64, method: Method) -> ScoreRecord {
    ScoreRecord::at(value, method, Utc::now())
}
