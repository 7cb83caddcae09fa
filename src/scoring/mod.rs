use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::constants::GOLDEN_RATIO;
use crate::model::profile::ScoringProfile;
use crate::model::scores::{Aggregation, Score, SubScores};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Reduces a set of named sub-scores to a single [`Score`].
pub trait Scorer {
    fn aggregate(&self, inputs: &SubScores) -> Result<Score, ScoreError>;
}

/// Arithmetic mean, optionally scaled by a multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanScorer {
    pub aggregation: Aggregation,
    pub multiplier: f64,
}

impl MeanScorer {
    pub fn new(aggregation: Aggregation) -> Self {
        Self {
            aggregation,
            multiplier: GOLDEN_RATIO,
        }
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }
}

impl Scorer for MeanScorer {
    fn aggregate(&self, inputs: &SubScores) -> Result<Score, ScoreError> {
        check_inputs(inputs)?;
        let mean = mean_of(inputs.values().copied());
        finish(mean, inputs.len(), self.aggregation, self.multiplier)
    }
}

/// Weighted mean. Metrics without an explicit weight count as 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedScorer {
    pub aggregation: Aggregation,
    pub multiplier: f64,
    pub weights: BTreeMap<String, f64>,
}

impl WeightedScorer {
    pub fn new(aggregation: Aggregation, weights: BTreeMap<String, f64>) -> Self {
        Self {
            aggregation,
            multiplier: GOLDEN_RATIO,
            weights,
        }
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    fn weight(&self, name: &str) -> f64 {
        self.weights.get(name).copied().unwrap_or(1.0)
    }
}

impl Scorer for WeightedScorer {
    fn aggregate(&self, inputs: &SubScores) -> Result<Score, ScoreError> {
        check_inputs(inputs)?;
        // Weights are rescaled by their maximum so the normalized total stays
        // within [1, n] and every term is a convex share of a finite value.
        let max_weight = inputs
            .keys()
            .map(|name| self.weight(name))
            .fold(0.0f64, f64::max);
        if max_weight <= 0.0 || !max_weight.is_finite() {
            return Err(ScoreError::InvalidInput(
                "total weight of sub-scores is zero".to_string(),
            ));
        }
        let total_weight: f64 = inputs
            .keys()
            .map(|name| self.weight(name) / max_weight)
            .sum();
        let mut mean = 0.0f64;
        for (name, &value) in inputs {
            let share = self.weight(name) / max_weight / total_weight;
            mean += share * value;
        }
        finish(mean, inputs.len(), self.aggregation, self.multiplier)
    }
}

/// Builds the scorer a profile describes.
pub fn scorer_for(profile: &ScoringProfile) -> Box<dyn Scorer> {
    if profile.is_weighted() {
        Box::new(
            WeightedScorer::new(profile.aggregation, profile.weights.clone())
                .with_multiplier(profile.multiplier),
        )
    } else {
        Box::new(MeanScorer::new(profile.aggregation).with_multiplier(profile.multiplier))
    }
}

/// Mean of `sub_scores`, multiplied by the golden ratio for
/// [`Aggregation::GoldenOptimized`].
pub fn aggregate(sub_scores: &SubScores, aggregation: Aggregation) -> Result<f64, ScoreError> {
    MeanScorer::new(aggregation)
        .aggregate(sub_scores)
        .map(|score| score.value)
}

/// Arithmetic mean accumulated as `v / n` so finite inputs near `f64::MAX`
/// cannot overflow the running sum. Returns 0.0 for an empty iterator.
pub fn mean_of<I>(values: I) -> f64
where
    I: ExactSizeIterator<Item = f64>,
{
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    values.map(|v| v / n).sum()
}

fn check_inputs(inputs: &SubScores) -> Result<(), ScoreError> {
    if inputs.is_empty() {
        return Err(ScoreError::InvalidInput(
            "cannot aggregate an empty set of sub-scores".to_string(),
        ));
    }
    if let Some((name, value)) = inputs.iter().find(|(_, v)| !v.is_finite()) {
        return Err(ScoreError::InvalidInput(format!(
            "sub-score {name} is not finite ({value})"
        )));
    }
    Ok(())
}

fn finish(
    mean: f64,
    n_metrics: usize,
    aggregation: Aggregation,
    multiplier: f64,
) -> Result<Score, ScoreError> {
    let value = match aggregation {
        Aggregation::Mean => mean,
        Aggregation::GoldenOptimized => mean * multiplier,
    };
    if !value.is_finite() {
        return Err(ScoreError::InvalidInput(format!(
            "{} aggregate of {n_metrics} sub-scores is not finite",
            aggregation.as_str()
        )));
    }
    Ok(Score {
        mean,
        value,
        n_metrics,
        aggregation,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/scoring/tests.rs"]
mod tests;
