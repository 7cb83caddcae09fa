use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::input::InputRecord;
use crate::model::methods::Method;
use crate::model::scores::{Score, ScoreRecord};
use crate::scoring::{ScoreError, Scorer};

#[derive(Debug, Clone, Serialize)]
pub struct ScoredEntry {
    pub id: String,
    pub complexity: f64,
    pub complexity_derived: bool,
    pub n_metrics: usize,
    pub mean: f64,
    #[serde(flatten)]
    pub record: ScoreRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct Stage2Output {
    pub entries: Vec<ScoredEntry>,
    pub rejected: Vec<Rejection>,
}

#[derive(Debug, Error)]
#[error("record {id}: {source}")]
pub struct Stage2Error {
    pub id: String,
    #[source]
    pub source: ScoreError,
}

#[derive(Debug, Clone, Copy)]
pub struct Stage2Params {
    pub strict: bool,
    pub computed_at: DateTime<Utc>,
}

pub fn run_stage2(
    records: &[InputRecord],
    methods: &[Method],
    scorer: &dyn Scorer,
    params: &Stage2Params,
) -> Result<Stage2Output, Stage2Error> {
    let mut out = Stage2Output::default();
    for (record, &method) in records.iter().zip(methods) {
        match scorer.aggregate(&record.scores) {
            Ok(score) => out
                .entries
                .push(entry(record, method, score, params.computed_at)),
            Err(source) if params.strict => {
                return Err(Stage2Error {
                    id: record.id.clone(),
                    source,
                });
            }
            Err(err) => {
                tracing::warn!(id = %record.id, "skipping record: {err}");
                out.rejected.push(Rejection {
                    id: record.id.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }
    Ok(out)
}

fn entry(record: &InputRecord, method: Method, score: Score, at: DateTime<Utc>) -> ScoredEntry {
    ScoredEntry {
        id: record.id.clone(),
        complexity: record.complexity,
        complexity_derived: record.complexity_derived,
        n_metrics: score.n_metrics,
        mean: score.mean,
        record: ScoreRecord::at(score.value, method, at),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_aggregate.rs"]
mod tests;
