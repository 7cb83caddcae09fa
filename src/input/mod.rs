use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub mod cache;

use cache::open_maybe_gz;

use crate::model::scores::SubScores;
use crate::scoring::mean_of;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// One entry of a batch, with defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRecord {
    pub id: String,
    pub complexity: f64,
    /// True when `complexity` was derived from the sub-scores.
    pub complexity_derived: bool,
    pub scores: SubScores,
}

#[derive(Debug, Clone)]
pub struct InputBatch {
    pub source: String,
    pub records: Vec<InputRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBatch {
    records: Vec<RawRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRecord {
    id: Option<String>,
    complexity: Option<f64>,
    #[serde(default)]
    scores: SubScores,
}

pub fn load_batch(path: &Path) -> Result<InputBatch, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .map_err(|source| InputError::Io {
            path: path.display().to_string(),
            source,
        })?;
    let records = parse_batch(&raw).map_err(|err| match err {
        ParseFailure::Json(source) => InputError::Parse {
            path: path.display().to_string(),
            source,
        },
        ParseFailure::Invalid(msg) => InputError::InvalidInput(msg),
    })?;
    tracing::info!(
        path = %path.display(),
        records = records.len(),
        "loaded score batch"
    );
    Ok(InputBatch {
        source: path.display().to_string(),
        records,
    })
}

#[derive(Debug)]
enum ParseFailure {
    Json(serde_json::Error),
    Invalid(String),
}

fn parse_batch(raw: &str) -> Result<Vec<InputRecord>, ParseFailure> {
    let doc: serde_json::Value = serde_json::from_str(raw).map_err(ParseFailure::Json)?;
    // An array under "records" marks a batch; anything else is one bare mapping,
    // so a metric may still be named "records".
    let is_batch = doc.get("records").is_some_and(serde_json::Value::is_array);
    let raw_records = if is_batch {
        let batch: RawBatch = serde_json::from_value(doc).map_err(ParseFailure::Json)?;
        batch.records
    } else {
        let scores: SubScores = serde_json::from_value(doc).map_err(ParseFailure::Json)?;
        vec![RawRecord {
            id: None,
            complexity: None,
            scores,
        }]
    };

    let mut seen = std::collections::BTreeSet::new();
    let mut out = Vec::with_capacity(raw_records.len());
    for (idx, raw) in raw_records.into_iter().enumerate() {
        let id = raw.id.unwrap_or_else(|| format!("record_{}", idx + 1));
        if !seen.insert(id.clone()) {
            return Err(ParseFailure::Invalid(format!("duplicate record id: {id}")));
        }
        let (complexity, complexity_derived) = match raw.complexity {
            Some(c) => (c, false),
            None => (default_complexity(&raw.scores), true),
        };
        out.push(InputRecord {
            id,
            complexity,
            complexity_derived,
            scores: raw.scores,
        });
    }
    Ok(out)
}

/// Unweighted mean of the sub-scores, 0.0 for an empty record.
pub fn default_complexity(scores: &SubScores) -> f64 {
    mean_of(scores.values().copied())
}

/// Parses `name=value` pairs from the command line.
pub fn parse_score_pairs(pairs: &[String]) -> Result<SubScores, InputError> {
    let mut out = SubScores::new();
    for pair in pairs {
        let (name, value) = pair.split_once('=').ok_or_else(|| {
            InputError::InvalidInput(format!("expected name=value, got {pair}"))
        })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(InputError::InvalidInput(format!(
                "missing metric name in {pair}"
            )));
        }
        let value: f64 = value.trim().parse().map_err(|_| {
            InputError::InvalidInput(format!("invalid value for {name}: {value}"))
        })?;
        if out.insert(name.to_string(), value).is_some() {
            return Err(InputError::InvalidInput(format!(
                "metric {name} given more than once"
            )));
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
