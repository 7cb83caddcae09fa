use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::model::methods::{Method, method_order};
use crate::model::profile::ScoringProfile;
use crate::pipeline::stage2_aggregate::{Rejection, ScoredEntry};
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{
    MethodStat, ProfileMeta, SummaryData, ToolMeta, bool_fraction, format_f64_6, named_stats,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    Record,
    Summary,
}

#[derive(Debug, Clone)]
pub struct Stage3Input<'a> {
    pub source: &'a str,
    pub n_records: usize,
    pub entries: &'a [ScoredEntry],
    pub rejected: &'a [Rejection],
    pub profile: &'a ScoringProfile,
    pub computed_at: DateTime<Utc>,

    pub tool_name: String,
    pub tool_version: String,
}

pub fn write_reports(
    input: &Stage3Input<'_>,
    out_dir: &Path,
    mode: ReportMode,
) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    if mode == ReportMode::Record {
        write_scores_tsv(input.entries, &out_dir.join("scores.tsv"))?;
        let records = serde_json::to_string_pretty(input.entries)?;
        write_text(&out_dir.join("records.json"), &records)?;
    }

    let summary = build_summary(input);
    let json = render_summary_json(&summary)?;
    write_text(&out_dir.join("summary.json"), &json)?;

    let report = render_report_text(&summary);
    write_text(&out_dir.join("report.txt"), &report)?;

    tracing::info!(
        out = %out_dir.display(),
        scored = summary.n_scored,
        rejected = summary.n_rejected,
        "reports written"
    );
    Ok(())
}

fn write_scores_tsv(entries: &[ScoredEntry], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = [
        "id",
        "complexity",
        "complexity_derived",
        "method",
        "n_metrics",
        "mean",
        "value",
        "completed",
        "computed_at",
    ];
    writeln!(w, "{}", header.join("\t"))?;
    for e in entries {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            e.id,
            format_f64_6(e.complexity),
            e.complexity_derived,
            e.record.method,
            e.n_metrics,
            format_f64_6(e.mean),
            format_f64_6(e.record.value),
            e.record.completed,
            e.record
                .computed_at
                .to_rfc3339_opts(SecondsFormat::Millis, true)
        )?;
    }
    w.flush()
}

pub fn build_summary(input: &Stage3Input<'_>) -> SummaryData {
    let values = input
        .entries
        .iter()
        .map(|e| e.record.value)
        .collect::<Vec<_>>();
    let means = input.entries.iter().map(|e| e.mean).collect::<Vec<_>>();
    let complexity = input
        .entries
        .iter()
        .map(|e| e.complexity)
        .collect::<Vec<_>>();
    let derived = input
        .entries
        .iter()
        .map(|e| e.complexity_derived)
        .collect::<Vec<_>>();
    let above_one = values.iter().map(|&v| v > 1.0).collect::<Vec<_>>();

    SummaryData {
        tool: ToolMeta {
            name: input.tool_name.clone(),
            version: input.tool_version.clone(),
        },
        source: input.source.to_string(),
        computed_at: input
            .computed_at
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        profile: ProfileMeta {
            aggregation: input.profile.aggregation.as_str().to_string(),
            multiplier: input.profile.multiplier,
            weighted: input.profile.is_weighted(),
            universal: input.profile.thresholds.universal,
            transcendent: input.profile.thresholds.transcendent,
            consciousness: input.profile.thresholds.consciousness,
        },

        n_records: input.n_records,
        n_scored: input.entries.len(),
        n_rejected: input.rejected.len(),
        derived_complexity_fraction: bool_fraction(&derived),

        distributions: vec![
            named_stats("value", &values),
            named_stats("mean", &means),
            named_stats("complexity", &complexity),
        ],
        methods: method_stats(input.entries),
        above_one_fraction: bool_fraction(&above_one),

        rejected: input.rejected.to_vec(),
    }
}

fn method_stats(entries: &[ScoredEntry]) -> Vec<MethodStat> {
    let mut counts: BTreeMap<Method, usize> = BTreeMap::new();
    for e in entries {
        *counts.entry(e.record.method).or_insert(0) += 1;
    }
    let n = entries.len();
    method_order()
        .iter()
        .map(|&method| {
            let count = counts.get(&method).copied().unwrap_or(0);
            MethodStat {
                name: method.as_str(),
                count,
                fraction: if n > 0 { count as f64 / n as f64 } else { 0.0 },
            }
        })
        .collect()
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_report.rs"]
mod tests;
