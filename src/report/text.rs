use crate::report::{MethodStat, NamedStats, SummaryData, format_f64_6};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Score Aggregation Report\n");
    out.push_str("========================\n\n");

    out.push_str("1. Run\n");
    out.push_str(&format!("Source: {}\n", data.source));
    out.push_str(&format!("Computed at: {}\n", data.computed_at));
    out.push_str(&format!(
        "Aggregation: {} (multiplier {}, {})\n",
        data.profile.aggregation,
        format_f64_6(data.profile.multiplier),
        if data.profile.weighted {
            "weighted"
        } else {
            "unweighted"
        }
    ));
    out.push_str(&format!(
        "Thresholds: universal>={} transcendent>={} consciousness>={}\n\n",
        format_f64_6(data.profile.universal),
        format_f64_6(data.profile.transcendent),
        format_f64_6(data.profile.consciousness)
    ));

    out.push_str("2. Records\n");
    out.push_str(&format!(
        "Scored: {} of {} (rejected {})\n",
        data.n_scored, data.n_records, data.n_rejected
    ));
    out.push_str(&format!(
        "Derived complexity fraction: {}\n\n",
        format_f64_6(data.derived_complexity_fraction)
    ));

    out.push_str("3. Distributions\n");
    for stats in &data.distributions {
        out.push_str(&stats_line(stats));
    }
    out.push_str(&format!(
        "Values above 1.0: {}\n\n",
        format_f64_6(data.above_one_fraction)
    ));

    out.push_str("4. Methods\n");
    out.push_str(&format!("Dominant method: {}\n", dominant_method(&data.methods)));
    for m in &data.methods {
        out.push_str(&format!(
            "{}: {} ({})\n",
            m.name,
            m.count,
            format_f64_6(m.fraction)
        ));
    }

    if !data.rejected.is_empty() {
        out.push_str("\n5. Rejected records\n");
        for r in &data.rejected {
            out.push_str(&format!("{}: {}\n", r.id, r.reason));
        }
    }

    out
}

fn stats_line(stats: &NamedStats) -> String {
    format!(
        "{}: median={} p10={} p90={} min={} max={}\n",
        stats.name,
        format_f64_6(stats.median),
        format_f64_6(stats.p10),
        format_f64_6(stats.p90),
        format_f64_6(stats.min),
        format_f64_6(stats.max)
    )
}

/// Most frequent method; ties go to the higher tier, which comes first.
fn dominant_method(methods: &[MethodStat]) -> &'static str {
    let mut best: Option<&MethodStat> = None;
    for m in methods {
        if m.count == 0 {
            continue;
        }
        match best {
            Some(b) if b.count >= m.count => {}
            _ => best = Some(m),
        }
    }
    best.map(|m| m.name).unwrap_or("none")
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
