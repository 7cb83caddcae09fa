use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;

use ucp_score::input::{InputError, load_batch, parse_score_pairs};
use ucp_score::logging;
use ucp_score::model::profile::{ProfileError, ScoringProfile};
use ucp_score::model::scores::{Aggregation, wrap_result};
use ucp_score::pipeline::stage1_select::run_stage1;
use ucp_score::pipeline::stage2_aggregate::{Stage2Error, Stage2Params, run_stage2};
use ucp_score::pipeline::stage3_report::{ReportMode, Stage3Input, write_reports};
use ucp_score::scoring::{ScoreError, scorer_for};

#[derive(Debug, Parser)]
#[command(name = "ucp-score", version, about = "Method selection and score aggregation")]
struct Cli {
    /// Debug-level logging unless RUST_LOG is set.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a JSON batch and write reports.
    Run(RunArgs),
    /// Print the method label for a complexity value.
    Select {
        #[arg(allow_negative_numbers = true)]
        complexity: f64,
        #[arg(long)]
        profile: Option<PathBuf>,
    },
    /// Aggregate name=value pairs into a single score record.
    Aggregate {
        #[arg(required = true, value_name = "NAME=VALUE")]
        scores: Vec<String>,
        #[arg(long)]
        optimize: bool,
        /// Complexity used for method selection; defaults to the plain mean.
        #[arg(long, allow_negative_numbers = true)]
        complexity: Option<f64>,
        #[arg(long)]
        profile: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, clap::Args)]
struct RunArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    out: PathBuf,
    #[arg(long)]
    profile: Option<PathBuf>,
    /// Scale aggregates by the golden ratio.
    #[arg(long)]
    optimize: bool,
    /// Fail on the first record that cannot be scored.
    #[arg(long)]
    strict: bool,
    #[arg(long, value_enum, default_value_t = ModeArg::Record)]
    mode: ModeArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Record,
    Summary,
}

impl From<ModeArg> for ReportMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Record => ReportMode::Record,
            ModeArg::Summary => ReportMode::Summary,
        }
    }
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Stage2(#[from] Stage2Error),
    #[error("failed to write reports: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode record: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli.command) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), RunError> {
    match command {
        Command::Run(args) => run_batch(&args),
        Command::Select {
            complexity,
            profile,
        } => {
            let profile = resolve_profile(profile.as_deref(), false)?;
            println!("{}", profile.thresholds.select(complexity));
            Ok(())
        }
        Command::Aggregate {
            scores,
            optimize,
            complexity,
            profile,
        } => {
            let profile = resolve_profile(profile.as_deref(), optimize)?;
            let sub_scores = parse_score_pairs(&scores)?;
            let score = scorer_for(&profile).aggregate(&sub_scores)?;
            let complexity =
                complexity.unwrap_or_else(|| ucp_score::input::default_complexity(&sub_scores));
            let record = wrap_result(score.value, profile.thresholds.select(complexity));
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
    }
}

fn run_batch(args: &RunArgs) -> Result<(), RunError> {
    let profile = resolve_profile(args.profile.as_deref(), args.optimize)?;
    let batch = load_batch(&args.input)?;
    let computed_at = Utc::now();

    let stage1 = run_stage1(&batch.records, &profile.thresholds);
    let scorer = scorer_for(&profile);
    let stage2 = run_stage2(
        &batch.records,
        &stage1.methods,
        scorer.as_ref(),
        &Stage2Params {
            strict: args.strict,
            computed_at,
        },
    )?;

    let input = Stage3Input {
        source: &batch.source,
        n_records: batch.records.len(),
        entries: &stage2.entries,
        rejected: &stage2.rejected,
        profile: &profile,
        computed_at,
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    write_reports(&input, &args.out, args.mode.into())?;
    Ok(())
}

/// Loads `path` when given, otherwise the built-in profile. `--optimize`
/// forces golden-optimized aggregation on top of either.
fn resolve_profile(
    path: Option<&std::path::Path>,
    optimize: bool,
) -> Result<ScoringProfile, ProfileError> {
    let mut profile = match path {
        Some(p) => ScoringProfile::load(p)?,
        None => ScoringProfile::default_v1(),
    };
    if optimize {
        profile.aggregation = Aggregation::GoldenOptimized;
    }
    tracing::debug!(
        aggregation = profile.aggregation.as_str(),
        multiplier = profile.multiplier,
        weighted = profile.is_weighted(),
        "scoring profile resolved"
    );
    Ok(profile)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
