pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod scoring;

pub use model::constants::{GOLDEN_RATIO, GOLDEN_RATIO_INV};
pub use model::methods::Method;
pub use model::profile::{ProfileError, ScoringProfile};
pub use model::scores::{Aggregation, Score, ScoreRecord, SubScores, wrap_result};
pub use model::thresholds::{MethodTable, select_method};
pub use scoring::{MeanScorer, ScoreError, Scorer, WeightedScorer, aggregate, scorer_for};
