use super::*;
use crate::model::scores::SubScores;

fn record(id: &str, complexity: f64) -> InputRecord {
    InputRecord {
        id: id.to_string(),
        complexity,
        complexity_derived: false,
        scores: SubScores::new(),
    }
}

#[test]
fn test_run_stage1_selects_per_record() {
    let records = vec![
        record("a", 0.96),
        record("b", 0.91),
        record("c", 0.86),
        record("d", 0.10),
        record("e", f64::NAN),
    ];
    let out = run_stage1(&records, &MethodTable::default_v1());
    assert_eq!(
        out.methods,
        vec![
            Method::UniversalBased,
            Method::TranscendentBased,
            Method::ConsciousnessBased,
            Method::QuantumBased,
            Method::QuantumBased,
        ]
    );
}
