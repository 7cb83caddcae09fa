use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("ucp_input_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_load_batch_records() {
    let dir = make_temp_dir();
    let path = dir.join("batch.json");
    fs::write(
        &path,
        r#"{"records":[
            {"id":"alpha","complexity":0.97,"scores":{"a":0.9,"b":0.8}},
            {"scores":{"c":0.4,"d":0.6}},
            {"id":"empty"}
        ]}"#,
    )
    .unwrap();
    let batch = load_batch(&path).unwrap();
    assert_eq!(batch.records.len(), 3);

    let alpha = &batch.records[0];
    assert_eq!(alpha.id, "alpha");
    assert_eq!(alpha.complexity, 0.97);
    assert!(!alpha.complexity_derived);

    let second = &batch.records[1];
    assert_eq!(second.id, "record_2");
    assert!(second.complexity_derived);
    assert!((second.complexity - 0.5).abs() < 1e-12);

    let empty = &batch.records[2];
    assert!(empty.scores.is_empty());
    assert_eq!(empty.complexity, 0.0);
}

#[test]
fn test_load_bare_mapping() {
    let dir = make_temp_dir();
    let path = dir.join("single.json");
    fs::write(&path, r#"{"a":0.9,"b":0.8,"c":0.85}"#).unwrap();
    let batch = load_batch(&path).unwrap();
    assert_eq!(batch.records.len(), 1);
    assert_eq!(batch.records[0].id, "record_1");
    assert_eq!(batch.records[0].scores.len(), 3);
}

#[test]
fn test_load_gz_batch() {
    let dir = make_temp_dir();
    let path = dir.join("batch.json.gz");
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(br#"{"records":[{"id":"z","scores":{"a":1.0}}]}"#)
        .unwrap();
    fs::write(&path, enc.finish().unwrap()).unwrap();

    let batch = load_batch(&path).unwrap();
    assert_eq!(batch.records[0].id, "z");
}

#[test]
fn test_duplicate_ids_rejected() {
    let dir = make_temp_dir();
    let path = dir.join("dup.json");
    fs::write(
        &path,
        r#"{"records":[{"id":"a","scores":{}},{"id":"a","scores":{}}]}"#,
    )
    .unwrap();
    assert!(matches!(
        load_batch(&path),
        Err(InputError::InvalidInput(_))
    ));
}

#[test]
fn test_malformed_json() {
    let dir = make_temp_dir();
    let path = dir.join("bad.json");
    fs::write(&path, "{not json").unwrap();
    assert!(matches!(load_batch(&path), Err(InputError::Parse { .. })));
    assert!(matches!(
        load_batch(&dir.join("missing.json")),
        Err(InputError::Io { .. })
    ));
}

#[test]
fn test_parse_score_pairs() {
    let pairs = vec!["a=0.9".to_string(), "b = 0.8".to_string()];
    let parsed = parse_score_pairs(&pairs).unwrap();
    assert_eq!(parsed.get("a"), Some(&0.9));
    assert_eq!(parsed.get("b"), Some(&0.8));

    assert!(parse_score_pairs(&["a".to_string()]).is_err());
    assert!(parse_score_pairs(&["=1".to_string()]).is_err());
    assert!(parse_score_pairs(&["a=x".to_string()]).is_err());
    assert!(parse_score_pairs(&["a=1".to_string(), "a=2".to_string()]).is_err());
}

#[test]
fn test_batch_rejects_stray_top_level_keys() {
    let dir = make_temp_dir();
    let path = dir.join("stray.json");
    fs::write(&path, r#"{"records":[{"scores":{"a":0.5}}],"a":0.3}"#).unwrap();
    match load_batch(&path) {
        Err(InputError::Parse { source, .. }) => {
            assert!(source.to_string().contains("unknown field `a`"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_batch_reports_record_level_errors() {
    let dir = make_temp_dir();
    let path = dir.join("typo.json");
    fs::write(&path, r#"{"records":[{"id":"x","score":{"a":0.5}}]}"#).unwrap();
    match load_batch(&path) {
        Err(InputError::Parse { source, .. }) => {
            assert!(source.to_string().contains("unknown field `score`"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_bare_mapping_may_name_a_metric_records() {
    let dir = make_temp_dir();
    let path = dir.join("records_metric.json");
    fs::write(&path, r#"{"records":0.4,"b":0.6}"#).unwrap();
    let batch = load_batch(&path).unwrap();
    assert_eq!(batch.records.len(), 1);
    assert_eq!(batch.records[0].scores.get("records"), Some(&0.4));
}

#[test]
fn test_default_complexity_near_max() {
    let mut scores = SubScores::new();
    scores.insert("a".to_string(), 1e308);
    scores.insert("b".to_string(), 1e308);
    let c = default_complexity(&scores);
    assert!((c / 1e308 - 1.0).abs() < 1e-12);
}
