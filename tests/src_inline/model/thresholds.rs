use super::*;

#[test]
fn test_default_thresholds() {
    assert_eq!(select_method(0.99), Method::UniversalBased);
    assert_eq!(select_method(0.95), Method::UniversalBased);
    assert_eq!(select_method(0.92), Method::TranscendentBased);
    assert_eq!(select_method(0.90), Method::TranscendentBased);
    assert_eq!(select_method(0.85), Method::ConsciousnessBased);
    assert_eq!(select_method(0.5), Method::QuantumBased);
}

#[test]
fn test_out_of_range_and_nan_fall_through() {
    assert_eq!(select_method(f64::NAN), Method::QuantumBased);
    assert_eq!(select_method(f64::NEG_INFINITY), Method::QuantumBased);
    assert_eq!(select_method(-3.0), Method::QuantumBased);
    assert_eq!(select_method(f64::INFINITY), Method::UniversalBased);
    assert_eq!(select_method(12.0), Method::UniversalBased);
}

#[test]
fn test_selection_is_monotonic() {
    let table = MethodTable::default_v1();
    let mut prev = table.select(-1.0);
    let mut x = -1.0f64;
    while x <= 2.0 {
        let current = table.select(x);
        assert!(current >= prev, "tier dropped at {x}");
        prev = current;
        x += 0.001;
    }
}

#[test]
fn test_custom_table() {
    let table = MethodTable {
        universal: 0.8,
        transcendent: 0.6,
        consciousness: 0.4,
    };
    assert!(table.is_descending());
    assert_eq!(table.select(0.7), Method::TranscendentBased);
    assert_eq!(table.select(0.4), Method::ConsciousnessBased);
    assert_eq!(table.select(0.39), Method::QuantumBased);
}

#[test]
fn test_non_descending_table_detected() {
    let table = MethodTable {
        universal: 0.8,
        transcendent: 0.9,
        consciousness: 0.4,
    };
    assert!(!table.is_descending());
}
