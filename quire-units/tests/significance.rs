//! End-to-end significance checks: decimal magnitudes go through parsing,
//! composite units, compaction and conversion without gaining or losing
//! trailing zeros.

use quire_core::count_trailing_zeros;
use quire_units::{parse_unit, Quantity};

#[test]
fn test_microliter_milligram_per_liter() {
    let q = Quantity::parse("2 microliter milligram/liter").unwrap();
    let compact = q.to_compact().unwrap();
    let nanograms = q.to(&parse_unit("ng").unwrap()).unwrap();

    let zeros = count_trailing_zeros(&q.magnitude.to_string());
    assert_eq!(count_trailing_zeros(&compact.magnitude.to_string()), zeros);
    assert_eq!(count_trailing_zeros(&nanograms.magnitude.to_string()), zeros);

    assert_eq!(compact.to_string(), "2 ng");
    assert_eq!(nanograms.to_string(), "2 ng");
}

#[test]
fn test_reference_magnitude_is_exact() {
    let q = Quantity::parse("2 microliter milligram/liter").unwrap();
    let kg = q.to_reference().unwrap();
    assert_eq!(kg.unit.symbol, "kg");
    assert_eq!(kg.magnitude.to_string(), "0.000000000002");
}

#[test]
fn test_literal_zeros_survive_round_trip() {
    for text in ["10 mL", "10.0 mL", "10.00 mL", "10.002 mL"] {
        let q = Quantity::parse(text).unwrap();
        let there = q.to_units("L").unwrap();
        let back = there.to_units("mL").unwrap();
        assert_eq!(
            back.magnitude.to_string(),
            q.magnitude.to_string(),
            "{} changed through {}", text, there
        );
    }
}

#[test]
fn test_compact_keeps_literal_digits() {
    let q = Quantity::parse("2.50 microgram").unwrap();
    let compact = q.to_compact().unwrap();
    assert_eq!(compact.to_string(), "2.50 µg");
}

#[test]
fn test_float_and_decimal_paths_agree() {
    let q = Quantity::parse("2 microliter milligram/liter").unwrap();
    let scale = q.unit.converter.scale().to_f64().unwrap();
    let float_ng = q.unit.converter.to_reference(&2.0_f64).unwrap() / 1e-12;
    assert!((float_ng - 2.0).abs() < 1e-9);
    assert!((scale - 1e-12).abs() < 1e-24);
}
