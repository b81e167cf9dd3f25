//! Integration tests: run the form's fixture vectors.
//!
//! Each fixture in tests/fixtures/ has:
//! - values.json: the form values as a presentation layer would hold them
//! - expect.json: expected validity and primary error per path
//!
//! These tests load the values into a store and compare the derived
//! validation against the expectation.

use donaform_kernel::{DonationEntry, FieldPath, FormStore, FormValues, RuleSet};
use serde_json::Value;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn run_fixture(name: &str) {
    let dir = fixtures_dir().join(name);

    let values_path = dir.join("values.json");
    let expect_path = dir.join("expect.json");

    let values_str = std::fs::read_to_string(&values_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", values_path.display()));
    let expect_str = std::fs::read_to_string(&expect_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", expect_path.display()));

    let values: FormValues = serde_json::from_str(&values_str)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", values_path.display()));
    let expected: Value = serde_json::from_str(&expect_str)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", expect_path.display()));

    let store = FormStore::new(values, RuleSet::default());
    let got = serde_json::json!({
        "valid": store.is_valid(),
        "errors": store.errors(),
    });

    assert_eq!(
        got,
        expected,
        "\n\nFixture: {name}\n\nGot:\n{}\n\nExpected:\n{}\n",
        serde_json::to_string_pretty(&got).expect("json"),
        serde_json::to_string_pretty(&expected).expect("json"),
    );
}

#[test]
fn valid_two_institutions() {
    run_fixture("valid_two_institutions");
}

#[test]
fn sum_short_of_hundred() {
    run_fixture("sum_short_of_hundred");
}

#[test]
fn four_entries_over_cap() {
    run_fixture("four_entries_over_cap");
}

#[test]
fn terms_not_accepted() {
    run_fixture("terms_not_accepted");
}

#[test]
fn empty_name() {
    run_fixture("empty_name");
}

#[test]
fn name_too_long() {
    run_fixture("name_too_long");
}

#[test]
fn initial_blank_form() {
    run_fixture("initial_blank_form");
}

#[test]
fn no_donations() {
    run_fixture("no_donations");
}

#[test]
fn blank_numeric_inputs() {
    run_fixture("blank_numeric_inputs");
}

fn complete_values(percentages: &[f64]) -> FormValues {
    FormValues {
        full_name: "Jane Doe".to_string(),
        donations_amount: Some(50.0),
        terms_accepted: true,
        donations: percentages
            .iter()
            .enumerate()
            .map(|(i, p)| DonationEntry::new(format!("Institution {i}"), *p))
            .collect(),
    }
}

#[test]
fn any_split_summing_to_hundred_is_valid() {
    for split in [
        vec![100.0],
        vec![50.0, 50.0],
        vec![1.0, 99.0],
        vec![20.0, 30.0, 50.0],
        vec![33.5, 33.5, 33.0],
    ] {
        let store = FormStore::new(complete_values(&split), RuleSet::default());
        assert!(store.is_valid(), "{split:?}: {:?}", store.errors());
    }
}

#[test]
fn any_other_sum_is_quoted_in_aggregate_error() {
    for (split, sum) in [
        (vec![99.0], "99"),
        (vec![50.0, 51.0], "101"),
        (vec![10.0, 10.0, 10.0], "30"),
        (vec![12.5, 50.0], "62.5"),
    ] {
        let store = FormStore::new(complete_values(&split), RuleSet::default());
        assert!(!store.is_valid());
        let message = store
            .errors()
            .get(&FieldPath::Donations)
            .unwrap_or_else(|| panic!("{split:?} should fail the sum rule"));
        assert!(
            message.contains(&format!("you have {sum}%")),
            "{split:?}: {message}"
        );
    }
}

#[test]
fn list_lengths_outside_bounds_are_invalid() {
    for len in [0usize, 4, 5] {
        let split = vec![100.0 / len.max(1) as f64; len];
        let store = FormStore::new(complete_values(&split), RuleSet::default());
        assert!(!store.is_valid(), "length {len} should be invalid");
    }
}
